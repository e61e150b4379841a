pub mod builder;
pub mod clock;
pub mod interval;
pub mod resolver;
pub mod timestamp;
pub mod validate;

pub use builder::{
    build_auto_config_intervals, build_operator_config_intervals, IntervalBuildError,
    OPEN_END_SENTINEL,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use interval::ConfigInterval;
pub use resolver::{
    map_series_to_configs, SeriesConfigMap, SkipReason, SkippedSeries, NO_MATCH,
};
pub use timestamp::TimestampError;
pub use validate::{
    check_operator_configs, validate_operator_configs, FatalReporter, RecordingReporter,
    ValidationError,
};
