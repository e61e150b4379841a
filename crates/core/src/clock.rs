use chrono::{DateTime, SubsecRound, Utc};

/// Source of "current time" for interval construction and validation.
///
/// The mapping core reads the wall clock in exactly two places: resolving
/// open-ended interval ends and checking for future-dated operator configs.
/// Everything else is deterministic over its inputs.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, truncated to whole seconds to match the timestamp grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(0)
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn system_clock_truncates_to_whole_seconds() {
        let now = SystemClock.now();
        assert_eq!(now.nanosecond(), 0);
    }

    #[test]
    fn fixed_clock_returns_pinned_instant() {
        let instant = Utc.with_ymd_and_hms(2023, 1, 3, 0, 0, 0).unwrap();
        assert_eq!(FixedClock(instant).now(), instant);
    }
}
