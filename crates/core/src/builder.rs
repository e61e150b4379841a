//! Interval construction for the two config families.
//!
//! Operator configs carry an explicit `<start>-<end>` name (or `-present` for
//! a still-active config); auto configs embed only their activation start, and
//! each interval runs until the next auto config takes over.

use thiserror::Error;

use crate::clock::Clock;
use crate::interval::ConfigInterval;
use crate::timestamp::{
    base_name, parse_timestamp, TimestampError, CONFIG_TIME_FORMAT, CONFIG_TIME_RE,
};

/// Operator end component meaning "still active, ends now".
pub const OPEN_END_SENTINEL: &str = "present";

const OPERATOR_TIME_DELIMITER: char = '-';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntervalBuildError {
    #[error("operator config '{identifier}' is not of the form '<start>-<end>'")]
    MalformedOperatorName { identifier: String },

    #[error("invalid operator config start time: {0}")]
    OperatorStartTime(TimestampError),

    #[error("invalid operator config end time: {0}")]
    OperatorEndTime(TimestampError),

    #[error("invalid auto config start time: {0}")]
    AutoStartTime(TimestampError),
}

/// Build one interval per operator config identifier, in sorted order.
///
/// Sorting is lexicographic except that identifiers containing the open-ended
/// sentinel order after every bounded identifier, so a still-active config is
/// always last. Each interval keeps its own independently resolved bounds; a
/// sentinel end resolves to the clock's current time.
pub fn build_operator_config_intervals(
    config_ids: &[String],
    clock: &impl Clock,
) -> Result<Vec<ConfigInterval>, IntervalBuildError> {
    let mut ordered: Vec<&String> = config_ids.iter().collect();
    ordered.sort_by(|a, b| {
        (a.contains(OPEN_END_SENTINEL), a.as_str())
            .cmp(&(b.contains(OPEN_END_SENTINEL), b.as_str()))
    });

    let mut intervals = Vec::with_capacity(ordered.len());
    for id in ordered {
        let name = base_name(id);
        let components: Vec<&str> = name.split(OPERATOR_TIME_DELIMITER).collect();
        let (start_component, end_component) = match components[..] {
            [start, end] => (start, end),
            _ => {
                return Err(IntervalBuildError::MalformedOperatorName {
                    identifier: id.clone(),
                })
            }
        };

        let start = parse_timestamp(start_component, &CONFIG_TIME_RE, CONFIG_TIME_FORMAT)
            .map_err(IntervalBuildError::OperatorStartTime)?;
        let end = if end_component == OPEN_END_SENTINEL {
            clock.now()
        } else {
            parse_timestamp(end_component, &CONFIG_TIME_RE, CONFIG_TIME_FORMAT)
                .map_err(IntervalBuildError::OperatorEndTime)?
        };

        intervals.push(ConfigInterval {
            start,
            end,
            source: id.clone(),
        });
    }

    Ok(intervals)
}

/// Build one interval per auto config identifier, in sorted order.
///
/// Starts are parsed first, then each end is derived as the next interval's
/// start; the last interval ends at the clock's current time. The result
/// partitions the timeline with no gaps and no overlaps.
pub fn build_auto_config_intervals(
    config_ids: &[String],
    clock: &impl Clock,
) -> Result<Vec<ConfigInterval>, IntervalBuildError> {
    let mut ordered: Vec<&String> = config_ids.iter().collect();
    ordered.sort();

    let mut starts = Vec::with_capacity(ordered.len());
    for id in &ordered {
        let start = parse_timestamp(id, &CONFIG_TIME_RE, CONFIG_TIME_FORMAT)
            .map_err(IntervalBuildError::AutoStartTime)?;
        starts.push(start);
    }

    let now = clock.now();
    Ok(ordered
        .into_iter()
        .enumerate()
        .map(|(index, id)| ConfigInterval {
            start: starts[index],
            end: starts.get(index + 1).copied().unwrap_or(now),
            source: id.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2023, 1, 3, 0, 0, 0).unwrap())
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn operator_intervals_keep_their_own_bounds() {
        let configs = ids(&[
            "20230101T000000Z-20230102T000000Z",
            "20230102T000000Z-20230103T000000Z",
        ]);

        let intervals = build_operator_config_intervals(&configs, &clock()).unwrap();

        assert_eq!(
            intervals,
            vec![
                ConfigInterval {
                    start: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
                    end: Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap(),
                    source: "20230101T000000Z-20230102T000000Z".to_string(),
                },
                ConfigInterval {
                    start: Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap(),
                    end: Utc.with_ymd_and_hms(2023, 1, 3, 0, 0, 0).unwrap(),
                    source: "20230102T000000Z-20230103T000000Z".to_string(),
                },
            ]
        );
    }

    #[test]
    fn open_ended_interval_resolves_to_now_and_sorts_last() {
        // The sentinel identifier is lexicographically smaller than the
        // bounded one but must still order last.
        let configs = ids(&[
            "20230101T000000Z-present",
            "20230110T000000Z-20230111T000000Z",
        ]);

        let intervals = build_operator_config_intervals(&configs, &clock()).unwrap();

        assert_eq!(intervals[0].source, "20230110T000000Z-20230111T000000Z");
        assert_eq!(intervals[1].source, "20230101T000000Z-present");
        assert_eq!(intervals[1].end, clock().now());
    }

    #[test]
    fn operator_intervals_use_the_final_path_component() {
        let configs = ids(&["/site/Config_Operator/20230101T000000Z-20230102T000000Z"]);

        let intervals = build_operator_config_intervals(&configs, &clock()).unwrap();

        assert_eq!(
            intervals[0].start,
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            intervals[0].source,
            "/site/Config_Operator/20230101T000000Z-20230102T000000Z"
        );
    }

    #[test]
    fn operator_name_without_separator_is_rejected() {
        let configs = ids(&["20230101T000000Z"]);

        let result = build_operator_config_intervals(&configs, &clock());

        assert_eq!(
            result,
            Err(IntervalBuildError::MalformedOperatorName {
                identifier: "20230101T000000Z".to_string()
            })
        );
    }

    #[test]
    fn operator_component_without_timestamp_is_rejected() {
        let configs = ids(&["20230101T000000Z-backup"]);

        let result = build_operator_config_intervals(&configs, &clock());

        assert!(matches!(
            result,
            Err(IntervalBuildError::OperatorEndTime(TimestampError::NotFound { .. }))
        ));
    }

    #[test]
    fn auto_intervals_partition_the_timeline() {
        let configs = ids(&[
            "/site/Config_Auto/20230102T000000Z",
            "/site/Config_Auto/20230101T000000Z",
        ]);

        let intervals = build_auto_config_intervals(&configs, &clock()).unwrap();

        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].source, "/site/Config_Auto/20230101T000000Z");
        assert_eq!(intervals[0].end, intervals[1].start);
        assert_eq!(intervals[1].end, clock().now());
    }

    #[test]
    fn auto_config_without_timestamp_is_rejected() {
        let configs = ids(&["/site/Config_Auto/latest"]);

        let result = build_auto_config_intervals(&configs, &clock());

        assert!(matches!(
            result,
            Err(IntervalBuildError::AutoStartTime(TimestampError::NotFound { .. }))
        ));
    }

    #[test]
    fn auto_config_with_two_timestamps_is_rejected() {
        let configs = ids(&["/site/20230101T000000Z/Config_Auto/20230102T000000Z"]);

        let result = build_auto_config_intervals(&configs, &clock());

        assert!(matches!(
            result,
            Err(IntervalBuildError::AutoStartTime(TimestampError::Ambiguous { .. }))
        ));
    }

    #[test]
    fn empty_input_builds_no_intervals() {
        assert_eq!(build_auto_config_intervals(&[], &clock()), Ok(vec![]));
        assert_eq!(build_operator_config_intervals(&[], &clock()), Ok(vec![]));
    }
}
