//! Resolution of RangeSeries files against the two interval families.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::interval::ConfigInterval;
use crate::timestamp::{
    base_name, parse_timestamp, TimestampError, SERIES_TIME_FORMAT, SERIES_TIME_RE,
};

/// Value recorded when no interval in either family matches.
pub const NO_MATCH: &str = "";

/// Why a RangeSeries file was excluded from the mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingTimestamp,
    AmbiguousTimestamp,
    UnparseableTimestamp,
}

/// A RangeSeries file excluded from the mapping, with the offending detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedSeries {
    pub identifier: String,
    pub reason: SkipReason,
    pub detail: String,
}

/// Result of a resolution pass.
///
/// `entries` maps every resolvable RangeSeries identifier to its config (or
/// [`NO_MATCH`]); `skipped` lists files whose timestamp could not be read;
/// `unmatched` counts entries that resolved to [`NO_MATCH`]. A `BTreeMap`
/// keeps the persisted output deterministically ordered.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesConfigMap {
    pub entries: BTreeMap<String, String>,
    pub skipped: Vec<SkippedSeries>,
    pub unmatched: usize,
}

/// Map each RangeSeries identifier to the config active when it was recorded.
///
/// Operator intervals take precedence: they are searched first, in order, and
/// auto intervals are only consulted when no operator interval contains the
/// timestamp. Files without a readable timestamp are skipped and reported;
/// files whose timestamp matches no interval are kept with [`NO_MATCH`].
pub fn map_series_to_configs(
    series_ids: &[String],
    auto_intervals: &[ConfigInterval],
    operator_intervals: &[ConfigInterval],
) -> SeriesConfigMap {
    let mut result = SeriesConfigMap::default();

    for id in series_ids {
        let name = base_name(id);
        let timestamp = match parse_timestamp(name, &SERIES_TIME_RE, SERIES_TIME_FORMAT) {
            Ok(timestamp) => timestamp,
            Err(error) => {
                warn!(identifier = %id, %error, "skipping RangeSeries file");
                result.skipped.push(SkippedSeries {
                    identifier: id.clone(),
                    reason: skip_reason(&error),
                    detail: error.to_string(),
                });
                continue;
            }
        };

        let matched = matching_config(timestamp, auto_intervals, operator_intervals);
        if matched.is_none() {
            result.unmatched += 1;
        }
        result
            .entries
            .insert(id.clone(), matched.unwrap_or(NO_MATCH).to_string());
    }

    result
}

/// First containing interval, operator intervals before auto intervals.
fn matching_config<'a>(
    timestamp: DateTime<Utc>,
    auto_intervals: &'a [ConfigInterval],
    operator_intervals: &'a [ConfigInterval],
) -> Option<&'a str> {
    operator_intervals
        .iter()
        .chain(auto_intervals.iter())
        .find(|interval| interval.contains(timestamp))
        .map(|interval| interval.source.as_str())
}

fn skip_reason(error: &TimestampError) -> SkipReason {
    match error {
        TimestampError::NotFound { .. } => SkipReason::MissingTimestamp,
        TimestampError::Ambiguous { .. } => SkipReason::AmbiguousTimestamp,
        TimestampError::Unparseable { .. } => SkipReason::UnparseableTimestamp,
    }
}
