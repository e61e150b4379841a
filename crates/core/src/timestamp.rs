//! Timestamp extraction and parsing for config and RangeSeries identifiers.
//!
//! Config identifiers embed compact `YYYYMMDDTHHMMSSZ` timestamps; RangeSeries
//! file names embed underscore-delimited `YYYY_MM_DD_HHMMSS` timestamps. Both
//! grammars require exactly one occurrence in the searched string.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use thiserror::Error;

pub const CONFIG_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";
pub const SERIES_TIME_FORMAT: &str = "%Y_%m_%d_%H%M%S";

lazy_static::lazy_static! {
    pub static ref CONFIG_TIME_RE: Regex =
        Regex::new(r"\d{8}T\d{6}Z").expect("config timestamp pattern");
    pub static ref SERIES_TIME_RE: Regex =
        Regex::new(r"\d{4}_\d{2}_\d{2}_\d{6}").expect("series timestamp pattern");
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("no timestamp found in '{identifier}'")]
    NotFound { identifier: String },

    #[error("multiple timestamps found in '{identifier}'")]
    Ambiguous { identifier: String },

    #[error("unparseable timestamp '{value}' in '{identifier}': {message}")]
    Unparseable {
        identifier: String,
        value: String,
        message: String,
    },
}

/// Extract the single occurrence of `pattern` from `identifier`.
///
/// Zero and multiple occurrences are both errors; a config or data file name
/// with an ambiguous timestamp cannot be placed on the timeline.
pub fn extract_timestamp_str<'a>(
    identifier: &'a str,
    pattern: &Regex,
) -> Result<&'a str, TimestampError> {
    let mut matches = pattern.find_iter(identifier);
    let first = matches.next().ok_or_else(|| TimestampError::NotFound {
        identifier: identifier.to_string(),
    })?;
    if matches.next().is_some() {
        return Err(TimestampError::Ambiguous {
            identifier: identifier.to_string(),
        });
    }
    Ok(first.as_str())
}

/// Extract and parse the single timestamp embedded in `identifier`.
pub fn parse_timestamp(
    identifier: &str,
    pattern: &Regex,
    format: &str,
) -> Result<DateTime<Utc>, TimestampError> {
    let raw = extract_timestamp_str(identifier, pattern)?;
    let parsed =
        NaiveDateTime::parse_from_str(raw, format).map_err(|error| TimestampError::Unparseable {
            identifier: identifier.to_string(),
            value: raw.to_string(),
            message: error.to_string(),
        })?;
    Ok(parsed.and_utc())
}

/// Final path component of an identifier, or the identifier itself when it
/// has none.
pub(crate) fn base_name(identifier: &str) -> &str {
    Path::new(identifier)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(identifier)
}
