//! Consistency checks over operator config intervals.
//!
//! Auto intervals are overlap-free by construction and are not checked here.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::clock::Clock;
use crate::interval::ConfigInterval;

/// Sink for fatal validation findings.
///
/// The validator never terminates the process itself; callers decide what a
/// fatal report means. Production callers abort the run, tests record calls.
pub trait FatalReporter {
    fn fatal(&mut self, message: &str);

    fn fatal_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.fatal(&args.to_string());
    }
}

/// Reporter that records fatal calls instead of terminating.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub messages: Vec<String>,
    pub fatal_called: bool,
}

impl FatalReporter for RecordingReporter {
    fn fatal(&mut self, message: &str) {
        self.messages.push(message.to_string());
        self.fatal_called = true;
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("operator configs overlap: '{current}' starts at {start}, before '{previous}' ends at {end}")]
    Overlap {
        previous: String,
        current: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("operator config '{identifier}' starts at {start}, after the current time {now}")]
    FutureDated {
        identifier: String,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

/// Report every operator interval violation through `reporter`.
///
/// Expects the sorted order produced by the builder. An interval starting
/// strictly before its predecessor's end is an overlap; directly adjacent
/// intervals pass. Because open-ended intervals sort last and end "now", two
/// open-ended configs always collide: at most one may be active at a time.
pub fn validate_operator_configs(
    intervals: &[ConfigInterval],
    clock: &impl Clock,
    reporter: &mut dyn FatalReporter,
) {
    for violation in violations(intervals, clock) {
        reporter.fatal_fmt(format_args!("{violation}"));
    }
}

/// Structured-error form of [`validate_operator_configs`], returning the
/// first violation.
pub fn check_operator_configs(
    intervals: &[ConfigInterval],
    clock: &impl Clock,
) -> Result<(), ValidationError> {
    match violations(intervals, clock).into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

fn violations(intervals: &[ConfigInterval], clock: &impl Clock) -> Vec<ValidationError> {
    let now = clock.now();
    let mut found = Vec::new();

    for pair in intervals.windows(2) {
        if pair[1].start < pair[0].end {
            found.push(ValidationError::Overlap {
                previous: pair[0].source.clone(),
                current: pair[1].source.clone(),
                start: pair[1].start,
                end: pair[0].end,
            });
        }
    }

    for interval in intervals {
        if interval.start > now {
            found.push(ValidationError::FutureDated {
                identifier: interval.source.clone(),
                start: interval.start,
                now,
            });
        }
    }

    found
}
