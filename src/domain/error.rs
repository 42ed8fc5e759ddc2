//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for trailstop.
///
/// Construction errors (bad lookback, negative multiplier, malformed bars)
/// and range errors are distinct from a rule answering `false`: a rule never
/// reports a breach on an error path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrailstopError {
    #[error("invalid lookback {lookback}: must be at least 1")]
    InvalidLookback { lookback: usize },

    #[error("invalid multiplier {multiplier}: must be non-negative")]
    InvalidMultiplier { multiplier: String },

    #[error("invalid maximum bar count {count}: must be at least 1")]
    InvalidMaxBarCount { count: usize },

    #[error("invalid bar for {date}: {reason}")]
    InvalidBar { date: NaiveDate, reason: String },

    #[error("bar for {date} does not advance the series (last bar is {last})")]
    OutOfOrderBar { date: NaiveDate, last: NaiveDate },

    #[error("index {index} outside retained range [{begin}, {end}]")]
    IndexOutOfRange {
        index: usize,
        begin: usize,
        end: usize,
    },

    #[error("series is empty")]
    EmptySeries,

    #[error("cannot represent {value} in the numeric backing")]
    NumericConversion { value: f64 },

    #[error("position already open since index {entry_index}")]
    PositionAlreadyOpen { entry_index: usize },

    #[error("no open position")]
    NoOpenPosition,

    #[error("exit index {exit_index} precedes entry index {entry_index}")]
    ExitBeforeEntry {
        entry_index: usize,
        exit_index: usize,
    },
}
