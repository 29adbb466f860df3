//! Error types for the heat sheet core.

use thiserror::Error;

/// A time token that could not be turned into seconds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeTokenError {
    /// The token is not a number, or not a `minutes:seconds` pair of numbers.
    #[error("malformed time token: {token:?}")]
    Malformed { token: String },

    /// The token parsed, but to a negative number of seconds.
    #[error("time token is negative: {token:?}")]
    Negative { token: String },
}

/// Errors raised while segmenting heat sheet text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// A token accepted by the extraction pattern failed to parse.
    ///
    /// The pattern only admits digits, one colon and one dot, so this indicates
    /// the extractor and the token parser disagree.
    #[error("line {line_number}: extracted time failed to parse in {line:?}")]
    GrammarMismatch {
        line_number: usize,
        line: String,
        #[source]
        source: TimeTokenError,
    },
}

/// Violations of the schedule model's invariants.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    /// A heat must record at least one time.
    #[error("a heat must contain at least one time")]
    EmptyHeat,
}

/// Invalid estimator configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Gap and transition durations must be finite and non-negative.
    #[error("{field} must be a finite, non-negative number of seconds, got {value}")]
    InvalidSeconds { field: &'static str, value: f64 },
}
