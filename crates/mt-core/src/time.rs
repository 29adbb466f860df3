//! Seed/entry time tokens: parsing single tokens and extracting them from text.
//!
//! Two token shapes are recognised:
//! - `M:SS.hh` — minutes, colon, seconds with hundredths (`1:03.14`)
//! - `SS.hh` — bare seconds with hundredths (`13.44`)

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::TimeTokenError;

/// Pre-compiled pattern for time tokens embedded in a line.
///
/// The longer `M:SS.hh` alternative comes first so `1:03.14` is never read as `03.14`.
/// ASCII digit classes keep the pattern in step with the float parser.
static TIME_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[0-9]+:[0-9]{2}\.[0-9]{2}|[0-9]{1,2}\.[0-9]{2})\b")
        .expect("time token pattern is valid")
});

/// A non-negative duration in seconds.
///
/// Zero is a real (if suspicious) reading, not "absent".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TimeValue(f64);

impl TimeValue {
    pub const ZERO: Self = Self(0.0);

    /// Wraps a number of seconds, rejecting negative and non-finite values.
    pub fn from_seconds(seconds: f64) -> Option<Self> {
        (seconds.is_finite() && seconds >= 0.0).then_some(Self(seconds + 0.0))
    }

    /// Returns the value in seconds.
    pub const fn seconds(self) -> f64 {
        self.0
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for TimeValue {
    type Err = TimeTokenError;

    /// Parses `M:SS.hh` or `SS.hh`. Blank input is zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Ok(Self::ZERO);
        }

        let seconds = match token.split_once(':') {
            Some((minutes, seconds)) => {
                parse_component(minutes, token)? * 60.0 + parse_component(seconds, token)?
            }
            None => parse_component(token, token)?,
        };

        Self::from_seconds(seconds).ok_or_else(|| TimeTokenError::Malformed {
            token: token.to_string(),
        })
    }
}

impl TryFrom<f64> for TimeValue {
    type Error = TimeTokenError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_seconds(value).ok_or_else(|| TimeTokenError::Negative {
            token: value.to_string(),
        })
    }
}

impl From<TimeValue> for f64 {
    fn from(value: TimeValue) -> Self {
        value.0
    }
}

/// Parses one numeric half of a token.
fn parse_component(part: &str, token: &str) -> Result<f64, TimeTokenError> {
    let value: f64 = part.trim().parse().map_err(|_| TimeTokenError::Malformed {
        token: token.to_string(),
    })?;

    if !value.is_finite() {
        return Err(TimeTokenError::Malformed {
            token: token.to_string(),
        });
    }
    if value < 0.0 {
        return Err(TimeTokenError::Negative {
            token: token.to_string(),
        });
    }
    Ok(value)
}

/// Parses an optional time token into seconds.
///
/// `None` and blank tokens yield zero; anything else must be `M:SS.hh` or `SS.hh`
/// (or any plain non-negative number of seconds).
pub fn parse_time_token(token: Option<&str>) -> Result<TimeValue, TimeTokenError> {
    token.map_or(Ok(TimeValue::ZERO), str::parse)
}

/// Returns every time token on a line, left to right, as raw text.
pub fn find_time_tokens(line: &str) -> impl Iterator<Item = &str> {
    TIME_TOKEN_RE.find_iter(line).map(|m| m.as_str())
}

/// Extracts every time on a line, left to right.
///
/// Lines without times (headers, names, page furniture) yield an empty vector.
pub fn extract_times(line: &str) -> Result<Vec<TimeValue>, TimeTokenError> {
    find_time_tokens(line).map(str::parse).collect()
}
