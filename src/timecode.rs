//! Canonical `MM:SS.mmm` timestamps.
//!
//! A [`TimeCode`] is a non-negative point in time held at millisecond
//! resolution. Formatting is strict (always three millisecond digits, minutes
//! padded to at least two digits); parsing is lenient and also accepts the
//! `HH:MM:SS,mmm` subtitle dialect, whose hour component is discarded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60_000;

/// Error returned when text is not a recognizable timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a timestamp: {0:?}")]
pub struct TimeCodeError(pub String);

/// A point in a media timeline, in whole milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeCode {
    millis: u64,
}

impl TimeCode {
    pub const ZERO: TimeCode = TimeCode { millis: 0 };

    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Convert fractional seconds, rounding half away from zero at the
    /// third decimal. Negative and non-finite values clamp to zero.
    pub fn from_secs_f64(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Self::ZERO;
        }
        Self {
            millis: (seconds * 1000.0).round() as u64,
        }
    }

    /// Build from minute, second and millisecond components.
    ///
    /// Minutes are unbounded; returns `None` only on overflow.
    pub fn from_parts(minutes: u64, seconds: u64, millis: u64) -> Option<Self> {
        let total = minutes
            .checked_mul(MILLIS_PER_MINUTE)?
            .checked_add(seconds.checked_mul(MILLIS_PER_SECOND)?)?
            .checked_add(millis)?;
        Some(Self { millis: total })
    }

    pub const fn as_millis(&self) -> u64 {
        self.millis
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.millis as f64 / 1000.0
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.millis / MILLIS_PER_MINUTE;
        let rest = self.millis % MILLIS_PER_MINUTE;
        write!(
            f,
            "{:02}:{:02}.{:03}",
            minutes,
            rest / MILLIS_PER_SECOND,
            rest % MILLIS_PER_SECOND
        )
    }
}

impl FromStr for TimeCode {
    type Err = TimeCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_millis(s)
            .map(TimeCode::from_millis)
            .ok_or_else(|| TimeCodeError(s.to_string()))
    }
}

impl Serialize for TimeCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let text = String::deserialize(deserializer)?;
        text.parse().map_err(Error::custom)
    }
}

/// Format seconds as `MM:SS.mmm`.
pub fn format_time(seconds: f64) -> String {
    TimeCode::from_secs_f64(seconds).to_string()
}

/// Parse `MM:SS[.fff]` or `HH:MM:SS[,.]fff` into seconds.
pub fn parse_time(text: &str) -> Option<f64> {
    text.parse::<TimeCode>().ok().map(|t| t.as_secs_f64())
}

/// Milliseconds from a 1-3 digit fraction, right-padded with zeros.
///
/// `"5"` is 500, `"02"` is 20, `"002"` is 2.
pub(crate) fn fraction_millis(digits: &str) -> Option<u64> {
    if digits.is_empty() || digits.len() > 3 || !is_digits(digits) {
        return None;
    }
    format!("{:0<3}", digits).parse().ok()
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_millis(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.trim().split(':').collect();

    // Subtitle hours are always 00 in practice and are dropped.
    let (minutes, seconds, allow_comma) = match parts.as_slice() {
        [minutes, seconds] => (*minutes, *seconds, false),
        [hours, minutes, seconds] if is_digits(hours) => (*minutes, *seconds, true),
        _ => return None,
    };

    if !is_digits(minutes) {
        return None;
    }

    let (whole, fraction) = match seconds.find(|c: char| c == '.' || (allow_comma && c == ',')) {
        Some(idx) => (&seconds[..idx], Some(&seconds[idx + 1..])),
        None => (seconds, None),
    };

    if !is_digits(whole) || whole.len() > 2 {
        return None;
    }

    let millis = match fraction {
        Some(digits) => fraction_millis(digits)?,
        None => 0,
    };

    TimeCode::from_parts(minutes.parse().ok()?, whole.parse().ok()?, millis).map(|t| t.millis)
}
