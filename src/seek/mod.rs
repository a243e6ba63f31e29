//! Seek requests between timestamp links and player instances.
//!
//! A link on the page that hosts its target player dispatches a
//! [`SeekEvent`] directly. A link into another page cannot reach a live
//! player, so it leaves a [`SeekRequest`] in a [`SeekSlot`] for the player
//! to pick up when that page renders.
//!
//! The slot record is a single colon-delimited string:
//!
//! ```text
//! <lineStart>:<lineEnd>:<seconds>
//! ```
//!
//! Hover previews always contain exactly one player and write an empty
//! line range (`"::17.02"`).

mod slot;

use std::fmt;
use std::str::FromStr;

use crate::link::DocumentId;
use crate::timecode::TimeCode;

pub use slot::{FileSlot, MemorySlot, SeekSlot};

/// Errors from reading or writing the seek slot.
#[derive(Debug, thiserror::Error)]
pub enum SeekSlotError {
    #[error("Failed to access seek slot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed seek record: {0:?}")]
    Malformed(String),
}

/// Inclusive source line range of a bookmark block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains(&self, other: &LineRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Same-page `seek-to-timestamp` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeekEvent {
    /// Document hosting the target block
    pub document: DocumentId,
    pub lines: LineRange,
    pub time: TimeCode,
}

/// Cross-page seek handoff. `lines` is `None` for hover requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekRequest {
    pub lines: Option<LineRange>,
    pub time: TimeCode,
}

impl SeekRequest {
    /// Request written on hover, addressed to whichever player renders next.
    pub fn hover(time: TimeCode) -> Self {
        Self { lines: None, time }
    }

    /// Request written on click, addressed to one bookmark block.
    pub fn block(lines: LineRange, time: TimeCode) -> Self {
        Self {
            lines: Some(lines),
            time,
        }
    }
}

impl fmt::Display for SeekRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lines {
            Some(lines) => write!(f, "{}:{}:", lines.start, lines.end)?,
            None => write!(f, "::")?,
        }
        write!(f, "{}", self.time.as_secs_f64())
    }
}

impl FromStr for SeekRequest {
    type Err = SeekSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SeekSlotError::Malformed(s.to_string());

        let mut parts = s.trim().splitn(3, ':');
        let (start, end, seconds) = match (parts.next(), parts.next(), parts.next()) {
            (Some(start), Some(end), Some(seconds)) => (start, end, seconds),
            _ => return Err(malformed()),
        };

        let lines = match (start, end) {
            ("", "") => None,
            (start, end) => Some(LineRange::new(
                start.parse().map_err(|_| malformed())?,
                end.parse().map_err(|_| malformed())?,
            )),
        };

        let seconds: f64 = seconds.parse().map_err(|_| malformed())?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(malformed());
        }

        Ok(SeekRequest {
            lines,
            time: TimeCode::from_secs_f64(seconds),
        })
    }
}
