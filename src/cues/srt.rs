//! SRT / WebVTT cue blocks.
//!
//! A document is a sequence of blank-line separated blocks:
//!
//! ```text
//! 1
//! 00:00:00,002 --> 00:00:02,669
//! line one
//! ```
//!
//! The numeric index is optional. The hour component of each timing is
//! dropped, see [`crate::timecode`].

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::SubtitleEntry;
use crate::timecode::TimeCode;

fn timing_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        // Not anchored at the end: WebVTT cue settings may follow the end time.
        Regex::new(
            r"^\s*(\d+):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d+):(\d{2}):(\d{2})[,.](\d{3})",
        )
        .expect("subtitle timing pattern")
    })
}

/// Parse every well-formed cue block; anything else is skipped.
pub fn parse_subtitle_document(text: &str) -> Vec<SubtitleEntry> {
    blocks(text.trim())
        .iter()
        .filter_map(|block| {
            let entry = parse_block(block);
            if entry.is_none() {
                tracing::trace!(first_line = ?block.first(), "skipping subtitle block");
            }
            entry
        })
        .collect()
}

fn blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn is_index_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

fn parse_block(block: &[&str]) -> Option<SubtitleEntry> {
    let lines = match block.split_first() {
        Some((first, rest)) if is_index_line(first) => rest,
        _ => block,
    };

    let (timing, text) = lines.split_first()?;
    if text.is_empty() {
        return None;
    }

    let caps = timing_regex().captures(timing)?;

    Some(SubtitleEntry {
        start: timing_at(&caps, 2)?,
        end: timing_at(&caps, 6)?,
        text: text.join("\n").trim().to_string(),
    })
}

/// Minutes, seconds and millis starting at capture group `first`.
fn timing_at(caps: &Captures<'_>, first: usize) -> Option<TimeCode> {
    let group = |i: usize| -> Option<u64> { caps.get(first + i)?.as_str().parse().ok() };
    TimeCode::from_parts(group(0)?, group(1)?, group(2)?)
}
