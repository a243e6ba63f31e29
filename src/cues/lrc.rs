//! LRC lyric lines: `[MM:SS]text`, `[MM:SS.cc]text`, `[MM:SS.mmm]text`.

use std::sync::OnceLock;

use regex::Regex;

use super::LyricEntry;
use crate::timecode::{fraction_millis, TimeCode};

fn line_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^\[(\d+):(\d{2})(?:\.(\d{2,3}))?\](.*)$").expect("lyric line pattern")
    })
}

/// Parse every matching line; metadata tags and stray text are skipped.
pub fn parse_lyric_document(text: &str) -> Vec<LyricEntry> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<LyricEntry> {
    let caps = line_regex().captures(line.trim())?;

    let minutes = caps.get(1)?.as_str().parse().ok()?;
    let seconds = caps.get(2)?.as_str().parse().ok()?;
    let millis = match caps.get(3) {
        Some(fraction) => fraction_millis(fraction.as_str())?,
        None => 0,
    };

    Some(LyricEntry {
        time: TimeCode::from_parts(minutes, seconds, millis)?,
        text: caps.get(4).map_or("", |m| m.as_str()).trim().to_string(),
    })
}
