//! Bookmark lists consumed by player instances.
//!
//! Inline callout comments and externally sourced lyric/subtitle files both
//! end up as a [`BookmarkList`]: an ordered list of display strings. Items
//! built from cues follow a fixed layout so they can be turned back into seek
//! targets:
//!
//! - lyric: `"<time> --- <text>"`
//! - subtitle: `"<start>-<end> --- <text>"`

use std::fmt;

use crate::cues::{Cues, LyricEntry, SubtitleEntry};
use crate::timecode::TimeCode;

/// Separates the timing head of an item from its text.
pub const SEPARATOR: &str = " --- ";

/// A bookmark item split into its timing and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub start: TimeCode,
    pub end: Option<TimeCode>,
    pub text: String,
}

impl Bookmark {
    pub fn at(time: TimeCode, text: impl Into<String>) -> Self {
        Self {
            start: time,
            end: None,
            text: text.into(),
        }
    }

    pub fn span(start: TimeCode, end: TimeCode, text: impl Into<String>) -> Self {
        Self {
            start,
            end: Some(end),
            text: text.into(),
        }
    }

    /// Recover the timing of a rendered item.
    ///
    /// Free-text items without a leading timestamp return `None`.
    pub fn parse(item: &str) -> Option<Self> {
        let (head, text) = item.split_once(SEPARATOR)?;
        let head = head.trim();

        // Minute widths vary, so split the range on the dash between times.
        match head.split_once('-') {
            Some((start, end)) => Some(Self::span(start.parse().ok()?, end.parse().ok()?, text)),
            None => Some(Self::at(head.parse().ok()?, text)),
        }
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}{}{}", self.start, end, SEPARATOR, self.text),
            None => write!(f, "{}{}{}", self.start, SEPARATOR, self.text),
        }
    }
}

impl From<&LyricEntry> for Bookmark {
    fn from(entry: &LyricEntry) -> Self {
        Bookmark::at(entry.time, entry.text.clone())
    }
}

impl From<&SubtitleEntry> for Bookmark {
    fn from(entry: &SubtitleEntry) -> Self {
        Bookmark::span(entry.start, entry.end, entry.text.clone())
    }
}

/// Ordered bookmark items for one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkList {
    items: Vec<String>,
}

impl BookmarkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap inline list items verbatim.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_lyrics(entries: &[LyricEntry]) -> Self {
        Self::from_items(entries.iter().map(|e| Bookmark::from(e).to_string()))
    }

    pub fn from_subtitles(entries: &[SubtitleEntry]) -> Self {
        Self::from_items(entries.iter().map(|e| Bookmark::from(e).to_string()))
    }

    pub fn from_cues(cues: &Cues) -> Self {
        match cues {
            Cues::Lyrics(entries) => Self::from_lyrics(entries),
            Cues::Subtitles(entries) => Self::from_subtitles(entries),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, bookmark: &Bookmark) {
        self.items.push(bookmark.to_string());
    }

    /// Parsed view of the item at `index`, if it carries a timestamp.
    pub fn bookmark(&self, index: usize) -> Option<Bookmark> {
        self.get(index).and_then(Bookmark::parse)
    }
}

impl fmt::Display for BookmarkList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{}", item)?;
        }
        Ok(())
    }
}
