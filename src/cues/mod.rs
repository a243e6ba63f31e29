//! Lyric (LRC) and subtitle (SRT/VTT) documents.
//!
//! Both dialects parse into plain entry lists in document order. Parsing never
//! fails: lines or blocks that do not match the dialect are skipped, so a
//! single malformed cue cannot keep the rest of a document from rendering.
//!
//! Format sniffing is an ordered chain of pure parsers. The first parser that
//! yields at least one entry wins, so a document that happens to satisfy both
//! dialects is classified as LRC.

mod lrc;
mod srt;

use serde::Serialize;

use crate::timecode::TimeCode;

pub use lrc::parse_lyric_document;
pub use srt::parse_subtitle_document;

/// One timed lyric line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricEntry {
    pub time: TimeCode,
    pub text: String,
}

/// One subtitle cue. `start <= end` is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleEntry {
    pub start: TimeCode,
    pub end: TimeCode,
    pub text: String,
}

/// Document dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CueFormat {
    Lrc,
    Srt,
    None,
}

impl CueFormat {
    /// Dialect implied by a linked file's extension.
    ///
    /// VTT shares the SRT parser.
    pub fn from_extension(extension: &str) -> CueFormat {
        match extension.to_ascii_lowercase().as_str() {
            "lrc" => CueFormat::Lrc,
            "srt" | "vtt" => CueFormat::Srt,
            _ => CueFormat::None,
        }
    }
}

impl std::fmt::Display for CueFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CueFormat::Lrc => write!(f, "lrc"),
            CueFormat::Srt => write!(f, "srt"),
            CueFormat::None => write!(f, "none"),
        }
    }
}

/// Parsed entries of either dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", content = "entries")]
pub enum Cues {
    #[serde(rename = "lrc")]
    Lyrics(Vec<LyricEntry>),
    #[serde(rename = "srt")]
    Subtitles(Vec<SubtitleEntry>),
}

type Sniffer = fn(&str) -> Option<Cues>;

/// Tried in order; earlier entries win ties.
const SNIFF_ORDER: [Sniffer; 2] = [sniff_lyrics, sniff_subtitles];

fn sniff_lyrics(text: &str) -> Option<Cues> {
    let entries = parse_lyric_document(text);
    (!entries.is_empty()).then_some(Cues::Lyrics(entries))
}

fn sniff_subtitles(text: &str) -> Option<Cues> {
    let entries = parse_subtitle_document(text);
    (!entries.is_empty()).then_some(Cues::Subtitles(entries))
}

impl Cues {
    /// Parse `text` as the given dialect.
    ///
    /// Returns `None` for [`CueFormat::None`]; otherwise the (possibly
    /// empty) entry list.
    pub fn parse(format: CueFormat, text: &str) -> Option<Cues> {
        match format {
            CueFormat::Lrc => Some(Cues::Lyrics(parse_lyric_document(text))),
            CueFormat::Srt => Some(Cues::Subtitles(parse_subtitle_document(text))),
            CueFormat::None => None,
        }
    }

    /// Detect the dialect and parse. `None` when neither dialect matches.
    pub fn sniff(text: &str) -> Option<Cues> {
        SNIFF_ORDER.iter().find_map(|sniff| sniff(text))
    }

    pub fn format(&self) -> CueFormat {
        match self {
            Cues::Lyrics(_) => CueFormat::Lrc,
            Cues::Subtitles(_) => CueFormat::Srt,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Cues::Lyrics(entries) => entries.len(),
            Cues::Subtitles(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify a document: LRC if any lyric line matches, else SRT if any cue
/// block matches, else [`CueFormat::None`].
pub fn detect_format(text: &str) -> CueFormat {
    Cues::sniff(text)
        .map(|cues| cues.format())
        .unwrap_or(CueFormat::None)
}
