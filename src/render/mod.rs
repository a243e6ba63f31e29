//! Callout render pipeline.
//!
//! Turns a callout extracted by the host's markdown pass into a
//! [`PlayerSpec`]. Bookmarks come from, in order of precedence:
//!
//! 1. a linked `.lrc`/`.srt`/`.vtt` file (read by the background worker)
//! 2. the callout's unordered list, verbatim
//! 3. the callout's paragraphs, if they parse as LRC or SRT
//!
//! Anything else renders with an empty list. A callout whose audio link is
//! missing, unresolvable, or not an allowed media type is skipped.

mod renderer;
mod vault;
mod worker;

use crate::bookmarks::BookmarkList;
use crate::config::PlayerConfig;
use crate::cues::{CueFormat, Cues};
use crate::link::DocumentId;
use crate::player::PlayerSpec;
use crate::seek::LineRange;

pub use renderer::{Mount, RenderTarget, Renderer};
pub use vault::{DirVault, FileHandle, Vault};

/// Title the host shows for a callout without one.
pub const DEFAULT_TITLE: &str = "Music player";

/// The parts of a rendered callout the pipeline reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Callout {
    pub title: String,
    /// First link of the callout body
    pub audio_link: Option<String>,
    /// Link to an external lyric or subtitle file
    pub cue_link: Option<String>,
    /// Items of the callout's unordered list, if it has one
    pub list_items: Option<Vec<String>>,
    /// Visible text of each body paragraph
    pub paragraphs: Vec<String>,
    pub lines: Option<LineRange>,
}

/// Outcome of preparing one callout.
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    /// Bookmarks are known; mount now.
    Ready(PlayerSpec),
    /// Bookmarks come from `cue_file`, which still has to be read.
    Pending {
        spec: PlayerSpec,
        cue_file: FileHandle,
        format: CueFormat,
    },
}

/// Resolve a callout's audio and bookmark sources.
///
/// Returns `None` when the callout must be skipped.
pub fn prepare(
    callout: &Callout,
    document: &DocumentId,
    vault: &dyn Vault,
    config: &PlayerConfig,
) -> Option<Prepared> {
    let audio = callout
        .audio_link
        .as_deref()
        .and_then(|link| vault.resolve(link, document))?;
    if !config.allows(&audio.extension) {
        tracing::debug!(path = %audio.path, "skipping callout with unsupported media");
        return None;
    }

    let title = match callout.title.trim() {
        "" | DEFAULT_TITLE => audio.basename.clone(),
        title => title.to_string(),
    };

    let mut spec = PlayerSpec {
        document: document.clone(),
        source: audio.path,
        title,
        bookmarks: BookmarkList::new(),
        lines: callout.lines,
    };

    if let Some(link) = callout.cue_link.as_deref().filter(|link| is_cue_link(link)) {
        let Some(cue_file) = vault.resolve(link, document) else {
            tracing::debug!(link, "cue file not found");
            return Some(Prepared::Ready(spec));
        };
        let format = cue_format(&cue_file);
        return Some(Prepared::Pending {
            spec,
            cue_file,
            format,
        });
    }

    spec.bookmarks = match &callout.list_items {
        Some(items) => BookmarkList::from_items(items.iter().cloned()),
        None => Cues::sniff(&callout.paragraphs.join("\n\n"))
            .map(|cues| BookmarkList::from_cues(&cues))
            .unwrap_or_default(),
    };
    Some(Prepared::Ready(spec))
}

fn is_cue_link(link: &str) -> bool {
    let target = link.split('#').next().unwrap_or(link);
    let extension = target.rsplit_once('.').map_or("", |(_, ext)| ext);
    CueFormat::from_extension(extension) != CueFormat::None
}

/// Lyric files by extension; everything else goes through the subtitle parser.
fn cue_format(file: &FileHandle) -> CueFormat {
    match CueFormat::from_extension(&file.extension) {
        CueFormat::Lrc => CueFormat::Lrc,
        _ => CueFormat::Srt,
    }
}

/// Parse a cue file's text into bookmarks.
pub(crate) fn bookmarks_from_text(format: CueFormat, text: &str) -> BookmarkList {
    Cues::parse(format, text)
        .map(|cues| BookmarkList::from_cues(&cues))
        .unwrap_or_default()
}
