//! Cue file parse handler

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use audiomark::cli::FormatArg;
use audiomark::{BookmarkList, CueFormat, Cues};

/// Print the bookmark items (or JSON entries) of a cue file.
pub fn handle(file: &Path, format: FormatArg, json: bool) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let cues = match format.forced() {
        Some(forced) => Cues::parse(forced, &text),
        None => detect(file, &text),
    };
    tracing::debug!(
        file = %file.display(),
        dialect = %cues.as_ref().map_or(CueFormat::None, Cues::format),
        entries = cues.as_ref().map_or(0, Cues::len),
        "parsed cue file"
    );

    if json {
        let value = match &cues {
            Some(cues) => serde_json::to_value(cues)?,
            None => serde_json::json!({ "format": CueFormat::None, "entries": [] }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let list = cues
        .as_ref()
        .map(BookmarkList::from_cues)
        .unwrap_or_default();
    if list.is_empty() {
        eprintln!("No entries found in {}", file.display());
    }
    print!("{}", list);
    Ok(())
}

/// Dialect from the extension, falling back to content sniffing.
fn detect(file: &Path, text: &str) -> Option<Cues> {
    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    match CueFormat::from_extension(extension) {
        CueFormat::None => Cues::sniff(text),
        format => Cues::parse(format, text),
    }
}
