//! Seek slot handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use audiomark::seek::{FileSlot, LineRange, SeekRequest, SeekSlot};
use audiomark::{Config, TimeCode};

/// Open the slot at `path`, or the configured one.
pub fn open_slot(path: Option<PathBuf>) -> Result<FileSlot> {
    let path = match path {
        Some(path) => path,
        None => Config::load()
            .context("Failed to load configuration")?
            .seek_slot_path()?,
    };
    tracing::debug!(path = %path.display(), "using seek slot");
    Ok(FileSlot::new(path))
}

pub fn handle_write(slot: &mut FileSlot, time: &str, lines: Option<LineRange>) -> Result<()> {
    let time = parse_target_time(time)?;
    let request = match lines {
        Some(lines) => SeekRequest::block(lines, time),
        None => SeekRequest::hover(time),
    };
    slot.write(&request)
        .with_context(|| format!("Failed to write {}", slot.path().display()))?;
    println!("{}", request);
    Ok(())
}

/// Prints nothing when the slot is empty.
pub fn handle_read(slot: &FileSlot) -> Result<()> {
    if let Some(request) = slot.read()? {
        println!("{}", request);
    }
    Ok(())
}

pub fn handle_clear(slot: &mut FileSlot) -> Result<()> {
    slot.clear()?;
    Ok(())
}

/// Accept `MM:SS.mmm` timestamps as well as plain seconds.
fn parse_target_time(text: &str) -> Result<TimeCode> {
    if let Ok(time) = text.parse::<TimeCode>() {
        return Ok(time);
    }
    match text.trim().parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(TimeCode::from_secs_f64(seconds)),
        _ => bail!("Not a timestamp or number of seconds: {:?}", text),
    }
}
