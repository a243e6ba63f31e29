//! Cue file reader thread.
//!
//! Vault reads and parsing happen here so that a slow disk never holds up a
//! render. Jobs come in on one channel and bookmark lists go out on another,
//! in the order the jobs arrived.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use crate::bookmarks::BookmarkList;
use crate::cues::CueFormat;

use super::renderer::RenderTarget;
use super::{bookmarks_from_text, FileHandle, Vault};

/// One cue file to read for a pending render.
#[derive(Debug)]
pub(super) struct CueJob {
    pub target: RenderTarget,
    pub file: FileHandle,
    pub format: CueFormat,
}

/// Bookmarks read for a [`CueJob`]. Empty when the file could not be read.
#[derive(Debug)]
pub(super) struct CueLoaded {
    pub job: CueJob,
    pub bookmarks: BookmarkList,
}

/// Serve jobs until the renderer hangs up on either channel.
pub(super) fn run(jobs: Receiver<CueJob>, loaded: Sender<CueLoaded>, vault: Arc<dyn Vault>) {
    for job in jobs {
        let bookmarks = read_cues(vault.as_ref(), &job);
        if loaded.send(CueLoaded { job, bookmarks }).is_err() {
            break;
        }
    }
}

fn read_cues(vault: &dyn Vault, job: &CueJob) -> BookmarkList {
    match vault.read(&job.file) {
        Ok(text) => bookmarks_from_text(job.format, &text),
        Err(e) => {
            tracing::warn!(path = %job.file.path, error = %e, "failed to read cue file");
            BookmarkList::new()
        }
    }
}
