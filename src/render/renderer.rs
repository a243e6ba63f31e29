//! Render driver with asynchronous cue file reads.

use std::collections::HashMap;
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::PlayerConfig;
use crate::link::DocumentId;
use crate::player::PlayerSpec;

use super::worker::{self, CueJob, CueLoaded};
use super::{prepare, Callout, Prepared, Vault};

/// Identifies a render waiting on a cue file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTarget(u64);

impl RenderTarget {
    #[cfg(test)]
    pub(super) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Result of [`Renderer::render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mount {
    /// Mount now.
    Ready(PlayerSpec),
    /// Mount once [`Renderer::poll`] yields this target.
    Pending(RenderTarget),
}

/// Prepares callouts and reads external cue files off the calling thread.
///
/// There is no cancellation of a read in flight. Detaching a target only
/// forgets it, so the late result is dropped when it arrives.
pub struct Renderer {
    vault: Arc<dyn Vault>,
    config: PlayerConfig,
    request_tx: Option<Sender<CueJob>>,
    result_rx: Receiver<CueLoaded>,
    pending: HashMap<RenderTarget, PlayerSpec>,
    next_target: u64,
    worker: Option<JoinHandle<()>>,
}

impl Renderer {
    /// Start the cue worker thread.
    ///
    /// # Errors
    ///
    /// Fails if the thread cannot be spawned.
    pub fn new(vault: Arc<dyn Vault>, config: PlayerConfig) -> io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<CueJob>();
        let (result_tx, result_rx) = mpsc::channel();

        let reader = Arc::clone(&vault);
        let worker = thread::Builder::new()
            .name("audiomark-cues".to_string())
            .spawn(move || worker::run(request_rx, result_tx, reader))?;

        Ok(Self {
            vault,
            config,
            request_tx: Some(request_tx),
            result_rx,
            pending: HashMap::new(),
            next_target: 0,
            worker: Some(worker),
        })
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Prepare a callout. `None` means the callout is skipped.
    pub fn render(&mut self, callout: &Callout, document: &DocumentId) -> Option<Mount> {
        match prepare(callout, document, self.vault.as_ref(), &self.config)? {
            Prepared::Ready(spec) => Some(Mount::Ready(spec)),
            Prepared::Pending {
                spec,
                cue_file,
                format,
            } => {
                let target = RenderTarget(self.next_target);
                self.next_target += 1;

                let job = CueJob {
                    target,
                    file: cue_file,
                    format,
                };
                let sent = self
                    .request_tx
                    .as_ref()
                    .is_some_and(|tx| tx.send(job).is_ok());
                if !sent {
                    tracing::warn!("cue worker is gone, rendering without bookmarks");
                    return Some(Mount::Ready(spec));
                }

                self.pending.insert(target, spec);
                Some(Mount::Pending(target))
            }
        }
    }

    /// Forget a pending render whose surface was torn down.
    ///
    /// Returns `false` if the target was not pending.
    pub fn detach(&mut self, target: RenderTarget) -> bool {
        self.pending.remove(&target).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Completed renders since the last call, in completion order.
    pub fn poll(&mut self) -> Vec<(RenderTarget, PlayerSpec)> {
        let results: Vec<_> = self.result_rx.try_iter().collect();
        results
            .into_iter()
            .filter_map(|result| self.complete(result))
            .collect()
    }

    /// Like [`poll`](Self::poll), but block up to `timeout` for the first
    /// result if none is ready.
    pub fn wait(&mut self, timeout: Duration) -> Vec<(RenderTarget, PlayerSpec)> {
        let mut done = Vec::new();
        match self.result_rx.recv_timeout(timeout) {
            Ok(result) => done.extend(self.complete(result)),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return done,
        }
        done.extend(self.poll());
        done
    }

    fn complete(&mut self, loaded: CueLoaded) -> Option<(RenderTarget, PlayerSpec)> {
        let target = loaded.job.target;
        let Some(mut spec) = self.pending.remove(&target) else {
            tracing::trace!(path = %loaded.job.file.path, "dropping cue file for detached render");
            return None;
        };
        spec.bookmarks = loaded.bookmarks;
        Some((target, spec))
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.request_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
