//! One rendered player surface.

use crate::bookmarks::{Bookmark, BookmarkList};
use crate::coordinator::{Coordinator, MediaHandle, Signal, Subscription};
use crate::link::DocumentId;
use crate::seek::{LineRange, SeekEvent, SeekSlot};
use crate::timecode::TimeCode;

use super::state::{PlayerState, SignalResult};

/// Everything a player needs to mount, as produced by the render pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSpec {
    /// Document the callout belongs to
    pub document: DocumentId,
    /// Resolved audio source
    pub source: String,
    pub title: String,
    pub bookmarks: BookmarkList,
    /// Source lines of the callout, when known
    pub lines: Option<LineRange>,
}

/// A mounted player.
///
/// Holds a subscription to the coordinator broadcast, never the media handle
/// itself. Call [`pump`](Self::pump) after the coordinator publishes to bring
/// the instance up to date.
#[derive(Debug)]
pub struct PlayerInstance {
    spec: PlayerSpec,
    subscription: Subscription,
    state: PlayerState,
}

impl PlayerInstance {
    /// Subscribe to `coordinator` and apply any pending cross-page seek.
    ///
    /// A slot request with no line range is meant for whichever player
    /// renders next. A request with a range is applied only if it lies inside
    /// this player's range. The slot record carries no document, so the page
    /// being rendered is taken as its target. An applied request is cleared
    /// from the slot.
    /// Slot failures are logged and otherwise ignored.
    pub fn mount<M: MediaHandle>(
        spec: PlayerSpec,
        coordinator: &mut Coordinator<M>,
        slot: &mut dyn SeekSlot,
    ) -> Self {
        let subscription = coordinator.subscribe();
        let mut player = Self {
            spec,
            subscription,
            state: PlayerState::new(),
        };

        let request = match slot.read() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read seek slot");
                None
            }
        };

        if let Some(request) = request {
            let wanted = request.lines.map_or(true, |lines| player.covers(&lines));
            if wanted {
                tracing::debug!(source = %player.spec.source, %request, "picked up seek request");
                if let Err(e) = slot.clear() {
                    tracing::warn!(error = %e, "failed to clear seek slot");
                }
                player.seek_to(coordinator, request.time);
                // The resume broadcast is queued on our own subscription too.
                player.pump(coordinator);
            }
        }

        player
    }

    pub fn document(&self) -> &DocumentId {
        &self.spec.document
    }

    pub fn source(&self) -> &str {
        &self.spec.source
    }

    pub fn title(&self) -> &str {
        &self.spec.title
    }

    pub fn bookmarks(&self) -> &BookmarkList {
        &self.spec.bookmarks
    }

    pub fn lines(&self) -> Option<LineRange> {
        self.spec.lines
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    /// Whether this player's source is the one loaded in the shared handle.
    pub fn is_active<M: MediaHandle>(&self, coordinator: &Coordinator<M>) -> bool {
        coordinator.media().source() == Some(self.spec.source.as_str())
    }

    /// Whether a same-page seek belongs to this player: same document, and
    /// the block lies inside this player's range.
    pub fn accepts(&self, event: &SeekEvent) -> bool {
        event.document == self.spec.document && self.covers(&event.lines)
    }

    /// Whether `lines` lies inside this player's range. A player without a
    /// declared range covers nothing.
    pub fn covers(&self, lines: &LineRange) -> bool {
        self.spec.lines.is_some_and(|own| own.contains(lines))
    }

    /// Process every signal queued since the last pump.
    ///
    /// Signals this player publishes while handling (a seek resumes
    /// playback) are processed in the same call. Returns the number of
    /// signals that changed this player.
    pub fn pump<M: MediaHandle>(&mut self, coordinator: &mut Coordinator<M>) -> usize {
        let mut changed = 0;
        loop {
            let signals = self.subscription.drain();
            if signals.is_empty() {
                return changed;
            }
            changed += signals
                .into_iter()
                .map(|signal| self.handle(signal, coordinator))
                .filter(|result| *result != SignalResult::Ignored)
                .count();
        }
    }

    /// Seek to the start of the bookmark at `index`.
    ///
    /// Returns `false` for out-of-range indices and free-text items.
    pub fn jump_to<M: MediaHandle>(&mut self, index: usize, coordinator: &mut Coordinator<M>) -> bool {
        let Some(bookmark) = self.spec.bookmarks.bookmark(index) else {
            return false;
        };
        self.seek_to(coordinator, bookmark.start);
        self.state.select_bookmark(Some(index));
        true
    }

    fn handle<M: MediaHandle>(&mut self, signal: Signal, coordinator: &mut Coordinator<M>) -> SignalResult {
        match signal {
            Signal::AllPause => {
                self.state.set_paused(true);
                SignalResult::Transport
            }
            Signal::AllResume => {
                self.state.set_paused(false);
                SignalResult::Transport
            }
            Signal::LoopToggle if self.is_active(coordinator) => {
                let looping = self.state.toggle_loop();
                coordinator.set_looping(looping);
                SignalResult::LoopToggled
            }
            Signal::AddComment if self.is_active(coordinator) => {
                let now = TimeCode::from_secs_f64(coordinator.media().current_time());
                self.spec.bookmarks.push(&Bookmark::at(now, ""));
                self.state.needs_render = true;
                SignalResult::BookmarkAdded
            }
            Signal::SeekToTimestamp(event) if self.accepts(&event) => {
                self.seek_to(coordinator, event.time);
                SignalResult::Seeked
            }
            _ => SignalResult::Ignored,
        }
    }

    fn seek_to<M: MediaHandle>(&mut self, coordinator: &mut Coordinator<M>, time: TimeCode) {
        coordinator.claim(&self.spec.source);
        coordinator.set_looping(self.state.looping);
        coordinator.seek(time.as_secs_f64());
        coordinator.play();
    }
}
