//! Playback coordinator.
//!
//! One [`Coordinator`] exists per document-viewing session. It owns the single
//! shared [`MediaHandle`] and broadcasts transport [`Signal`]s to every mounted
//! player through a [`Subscription`]. Players never touch the media handle
//! directly; they go through the coordinator's intent methods.
//!
//! Broadcast is channel based and non-blocking: `publish` queues the signal on
//! every live subscription in subscription order, and each player drains its
//! queue when it next pumps. Subscriptions whose player was dropped are pruned
//! on the next publish.

mod media;
pub mod notice;

use std::sync::mpsc::{self, Receiver, Sender};

use crate::clipboard::{ClipboardError, Copy, CopyResult};
use crate::config::PlayerConfig;
use crate::link::SeekSink;
use crate::seek::SeekEvent;
use crate::timecode::format_time;

pub use media::{HeadlessMedia, MediaHandle};
pub use notice::{LogNotifier, Notifier};

/// Default skip distance for the +/- transport commands, in seconds.
pub const DEFAULT_SEEK_STEP: f64 = 5.0;

/// Document-wide broadcast observed by every mounted player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// `allpause`
    AllPause,
    /// `allresume`
    AllResume,
    /// `looptoggle`, handled by the active player only
    LoopToggle,
    /// `addcomment`, handled by the active player only
    AddComment,
    /// `seek-to-timestamp`, handled by the player owning the line range in
    /// the target document
    SeekToTimestamp(SeekEvent),
}

impl Signal {
    /// Wire name of the signal.
    pub fn name(&self) -> &'static str {
        match self {
            Signal::AllPause => "allpause",
            Signal::AllResume => "allresume",
            Signal::LoopToggle => "looptoggle",
            Signal::AddComment => "addcomment",
            Signal::SeekToTimestamp(_) => "seek-to-timestamp",
        }
    }
}

/// Receiving end of the coordinator broadcast.
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<Signal>,
}

impl Subscription {
    /// Drain every signal published since the last call.
    pub fn drain(&self) -> Vec<Signal> {
        self.rx.try_iter().collect()
    }
}

/// Which way a toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Resumed,
    Paused,
}

/// Owner of the shared media handle and the signal broadcast.
pub struct Coordinator<M: MediaHandle> {
    media: M,
    subscribers: Vec<Sender<Signal>>,
    clipboard: Copy,
    notifier: Box<dyn Notifier>,
    seek_step: f64,
}

impl<M: MediaHandle> Coordinator<M> {
    /// Create with the platform clipboard and log notices.
    pub fn new(media: M) -> Self {
        Self {
            media,
            subscribers: Vec::new(),
            clipboard: Copy::new(),
            notifier: Box::new(LogNotifier),
            seek_step: DEFAULT_SEEK_STEP,
        }
    }

    /// Create and apply player settings (volume, skip distance).
    pub fn from_config(media: M, config: &PlayerConfig) -> Self {
        let mut coordinator = Self::new(media).with_seek_step(config.seek_step_secs);
        coordinator.media.set_volume(config.volume);
        coordinator
    }

    pub fn with_clipboard(mut self, clipboard: Copy) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_seek_step(mut self, seconds: f64) -> Self {
        self.seek_step = seconds;
        self
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Register a new listener.
    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        Subscription { rx }
    }

    /// Number of live subscriptions as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Broadcast to every live subscription.
    pub fn publish(&mut self, signal: Signal) {
        tracing::debug!(signal = signal.name(), "publish");
        self.subscribers.retain(|tx| tx.send(signal.clone()).is_ok());
    }

    /// Pause everything.
    pub fn pause(&mut self) {
        self.notifier.notify(notice::AUDIO_PAUSED);
        self.halt();
    }

    /// Resume everything. Without a loaded source only the broadcast happens.
    pub fn resume(&mut self) {
        self.notifier.notify(notice::AUDIO_RESUMED);
        self.play();
    }

    /// Resume if a source is loaded and paused, otherwise pause.
    pub fn toggle(&mut self) -> Transport {
        if self.media.has_source() && self.media.is_paused() {
            self.play();
            Transport::Resumed
        } else {
            self.halt();
            Transport::Paused
        }
    }

    /// Toggle, and on the pause branch copy the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns the clipboard error if no tool accepted the timestamp. The
    /// toggle itself has already happened.
    pub fn toggle_and_copy(&mut self) -> Result<Transport, ClipboardError> {
        let transport = self.toggle();
        if transport == Transport::Paused {
            self.copy_timestamp()?;
        }
        Ok(transport)
    }

    /// Copy `MM:SS.mmm` of the current position to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns the clipboard error if no tool accepted the timestamp.
    pub fn copy_timestamp(&mut self) -> Result<CopyResult, ClipboardError> {
        let stamp = format_time(self.media.current_time());
        let result = self.clipboard.text(&stamp)?;
        self.notifier.notify(notice::TIMESTAMP_COPIED);
        Ok(result)
    }

    /// Ask the active player to flip its loop mode.
    pub fn toggle_loop(&mut self) {
        self.publish(Signal::LoopToggle);
    }

    /// Ask the active player to bookmark the current position.
    pub fn add_bookmark(&mut self) {
        self.publish(Signal::AddComment);
    }

    pub fn skip_forward(&mut self) {
        self.nudge(self.seek_step);
    }

    pub fn skip_back(&mut self) {
        self.nudge(-self.seek_step);
    }

    pub fn skip_to_start(&mut self) {
        if self.media.has_source() {
            self.media.set_current_time(0.0);
        }
    }

    /// Load `source` into the shared handle unless it is already loaded.
    pub fn claim(&mut self, source: &str) {
        if self.media.source() != Some(source) {
            tracing::debug!(source, "loading source");
            self.media.load(source);
        }
    }

    /// Move to an absolute position, if a source is loaded.
    pub fn seek(&mut self, seconds: f64) {
        if self.media.has_source() {
            self.media.set_current_time(seconds);
        }
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.media.set_looping(looping);
    }

    /// Broadcast `AllResume` and start playback without a notice.
    pub fn play(&mut self) {
        self.publish(Signal::AllResume);
        if self.media.has_source() {
            self.media.play();
        }
    }

    /// Stop playback and drop every subscription.
    ///
    /// Players still holding a subscription simply stop receiving signals.
    pub fn shutdown(mut self) -> M {
        self.media.pause();
        self.subscribers.clear();
        self.media
    }

    fn halt(&mut self) {
        self.publish(Signal::AllPause);
        self.media.pause();
    }

    fn nudge(&mut self, delta: f64) {
        if self.media.has_source() {
            let target = self.media.current_time() + delta;
            self.media.set_current_time(target);
        }
    }
}

impl<M: MediaHandle> SeekSink for Coordinator<M> {
    fn seek_to_timestamp(&mut self, event: SeekEvent) {
        self.publish(Signal::SeekToTimestamp(event));
    }
}
