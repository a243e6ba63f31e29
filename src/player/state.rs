//! Player state management
//!
//! Contains the per-instance `PlayerState` mirrored from coordinator
//! broadcasts, and the result type returned when an instance processes
//! a signal.

/// Result of processing one broadcast signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalResult {
    /// Signal was not addressed to this instance
    Ignored,
    /// Paused/playing display changed
    Transport,
    /// Loop mode flipped
    LoopToggled,
    /// A bookmark was appended
    BookmarkAdded,
    /// The shared handle was claimed and moved to a bookmark
    Seeked,
}

/// Display state of one player instance.
///
/// This is a mirror of what the instance shows, not of the shared media
/// handle. Only the active instance's state matches the handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    /// Whether the instance shows paused
    pub paused: bool,
    /// Whether loop mode is on
    pub looping: bool,
    /// Index of the last bookmark jumped to
    pub current_bookmark: Option<usize>,
    /// True when the surface needs to be redrawn
    pub needs_render: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            paused: true,
            looping: false,
            current_bookmark: None,
            needs_render: true,
        }
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reflect a broadcast pause or resume.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            self.needs_render = true;
        }
    }

    /// Flip loop mode and return the new value.
    pub fn toggle_loop(&mut self) -> bool {
        self.looping = !self.looping;
        self.needs_render = true;
        self.looping
    }

    /// Record a jump to a bookmark.
    pub fn select_bookmark(&mut self, index: Option<usize>) {
        self.current_bookmark = index;
        self.needs_render = true;
    }
}
