//! The shared playable-media handle.

/// Host media element shared by every player in a session.
///
/// Only the [`Coordinator`](super::Coordinator) mutates it.
pub trait MediaHandle {
    /// Loaded source, if any.
    fn source(&self) -> Option<&str>;

    /// Load a new source. Playback position resets and playback pauses.
    fn load(&mut self, source: &str);

    fn is_paused(&self) -> bool;

    /// Start playback. Without a source this does nothing.
    fn play(&mut self);

    fn pause(&mut self);

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playback position. The media clamps to its own bounds.
    fn set_current_time(&mut self, seconds: f64);

    fn is_looping(&self) -> bool;

    fn set_looping(&mut self, looping: bool);

    fn set_volume(&mut self, volume: f64);

    fn has_source(&self) -> bool {
        self.source().is_some()
    }
}

/// In-memory media handle with the clamping rules of a media element.
#[derive(Debug, Clone)]
pub struct HeadlessMedia {
    source: Option<String>,
    paused: bool,
    current_time: f64,
    duration: Option<f64>,
    looping: bool,
    volume: f64,
}

impl Default for HeadlessMedia {
    fn default() -> Self {
        Self {
            source: None,
            paused: true,
            current_time: 0.0,
            duration: None,
            looping: false,
            volume: 1.0,
        }
    }
}

impl HeadlessMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known duration of the loaded source; positions are clamped to it.
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Simulate `seconds` of playback.
    pub fn advance(&mut self, seconds: f64) {
        if !self.paused {
            self.set_current_time(self.current_time + seconds);
        }
    }
}

impl MediaHandle for HeadlessMedia {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.current_time = 0.0;
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) {
        if self.source.is_some() {
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        let upper = self.duration.unwrap_or(f64::INFINITY);
        self.current_time = seconds.clamp(0.0, upper);
    }

    fn is_looping(&self) -> bool {
        self.looping
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}
