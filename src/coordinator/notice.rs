//! Transient user-facing confirmations.

pub const AUDIO_PAUSED: &str = "Audio paused";
pub const AUDIO_RESUMED: &str = "Audio resumed";
pub const TIMESTAMP_COPIED: &str = "Copied current timestamp";

/// Shows short confirmations for explicit transport and copy commands.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Emits notices as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "audiomark::notice", "{}", message);
    }
}
