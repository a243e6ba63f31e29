//! Player instances
//!
//! One player is mounted per rendered callout. Players are organized into
//! submodules:
//! - `state`: PlayerState struct and the per-signal result type
//! - `instance`: mounting, signal handling and bookmark jumps

mod instance;
pub mod state;

pub use instance::{PlayerInstance, PlayerSpec};
pub use state::{PlayerState, SignalResult};
