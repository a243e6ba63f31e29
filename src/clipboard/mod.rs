//! System clipboard access.
//!
//! Copying goes through platform tools (`pbcopy`, `xclip`, `xsel`,
//! `wl-copy`), tried in priority order until one succeeds.

mod copy;
mod error;
mod result;
mod tool;
pub mod tools;

pub use copy::Copy;
pub use error::ClipboardError;
pub use result::{CopyMethod, CopyResult};
pub use tool::{CopyTool, CopyToolError};
