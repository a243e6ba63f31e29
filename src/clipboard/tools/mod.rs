//! Platform clipboard commands.
//!
//! Every supported tool takes the text on stdin, so one [`CommandTool`]
//! describes them all.

use std::io::Write;
use std::process::{Command, Stdio};

use super::result::CopyMethod;
use super::tool::{CopyTool, CopyToolError};

/// A clipboard tool fed through an external command's stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTool {
    method: CopyMethod,
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandTool {
    /// macOS pasteboard
    pub const PBCOPY: CommandTool = CommandTool {
        method: CopyMethod::Pbcopy,
        program: "pbcopy",
        args: &[],
    };

    /// Wayland, only when a Wayland session is running
    pub const WL_COPY: CommandTool = CommandTool {
        method: CopyMethod::WlCopy,
        program: "wl-copy",
        args: &[],
    };

    pub const XCLIP: CommandTool = CommandTool {
        method: CopyMethod::Xclip,
        program: "xclip",
        args: &["-selection", "clipboard"],
    };

    pub const XSEL: CommandTool = CommandTool {
        method: CopyMethod::Xsel,
        program: "xsel",
        args: &["--clipboard", "--input"],
    };

    pub fn program(&self) -> &'static str {
        self.program
    }

    pub fn args(&self) -> &'static [&'static str] {
        self.args
    }
}

impl CopyTool for CommandTool {
    fn method(&self) -> CopyMethod {
        self.method
    }

    fn is_available(&self) -> bool {
        match self.method {
            CopyMethod::Pbcopy => cfg!(target_os = "macos"),
            CopyMethod::WlCopy => {
                cfg!(target_os = "linux")
                    && std::env::var_os("WAYLAND_DISPLAY").is_some()
                    && binary_exists(self.program)
            }
            _ => cfg!(target_os = "linux") && binary_exists(self.program),
        }
    }

    fn try_copy_text(&self, text: &str) -> Result<(), CopyToolError> {
        pipe_text(self.program, self.args, text)
    }
}

/// Get the platform-appropriate tools in priority order.
pub fn platform_tools() -> Vec<Box<dyn CopyTool>> {
    let tools: &[CommandTool] = if cfg!(target_os = "macos") {
        &[CommandTool::PBCOPY]
    } else if cfg!(target_os = "linux") {
        &[CommandTool::WL_COPY, CommandTool::XCLIP, CommandTool::XSEL]
    } else {
        &[]
    };
    tools
        .iter()
        .map(|tool| Box::new(*tool) as Box<dyn CopyTool>)
        .collect()
}

/// Check if a binary is on `PATH`.
fn binary_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Spawn `program`, write `text` to its stdin and wait for it.
fn pipe_text(program: &str, args: &[&str], text: &str) -> Result<(), CopyToolError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CopyToolError::NotFound,
            _ => CopyToolError::Failed(e.to_string()),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| CopyToolError::Failed(e.to_string()))?;
    }

    let status = child
        .wait()
        .map_err(|e| CopyToolError::Failed(e.to_string()))?;

    if status.success() {
        Ok(())
    } else {
        Err(CopyToolError::Failed(format!("{} exited with {}", program, status)))
    }
}
