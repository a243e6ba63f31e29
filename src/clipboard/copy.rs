//! Copy orchestrator for clipboard operations.

use super::error::ClipboardError;
use super::result::CopyResult;
use super::tool::{CopyTool, CopyToolError};
use super::tools::platform_tools;

/// Orchestrates clipboard copy operations using available tools.
///
/// Tools are tried in priority order; the first one that accepts the
/// text wins.
pub struct Copy {
    tools: Vec<Box<dyn CopyTool>>,
}

impl Copy {
    /// Create with platform-appropriate tools.
    pub fn new() -> Self {
        Self {
            tools: platform_tools(),
        }
    }

    /// Create with specific tools (for testing).
    pub fn with_tools(tools: Vec<Box<dyn CopyTool>>) -> Self {
        Self { tools }
    }

    /// Get a reference to the tools list.
    pub fn tools(&self) -> &[Box<dyn CopyTool>] {
        &self.tools
    }

    /// Copy text to the clipboard.
    ///
    /// Reports the last tool failure if every available tool failed.
    pub fn text(&self, text: &str) -> Result<CopyResult, ClipboardError> {
        let mut last_failure = None;

        for tool in self.tools.iter().filter(|t| t.is_available()) {
            match tool.try_copy_text(text) {
                Ok(()) => return Ok(CopyResult::new(tool.method(), text.len())),
                Err(CopyToolError::NotFound) => continue,
                Err(CopyToolError::Failed(message)) => {
                    tracing::debug!(tool = tool.name(), %message, "clipboard tool failed");
                    last_failure = Some(ClipboardError::ToolFailed {
                        tool: tool.name(),
                        message,
                    });
                }
            }
        }

        Err(last_failure.unwrap_or(ClipboardError::NoToolAvailable))
    }
}

impl Default for Copy {
    fn default() -> Self {
        Self::new()
    }
}
