//! The runtime instance of an activated tool.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// A tool that is currently running in a script execution.
///
/// Created by the tracker when an invocation matches its grammar, and
/// destroyed when the duration runs out, an `off` invocation is matched, or
/// a later invocation of the same tool replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveTool {
    /// Tool name, as registered in the catalogue.
    pub tool: String,
    /// Where the activating invocation appeared (first character of the
    /// tool name through the character after the last argument).
    pub span: Span,
    /// Ticks left before the tool expires. `None` means the tool runs until
    /// turned off or replaced.
    pub ticks_remaining: Option<u32>,
}

impl ActiveTool {
    /// Create an instance for a fresh activation.
    pub fn new(tool: impl Into<String>, span: Span, ticks_remaining: Option<u32>) -> Self {
        Self { tool: tool.into(), span, ticks_remaining }
    }

    /// Whether the tool has a finite duration.
    pub fn is_bounded(&self) -> bool {
        self.ticks_remaining.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded() {
        let span = Span::new(0, 0, 7);
        assert!(ActiveTool::new("duck", span, Some(20)).is_bounded());
        assert!(!ActiveTool::new("strafe", span, None).is_bounded());
    }
}
