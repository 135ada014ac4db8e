//! Source positions for tokens, diagnostics, and active tools.

use serde::{Deserialize, Serialize};

/// A half-open source span on a single script line.
///
/// Columns are zero-based; `end_col` points at the character after the last
/// one covered. Tool invocations never span multiple lines, so a line plus a
/// column range is enough for every diagnostic the kernel produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Zero-based line in the script.
    pub line: u32,
    /// Column of the first covered character.
    pub start_col: u32,
    /// Column one past the last covered character.
    pub end_col: u32,
}

impl Span {
    /// Create a span on `line` covering `[start_col, end_col)`.
    pub fn new(line: u32, start_col: u32, end_col: u32) -> Self {
        Self { line, start_col, end_col }
    }

    /// The smallest span covering both `self` and `other`.
    ///
    /// Both spans must be on the same line; the result keeps `self`'s line.
    pub fn join(self, other: Span) -> Span {
        Span {
            line: self.line,
            start_col: self.start_col.min(other.start_col),
            end_col: self.end_col.max(other.end_col),
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.line, self.start_col, self.end_col)
    }
}
