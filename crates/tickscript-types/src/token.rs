//! Tokens as handed over by the script tokenizer.
//!
//! The tokenizer (external to this workspace) splits a script line into
//! words and numbers and tags each with its source span. Numeric tokens keep
//! their raw text: unit suffixes like `300ups` or `90deg` are stripped by
//! the argument matcher, which knows which unit (if any) a grammar slot
//! expects.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// The two token shapes the argument grammar distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// A bare word: keywords (`vec`, `spam`), entity names, easing names.
    Word,
    /// A numeric literal, possibly with a trailing unit suffix (`90deg`).
    Number,
}

/// One token of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw text as it appeared in the script, including any unit suffix.
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Create a word token.
    pub fn word(text: impl Into<String>, span: Span) -> Self {
        Self { kind: TokenKind::Word, text: text.into(), span }
    }

    /// Create a numeric token from its raw text (unit suffix included).
    pub fn number(text: impl Into<String>, span: Span) -> Self {
        Self { kind: TokenKind::Number, text: text.into(), span }
    }

    /// Case-insensitive comparison against a keyword.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(keyword)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
