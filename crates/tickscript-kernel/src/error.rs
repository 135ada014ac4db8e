//! Validation errors produced while matching a tool invocation.
//!
//! Every variant is a recoverable, line-scoped failure: it invalidates one
//! invocation, never the whole script. Each carries the source span of the
//! offending token (or of the invocation, when input ran out) so the host
//! can surface position-tagged diagnostics.

use serde::Serialize;
use thiserror::Error;
use tickscript_types::Span;

/// Result type for matching operations.
pub type MatchResult<T> = Result<T, MatchError>;

/// A structured validation failure for one tool invocation.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum MatchError {
    /// The invoked name is not in the tool catalogue.
    #[error("unknown tool: {name}")]
    UnknownTool { name: String, span: Span },

    /// Required arguments were not supplied.
    #[error("missing required arguments for {tool}")]
    MissingArguments { tool: String, span: Span },

    /// Tokens were left over after the grammar was exhausted.
    #[error("unexpected trailing arguments")]
    TrailingArguments { span: Span },

    /// A token did not fit the argument slot at this position.
    #[error("expected {expected}, found {found}")]
    ArgumentMismatch { expected: String, found: String, span: Span },

    /// A number was expected (or a number appeared where a word belongs).
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String, span: Span },

    /// A numeric argument was missing its mandatory unit suffix, or carried
    /// the wrong one.
    #[error("expected a number with unit '{unit}'")]
    UnitMismatch { unit: String, span: Span },

    /// `off` must be the only argument of an off-capable tool.
    #[error("'off' cannot be combined with other arguments")]
    OffMustBeAlone { span: Span },

    /// A token matched no argument of an unordered grammar.
    #[error("unknown argument: {text}")]
    UnknownArgument { text: String, span: Span },

    /// The same argument of an unordered grammar was given twice.
    #[error("duplicate argument: {text}")]
    DuplicateArgument { text: String, span: Span },
}

impl MatchError {
    /// Source span of the failure.
    pub fn span(&self) -> Span {
        match self {
            MatchError::UnknownTool { span, .. }
            | MatchError::MissingArguments { span, .. }
            | MatchError::TrailingArguments { span }
            | MatchError::ArgumentMismatch { span, .. }
            | MatchError::TypeMismatch { span, .. }
            | MatchError::UnitMismatch { span, .. }
            | MatchError::OffMustBeAlone { span }
            | MatchError::UnknownArgument { span, .. }
            | MatchError::DuplicateArgument { span, .. } => *span,
        }
    }
}
