//! Error types for the Rill compiler pipeline
//!
//! The taxonomy mirrors the pipeline's failure model: lexing and parsing
//! can fail on malformed input and are the only user-facing errors; the
//! rewriting passes are total over well-formed trees, so anything that
//! goes wrong past the parser is an internal precondition violation
//! (`InternalFault`), reported distinctly and never silently ignored.

use crate::shared::SpanInfo;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lexical analysis errors
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LexerError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// Parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ParseError {
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("Unknown form: ({0} ...)")]
    UnknownForm(String),

    #[error("Unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    #[error("Trailing input after expression: {0}")]
    TrailingInput(String),
}

/// Internal pipeline faults
///
/// These indicate pipeline misuse (a pass run out of order, or fed a tree
/// that violates its preconditions), never a user error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InternalFault {
    #[error("variable {0} has no preceding definition in the statement stream")]
    UnboundVariable(compact_str::CompactString),
}

/// Top-level error type for the whole pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RillError {
    #[error("Lexical error at {1}: {0}")]
    Lexer(LexerError, SpanInfo),

    #[error("Parse error at {1}: {0}")]
    Parse(ParseError, SpanInfo),

    #[error("Internal pipeline fault: {0}")]
    Fault(InternalFault),
}

impl RillError {
    /// Source span of the error, where one exists
    pub fn span(&self) -> Option<SpanInfo> {
        match self {
            RillError::Lexer(_, span) | RillError::Parse(_, span) => Some(*span),
            RillError::Fault(_) => None,
        }
    }

    /// True for errors caused by malformed user input
    pub fn is_user_error(&self) -> bool {
        !matches!(self, RillError::Fault(_))
    }
}
