//! Error construction helpers for the parser

use rill_core::errors::{ParseError, RillError};
use rill_core::shared::SpanInfo;

pub type Result<T> = std::result::Result<T, RillError>;

/// Create an unexpected-token parse error
pub fn unexpected_token(expected: String, found: String, span: SpanInfo) -> RillError {
    RillError::Parse(ParseError::UnexpectedToken { expected, found }, span)
}

/// Create an unexpected-end-of-input parse error
pub fn unexpected_eof(expected: String) -> RillError {
    RillError::Parse(ParseError::UnexpectedEof(expected), SpanInfo::empty())
}

/// Create an unknown-form parse error
pub fn unknown_form(head: String, span: SpanInfo) -> RillError {
    RillError::Parse(ParseError::UnknownForm(head), span)
}
