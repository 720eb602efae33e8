//! Token definitions for the Rill lexer

use logos::Logos;
use rill_core::errors::{LexerError, RillError};
use rill_core::shared::SpanInfo;
use serde::{Deserialize, Serialize};

/// Convert logos::Span to SpanInfo with line/column tracking
fn logos_span_to_span_info(source: &str, span: logos::Span) -> SpanInfo {
    SpanInfo::from_byte_offsets(source, span.start, span.end)
}

/// Rill tokens
///
/// `Number` wins over `Ident` at equal match length, so `-42` lexes as a
/// single negative literal while a bare `-` (which the number regex cannot
/// match) lexes as an identifier.
#[derive(Logos, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[logos(skip r"[ \t\n\r\f]+")] // Skip whitespace
#[logos(skip r";[^\n]*")] // Skip comments
pub enum Token {
    // Keywords
    #[token("let")]
    Let,
    #[token("read")]
    Read,

    // Delimiters
    #[token("(")]
    OpenParens,
    #[token(")")]
    CloseParens,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,

    // Identifiers: [$alpha $psymbol][$alpha $digit $psymbol]*
    // $alpha = [a-zA-Z], $digit = [0-9], $psymbol = [%#+\-_&$@<>=^?*!|/~]
    #[regex(r"[a-zA-Z%#+\-_&$@<>=^?*!|/~][a-zA-Z0-9%#+\-_&$@<>=^?*!|/~]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    // Integer literals, optionally negative
    #[regex(r"-?[0-9]+", |lex| lex.slice().to_string(), priority = 2)]
    Number(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Let => write!(f, "let"),
            Token::Read => write!(f, "read"),
            Token::OpenParens => write!(f, "("),
            Token::CloseParens => write!(f, ")"),
            Token::OpenBracket => write!(f, "["),
            Token::CloseBracket => write!(f, "]"),
            Token::Ident(s) | Token::Number(s) => write!(f, "{s}"),
        }
    }
}

/// Main lexing function - the primary public API
///
/// Returns tokens paired with span information, or the first lexical error
/// encountered.
pub fn lex(source: &str) -> Result<Vec<(Token, SpanInfo)>, RillError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = logos_span_to_span_info(source, lexer.span());
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(_) => {
                let slice = &source[lexer.span()];
                let error = if slice.chars().any(|c| c.is_numeric()) {
                    LexerError::InvalidNumber(slice.to_string())
                } else {
                    LexerError::InvalidToken(slice.to_string())
                };
                return Err(RillError::Lexer(error, span));
            }
        }
    }

    Ok(tokens)
}
