//! Tests for lexer and parser error handling

use rill_core::{LexerError, ParseError, RillError};
use rill_syntax::parse;

#[test]
fn test_missing_closing_paren() {
    let result = parse("(+ 1");
    match result {
        Err(e @ RillError::Parse(_, _)) => {
            assert!(e.is_user_error());
        }
        other => panic!("Expected parse error for missing paren, got {:?}", other),
    }
}

#[test]
fn test_unmatched_closing_paren() {
    let result = parse("(+ 1 2))");
    match result {
        Err(RillError::Parse(ParseError::TrailingInput(s), _)) => assert_eq!(s, ")"),
        other => panic!("Expected TrailingInput, got {:?}", other),
    }
}

#[test]
fn test_unknown_token() {
    let result = parse("(+ 1 #{bad})");
    match result {
        // `#` starts an identifier, so `{` is the lex failure
        Err(RillError::Lexer(LexerError::InvalidToken(s), _)) => assert_eq!(s, "{"),
        other => panic!("Expected lexer error, got {:?}", other),
    }
}

#[test]
fn test_error_reports_span() {
    let err = parse("(+ 1 })").unwrap_err();
    let span = err.span().expect("lex errors carry spans");
    assert_eq!(span.start_line, 1);
    assert_eq!(span.start_column, 5);
}

#[test]
fn test_let_missing_body() {
    assert!(parse("(let ([x 1]))").is_err());
}

#[test]
fn test_let_extra_body_is_error() {
    // Single-body form: a second body expression fails the close check
    assert!(parse("(let ([x 1]) x x)").is_err());
}

#[test]
fn test_number_as_form_head() {
    let result = parse("(5)");
    match result {
        Err(RillError::Parse(ParseError::UnexpectedToken { found, .. }, _)) => {
            assert_eq!(found, "5");
        }
        other => panic!("Expected UnexpectedToken, got {:?}", other),
    }
}

#[test]
fn test_no_partial_ast_on_error() {
    // Every malformed input yields Err, never a partially parsed Ok
    for source in ["(", "(+", "(+ 1", "(let", "(let (", "(let ([x", "(let ([x 1]"] {
        assert!(parse(source).is_err(), "expected error for {:?}", source);
    }
}
