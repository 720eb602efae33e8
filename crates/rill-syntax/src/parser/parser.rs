//! Recursive-descent parser over the token stream

use super::ast::Expr;
use super::error::{unexpected_eof, unexpected_token, unknown_form, Result};
use crate::lexer::{lex, Token};
use compact_str::CompactString;
use rill_core::errors::{LexerError, ParseError, RillError};
use rill_core::shared::SpanInfo;

/// Token-stream parser
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<(Token, SpanInfo)>,
    position: usize,
}

impl Parser {
    /// Create a new parser from source code
    pub fn new(source: &str) -> Result<Self> {
        let tokens = lex(source)?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Create parser from pre-lexed tokens (for testing)
    pub fn from_tokens(tokens: Vec<(Token, SpanInfo)>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse a complete program: one expression consuming the entire input
    ///
    /// Trailing tokens after the expression are an error; no partial
    /// result is returned for malformed input.
    pub fn parse_program(&mut self) -> Result<Expr> {
        let expr = self.parse_expression()?;

        if !self.is_at_end() {
            let span = self.current_span();
            let found = self
                .current_token()
                .map(|(t, _)| t.to_string())
                .unwrap_or_default();
            return Err(RillError::Parse(ParseError::TrailingInput(found), span));
        }

        Ok(expr)
    }

    /// Parse an expression
    fn parse_expression(&mut self) -> Result<Expr> {
        match self.current_token() {
            Some((Token::OpenParens, _)) => {
                self.advance(); // consume '('

                // Parse S-expression form: read | neg | add | let
                let expr = match self.current_token() {
                    Some((Token::Read, _)) => {
                        self.advance();
                        Expr::Read
                    }
                    Some((Token::Let, _)) => self.parse_let_expr()?,
                    Some((Token::Ident(s), span)) if s == "-" => {
                        let _span = *span;
                        self.advance();
                        Expr::neg(self.parse_expression()?)
                    }
                    Some((Token::Ident(s), span)) if s == "+" => {
                        let _span = *span;
                        self.advance();
                        let left = self.parse_expression()?;
                        let right = self.parse_expression()?;
                        Expr::add(left, right)
                    }
                    Some((Token::Ident(s), span)) => {
                        return Err(unknown_form(s.clone(), *span));
                    }
                    Some((token, span)) => {
                        return Err(unexpected_token(
                            "form head (read, -, +, let)".to_string(),
                            token.to_string(),
                            *span,
                        ));
                    }
                    None => {
                        return Err(unexpected_eof("form head (read, -, +, let)".to_string()));
                    }
                };

                self.consume(Token::CloseParens)?;
                Ok(expr)
            }
            _ => self.parse_atom(),
        }
    }

    /// Parse atomic expressions (variables, literals)
    fn parse_atom(&mut self) -> Result<Expr> {
        match self.current_token() {
            Some((Token::Ident(s), _)) => {
                let name = CompactString::from(s.as_str());
                self.advance();
                Ok(Expr::Var(name))
            }
            Some((Token::Number(s), span)) => {
                let span = *span;
                match s.parse::<i64>() {
                    Ok(n) => {
                        self.advance();
                        Ok(Expr::Fixnum(n))
                    }
                    Err(_) => Err(RillError::Lexer(LexerError::InvalidNumber(s.clone()), span)),
                }
            }
            Some((token, span)) => Err(unexpected_token(
                "expression".to_string(),
                token.to_string(),
                *span,
            )),
            None => Err(unexpected_eof("expression".to_string())),
        }
    }

    /// Parse a let expression: let '(' '[' symbol exp ']' ')' exp
    ///
    /// The caller has consumed the opening paren and will consume the
    /// closing one; this parses the binder and the single body expression.
    fn parse_let_expr(&mut self) -> Result<Expr> {
        self.consume(Token::Let)?;

        self.consume(Token::OpenParens)?;
        self.consume(Token::OpenBracket)?;
        let name = self.expect_symbol("binding name")?;
        let value = self.parse_expression()?;
        self.consume(Token::CloseBracket)?;
        self.consume(Token::CloseParens)?;

        let body = self.parse_expression()?;

        Ok(Expr::Let {
            name,
            value: Box::new(value),
            body: Box::new(body),
        })
    }

    // Utility methods
    fn current_token(&self) -> Option<&(Token, SpanInfo)> {
        self.tokens.get(self.position)
    }

    fn current_span(&self) -> SpanInfo {
        self.current_token()
            .map(|(_, span)| *span)
            .unwrap_or_else(SpanInfo::empty)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn check(&self, expected: &Token) -> bool {
        match self.current_token() {
            Some((token, _)) => std::mem::discriminant(token) == std::mem::discriminant(expected),
            None => false,
        }
    }

    fn consume(&mut self, expected: Token) -> Result<()> {
        if self.check(&expected) {
            self.advance();
            Ok(())
        } else {
            let span = self.current_span();
            let found = self
                .current_token()
                .map(|(t, _)| format!("{t:?}"))
                .unwrap_or_else(|| "end of input".to_string());
            Err(unexpected_token(format!("{expected:?}"), found, span))
        }
    }

    fn expect_symbol(&mut self, context: &str) -> Result<CompactString> {
        match self.current_token() {
            Some((Token::Ident(s), _)) => {
                let result = CompactString::from(s.as_str());
                self.advance();
                Ok(result)
            }
            Some((token, span)) => Err(unexpected_token(
                context.to_string(),
                token.to_string(),
                *span,
            )),
            None => Err(unexpected_eof(context.to_string())),
        }
    }
}

/// Parse a source string into an AST
///
/// The convenience entry point: lexes, parses, and requires the whole
/// input to be consumed.
pub fn parse(source: &str) -> Result<Expr> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}
