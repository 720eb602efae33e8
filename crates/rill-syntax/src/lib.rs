//! Rill Syntax Library
//!
//! This crate provides lexical analysis and parsing for the Rill expression
//! language. Lexer and parser live in one compilation unit:
//!
//! - **Lexer**: tokenization (`lexer` module)
//! - **Parser**: syntax analysis and AST construction (`parser` module)
//!
//! The concrete syntax is S-expressions:
//!
//! ```text
//! exp ::= integer | symbol | (read) | (- exp) | (+ exp exp)
//!       | (let ([symbol exp]) exp)
//! ```

pub mod lexer;
pub mod parser;

// Re-export common types for convenience
pub use lexer::{lex, Token};
pub use parser::{parse, Expr, Parser};

// Re-export rill-core types that are commonly used with syntax
pub use rill_core::{ParseError, RillError, SpanInfo};

/// Version information for the rill-syntax crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
