//! Lexical analysis for Rill
//!
//! Tokenization is whitespace/parenthesis-delimited. The only subtlety is
//! `-`: a leading minus immediately followed by digits is a negative
//! integer literal, while a bare `-` is the head symbol of the negation
//! form. The token priorities in `token.rs` resolve this.

pub mod token;

pub use token::{lex, Token};
