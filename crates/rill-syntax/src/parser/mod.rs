//! Rill parser
//!
//! Converts a stream of tokens into the `Expr` AST. Grammar:
//!
//! ```text
//! exp ::= integer | symbol | (read) | (- exp) | (+ exp exp)
//!       | (let ([symbol exp]) exp)
//! ```

pub mod ast;
pub mod error;
pub mod parser;


pub use ast::Expr;
pub use error::Result;
pub use parser::{parse, Parser};
