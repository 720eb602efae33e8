//! AST for the Rill expression language
//!
//! This is the single tree representation shared by every pass. Each
//! interior node exclusively owns its children; there is no sharing
//! between subtrees. Passes that fold a node replace the node value
//! wholesale (`*expr = Expr::Fixnum(..)`), dropping the old children.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// Integer literal
    Fixnum(i64),
    /// Side-effecting read of an external integer, unknown at compile time
    Read,
    /// Variable reference by name
    Var(CompactString),
    /// Unary negation
    Neg(Box<Expr>),
    /// Binary addition
    Add(Box<Expr>, Box<Expr>),
    /// Lexically scoped binding: `name` is visible in `body` only
    Let {
        name: CompactString,
        value: Box<Expr>,
        body: Box<Expr>,
    },
}

impl Expr {
    /// Build a `Let` without writing the boxes out at every call site
    pub fn let_binding(name: impl Into<CompactString>, value: Expr, body: Expr) -> Self {
        Expr::Let {
            name: name.into(),
            value: Box::new(value),
            body: Box::new(body),
        }
    }

    /// Build a `Var`
    pub fn var(name: impl Into<CompactString>) -> Self {
        Expr::Var(name.into())
    }

    /// Build a `Neg`
    pub fn neg(operand: Expr) -> Self {
        Expr::Neg(Box::new(operand))
    }

    /// Build an `Add`
    pub fn add(left: Expr, right: Expr) -> Self {
        Expr::Add(Box::new(left), Box::new(right))
    }

    /// True for nodes with no children
    pub fn is_leaf(&self) -> bool {
        matches!(self, Expr::Fixnum(_) | Expr::Read | Expr::Var(_))
    }
}

impl std::fmt::Display for Expr {
    /// Renders the concrete S-expression syntax, at any pipeline stage.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Fixnum(num) => write!(f, "{num}"),
            Expr::Read => write!(f, "(read)"),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Neg(operand) => write!(f, "(- {operand})"),
            Expr::Add(left, right) => write!(f, "(+ {left} {right})"),
            Expr::Let { name, value, body } => write!(f, "(let ([{name} {value}]) {body})"),
        }
    }
}
