//! Rill Intermediate Representation and rewriting passes
//!
//! This crate provides the three passes that sit between the parser and
//! any later code generation:
//!
//! - **Constant folding** (`const_eval`): collapses arithmetic on literals
//! - **Uniquify** (`renamer`): renames bindings so every lexical binding
//!   has a globally unique name
//! - **Flatten** (`flatten`): linearizes the tree into a straight-line
//!   sequence of simple assignments plus a tail expression
//!
//! Passes run strictly in that order; each takes the previous pass's tree
//! as sole input. The first two rewrite the tree in place, the third
//! builds the linear form from it.

pub mod const_eval;
pub mod flatten;
pub mod renamer;

pub use const_eval::{partial_eval, ConstEvalContext, ConstEvalStats};
pub use flatten::{flatten, Assign, Atom, FlatExpr, FlatProgram, FlattenContext, FlattenStats};
pub use renamer::{uniquify, RenamerContext, RenamerStats, SymbolTable};

/// Version information for the rill-ir crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
