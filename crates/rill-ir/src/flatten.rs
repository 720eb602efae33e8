//! Linearization of the expression tree (flatten)
//!
//! Converts a fully processed tree (post constant-folding, post uniquify)
//! into a straight-line form: an ordered sequence of assignments
//! `target := simple_expr` followed by one tail expression, where a
//! simple expression is a literal, a variable, a `read`, or a single
//! `Neg`/`Add` over literals and variables. Compound operands are hoisted
//! into fresh temporaries whose assignments precede the consumer, so
//! evaluating the statements in order and then the tail reproduces the
//! value and side-effect order of the original expression.
//!
//! `Let` bindings are eliminated: the bound expression flattens into an
//! assignment to the (already unique) bound name, placed strictly before
//! the body's statements.
//!
//! A variable reference with no preceding definition and no entry among
//! the context's outer bindings means uniquify was skipped or produced
//! inconsistent names; that surfaces as an internal fault, not a user
//! error.

use compact_str::{format_compact, CompactString};
use rill_core::errors::{InternalFault, RillError};
use rill_syntax::Expr;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Atomic operand: a literal or a variable reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Atom {
    Fixnum(i64),
    Var(CompactString),
}

/// Simple expression: the right-hand side of an assignment, or the tail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlatExpr {
    Atom(Atom),
    Read,
    Neg(Atom),
    Add(Atom, Atom),
}

/// One straight-line statement: `target := expr`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assign {
    pub target: CompactString,
    pub expr: FlatExpr,
}

/// The linear intermediate form: statements in evaluation order, then the
/// tail expression producing the overall result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatProgram {
    pub stmts: Vec<Assign>,
    pub tail: FlatExpr,
}

impl FlatProgram {
    /// Walk the statements front to back
    pub fn iter(&self) -> std::slice::Iter<'_, Assign> {
        self.stmts.iter()
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    /// True when no statements precede the tail
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

impl IntoIterator for FlatProgram {
    type Item = Assign;
    type IntoIter = std::vec::IntoIter<Assign>;

    fn into_iter(self) -> Self::IntoIter {
        self.stmts.into_iter()
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Atom::Fixnum(num) => write!(f, "{num}"),
            Atom::Var(name) => write!(f, "{name}"),
        }
    }
}

impl std::fmt::Display for FlatExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlatExpr::Atom(atom) => write!(f, "{atom}"),
            FlatExpr::Read => write!(f, "(read)"),
            FlatExpr::Neg(operand) => write!(f, "(- {operand})"),
            FlatExpr::Add(left, right) => write!(f, "(+ {left} {right})"),
        }
    }
}

impl std::fmt::Display for Assign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(assign {} {})", self.target, self.expr)
    }
}

impl std::fmt::Display for FlatProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.stmts {
            writeln!(f, "{stmt}")?;
        }
        write!(f, "{}", self.tail)
    }
}

/// Statistics about flattening
#[derive(Debug, Clone, Default)]
pub struct FlattenStats {
    pub temps_allocated: usize,
    pub stmts_emitted: usize,
}

/// Flattening context: fresh-temp allocation plus the set of names defined
/// so far
#[derive(Debug, Clone, Default)]
pub struct FlattenContext {
    temp_counter: u32,
    defined: HashSet<CompactString>,
    pub stats: FlattenStats,
}

impl FlattenContext {
    /// Create a new flattening context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that treats `names` as bound in an outer scope
    pub fn with_outer_bindings(names: impl IntoIterator<Item = CompactString>) -> Self {
        Self {
            defined: names.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Get flattening statistics
    pub fn stats(&self) -> &FlattenStats {
        &self.stats
    }

    /// Allocate a fresh temporary name
    ///
    /// The `.` separator cannot appear in a source identifier, so temps
    /// never collide with uniquified user names.
    fn fresh_temp(&mut self) -> CompactString {
        let name = format_compact!("tmp.{}", self.temp_counter);
        self.temp_counter += 1;
        self.stats.temps_allocated += 1;
        name
    }

    fn define(&mut self, name: CompactString) {
        self.defined.insert(name);
    }

    fn reference(&self, name: &CompactString) -> Result<Atom, RillError> {
        if self.defined.contains(name) {
            Ok(Atom::Var(name.clone()))
        } else {
            Err(RillError::Fault(InternalFault::UnboundVariable(
                name.clone(),
            )))
        }
    }

    fn emit(&mut self, stmts: &mut Vec<Assign>, target: CompactString, expr: FlatExpr) {
        stmts.push(Assign { target, expr });
        self.stats.stmts_emitted += 1;
    }
}

/// Flatten `expr` into the linear intermediate form
pub fn flatten(expr: &Expr, ctx: &mut FlattenContext) -> Result<FlatProgram, RillError> {
    let mut stmts = Vec::new();
    let tail = flatten_simple(expr, &mut stmts, ctx)?;
    Ok(FlatProgram { stmts, tail })
}

/// Flatten `expr` to an atom, emitting statements for any compound parts
fn flatten_operand(
    expr: &Expr,
    stmts: &mut Vec<Assign>,
    ctx: &mut FlattenContext,
) -> Result<Atom, RillError> {
    match expr {
        Expr::Fixnum(num) => Ok(Atom::Fixnum(*num)),
        Expr::Var(name) => ctx.reference(name),
        Expr::Read | Expr::Neg(_) | Expr::Add(_, _) => {
            let simple = flatten_simple(expr, stmts, ctx)?;
            let temp = ctx.fresh_temp();
            ctx.define(temp.clone());
            ctx.emit(stmts, temp.clone(), simple);
            Ok(Atom::Var(temp))
        }
        Expr::Let { .. } => {
            let simple = flatten_simple(expr, stmts, ctx)?;
            // the body may already be atomic; only compound results need a temp
            match simple {
                FlatExpr::Atom(atom) => Ok(atom),
                compound => {
                    let temp = ctx.fresh_temp();
                    ctx.define(temp.clone());
                    ctx.emit(stmts, temp.clone(), compound);
                    Ok(Atom::Var(temp))
                }
            }
        }
    }
}

/// Flatten `expr` to a simple expression, emitting statements for its
/// compound operands
fn flatten_simple(
    expr: &Expr,
    stmts: &mut Vec<Assign>,
    ctx: &mut FlattenContext,
) -> Result<FlatExpr, RillError> {
    match expr {
        Expr::Fixnum(num) => Ok(FlatExpr::Atom(Atom::Fixnum(*num))),
        Expr::Var(name) => Ok(FlatExpr::Atom(ctx.reference(name)?)),
        Expr::Read => Ok(FlatExpr::Read),
        Expr::Neg(operand) => {
            let atom = flatten_operand(operand, stmts, ctx)?;
            Ok(FlatExpr::Neg(atom))
        }
        Expr::Add(left, right) => {
            let left = flatten_operand(left, stmts, ctx)?;
            let right = flatten_operand(right, stmts, ctx)?;
            Ok(FlatExpr::Add(left, right))
        }
        Expr::Let { name, value, body } => {
            let bound = flatten_simple(value, stmts, ctx)?;
            ctx.define(name.clone());
            ctx.emit(stmts, name.clone(), bound);
            flatten_simple(body, stmts, ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(expr: &Expr) -> FlatProgram {
        let mut ctx = FlattenContext::new();
        flatten(expr, &mut ctx).unwrap()
    }

    #[test]
    fn test_literal_is_just_a_tail() {
        let program = run(&Expr::Fixnum(42));
        assert!(program.is_empty());
        assert_eq!(program.tail, FlatExpr::Atom(Atom::Fixnum(42)));
    }

    #[test]
    fn test_read_tail_needs_no_temp() {
        let program = run(&Expr::Read);
        assert!(program.is_empty());
        assert_eq!(program.tail, FlatExpr::Read);
    }

    #[test]
    fn test_flat_addition_stays_flat() {
        let program = run(&Expr::add(Expr::Fixnum(1), Expr::Fixnum(2)));
        assert!(program.is_empty());
        assert_eq!(
            program.tail,
            FlatExpr::Add(Atom::Fixnum(1), Atom::Fixnum(2))
        );
    }

    #[test]
    fn test_compound_operand_gets_a_temp() {
        // (+ (- 1) 2) => tmp.0 := (- 1); tail (+ tmp.0 2)
        let program = run(&Expr::add(Expr::neg(Expr::Fixnum(1)), Expr::Fixnum(2)));
        assert_eq!(program.len(), 1);
        assert_eq!(program.stmts[0].target, "tmp.0");
        assert_eq!(program.stmts[0].expr, FlatExpr::Neg(Atom::Fixnum(1)));
        assert_eq!(
            program.tail,
            FlatExpr::Add(Atom::Var("tmp.0".into()), Atom::Fixnum(2))
        );
    }

    #[test]
    fn test_operands_flatten_left_to_right() {
        // (+ (read) (read)): two temps, in reading order
        let program = run(&Expr::add(Expr::Read, Expr::Read));
        assert_eq!(program.len(), 2);
        assert_eq!(program.stmts[0].target, "tmp.0");
        assert_eq!(program.stmts[1].target, "tmp.1");
        assert_eq!(
            program.tail,
            FlatExpr::Add(Atom::Var("tmp.0".into()), Atom::Var("tmp.1".into()))
        );
    }

    #[test]
    fn test_let_binding_precedes_body() {
        // (let ([x1 32]) x1) => x1 := 32; tail x1
        let program = run(&Expr::let_binding("x1", Expr::Fixnum(32), Expr::var("x1")));
        assert_eq!(program.len(), 1);
        assert_eq!(program.stmts[0].target, "x1");
        assert_eq!(program.stmts[0].expr, FlatExpr::Atom(Atom::Fixnum(32)));
        assert_eq!(program.tail, FlatExpr::Atom(Atom::Var("x1".into())));
    }

    #[test]
    fn test_compound_bound_expression() {
        // (let ([x1 (+ (- 1) 2)]) x1): the binding's operands are hoisted,
        // then the binding, then the body
        let program = run(&Expr::let_binding(
            "x1",
            Expr::add(Expr::neg(Expr::Fixnum(1)), Expr::Fixnum(2)),
            Expr::var("x1"),
        ));
        assert_eq!(program.len(), 2);
        assert_eq!(program.stmts[0].target, "tmp.0");
        assert_eq!(program.stmts[1].target, "x1");
        assert_eq!(
            program.stmts[1].expr,
            FlatExpr::Add(Atom::Var("tmp.0".into()), Atom::Fixnum(2))
        );
    }

    #[test]
    fn test_unbound_variable_is_internal_fault() {
        let mut ctx = FlattenContext::new();
        let result = flatten(&Expr::var("ghost1"), &mut ctx);
        match result {
            Err(RillError::Fault(InternalFault::UnboundVariable(name))) => {
                assert_eq!(name, "ghost1");
            }
            other => panic!("Expected internal fault, got {:?}", other),
        }
    }

    #[test]
    fn test_outer_bindings_are_visible() {
        let mut ctx = FlattenContext::with_outer_bindings(["x1".into()]);
        let program = flatten(&Expr::var("x1"), &mut ctx).unwrap();
        assert_eq!(program.tail, FlatExpr::Atom(Atom::Var("x1".into())));
    }

    #[test]
    fn test_display_statement_form() {
        let program = run(&Expr::add(Expr::Read, Expr::Fixnum(2)));
        assert_eq!(program.to_string(), "(assign tmp.0 (read))\n(+ tmp.0 2)");
    }
}
