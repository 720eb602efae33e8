//! End-to-end pipeline tests: parse → fold → uniquify → flatten

use rill_compiler::{check_source, compile, CompilationContext};
use rill_ir::{Atom, FlatExpr};
use rill_syntax::Expr;

#[test]
fn test_end_to_end_example() {
    // (let ([x 32]) (+ (let ([x 10]) x) x))
    //
    // Nothing folds (all operands are variables); uniquify renames the
    // outer binding to x1 and the inner to x2; flatten orders the outer
    // binding's assignment before the inner one, ending in an additive
    // tail over the renamed variables.
    let result = compile("(let ([x 32]) (+ (let ([x 10]) x) x))").unwrap();

    assert_eq!(
        result.ast,
        Expr::let_binding(
            "x1",
            Expr::Fixnum(32),
            Expr::add(
                Expr::let_binding("x2", Expr::Fixnum(10), Expr::var("x2")),
                Expr::var("x1"),
            )
        )
    );

    assert_eq!(result.flat.stmts.len(), 2);
    assert_eq!(result.flat.stmts[0].target, "x1");
    assert_eq!(result.flat.stmts[0].expr, FlatExpr::Atom(Atom::Fixnum(32)));
    assert_eq!(result.flat.stmts[1].target, "x2");
    assert_eq!(result.flat.stmts[1].expr, FlatExpr::Atom(Atom::Fixnum(10)));
    assert_eq!(
        result.flat.tail,
        FlatExpr::Add(Atom::Var("x2".into()), Atom::Var("x1".into()))
    );
}

#[test]
fn test_folding_happens_before_flattening() {
    // (+ (read) (- (+ 5 3))): the arithmetic folds to -8, leaving only
    // the read to hoist
    let result = compile("(+ (read) (- (+ 5 3)))").unwrap();

    assert_eq!(result.ast, Expr::add(Expr::Read, Expr::Fixnum(-8)));
    assert_eq!(result.flat.stmts.len(), 1);
    assert_eq!(result.flat.stmts[0].expr, FlatExpr::Read);
    assert_eq!(
        result.flat.tail,
        FlatExpr::Add(Atom::Var("tmp.0".into()), Atom::Fixnum(-8))
    );
}

#[test]
fn test_let_bound_arithmetic_survives_folding_then_flattens() {
    // The folder does not enter the let, so (+ 1 2) reaches the
    // flattener intact and is linearized there
    let result = compile("(let ([x (+ 1 2)]) x)").unwrap();

    assert_eq!(result.stats.const_eval_stats.total_folds(), 0);
    assert_eq!(result.flat.stmts.len(), 1);
    assert_eq!(result.flat.stmts[0].target, "x1");
    assert_eq!(
        result.flat.stmts[0].expr,
        FlatExpr::Add(Atom::Fixnum(1), Atom::Fixnum(2))
    );
    assert_eq!(result.flat.tail, FlatExpr::Atom(Atom::Var("x1".into())));
}

#[test]
fn test_pure_arithmetic_compiles_to_bare_tail() {
    let result = compile("(- (+ 10 (- 2)))").unwrap();
    assert!(result.flat.is_empty());
    assert_eq!(result.flat.tail, FlatExpr::Atom(Atom::Fixnum(-8)));
}

#[test]
fn test_malformed_input_reports_parse_error() {
    let err = compile("(+ 1").unwrap_err();
    assert!(err.is_user_error());
}

#[test]
fn test_check_source() {
    assert!(check_source("(let ([v (read)]) (+ v -1))"));
    assert!(!check_source("(let ([v]) v)"));
}

#[test]
fn test_flat_program_renders_for_diagnostics() {
    let result = compile("(let ([x 32]) (+ (let ([x 10]) x) x))").unwrap();
    assert_eq!(
        result.flat.to_string(),
        "(assign x1 32)\n(assign x2 10)\n(+ x2 x1)"
    );
    assert_eq!(
        result.ast.to_string(),
        "(let ([x1 32]) (+ (let ([x2 10]) x2) x1))"
    );
}

#[test]
fn test_stage_contexts_are_independent_per_run() {
    let mut ctx = CompilationContext::new();
    rill_compiler::compile_source("(let ([x 1]) x)", &mut ctx).unwrap();

    // the symbol table shows no residue from the completed traversal
    assert_eq!(ctx.renamer_ctx.table.get("x"), 0);
}
