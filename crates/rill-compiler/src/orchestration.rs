//! Compilation pipeline orchestration
//!
//! Pipeline stages:
//! 1. Parse (rill-syntax)
//! 2. Constant folding (rill-ir)
//! 3. Uniquify (rill-ir)
//! 4. Flatten (rill-ir)

use rill_core::errors::RillError;
use rill_ir::{
    flatten, partial_eval, uniquify, ConstEvalContext, ConstEvalStats, FlatProgram,
    FlattenContext, FlattenStats, RenamerContext, RenamerStats,
};
use rill_syntax::{Expr, Parser};

/// Complete compilation result
#[derive(Debug, Clone)]
pub struct CompileResult {
    /// The tree after folding and renaming, kept observable for
    /// diagnostic printing
    pub ast: Expr,
    /// The linear intermediate form
    pub flat: FlatProgram,
    /// Compilation statistics
    pub stats: CompilationStats,
}

/// Per-stage statistics
#[derive(Debug, Clone, Default)]
pub struct CompilationStats {
    /// Constant folding statistics
    pub const_eval_stats: ConstEvalStats,
    /// Renaming statistics
    pub rename_stats: RenamerStats,
    /// Flattening statistics
    pub flatten_stats: FlattenStats,
}

/// Compilation context that coordinates all stages
#[derive(Debug, Clone, Default)]
pub struct CompilationContext {
    /// Constant folding context
    pub const_eval_ctx: ConstEvalContext,
    /// Renamer context (owns the symbol table)
    pub renamer_ctx: RenamerContext,
    /// Flattening context (owns the fresh-temp counter)
    pub flatten_ctx: FlattenContext,
}

impl CompilationContext {
    /// Create a new compilation context
    pub fn new() -> Self {
        Self::default()
    }
}

/// Main compilation orchestration function
pub fn compile_source(
    source: &str,
    ctx: &mut CompilationContext,
) -> Result<CompileResult, RillError> {
    // Stage 1: Parse (lexing + parsing)
    let mut parser = Parser::new(source)?;
    let ast = parser.parse_program()?;

    // Stages 2-4: run the rewriting pipeline
    compile_parsed(ast, ctx)
}

/// Compile an already-parsed expression
///
/// Useful when the caller wants to print or inspect the tree between
/// stages; each stage function below is also public for that purpose.
pub fn compile_parsed(
    mut ast: Expr,
    ctx: &mut CompilationContext,
) -> Result<CompileResult, RillError> {
    // Stage 2: Constant folding (in place)
    partial_eval(&mut ast, &mut ctx.const_eval_ctx);

    // Stage 3: Uniquify (in place, consumes the symbol table)
    uniquify(&mut ast, &mut ctx.renamer_ctx);

    // Stage 4: Flatten into the linear form
    let flat = flatten(&ast, &mut ctx.flatten_ctx)?;

    let stats = CompilationStats {
        const_eval_stats: ctx.const_eval_ctx.stats.clone(),
        rename_stats: ctx.renamer_ctx.stats.clone(),
        flatten_stats: ctx.flatten_ctx.stats.clone(),
    };

    Ok(CompileResult { ast, flat, stats })
}
