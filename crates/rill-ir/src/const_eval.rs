//! Constant folding (partial evaluation) for Rill
//!
//! Post-order rewrite of the tree in place: any `Neg` whose operand has
//! folded to a literal becomes the negated literal, any `Add` with two
//! literal operands becomes their sum. Folding replaces the node value
//! wholesale, so the former children are dropped with it.
//!
//! Known limitation, kept on purpose: the pass does not descend into a
//! `Let` at all — neither the bound expression nor the body is folded.
//! `(let ([x (+ 1 2)]) x)` comes out unchanged, while the same `(+ 1 2)`
//! in an operand position outside a `let` folds to `3`. Callers that need
//! full coverage must not assume otherwise.
//!
//! The pass is total: it cannot fail on a well-formed tree. Arithmetic
//! wraps on overflow.

use rill_syntax::Expr;

/// Statistics about constant folding
#[derive(Debug, Clone, Default)]
pub struct ConstEvalStats {
    pub negs_folded: usize,
    pub adds_folded: usize,
}

impl ConstEvalStats {
    /// Total number of nodes replaced by literals
    pub fn total_folds(&self) -> usize {
        self.negs_folded + self.adds_folded
    }
}

/// Constant folding context
#[derive(Debug, Clone, Default)]
pub struct ConstEvalContext {
    /// Statistics about the current run
    pub stats: ConstEvalStats,
}

impl ConstEvalContext {
    /// Create a new constant folding context
    pub fn new() -> Self {
        Self::default()
    }

    /// Get folding statistics
    pub fn stats(&self) -> &ConstEvalStats {
        &self.stats
    }
}

/// Fold constant subtrees of `expr` in place
pub fn partial_eval(expr: &mut Expr, ctx: &mut ConstEvalContext) {
    match expr {
        Expr::Neg(operand) => {
            partial_eval(operand, ctx);
            if let Expr::Fixnum(n) = **operand {
                ctx.stats.negs_folded += 1;
                *expr = Expr::Fixnum(n.wrapping_neg());
            }
        }
        Expr::Add(left, right) => {
            partial_eval(left, ctx);
            partial_eval(right, ctx);
            if let (Expr::Fixnum(a), Expr::Fixnum(b)) = (&**left, &**right) {
                let sum = a.wrapping_add(*b);
                ctx.stats.adds_folded += 1;
                *expr = Expr::Fixnum(sum);
            }
        }
        // Leaves are already simple; Let initializers and bodies are
        // treated as already simplified and are not visited.
        Expr::Fixnum(_) | Expr::Read | Expr::Var(_) | Expr::Let { .. } => {}
    }
}
