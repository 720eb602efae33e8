//! High-level compilation interface
//!
//! Convenient wrappers around the orchestration module for callers that
//! do not need to hold a context across compilations.

use crate::orchestration::{compile_source, CompilationContext, CompileResult};
use rill_core::errors::RillError;

/// Compile Rill source code to the linear intermediate form
///
/// This is the main entry point for most users.
pub fn compile(source: &str) -> Result<CompileResult, RillError> {
    let mut ctx = CompilationContext::new();
    compile_source(source, &mut ctx)
}

/// Check whether Rill source code compiles without errors
pub fn check_source(source: &str) -> bool {
    compile(source).is_ok()
}
