//! Rill Core Foundation Library
//!
//! This crate provides the foundation types shared by every layer of the
//! Rill compiler pipeline:
//!
//! - **Spans**: source position tracking (`shared` module)
//! - **Errors**: the error taxonomy for lexing, parsing, and internal
//!   pipeline faults (`errors` module)
//!
//! Keeping these in a leaf crate avoids circular dependencies between the
//! syntax and IR layers.

pub mod errors;
pub mod shared;

// Convenience re-exports for common types
pub use errors::{InternalFault, LexerError, ParseError, RillError};
pub use shared::SpanInfo;

/// Version information for the rill-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
