//! Shared types between Rill layers
//!
//! Fundamental types used by both the syntax and IR layers. Kept here so
//! neither layer has to depend on the other for position information.

use serde::{Deserialize, Serialize};

/// Source position information shared across lexer, parser, and
/// diagnostics, with line/column tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanInfo {
    /// Start line number (1-based)
    pub start_line: usize,
    /// Start column number (0-based)
    pub start_column: usize,
    /// End line number (1-based)
    pub end_line: usize,
    /// End column number (0-based)
    pub end_column: usize,
}

impl SpanInfo {
    /// Create a new span info with line/column information
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        SpanInfo {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Combine two spans to create a larger span
    pub fn combine(start: SpanInfo, end: SpanInfo) -> Self {
        SpanInfo {
            start_line: start.start_line,
            start_column: start.start_column,
            end_line: end.end_line,
            end_column: end.end_column,
        }
    }

    /// Create an empty/null span (for synthesized positions, e.g. end of input)
    pub fn empty() -> Self {
        SpanInfo {
            start_line: 0,
            start_column: 0,
            end_line: 0,
            end_column: 0,
        }
    }

    /// Create span info from byte offsets by converting to line/column
    pub fn from_byte_offsets(source: &str, start: usize, end: usize) -> Self {
        let (start_line, start_column) = byte_offset_to_line_col(source, start);
        let (end_line, end_column) = byte_offset_to_line_col(source, end);

        SpanInfo {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

impl std::fmt::Display for SpanInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_column)
    }
}

/// Convert byte offset to line and column numbers
fn byte_offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 0;

    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }

    (line, col)
}
