//! Source location tracking for error reporting.
//!
//! # Design
//!
//! - `Span`: byte range of a node in the source text (`lpos..rpos`)
//! - `LineIndex`: precomputed line starts for turning offsets into
//!   `(line, column)` pairs
//!
//! # Examples
//!
//! ```
//! # use geoql_ast::foundation::span::*;
//! let index = LineIndex::new("trigger\nwhen a > 1");
//! assert_eq!(index.line_col(8), (2, 1));
//! ```

use serde::{Deserialize, Serialize};

/// Byte range of a node in the source text.
///
/// `start` is inclusive and `end` exclusive. Spans never affect structural
/// equality of expressions; they exist for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first character (`lpos`)
    pub start: u32,
    /// Byte offset one past the last character (`rpos`)
    pub end: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a zero-length span at `offset`.
    pub fn point(offset: u32) -> Self {
        Self::new(offset, offset)
    }

    /// Check if this span is zero-length.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Merge two spans (returns span covering both).
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Line start table for a single source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offsets of each line start; `line_starts[0]` is always 0.
    line_starts: Vec<u32>,
    source: String,
}

impl LineIndex {
    /// Build the index for `source`.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self {
            line_starts,
            source: source.to_string(),
        }
    }

    /// Get `(line, column)` for a byte offset.
    ///
    /// Both are 1-based; the column counts characters, not bytes. Offsets past
    /// the end of the source are clamped to the end.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.source.len() as u32);

        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.max(1) - 1,
        };

        let line_start = self.line_starts[line_idx] as usize;
        let column = self
            .source
            .get(line_start..offset as usize)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset as usize - line_start);

        (line_idx as u32 + 1, column as u32 + 1)
    }

    /// Source text covered by `span`, or an empty string if out of bounds.
    pub fn snippet(&self, span: &Span) -> &str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let a = Span::new(4, 8);
        let b = Span::new(10, 12);
        assert_eq!(a.merge(&b), Span::new(4, 12));
        assert_eq!(b.merge(&a), Span::new(4, 12));
    }

    #[test]
    fn test_line_col_first_line() {
        let index = LineIndex::new("trigger when x > 1");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(8), (1, 9));
    }

    #[test]
    fn test_line_col_multi_line() {
        let index = LineIndex::new("trigger\nvars\n  a = 1\n");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_col(8), (2, 1));
        assert_eq!(index.line_col(15), (3, 3));
    }

    #[test]
    fn test_line_col_counts_chars() {
        // "é" is two bytes but one column
        let index = LineIndex::new("\"é\" x");
        assert_eq!(index.line_col(5), (1, 5));
    }

    #[test]
    fn test_line_col_clamps_past_end() {
        let index = LineIndex::new("abc");
        assert_eq!(index.line_col(100), (1, 4));
    }

    #[test]
    fn test_snippet() {
        let index = LineIndex::new("when speed > 50mph");
        assert_eq!(index.snippet(&Span::new(5, 10)), "speed");
        assert_eq!(index.snippet(&Span::new(50, 60)), "");
    }
}
