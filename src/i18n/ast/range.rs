//! Position and range tracking for source locations
//!
//! This module defines the data structures for representing positions and ranges in
//! localization sources, as well as utilities for converting byte offsets to line/character
//! positions.
//!
//! ## Types
//!
//! - [`Position`] - A zero-based line:character position
//! - [`Range`] - A source range with start/end positions and byte span
//! - [`SourceLocation`] - Owns the line offsets of one source and converts in both directions
//!
//! ## Key Design
//!
//! - **Byte offsets**: token and node offsets are byte offsets into the UTF-8 source, so
//!   `&source[range.span.clone()]` is always the raw text of a node
//! - **Line breaks**: `\n`, `\r` and `\r\n` each count as exactly one line break
//! - **No null ranges**: the default range is (0, 0) to (0, 0), never None
//! - **Efficient conversion**: O(log n) binary search for offset-to-position conversion
//!
//! The free functions [`line_offsets`], [`position_at`] and [`range_at`] are the building
//! blocks; [`SourceLocation`] wraps them for callers that convert many offsets of the same
//! text.

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// Represents a position in source text (line and character, both zero-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// Represents a range in source text (start and end positions plus the byte span)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub span: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(span: ByteRange<usize>, start: Position, end: Position) -> Self {
        Self { span, start, end }
    }

    /// Zero-width range located at `position` / `offset`.
    pub fn empty_at(offset: usize, position: Position) -> Self {
        Self::new(offset..offset, position, position)
    }

    /// True when the range covers no source text.
    pub fn is_empty(&self) -> bool {
        self.span.start == self.span.end
    }

    /// Check if a position is contained within this range (end inclusive)
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Check if another range overlaps with this range
    pub fn overlaps(&self, other: &Range) -> bool {
        self.contains(other.start)
            || self.contains(other.end)
            || other.contains(self.start)
            || other.contains(self.end)
    }

    /// Build a bounding box that contains all provided ranges.
    pub fn bounding_box<'a, I>(mut ranges: I) -> Option<Range>
    where
        I: Iterator<Item = &'a Range>,
    {
        let first = ranges.next()?.clone();
        let mut span_start = first.span.start;
        let mut span_end = first.span.end;
        let mut start_pos = first.start;
        let mut end_pos = first.end;

        for range in ranges {
            if range.start < start_pos {
                start_pos = range.start;
                span_start = range.span.start;
            }
            if range.end > end_pos {
                end_pos = range.end;
                span_end = range.span.end;
            }
        }

        Some(Range::new(span_start..span_end, start_pos, end_pos))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::empty_at(0, Position::default())
    }
}

/// Offsets where each line of `text` begins. Offset 0 is always first.
pub fn line_offsets(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut offsets = vec![0];
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                offsets.push(i + 2);
                i += 2;
            }
            b'\r' | b'\n' => {
                offsets.push(i + 1);
                i += 1;
            }
            _ => i += 1,
        }
    }
    offsets
}

/// Convert an offset to a position using precomputed line offsets.
///
/// The offset is clamped to `[0, text_len]` first.
pub fn position_at(line_offsets: &[usize], offset: usize, text_len: usize) -> Position {
    let target = offset.min(text_len);
    if line_offsets.is_empty() {
        return Position::new(0, target);
    }
    let line = match line_offsets.binary_search(&target) {
        Ok(line) => line,
        Err(0) => 0,
        Err(insert_at) => insert_at - 1,
    };
    Position::new(line, target.saturating_sub(line_offsets[line]))
}

/// Convert a byte span to a range using precomputed line offsets.
pub fn range_at(line_offsets: &[usize], start: usize, end: usize, text_len: usize) -> Range {
    Range::new(
        start.min(text_len)..end.min(text_len),
        position_at(line_offsets, start, text_len),
        position_at(line_offsets, end, text_len),
    )
}

/// Provides fast conversion between byte offsets and line/character positions
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceLocation {
    /// Create a new SourceLocation from source text
    pub fn new(source: &str) -> Self {
        Self {
            line_starts: line_offsets(source),
            len: source.len(),
        }
    }

    pub fn position_at(&self, offset: usize) -> Position {
        position_at(&self.line_starts, offset, self.len)
    }

    pub fn range_at(&self, start: usize, end: usize) -> Range {
        range_at(&self.line_starts, start, end, self.len)
    }

    /// Inverse of [`SourceLocation::position_at`]. Characters past the end of a line are
    /// clamped to the start of the next line (or the end of the source).
    pub fn offset_at(&self, position: Position) -> usize {
        let Some(&line_start) = self.line_starts.get(position.line) else {
            return self.len;
        };
        let line_end = self
            .line_starts
            .get(position.line + 1)
            .copied()
            .unwrap_or(self.len);
        (line_start + position.character).min(line_end)
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset for the start of a line
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Length of the source this location was built from.
    pub fn source_len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_comparison() {
        let pos1 = Position::new(1, 5);
        let pos2 = Position::new(1, 5);
        let pos3 = Position::new(2, 3);

        assert_eq!(pos1, pos2);
        assert_ne!(pos1, pos3);
        assert!(pos1 < pos3);
    }

    #[test]
    fn test_range_contains_multiline() {
        let range = Range::new(0..0, Position::new(1, 5), Position::new(2, 10));

        assert!(!range.contains(Position::new(1, 4)));
        assert!(!range.contains(Position::new(0, 5)));

        assert!(range.contains(Position::new(1, 5)));
        assert!(range.contains(Position::new(2, 0)));
        assert!(range.contains(Position::new(2, 10)));

        assert!(!range.contains(Position::new(2, 11)));
        assert!(!range.contains(Position::new(3, 0)));
    }

    #[test]
    fn test_range_overlaps() {
        let range1 = Range::new(0..0, Position::new(0, 0), Position::new(1, 5));
        let range2 = Range::new(0..0, Position::new(1, 0), Position::new(2, 5));
        let range3 = Range::new(0..0, Position::new(3, 0), Position::new(4, 5));

        assert!(range1.overlaps(&range2));
        assert!(range2.overlaps(&range1));
        assert!(!range1.overlaps(&range3));
    }

    #[test]
    fn test_bounding_box_ranges() {
        let ranges = [
            Range::new(2..5, Position::new(0, 2), Position::new(0, 5)),
            Range::new(10..20, Position::new(3, 0), Position::new(4, 3)),
        ];

        let bbox = Range::bounding_box(ranges.iter()).unwrap();
        assert_eq!(bbox.span, 2..20);
        assert_eq!(bbox.start, Position::new(0, 2));
        assert_eq!(bbox.end, Position::new(4, 3));
    }

    #[test]
    fn test_bounding_box_empty_iter() {
        assert!(Range::bounding_box(std::iter::empty::<&Range>()).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(5, 10).to_string(), "5:10");
        let range = Range::new(0..0, Position::new(1, 0), Position::new(2, 5));
        assert_eq!(range.to_string(), "1:0..2:5");
    }

    #[test]
    fn test_line_offsets_mixed_breaks() {
        assert_eq!(line_offsets(""), vec![0]);
        assert_eq!(line_offsets("a\nb"), vec![0, 2]);
        assert_eq!(line_offsets("a\r\nb"), vec![0, 3]);
        assert_eq!(line_offsets("a\rb"), vec![0, 2]);
        assert_eq!(line_offsets("a\r\n\r\n\nb\r"), vec![0, 3, 5, 6, 8]);
    }

    #[test]
    fn test_position_at_clamps() {
        let offsets = line_offsets("ab\ncd");
        assert_eq!(position_at(&offsets, 0, 5), Position::new(0, 0));
        assert_eq!(position_at(&offsets, 2, 5), Position::new(0, 2));
        assert_eq!(position_at(&offsets, 3, 5), Position::new(1, 0));
        assert_eq!(position_at(&offsets, 99, 5), Position::new(1, 2));
    }

    #[test]
    fn test_position_at_without_offsets() {
        assert_eq!(position_at(&[], 4, 10), Position::new(0, 4));
        assert_eq!(position_at(&[], 40, 10), Position::new(0, 10));
    }

    #[test]
    fn test_range_at_multiline() {
        let loc = SourceLocation::new("Hello\r\nWorld\nTest");
        let range = loc.range_at(7, 13);

        assert_eq!(range.start, Position::new(1, 0));
        assert_eq!(range.end, Position::new(2, 0));
        assert_eq!(range.span, 7..13);
    }

    #[test]
    fn test_position_with_unicode() {
        let loc = SourceLocation::new("Hello\nwörld");
        // Multi-byte characters advance the byte column by their encoded width
        assert_eq!(loc.position_at(6), Position::new(1, 0));
        assert_eq!(loc.position_at(9), Position::new(1, 3));
    }

    #[test]
    fn test_offset_at_inverts_position_at() {
        let source = "k=v\r\n\nkey2 = value\rlast";
        let loc = SourceLocation::new(source);
        for offset in 0..=source.len() {
            assert_eq!(loc.offset_at(loc.position_at(offset)), offset);
        }
    }

    #[test]
    fn test_line_count_and_start() {
        let loc = SourceLocation::new("Hello\nWorld\nTest");

        assert_eq!(loc.line_count(), 3);
        assert_eq!(loc.line_start(0), Some(0));
        assert_eq!(loc.line_start(1), Some(6));
        assert_eq!(loc.line_start(2), Some(12));
        assert_eq!(loc.line_start(3), None);
    }
}
