//! Leaf nodes carrying a value and the range it was read from

use super::range::Range;
use serde::Serialize;

/// A value read from source together with the range it occupies.
///
/// The range always points at the raw source text; `value` is the decoded form
/// (escapes resolved, quotes stripped, continuation lines joined).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueNode<T> {
    pub value: T,
    pub range: Range,
}

impl<T> ValueNode<T> {
    pub fn new(value: T, range: Range) -> Self {
        Self { value, range }
    }
}

/// The common case: a decoded text value and its source range.
pub type TextNode = ValueNode<String>;

impl TextNode {
    /// Empty text positioned (zero-width) at the start of `range`.
    pub fn empty_at(range: &Range) -> Self {
        Self::new(
            String::new(),
            Range::empty_at(range.span.start, range.start),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}
