//! Tokens produced by the `.csv` lexer

use serde::Serialize;
use std::ops::Range as ByteRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CsvTokenKind {
    /// `,`, `;` or tab
    Separator,
    /// `\n`
    Eol,
    /// Unquoted field
    Text,
    /// Field that was closed by a double quote
    EscapedText,
}

/// A CSV token. `value` is decoded (quotes removed, `""` collapsed) while `start..end`
/// covers the raw field including its quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvToken {
    pub kind: CsvTokenKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

impl CsvToken {
    pub fn new(kind: CsvTokenKind, value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
        }
    }

    pub fn span(&self) -> ByteRange<usize> {
        self.start..self.end
    }

    /// True for both field kinds.
    pub fn is_field(&self) -> bool {
        matches!(self.kind, CsvTokenKind::Text | CsvTokenKind::EscapedText)
    }
}
