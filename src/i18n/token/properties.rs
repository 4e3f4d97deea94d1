//! Tokens produced by the `.properties` lexer

use serde::Serialize;
use std::ops::Range as ByteRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertiesTokenKind {
    /// A whole `#` or `!` line, without its end-of-line
    Comment,
    /// `=` or `:` between key and element
    Separator,
    /// Backslash followed by an end-of-line inside an element
    ContinuationLineMarker,
    /// `\n`, `\r` or `\r\n`
    EndOfLine,
    /// Key or element text
    Text,
    /// Run of spaces, tabs and form feeds
    Whitespace,
}

/// A properties token.
///
/// For [`PropertiesTokenKind::Text`] the image is the escape-decoded text; for every
/// other kind it is the exact source slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertiesToken {
    pub kind: PropertiesTokenKind,
    pub image: String,
    pub start: usize,
    pub end: usize,
}

impl PropertiesToken {
    pub fn new(kind: PropertiesTokenKind, image: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            image: image.into(),
            start,
            end,
        }
    }

    pub fn span(&self) -> ByteRange<usize> {
        self.start..self.end
    }

    pub fn is(&self, kind: PropertiesTokenKind) -> bool {
        self.kind == kind
    }
}
