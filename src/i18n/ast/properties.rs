//! `.properties` AST
//!
//! A properties file parses into a flat, ordered list of [`PropertyLine`]s. Blank lines
//! produce no node. A [`CommentLine`] that ends on the line directly above a
//! [`KeyElementLine`] is that line's annotation candidate.

use super::range::Range;
use super::text_node::TextNode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentLine {
    /// Comment text after the `#`/`!` marker
    pub value: String,
    /// Whole comment line including the marker, excluding the end-of-line
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyElementLine {
    pub key: TextNode,
    pub element: TextNode,
    /// From the key start to the element end
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PropertyLine {
    CommentLine(CommentLine),
    KeyElementLine(KeyElementLine),
}

impl PropertyLine {
    pub fn range(&self) -> &Range {
        match self {
            PropertyLine::CommentLine(comment) => &comment.range,
            PropertyLine::KeyElementLine(line) => &line.range,
        }
    }

    pub fn as_comment(&self) -> Option<&CommentLine> {
        match self {
            PropertyLine::CommentLine(comment) => Some(comment),
            PropertyLine::KeyElementLine(_) => None,
        }
    }

    pub fn as_key_element(&self) -> Option<&KeyElementLine> {
        match self {
            PropertyLine::KeyElementLine(line) => Some(line),
            PropertyLine::CommentLine(_) => None,
        }
    }
}

/// Ordered lines of one properties file.
pub type PropertyList = Vec<PropertyLine>;
