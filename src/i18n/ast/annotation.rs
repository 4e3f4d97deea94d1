//! SAP translation annotations
//!
//! A comment directly above a key/element line may classify the text for translators:
//!
//! ```text
//! #XFLD,20: Label of the customer name field
//! customerName=Customer
//! ```
//!
//! The first part is a [`SapTextType`] code, then an optional maximum length and an
//! optional free-form note. [`I18nAnnotationNode`] is the parsed form with one range per
//! part; [`I18nAnnotation`] is the range-free form used when printing new entries.

use super::text_node::{TextNode, ValueNode};
use serde::Serialize;
use std::fmt;

/// Short text types (up to 120 characters).
const SHORT_TEXT_TYPES: &[(&str, &str)] = &[
    ("XACT", "Accessibility"),
    ("XALT", "Alternative text"),
    ("XBCB", "Breadcrumb step"),
    ("XBLI", "Bullet list item text"),
    ("XBUT", "Button text"),
    ("XCAP", "Caption"),
    ("XCEL", "Cell"),
    ("XCKL", "Checkbox"),
    ("XCOL", "Column header"),
    ("XCRD", "Tabstrip"),
    ("XDAT", "Data navigation text"),
    ("XFLD", "Label"),
    ("XFRM", "Frame"),
    ("XGLS", "Term"),
    ("XGRP", "Group title"),
    ("XHED", "Heading"),
    ("XLGD", "Legend text"),
    ("XLNK", "Hyperlink text"),
    ("XLOG", "Log entry"),
    ("XLST", "List box item"),
    ("XMEN", "Menu header"),
    ("XMIT", "Menu item"),
    ("XMSG", "Message text"),
    ("XRBL", "Radio button"),
    ("XSEL", "Selection text"),
    ("XTIT", "Title"),
    ("XTOL", "Tooltip"),
    ("XTXT", "General text"),
];

/// Long text types (more than 120 characters).
const LONG_TEXT_TYPES: &[(&str, &str)] = &[
    ("YACT", "Accessibility (long)"),
    ("YBLI", "Bullet list item text (long)"),
    ("YDEF", "Definition"),
    ("YDES", "Description"),
    ("YEXP", "Explanation"),
    ("YFAA", "Frequently asked question answer"),
    ("YFAQ", "Frequently asked question"),
    ("YGLS", "Glossary term definition"),
    ("YINF", "Information"),
    ("YINS", "Instruction"),
    ("YLOG", "Log entry (long)"),
    ("YMSE", "Error message"),
    ("YMSG", "Message text (long)"),
    ("YMSI", "Information message (long)"),
    ("YMSW", "Warning message"),
    ("YTEC", "Technical text"),
    ("YTIC", "Ticker text"),
    ("YTXT", "General text (long)"),
];

/// A SAP text type code such as `XFLD` or `YMSG`.
///
/// Codes are taken as written: an unknown code is kept verbatim, it only lacks a
/// [description](SapTextType::description).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SapTextType(String);

impl SapTextType {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// `XFLD`, the default type for short texts.
    pub fn label() -> Self {
        Self::new("XFLD")
    }

    /// `YMSG`, the default type for long texts.
    pub fn message_text() -> Self {
        Self::new("YMSG")
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn is_short(&self) -> bool {
        lookup(SHORT_TEXT_TYPES, &self.0).is_some()
    }

    pub fn is_long(&self) -> bool {
        lookup(LONG_TEXT_TYPES, &self.0).is_some()
    }

    /// Human readable name of a known code.
    pub fn description(&self) -> Option<&'static str> {
        lookup(SHORT_TEXT_TYPES, &self.0).or_else(|| lookup(LONG_TEXT_TYPES, &self.0))
    }
}

fn lookup(table: &[(&str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, description)| *description)
}

impl fmt::Display for SapTextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SapTextType {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Parsed annotation with a range for every part, for targeted in-place edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct I18nAnnotationNode {
    pub text_type: ValueNode<SapTextType>,
    pub max_length: Option<ValueNode<u32>>,
    /// Verbatim text after the first `:`, leading whitespace included
    pub note: Option<TextNode>,
}

impl I18nAnnotationNode {
    /// Drop the ranges.
    pub fn to_annotation(&self) -> I18nAnnotation {
        I18nAnnotation {
            text_type: self.text_type.value.clone(),
            max_length: self.max_length.as_ref().map(|node| node.value),
            note: self.note.as_ref().map(|node| node.value.clone()),
        }
    }
}

/// Annotation without source ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct I18nAnnotation {
    pub text_type: SapTextType,
    pub max_length: Option<u32>,
    pub note: Option<String>,
}

impl I18nAnnotation {
    pub fn new(text_type: impl Into<SapTextType>) -> Self {
        Self {
            text_type: text_type.into(),
            max_length: None,
            note: None,
        }
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
