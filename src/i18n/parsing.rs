//! Parsing module for localization files
//!
//!     Every format is processed the same way:
//!         1. Lexing: the source text becomes a flat token list. See [lexing](crate::i18n::lexing).
//!         2. Parsing: a cursor walks the tokens and builds the AST. Token byte spans are
//!            turned into [`Range`](crate::i18n::ast::Range)s with line/character positions.
//!
//!     The parse result keeps the tokens next to the AST. Writers need both: the AST to
//!     find entries and the tokens to detect the file's own conventions (end-of-line style,
//!     separator) before computing edits.
//!
//!     JSON is the exception: it has no token stage and is read by a small tolerant tree
//!     reader, see [json].
//!
//! Annotations
//!
//!     SAP annotations live in comments, so the properties parser leaves them alone. The
//!     [annotation] interpreter runs on demand over the comment directly above an entry.

pub mod annotation;
pub mod csv;
pub mod json;
pub mod properties;

pub use annotation::{
    parse_annotation, print_properties_i18n_annotation, print_properties_i18n_entry,
};
pub use csv::CsvParseResult;
pub use json::{JsonMember, JsonNode, JsonValue};
pub use properties::PropertiesParseResult;

use std::path::Path;

/// Supported localization file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Properties,
    Csv,
    Json,
}

impl Format {
    /// Match a file extension (without the dot, case-insensitive).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "properties" => Some(Format::Properties),
            "csv" => Some(Format::Csv),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?;
        Self::from_extension(extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Properties => "properties",
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }
}

/// Result of [`parse`], one variant per format.
#[derive(Debug, Clone)]
pub enum Parsed {
    Properties(PropertiesParseResult),
    Csv(CsvParseResult),
    /// `None` when the text holds no JSON value at all
    Json(Option<JsonNode>),
}

/// Parse `text` as `format`. Never fails.
pub fn parse(text: &str, format: Format) -> Parsed {
    match format {
        Format::Properties => Parsed::Properties(properties::parse(text)),
        Format::Csv => Parsed::Csv(csv::parse(text)),
        Format::Json => Parsed::Json(json::parse(text)),
    }
}
