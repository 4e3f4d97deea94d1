//! Writers
//!
//!     Add (and for properties, remove) entries in existing localization files without
//!     reformatting them. Every writer works the same way:
//!         1. Parse the current text and detect its conventions (end-of-line style,
//!            separator, indentation).
//!         2. Compute a list of [`TextEdit`]s, inserting wherever possible and replacing
//!            only the bytes of values that change.
//!         3. Apply the edits with [`apply_edits`].
//!
//!     Bytes outside the edits are copied unchanged, so comments, blank lines, line endings
//!     and the formatting of untouched entries survive a write.
//!
//!     - [properties]: [`write_properties_text`]
//!     - [csv]: [`add_csv_texts`]
//!     - [json]: [`add_json_texts`]

pub mod csv;
pub mod json;
pub mod properties;

pub use csv::{add_csv_texts, add_csv_texts_with};
pub use json::{add_json_texts, add_json_texts_with};
pub use properties::{write_properties_text, write_properties_text_with};

use crate::i18n::bundle::NewI18nEntry;
use indexmap::IndexMap;

/// Replace `start..end` (byte offsets into the original text) with `new_text`.
/// An empty span is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub new_text: String,
}

impl TextEdit {
    pub fn insert(at: usize, new_text: impl Into<String>) -> Self {
        Self {
            start: at,
            end: at,
            new_text: new_text.into(),
        }
    }

    pub fn replace(start: usize, end: usize, new_text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::replace(start, end, String::new())
    }
}

/// Apply `edits` to `text`.
///
/// Edits are applied in offset order; insertions at the same offset keep the order they
/// were given in. An edit overlapping an earlier one is dropped. Offsets past the end of
/// the text are clamped.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by_key(|edit| (edit.start, edit.end));

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in ordered {
        let start = edit.start.min(text.len());
        let end = edit.end.clamp(start, text.len());
        if start < cursor {
            tracing::debug!(?edit, "dropping overlapping edit");
            continue;
        }
        let (Some(kept), true) = (text.get(cursor..start), text.is_char_boundary(end)) else {
            tracing::debug!(?edit, "dropping edit inside a character");
            continue;
        };
        out.push_str(kept);
        out.push_str(&edit.new_text);
        cursor = end;
    }
    out.push_str(text.get(cursor..).unwrap_or_default());
    out
}

/// Formatting knobs shared by the writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Indentation unit for JSON files that give no hint of their own
    pub json_indent: String,
    /// Separator for CSV files that contain none yet
    pub csv_separator: char,
    /// Header of the key column when a CSV file is created from scratch
    pub csv_key_column: String,
    /// Write a guessed annotation above new properties entries that come without one
    pub annotate_new_entries: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            json_indent: "    ".to_string(),
            csv_separator: ';',
            csv_key_column: "key".to_string(),
            annotate_new_entries: false,
        }
    }
}

/// `\r\n` if the text uses it for its first line break, else `\n`.
pub(crate) fn detect_eol(text: &str) -> &'static str {
    match text.find('\n') {
        Some(index) if index > 0 && text.as_bytes()[index - 1] == b'\r' => "\r\n",
        Some(_) => "\n",
        None if text.contains('\r') => "\r",
        None => "\n",
    }
}

/// New entries keyed by key, the last entry for a key winning, first-seen order kept.
pub(crate) fn dedup_entries(entries: &[NewI18nEntry]) -> IndexMap<&str, &NewI18nEntry> {
    let mut unique = IndexMap::new();
    for entry in entries {
        unique.insert(entry.key.as_str(), entry);
    }
    unique
}
