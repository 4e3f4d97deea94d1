//! `.csv` AST
//!
//! `header.fields[0]` names the key column; every other header field names a locale.
//! Data rows may be ragged, so consumers must tolerate missing trailing fields.

use super::range::Range;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvField {
    pub value: String,
    /// True when the field was closed by a double quote
    pub quoted: bool,
    /// Raw field including quotes
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CsvRow {
    pub fields: Vec<CsvField>,
    pub range: Range,
}

impl CsvRow {
    pub fn field(&self, index: usize) -> Option<&CsvField> {
        self.fields.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// No fields, or nothing but one empty, unquoted field (a blank line).
    pub fn is_blank(&self) -> bool {
        match self.fields.as_slice() {
            [] => true,
            [only] => only.value.is_empty() && !only.quoted,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CsvDocument {
    pub header: CsvRow,
    pub rows: Vec<CsvRow>,
}

impl CsvDocument {
    /// The row naming the columns and the data rows after it.
    ///
    /// Only one leading blank line is skipped while parsing, so a file opening with more
    /// of them parses to a blank header. The first data row is the real header then.
    pub fn header_and_rows(&self) -> (&CsvRow, &[CsvRow]) {
        match self.rows.split_first() {
            Some((first, rest)) if self.header.is_blank() => (first, rest),
            _ => (&self.header, self.rows.as_slice()),
        }
    }

    /// Index of the header column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header_and_rows()
            .0
            .fields
            .iter()
            .position(|field| field.value == name)
    }
}
