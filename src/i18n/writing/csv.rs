//! `.csv` writer
//!
//!     Adds texts for one locale column. The header gains the column if it lacks it; rows
//!     of existing keys get their field replaced (or the row extended up to the column);
//!     keys without a row get a new row at the end, padded with empty fields.
//!
//!     The separator is the first one found in the file. Rows ending in `\r\n` keep their
//!     `\r`: edits at the end of such a row go in front of it.

use super::{apply_edits, dedup_entries, detect_eol, TextEdit, WriterOptions};
use crate::i18n::ast::{CsvField, CsvRow};
use crate::i18n::bundle::NewI18nEntry;
use crate::i18n::parsing::csv::parse;
use crate::i18n::token::CsvTokenKind;
use std::collections::HashMap;

/// Add `new_entries` as texts of `fallback_locale`, with default options.
pub fn add_csv_texts(text: &str, fallback_locale: &str, new_entries: &[NewI18nEntry]) -> String {
    add_csv_texts_with(text, fallback_locale, new_entries, &WriterOptions::default())
}

pub fn add_csv_texts_with(
    text: &str,
    fallback_locale: &str,
    new_entries: &[NewI18nEntry],
    options: &WriterOptions,
) -> String {
    let entries = dedup_entries(new_entries);
    let result = parse(text);
    let separator = result
        .tokens
        .iter()
        .find(|token| token.kind == CsvTokenKind::Separator)
        .and_then(|token| token.value.chars().next())
        .unwrap_or(options.csv_separator);
    let eol = detect_eol(text);
    tracing::debug!(%separator, entries = entries.len(), "adding csv texts");

    let document = result.ast;
    let (header, rows) = document.header_and_rows();
    if header.is_blank() {
        let mut out = join_row(
            [options.csv_key_column.as_str(), fallback_locale].into_iter(),
            separator,
        );
        out.push_str(eol);
        for (key, entry) in &entries {
            out.push_str(&join_row([*key, entry.value.as_str()].into_iter(), separator));
            out.push_str(eol);
        }
        return out;
    }

    let mut edits = Vec::new();
    let column = match header
        .fields
        .iter()
        .skip(1)
        .position(|field| clean(&field.value) == fallback_locale)
    {
        Some(index) => index + 1,
        None => {
            edits.push(TextEdit::insert(
                row_end(text, header),
                format!("{}{}", separator, quote(fallback_locale)),
            ));
            header.fields.len()
        }
    };
    let width = header.fields.len().max(column + 1);

    let mut rows_by_key: HashMap<&str, &CsvRow> = HashMap::new();
    for row in rows {
        if let Some(key) = row.field(0) {
            rows_by_key.insert(clean(&key.value), row);
        }
    }

    let mut appended = String::new();
    for (key, entry) in &entries {
        let value = quote(&entry.value);
        match rows_by_key.get(key) {
            Some(row) => match row.field(column) {
                Some(field) => {
                    let span = field_span(text, field);
                    edits.push(TextEdit::replace(span.0, span.1, value));
                }
                None => {
                    let mut extension = String::new();
                    for index in row.fields.len()..=column {
                        extension.push(separator);
                        if index == column {
                            extension.push_str(&value);
                        }
                    }
                    edits.push(TextEdit::insert(row_end(text, row), extension));
                }
            },
            None => {
                let fields = (0..width).map(|index| match index {
                    0 => *key,
                    index if index == column => entry.value.as_str(),
                    _ => "",
                });
                appended.push_str(&join_row(fields, separator));
                appended.push_str(eol);
            }
        }
    }

    if !appended.is_empty() {
        if !text.ends_with('\n') {
            appended.insert_str(0, eol);
        }
        edits.push(TextEdit::insert(text.len(), appended));
    }
    apply_edits(text, &edits)
}

/// Quote a field if it contains a delimiter, a quote or a line break.
pub fn quote(value: &str) -> String {
    if value.contains(&[',', ';', '\t', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn join_row<'a>(fields: impl Iterator<Item = &'a str>, separator: char) -> String {
    fields
        .map(quote)
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

/// Field value without the `\r` of a `\r\n` row ending.
fn clean(value: &str) -> &str {
    value.strip_suffix('\r').unwrap_or(value)
}

fn ends_with_cr(text: &str, end: usize) -> bool {
    end > 0 && text.as_bytes().get(end - 1) == Some(&b'\r')
}

fn field_span(text: &str, field: &CsvField) -> (usize, usize) {
    let (start, end) = (field.range.span.start, field.range.span.end);
    if end > start && ends_with_cr(text, end) {
        (start, end - 1)
    } else {
        (start, end)
    }
}

fn row_end(text: &str, row: &CsvRow) -> usize {
    let end = row.range.span.end;
    if ends_with_cr(text, end) {
        end - 1
    } else {
        end
    }
}
