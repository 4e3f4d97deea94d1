//! `.properties` writer
//!
//!     Removes entries by key and appends new ones at the end of the file.
//!
//!     A removed entry takes its block with it: its own physical lines (continuations
//!     included), the comment lines stacked directly on top of it, and the blank lines
//!     directly below it. A blank line ends the stack above, so a comment that is
//!     separated from the entry by a blank line stays, and so does anything belonging to
//!     a neighboring entry.
//!
//!     New entries reuse the file's end-of-line style and are written as
//!     `[#<annotation>]` + `<key>=<value>`, one line each.

use super::{apply_edits, dedup_entries, detect_eol, TextEdit, WriterOptions};
use crate::i18n::ast::{PropertyLine, SourceLocation};
use crate::i18n::bundle::NewI18nEntry;
use crate::i18n::heuristics::default_annotation;
use crate::i18n::lexing::properties::tokenize;
use crate::i18n::parsing::annotation::{
    escape_element, escape_key, print_properties_i18n_annotation,
};
use crate::i18n::parsing::properties::parse;
use crate::i18n::token::PropertiesTokenKind;
use std::collections::HashSet;

/// Remove `keys_to_remove` from `text` and append `new_entries`, with default options.
pub fn write_properties_text<S: AsRef<str>>(
    text: &str,
    new_entries: &[NewI18nEntry],
    keys_to_remove: &[S],
) -> String {
    write_properties_text_with(text, new_entries, keys_to_remove, &WriterOptions::default())
}

pub fn write_properties_text_with<S: AsRef<str>>(
    text: &str,
    new_entries: &[NewI18nEntry],
    keys_to_remove: &[S],
    options: &WriterOptions,
) -> String {
    let eol = detect_eol(text);
    let removals = removal_edits(text, keys_to_remove);
    let mut out = apply_edits(text, &removals);

    let entries = dedup_entries(new_entries);
    if !entries.is_empty() {
        if !out.is_empty() && !out.ends_with(|c: char| c == '\n' || c == '\r') {
            out.push_str(eol);
        }
        // A blank line ends a continued element
        if ends_in_continuation(&out) {
            out.push_str(eol);
        }
    }
    for entry in entries.values() {
        out.push_str(&print_entry(entry, eol, options));
    }

    tracing::debug!(
        removed_blocks = removals.len(),
        added = entries.len(),
        "wrote properties text"
    );
    out
}

fn ends_in_continuation(text: &str) -> bool {
    tokenize(text)
        .last()
        .is_some_and(|token| token.is(PropertiesTokenKind::ContinuationLineMarker))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    Comment,
    Entry,
}

fn removal_edits<S: AsRef<str>>(text: &str, keys_to_remove: &[S]) -> Vec<TextEdit> {
    let keys: HashSet<&str> = keys_to_remove.iter().map(AsRef::as_ref).collect();
    if keys.is_empty() {
        return Vec::new();
    }

    let location = SourceLocation::new(text);
    let line_start = |line: usize| location.line_start(line).unwrap_or(text.len());
    // A final line break does not open another line
    let line_count = (0..location.line_count())
        .take_while(|line| line_start(*line) < text.len())
        .count();

    let ast = parse(text).ast;
    let mut kinds = vec![LineKind::Blank; line_count];
    for line in &ast {
        let kind = match line {
            PropertyLine::CommentLine(_) => LineKind::Comment,
            PropertyLine::KeyElementLine(_) => LineKind::Entry,
        };
        let range = line.range();
        for physical in range.start.line..=range.end.line {
            if let Some(slot) = kinds.get_mut(physical) {
                *slot = kind;
            }
        }
    }

    let mut removed = vec![false; line_count];
    for entry in ast.iter().filter_map(PropertyLine::as_key_element) {
        if !keys.contains(entry.key.value.as_str()) {
            continue;
        }
        let first = entry.range.start.line;
        let last = entry.range.end.line.min(line_count.saturating_sub(1));
        for physical in first..=last {
            removed[physical] = true;
        }
        let mut above = first;
        while above > 0 && kinds[above - 1] == LineKind::Comment {
            above -= 1;
            removed[above] = true;
        }
        let mut below = last + 1;
        while below < line_count && kinds[below] == LineKind::Blank {
            removed[below] = true;
            below += 1;
        }
        tracing::debug!(key = %entry.key.value, lines = ?(above..below), "removing entry");
    }

    let mut edits = Vec::new();
    let mut line = 0;
    while line < line_count {
        if !removed[line] {
            line += 1;
            continue;
        }
        let start = line_start(line);
        while line < line_count && removed[line] {
            line += 1;
        }
        edits.push(TextEdit::delete(start, line_start(line)));
    }
    edits
}

fn print_entry(entry: &NewI18nEntry, eol: &str, options: &WriterOptions) -> String {
    let annotation = entry.annotation.clone().or_else(|| {
        options
            .annotate_new_entries
            .then(|| default_annotation(&entry.value))
    });
    let mut out = String::new();
    if let Some(annotation) = annotation {
        out.push('#');
        out.push_str(&print_properties_i18n_annotation(&annotation));
        out.push_str(eol);
    }
    out.push_str(&escape_key(&entry.key));
    out.push('=');
    out.push_str(&escape_element(&entry.value));
    out.push_str(eol);
    out
}
