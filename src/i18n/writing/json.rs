//! `.json` writer
//!
//!     Adds texts to the object of one locale in a locale-keyed JSON file:
//!         - keys that already exist get their value replaced in place
//!         - new keys are appended after the locale's last member
//!         - a missing locale object is appended to the root object
//!         - text without a root object is replaced by a fresh one
//!
//!     Indentation follows the file: the unit is taken from the first member of the root
//!     object, and new members line up with their existing siblings. Files that give no
//!     hint (empty, single line) use [`WriterOptions::json_indent`].

use super::{apply_edits, dedup_entries, detect_eol, TextEdit, WriterOptions};
use crate::i18n::bundle::NewI18nEntry;
use crate::i18n::parsing::json::{encode_string, parse, JsonMember, JsonNode, JsonValue};

/// Add `new_entries` to the `fallback_locale` object, with default options.
pub fn add_json_texts(text: &str, fallback_locale: &str, new_entries: &[NewI18nEntry]) -> String {
    add_json_texts_with(text, fallback_locale, new_entries, &WriterOptions::default())
}

pub fn add_json_texts_with(
    text: &str,
    fallback_locale: &str,
    new_entries: &[NewI18nEntry],
    options: &WriterOptions,
) -> String {
    let entries = dedup_entries(new_entries);
    if entries.is_empty() {
        return text.to_string();
    }
    let eol = detect_eol(text);

    let Some(root) = parse(text).filter(|root| root.as_object().is_some()) else {
        tracing::debug!("no root object, starting from an empty one");
        let unit = options.json_indent.as_str();
        let pairs: Vec<_> = entries.iter().map(|(k, e)| (*k, e.value.as_str())).collect();
        let locale = render_object(&pairs, &unit.repeat(2), unit, eol);
        return format!(
            "{{{eol}{unit}{}: {}{eol}}}",
            encode_string(fallback_locale),
            locale,
            eol = eol,
            unit = unit
        );
    };

    let root_members = root.as_object().unwrap_or_default();
    let root_outer = line_indent(text, root.range.span.start).unwrap_or("");
    let unit = detect_unit(text, root_members, root_outer)
        .unwrap_or(options.json_indent.as_str())
        .to_string();
    let root_inner = format!("{}{}", root_outer, unit);

    let mut edits = Vec::new();
    match root.member(fallback_locale) {
        Some(JsonMember {
            value:
                locale @ JsonNode {
                    value: JsonValue::Object(members),
                    ..
                },
            range,
            ..
        }) => {
            let outer = line_indent(text, range.span.start).unwrap_or(&root_inner);
            let inner = members
                .first()
                .and_then(|first| line_indent(text, first.range.span.start))
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}{}", outer, unit));

            let mut additions = Vec::new();
            for (key, entry) in &entries {
                let existing = members.iter().rev().find(|member| member.key.value == *key);
                match existing {
                    Some(member) => edits.push(TextEdit::replace(
                        member.value.range.span.start,
                        member.value.range.span.end,
                        encode_string(&entry.value),
                    )),
                    None => additions.push(render_member(key, &entry.value)),
                }
            }
            tracing::debug!(
                replaced = edits.len(),
                added = additions.len(),
                locale = fallback_locale,
                "adding json texts"
            );
            edits.extend(insert_members(
                text, locale, members, &additions, &inner, outer, eol,
            ));
        }
        Some(member) => {
            tracing::debug!(locale = fallback_locale, "replacing non-object locale value");
            let outer = line_indent(text, member.range.span.start).unwrap_or(&root_inner);
            let pairs: Vec<_> = entries.iter().map(|(k, e)| (*k, e.value.as_str())).collect();
            let inner = format!("{}{}", outer, unit);
            edits.push(TextEdit::replace(
                member.value.range.span.start,
                member.value.range.span.end,
                render_object(&pairs, &inner, outer, eol),
            ));
        }
        None => {
            tracing::debug!(locale = fallback_locale, "adding locale object");
            let pairs: Vec<_> = entries.iter().map(|(k, e)| (*k, e.value.as_str())).collect();
            let object = render_object(&pairs, &format!("{}{}", root_inner, unit), &root_inner, eol);
            let member = format!("{}: {}", encode_string(fallback_locale), object);
            edits.extend(insert_members(
                text,
                &root,
                root_members,
                &[member],
                &root_inner,
                root_outer,
                eol,
            ));
        }
    }
    apply_edits(text, &edits)
}

fn render_member(key: &str, value: &str) -> String {
    format!("{}: {}", encode_string(key), encode_string(value))
}

/// `{ "k": "v", ... }` spread over lines, members at `inner`, closing brace at `outer`.
fn render_object(pairs: &[(&str, &str)], inner: &str, outer: &str, eol: &str) -> String {
    if pairs.is_empty() {
        return "{}".to_string();
    }
    let members: Vec<_> = pairs
        .iter()
        .map(|(key, value)| render_member(key, value))
        .collect();
    format!(
        "{{{eol}{inner}{}{eol}{outer}}}",
        members.join(&format!(",{}{}", eol, inner)),
        eol = eol,
        inner = inner,
        outer = outer
    )
}

/// Edits appending `rendered` members to `object`.
fn insert_members(
    text: &str,
    object: &JsonNode,
    members: &[JsonMember],
    rendered: &[String],
    inner: &str,
    outer: &str,
    eol: &str,
) -> Vec<TextEdit> {
    if rendered.is_empty() {
        return Vec::new();
    }
    let separator = format!(",{}{}", eol, inner);
    let block = rendered.join(&separator);
    let close = closing_brace(text, object);

    let Some(last) = members.last() else {
        let start = object.range.span.start + 1;
        return vec![TextEdit::replace(
            start,
            close.max(start),
            format!("{eol}{inner}{}{eol}{outer}", block, eol = eol, inner = inner, outer = outer),
        )];
    };

    let after = last.range.span.end;
    match line_tail(text, after, close) {
        // Keep what trails the last member (comma, line comment) on its line
        Some((has_comma, line_end)) => {
            let mut edits = Vec::new();
            if !has_comma {
                edits.push(TextEdit::insert(after, ","));
            }
            edits.push(TextEdit::insert(
                line_end,
                format!("{}{}{}", eol, inner, block),
            ));
            edits
        }
        // Members sharing a line with the closing brace stay on that line
        None if same_line(text, after, close) && rendered.iter().all(|m| !m.contains('\n')) => {
            vec![TextEdit::insert(after, format!(", {}", rendered.join(", ")))]
        }
        None => vec![TextEdit::insert(after, format!("{}{}", separator, block))],
    }
}

/// If the rest of the line after `after` holds at most a comma and a line comment (and
/// the closing brace is on a later line), return whether the comma is there and where
/// the line ends.
fn line_tail(text: &str, after: usize, close: usize) -> Option<(bool, usize)> {
    let rest = text.get(after..close)?;
    let line_len = rest.find(|c: char| c == '\n' || c == '\r')?;
    let line = rest[..line_len].trim_start();
    let (has_comma, line) = match line.strip_prefix(',') {
        Some(stripped) => (true, stripped.trim_start()),
        None => (false, line),
    };
    (line.is_empty() || line.starts_with("//")).then_some((has_comma, after + line_len))
}

fn same_line(text: &str, after: usize, close: usize) -> bool {
    text.get(after..close)
        .map_or(false, |rest| !rest.contains(|c: char| c == '\n' || c == '\r'))
}

/// Offset of the object's `}`, or the end of its range when it is unterminated.
fn closing_brace(text: &str, object: &JsonNode) -> usize {
    let end = object.range.span.end;
    if end > object.range.span.start && text.as_bytes().get(end - 1) == Some(&b'}') {
        end - 1
    } else {
        end
    }
}

/// Whitespace before `offset` on its line, if nothing else precedes it there.
fn line_indent(text: &str, offset: usize) -> Option<&str> {
    let before = text.get(..offset)?;
    let line_start = before
        .rfind(|c: char| c == '\n' || c == '\r')
        .map_or(0, |index| index + 1);
    let indent = &before[line_start..];
    indent
        .chars()
        .all(|c| c == ' ' || c == '\t')
        .then_some(indent)
}

/// Indentation unit: what the first root member adds to the root's own indentation.
fn detect_unit<'a>(text: &'a str, members: &[JsonMember], root_indent: &str) -> Option<&'a str> {
    let indent = line_indent(text, members.first()?.range.span.start)?;
    let unit = indent.strip_prefix(root_indent).unwrap_or(indent);
    (!unit.is_empty()).then_some(unit)
}
