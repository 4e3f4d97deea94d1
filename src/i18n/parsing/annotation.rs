//! Annotation interpreter and printer
//!
//!     Reads `<TextType>[,<MaxLength>][:<Note>]` out of a comment's text:
//!         - the text type runs up to the first `,` or `:` (or the end) and is trimmed
//!         - the max length sits between a `,` and the next `:`; it only exists when the
//!           `,` comes first, so a comma inside the note is just note text
//!         - the note is everything after the first `:`, verbatim (leading space included)
//!
//!     The text type is taken as written. Any comment with a non-empty first part reads as
//!     an annotation; callers that care check [`SapTextType::description`].
//!
//!     Every part carries a range inside the comment line, so a single part can be edited
//!     in place.

use crate::i18n::ast::{
    CommentLine, I18nAnnotation, I18nAnnotationNode, Position, Range, SapTextType, TextNode,
    ValueNode,
};
use crate::i18n::heuristics::default_annotation;

/// Interpret the comment directly above an entry. `None` for no comment or an empty text type.
pub fn parse_annotation(comment: Option<&CommentLine>) -> Option<I18nAnnotationNode> {
    let comment = comment?;
    let text = comment.value.as_str();
    // The value starts right after the one byte marker
    let origin = comment.range.span.start + 1;
    let origin_position = Position::new(
        comment.range.start.line,
        comment.range.start.character + 1,
    );
    let range = |start: usize, end: usize| {
        Range::new(
            origin + start..origin + end,
            Position::new(origin_position.line, origin_position.character + start),
            Position::new(origin_position.line, origin_position.character + end),
        )
    };

    let comma = text.find(',');
    let colon = text.find(':');
    let type_end = match (comma, colon) {
        (Some(comma), Some(colon)) => comma.min(colon),
        (Some(index), None) | (None, Some(index)) => index,
        (None, None) => text.len(),
    };

    let raw_type = &text[..type_end];
    let code = raw_type.trim();
    if code.is_empty() {
        return None;
    }
    let type_start = raw_type.len() - raw_type.trim_start().len();
    let text_type = ValueNode::new(
        SapTextType::new(code),
        range(type_start, type_start + code.len()),
    );

    let max_length = comma
        .filter(|comma| colon.map_or(true, |colon| *comma < colon))
        .and_then(|comma| {
            let segment_end = colon.unwrap_or(text.len());
            let segment = &text[comma + 1..segment_end];
            let digits_start = comma + 1 + (segment.len() - segment.trim_start().len());
            let digits = text[digits_start..segment_end]
                .bytes()
                .take_while(u8::is_ascii_digit)
                .count();
            let value = text[digits_start..digits_start + digits].parse::<u32>().ok()?;
            Some(ValueNode::new(value, range(digits_start, digits_start + digits)))
        });

    let note = colon.map(|colon| {
        TextNode::new(text[colon + 1..].to_string(), range(colon + 1, text.len()))
    });

    Some(I18nAnnotationNode {
        text_type,
        max_length,
        note,
    })
}

/// Print an annotation as comment text, without the `#` marker.
pub fn print_properties_i18n_annotation(annotation: &I18nAnnotation) -> String {
    let mut out = annotation.text_type.code().to_string();
    if let Some(max_length) = annotation.max_length {
        out.push(',');
        out.push_str(&max_length.to_string());
    }
    if let Some(note) = &annotation.note {
        out.push(':');
        out.push_str(note);
    }
    out
}

/// Print a complete entry block: `\n#<annotation>\n<key>=<value>\n`.
///
/// Without an annotation one is guessed from the value.
pub fn print_properties_i18n_entry(
    key: &str,
    value: &str,
    annotation: Option<&I18nAnnotation>,
) -> String {
    let annotation = match annotation {
        Some(annotation) => print_properties_i18n_annotation(annotation),
        None => print_properties_i18n_annotation(&default_annotation(value)),
    };
    format!(
        "\n#{}\n{}={}\n",
        annotation,
        escape_key(key),
        escape_element(value)
    )
}

/// Escape a key so the properties lexer reads it back unchanged.
pub fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, c) in key.chars().enumerate() {
        match c {
            '=' => out.push_str("\\="),
            ':' => out.push_str("\\:"),
            // Whitespace would end the key, a leading marker would start a comment
            ' ' => out.push_str("\\u0020"),
            '#' | '!' if i == 0 => out.push_str(&format!("\\u{:04X}", c as u32)),
            _ => push_escaped(&mut out, c),
        }
    }
    out
}

/// Escape an element so the properties lexer reads it back unchanged.
pub fn escape_element(element: &str) -> String {
    let mut out = String::with_capacity(element.len());
    let mut leading = true;
    for c in element.chars() {
        if leading && (c == ' ' || c == '\t') {
            // Leading whitespace is otherwise skipped after the separator
            out.push_str(&format!("\\u{:04X}", c as u32));
            continue;
        }
        leading = false;
        push_escaped(&mut out, c);
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\x0c' => out.push_str("\\f"),
        _ => out.push(c),
    }
}
