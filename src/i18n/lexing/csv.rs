//! `.csv` lexer
//!
//!     Two modes, `Default` and `Quoted`. In default mode characters accumulate into the
//!     current field until a separator (`,`, `;` or tab) or a `\n`; the field is then flushed
//!     (even when empty) followed by the delimiter token. A `"` switches to quoted mode
//!     without becoming part of the value. In quoted mode `""` is a literal quote and a lone
//!     `"` returns to default mode, marking the field as escaped.
//!
//!     `\r` is ordinary field text here: rows end at `\n` only. Callers reading files with
//!     Windows line endings normalize them first if they need clean last-column values.

use crate::i18n::token::{CsvToken, CsvTokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Default,
    Quoted,
}

/// Tokenize CSV source. Never fails; an unterminated quote runs to the end of the input.
pub fn tokenize(source: &str) -> Vec<CsvToken> {
    let mut tokens = Vec::new();
    let mut mode = Mode::Default;
    let mut value = String::new();
    let mut escaped = false;
    let mut field_start = 0;
    let mut chars = source.char_indices().peekable();

    let flush = |tokens: &mut Vec<CsvToken>, value: &mut String, escaped: &mut bool, start, end| {
        let kind = if *escaped {
            CsvTokenKind::EscapedText
        } else {
            CsvTokenKind::Text
        };
        tokens.push(CsvToken::new(kind, std::mem::take(value), start, end));
        *escaped = false;
    };

    while let Some((i, c)) = chars.next() {
        match mode {
            Mode::Default => match c {
                ',' | ';' | '\t' | '\n' => {
                    flush(&mut tokens, &mut value, &mut escaped, field_start, i);
                    let kind = if c == '\n' {
                        CsvTokenKind::Eol
                    } else {
                        CsvTokenKind::Separator
                    };
                    tokens.push(CsvToken::new(kind, c.to_string(), i, i + 1));
                    field_start = i + 1;
                }
                '"' => mode = Mode::Quoted,
                _ => value.push(c),
            },
            Mode::Quoted => match c {
                '"' if matches!(chars.peek(), Some((_, '"'))) => {
                    chars.next();
                    value.push('"');
                }
                '"' => {
                    mode = Mode::Default;
                    escaped = true;
                }
                _ => value.push(c),
            },
        }
    }

    if field_start < source.len() {
        flush(&mut tokens, &mut value, &mut escaped, field_start, source.len());
    }
    tokens
}
