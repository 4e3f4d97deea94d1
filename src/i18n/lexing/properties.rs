//! `.properties` lexer
//!
//!     A single pass over the source with one character of lookahead. Every physical line
//!     is one of:
//!         - blank: optional whitespace, then an end-of-line
//!         - comment: optional whitespace, then `#` or `!` up to the end-of-line
//!         - key/element: key text, optional whitespace, optional `=`/`:` separator,
//!           optional whitespace, element text
//!
//!     Escapes are decoded while lexing, so [`Text`](PropertiesTokenKind::Text) token images
//!     hold the decoded text while their `start..end` still point at the raw source.
//!
//! Continuation Lines
//!
//!     A backslash right before an end-of-line inside an element continues the element on
//!     the next physical line. The lexer emits a continuation marker for the backslash and
//!     the line break, a whitespace token for the indentation of the next line, and then
//!     keeps lexing the element. An element spanning three lines is therefore three text
//!     tokens separated by markers; the parser joins them. This keeps tokens disjoint.
//!
//! Escapes
//!
//!     `\\`, `\f`, `\n`, `\r` and `\t` decode everywhere; `\=` and `\:` decode in keys only.
//!     `\uXXXX` decodes one UTF-16 code unit, and two escapes forming a surrogate pair decode
//!     to a single character. Anything malformed (a partial `\u`, a lone surrogate, an
//!     unknown escape) is passed through literally.

use crate::i18n::token::{PropertiesToken, PropertiesTokenKind};

/// Tokenize `.properties` source. Never fails.
pub fn tokenize(source: &str) -> Vec<PropertiesToken> {
    PropertiesLexer::new(source).run()
}

struct PropertiesLexer<'a> {
    source: &'a str,
    pos: usize,
    tokens: Vec<PropertiesToken>,
}

impl<'a> PropertiesLexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<PropertiesToken> {
        while self.pos < self.source.len() {
            self.line();
        }
        self.tokens
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset..)?.chars().next()
    }

    fn push(&mut self, kind: PropertiesTokenKind, image: String, start: usize) {
        self.tokens
            .push(PropertiesToken::new(kind, image, start, self.pos));
    }

    fn push_raw(&mut self, kind: PropertiesTokenKind, start: usize) {
        let image = self.source[start..self.pos].to_string();
        self.push(kind, image, start);
    }

    fn line(&mut self) {
        self.whitespace();
        match self.peek() {
            None => return,
            Some('#' | '!') => self.comment(),
            Some('\n' | '\r') => {}
            Some(_) => {
                self.key();
                self.whitespace();
                if let Some('=' | ':') = self.peek() {
                    let start = self.pos;
                    self.pos += 1;
                    self.push_raw(PropertiesTokenKind::Separator, start);
                    self.whitespace();
                }
                if !self.at_line_end() {
                    self.element();
                }
            }
        }
        self.end_of_line();
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some('\n' | '\r'))
    }

    /// Length in bytes of the end-of-line at the cursor (0 if none).
    fn eol_len_at(&self, pos: usize) -> usize {
        let bytes = self.source.as_bytes();
        match bytes.get(pos) {
            Some(b'\r') if bytes.get(pos + 1) == Some(&b'\n') => 2,
            Some(b'\r' | b'\n') => 1,
            _ => 0,
        }
    }

    fn end_of_line(&mut self) {
        let len = self.eol_len_at(self.pos);
        if len > 0 {
            let start = self.pos;
            self.pos += len;
            self.push_raw(PropertiesTokenKind::EndOfLine, start);
        }
    }

    fn whitespace(&mut self) {
        let start = self.pos;
        while let Some(' ' | '\t' | '\x0c') = self.peek() {
            self.pos += 1;
        }
        if self.pos > start {
            self.push_raw(PropertiesTokenKind::Whitespace, start);
        }
    }

    fn comment(&mut self) {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.pos += c.len_utf8();
        }
        self.push_raw(PropertiesTokenKind::Comment, start);
    }

    fn key(&mut self) {
        let start = self.pos;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\x0c' | '=' | ':' | '\n' | '\r' => break,
                '\\' => self.escape(&mut text, true),
                _ => {
                    text.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
        // An empty key is only possible on lines like `=value`; it still gets a token so the
        // parser never mistakes the element for the key.
        self.push(PropertiesTokenKind::Text, text, start);
    }

    fn element(&mut self) {
        let mut start = self.pos;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            match c {
                '\n' | '\r' => break,
                '\\' if self.eol_len_at(self.pos + 1) > 0 => {
                    if self.pos > start {
                        self.push(PropertiesTokenKind::Text, std::mem::take(&mut text), start);
                    }
                    let marker_start = self.pos;
                    self.pos += 1 + self.eol_len_at(self.pos + 1);
                    self.push_raw(PropertiesTokenKind::ContinuationLineMarker, marker_start);
                    self.whitespace();
                    start = self.pos;
                }
                '\\' => self.escape(&mut text, false),
                _ => {
                    text.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
        if self.pos > start {
            self.push(PropertiesTokenKind::Text, text, start);
        }
    }

    /// Decode the escape sequence starting at the backslash under the cursor.
    fn escape(&mut self, text: &mut String, in_key: bool) {
        let decoded = match self.peek_at(1) {
            None => {
                self.pos += 1;
                text.push('\\');
                return;
            }
            Some('u') => {
                self.unicode_escape(text);
                return;
            }
            Some('\\') => Some('\\'),
            Some('f') => Some('\x0c'),
            Some('n') => Some('\n'),
            Some('r') => Some('\r'),
            Some('t') => Some('\t'),
            Some(c @ ('=' | ':')) if in_key => Some(c),
            Some(_) => None,
        };
        match decoded {
            Some(c) => {
                text.push(c);
                self.pos += 2;
            }
            None => {
                // Unknown escape: keep the backslash. In keys the escaped character never
                // ends the key, which is why both characters are consumed together.
                // A backslash right before a line break stays on its own.
                text.push('\\');
                self.pos += 1;
                if let Some(next) = self.peek().filter(|c| *c != '\n' && *c != '\r') {
                    text.push(next);
                    self.pos += next.len_utf8();
                }
            }
        }
    }

    fn unicode_escape(&mut self, text: &mut String) {
        let start = self.pos;
        let digits_start = start + 2;
        let hex = hex_prefix(&self.source[digits_start..]);
        if hex.len() < 4 {
            text.push_str("\\u");
            text.push_str(hex);
            self.pos = digits_start + hex.len();
            return;
        }
        self.pos = digits_start + 4;
        let unit = hex_value(hex);
        if (0xD800..0xDC00).contains(&unit) {
            if let Some(low) = self.low_surrogate_at(self.pos) {
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                if let Some(c) = char::from_u32(combined) {
                    text.push(c);
                    self.pos += 6;
                    return;
                }
            }
        }
        match char::from_u32(unit) {
            Some(c) => text.push(c),
            None => text.push_str(&self.source[start..self.pos]),
        }
    }

    fn low_surrogate_at(&self, pos: usize) -> Option<u32> {
        let rest = self.source.get(pos..)?.strip_prefix("\\u")?;
        let hex = hex_prefix(rest);
        if hex.len() < 4 {
            return None;
        }
        let unit = hex_value(hex);
        (0xDC00..0xE000).contains(&unit).then_some(unit)
    }
}

/// The leading ASCII hex digits of `s`, at most four.
fn hex_prefix(s: &str) -> &str {
    let len = s
        .bytes()
        .take(4)
        .take_while(|b| b.is_ascii_hexdigit())
        .count();
    &s[..len]
}

fn hex_value(hex: &str) -> u32 {
    hex.chars()
        .filter_map(|c| c.to_digit(16))
        .fold(0, |acc, digit| acc * 16 + digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::token::PropertiesTokenKind::*;
    use rstest::rstest;

    fn kinds(source: &str) -> Vec<(PropertiesTokenKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.image))
            .collect()
    }

    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .into_iter()
            .filter(|t| t.kind == Text)
            .map(|t| t.image)
            .collect()
    }

    #[test]
    fn test_key_value_line() {
        assert_eq!(
            kinds("key = value\n"),
            vec![
                (Text, "key".to_string()),
                (Whitespace, " ".to_string()),
                (Separator, "=".to_string()),
                (Whitespace, " ".to_string()),
                (Text, "value".to_string()),
                (EndOfLine, "\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_comment_lines() {
        assert_eq!(
            kinds("#XTIT: App name\r\n  ! bang\rk:v"),
            vec![
                (Comment, "#XTIT: App name".to_string()),
                (EndOfLine, "\r\n".to_string()),
                (Whitespace, "  ".to_string()),
                (Comment, "! bang".to_string()),
                (EndOfLine, "\r".to_string()),
                (Text, "k".to_string()),
                (Separator, ":".to_string()),
                (Text, "v".to_string()),
            ]
        );
    }

    #[test]
    fn test_whitespace_separates_key_and_element() {
        assert_eq!(texts("key value with spaces"), vec!["key", "value with spaces"]);
    }

    #[test]
    fn test_element_keeps_separator_characters() {
        assert_eq!(texts("url=http://host:80/a=b"), vec!["url", "http://host:80/a=b"]);
    }

    #[test]
    fn test_empty_key_before_separator() {
        let tokens = tokenize("=value");
        assert_eq!(tokens[0], PropertiesToken::new(Text, "", 0, 0));
        assert_eq!(tokens[2].image, "value");
    }

    #[rstest]
    #[case::newline(r"k=a\nb", "a\nb")]
    #[case::tab(r"k=a\tb", "a\tb")]
    #[case::carriage_return(r"k=a\rb", "a\rb")]
    #[case::form_feed(r"k=a\fb", "a\x0cb")]
    #[case::backslash(r"k=a\\b", "a\\b")]
    #[case::bom(r"k=\uFEFFx", "\u{feff}x")]
    #[case::umlaut(r"k=\u00e4", "\u{e4}")]
    #[case::surrogate_pair(r"k=\uD83D\uDE00", "\u{1f600}")]
    #[case::lone_surrogate(r"k=\uD83Dx", "\\uD83Dx")]
    #[case::invalid_hex(r"k=\uZZZZ", "\\uZZZZ")]
    #[case::partial_hex(r"k=\u12G", "\\u12G")]
    #[case::trailing_u(r"k=\u", "\\u")]
    #[case::equals_in_element(r"k=a\=b", "a\\=b")]
    #[case::unknown_escape(r"k=\q", "\\q")]
    #[case::trailing_backslash("k=a\\", "a\\")]
    fn test_element_escapes(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(texts(source)[1], expected);
    }

    #[rstest]
    #[case::equals(r"a\=b=c", "a=b")]
    #[case::colon(r"a\:b=c", "a:b")]
    #[case::newline(r"a\nb=c", "a\nb")]
    #[case::escaped_space(r"a\ b=c", "a\\ b")]
    fn test_key_escapes(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(texts(source)[0], expected);
    }

    #[test]
    fn test_continuation_line() {
        let source = "k=first \\\n    second\\\r\n third\n";
        let tokens = tokenize(source);
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                Text,
                Separator,
                Text,
                ContinuationLineMarker,
                Whitespace,
                Text,
                ContinuationLineMarker,
                Whitespace,
                Text,
                EndOfLine,
            ]
        );
        assert_eq!(tokens[2].image, "first ");
        assert_eq!(tokens[3].image, "\\\n");
        assert_eq!(tokens[5].image, "second");
        assert_eq!(tokens[6].image, "\\\r\n");
        assert_eq!(tokens[8].image, "third");
    }

    #[test]
    fn test_continued_line_starting_with_hash_is_element_text() {
        assert_eq!(texts("k=a\\\n#not a comment"), vec!["k", "a", "#not a comment"]);
    }

    #[test]
    fn test_token_spans_are_raw_source() {
        let source = "# c\nk\\:x = a\\u0041\\\n  b\r\n\n!x";
        for token in tokenize(source) {
            let raw = &source[token.span()];
            if token.kind != Text {
                assert_eq!(raw, token.image);
            }
        }
        let tokens = tokenize(source);
        for pair in tokens.windows(2) {
            assert!(pair[0].end <= pair[1].start, "overlap: {:?}", pair);
        }
        assert_eq!(tokens.last().map(|t| t.end), Some(source.len()));
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert_eq!(
            kinds(" \t\n"),
            vec![(Whitespace, " \t".to_string()), (EndOfLine, "\n".to_string())]
        );
    }
}
