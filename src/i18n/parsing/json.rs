//! Tolerant JSON tree reader
//!
//!     `serde_json` gives values but no positions, and the writers need positions to edit
//!     a file in place. This reader builds a small tree in which every value, member and
//!     key carries its [`Range`].
//!
//!     Accepted on top of strict JSON: `//` and `/* */` comments, trailing commas, and
//!     garbage after the root value. Malformed input never fails the read: an object or
//!     array stops at the first thing it cannot parse and keeps what it has so far.
//!     Nesting deeper than [`MAX_DEPTH`] counts as such a thing.
//!
//!     String contents are decoded with `serde_json`. The range of a [`JsonValue::String`]
//!     and of a member key excludes the quotes; the [`JsonNode`] range of the same string
//!     includes them.

use crate::i18n::ast::{Range, SourceLocation, TextNode};

/// Deepest object/array nesting the reader descends into (the `serde_json` limit).
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonValue {
    Object(Vec<JsonMember>),
    Array(Vec<JsonNode>),
    String(TextNode),
    /// Number literal exactly as written
    Number(String),
    Bool(bool),
    Null,
}

/// A value and the raw range it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonNode {
    pub value: JsonValue,
    pub range: Range,
}

impl JsonNode {
    pub fn as_object(&self) -> Option<&[JsonMember]> {
        match &self.value {
            JsonValue::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Last member named `key` (later duplicates shadow earlier ones, as in `serde_json`).
    pub fn member(&self, key: &str) -> Option<&JsonMember> {
        self.as_object()?
            .iter()
            .rev()
            .find(|member| member.key.value == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonMember {
    /// Decoded key; the range excludes the quotes
    pub key: TextNode,
    pub value: JsonNode,
    /// From the opening quote of the key to the end of the value
    pub range: Range,
}

/// Read the root value of `text`, or `None` when there is none.
pub fn parse(text: &str) -> Option<JsonNode> {
    let location = SourceLocation::new(text);
    let mut reader = JsonReader {
        text,
        pos: 0,
        depth: 0,
        location: &location,
    };
    reader.value()
}

/// Encode `value` as a JSON string literal, quotes included.
pub fn encode_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

struct JsonReader<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
    location: &'a SourceLocation,
}

impl<'a> JsonReader<'a> {
    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn range(&self, start: usize) -> Range {
        self.location.range_at(start, self.pos)
    }

    /// Skip whitespace and comments.
    fn trivia(&mut self) {
        let text: &'a str = self.text;
        let bytes = text.as_bytes();
        loop {
            match (bytes.get(self.pos).copied(), bytes.get(self.pos + 1).copied()) {
                (Some(b' ' | b'\t' | b'\n' | b'\r'), _) => self.pos += 1,
                (Some(b'/'), Some(b'/')) => {
                    while !matches!(self.peek(), None | Some(b'\n' | b'\r')) {
                        self.pos += 1;
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    self.pos = match self.text[self.pos + 2..].find("*/") {
                        Some(end) => self.pos + 2 + end + 2,
                        None => self.text.len(),
                    };
                }
                // Byte order mark
                (Some(0xEF), _) if self.text[self.pos..].starts_with('\u{feff}') => self.pos += 3,
                _ => return,
            }
        }
    }

    fn value(&mut self) -> Option<JsonNode> {
        self.trivia();
        let start = self.pos;
        let value = match self.peek()? {
            b'{' | b'[' if self.depth >= MAX_DEPTH => return None,
            b'{' => self.nested(Self::object),
            b'[' => self.nested(Self::array),
            b'"' => JsonValue::String(self.string()?),
            b'-' | b'0'..=b'9' => JsonValue::Number(self.number()),
            b't' | b'f' | b'n' => self.literal()?,
            _ => return None,
        };
        Some(JsonNode {
            value,
            range: self.range(start),
        })
    }

    fn nested(&mut self, read: fn(&mut Self) -> JsonValue) -> JsonValue {
        self.depth += 1;
        let value = read(self);
        self.depth -= 1;
        value
    }

    fn object(&mut self) -> JsonValue {
        self.pos += 1;
        let mut members = Vec::new();
        loop {
            self.trivia();
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b',') => self.pos += 1,
                Some(b'"') => match self.member() {
                    Some(member) => members.push(member),
                    None => break,
                },
                _ => break,
            }
        }
        JsonValue::Object(members)
    }

    fn member(&mut self) -> Option<JsonMember> {
        let start = self.pos;
        let key = self.string()?;
        self.trivia();
        if self.peek() != Some(b':') {
            return None;
        }
        self.pos += 1;
        let value = self.value()?;
        Some(JsonMember {
            key,
            value,
            range: self.range(start),
        })
    }

    fn array(&mut self) -> JsonValue {
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.trivia();
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(b',') => self.pos += 1,
                _ => match self.value() {
                    Some(item) => items.push(item),
                    None => break,
                },
            }
        }
        JsonValue::Array(items)
    }

    /// Read a string literal with the cursor on its opening quote.
    fn string(&mut self) -> Option<TextNode> {
        let open = self.pos;
        self.pos += 1;
        let text: &'a str = self.text;
        let bytes = text.as_bytes();
        loop {
            match bytes.get(self.pos)? {
                b'"' => break,
                b'\\' => self.pos += 2,
                b'\n' | b'\r' => return None,
                _ => self.pos += 1,
            }
        }
        let content_end = self.pos;
        self.pos += 1;

        let raw = self.text.get(open..self.pos)?;
        let value = serde_json::from_str::<String>(raw)
            .unwrap_or_else(|_| self.text[open + 1..content_end].to_string());
        Some(TextNode::new(
            value,
            self.location.range_at(open + 1, content_end),
        ))
    }

    fn number(&mut self) -> String {
        let start = self.pos;
        while let Some(b'-' | b'+' | b'.' | b'e' | b'E' | b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.text[start..self.pos].to_string()
    }

    fn literal(&mut self) -> Option<JsonValue> {
        let rest = &self.text[self.pos..];
        let (value, len) = if rest.starts_with("true") {
            (JsonValue::Bool(true), 4)
        } else if rest.starts_with("false") {
            (JsonValue::Bool(false), 5)
        } else if rest.starts_with("null") {
            (JsonValue::Null, 4)
        } else {
            return None;
        };
        self.pos += len;
        Some(value)
    }
}
