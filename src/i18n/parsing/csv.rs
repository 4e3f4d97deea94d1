//! `.csv` parser
//!
//!     The first row is the header: column 0 names the key column, every other column
//!     names a locale. The remaining rows are data rows and may be ragged.
//!
//!     Rows are built by [`CsvParser::parse_row`]: field tokens separated by separator
//!     tokens, up to an end-of-line or the end of input. The lexer flushes a field before
//!     every delimiter, so consecutive separators already arrive as empty fields; the only
//!     field the parser synthesizes is the one after a trailing separator at end of file.

use crate::i18n::ast::{CsvDocument, CsvField, CsvRow, Range, SourceLocation};
use crate::i18n::lexing::csv::tokenize;
use crate::i18n::token::{CsvToken, CsvTokenKind};

/// AST plus the tokens it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvParseResult {
    pub ast: CsvDocument,
    pub tokens: Vec<CsvToken>,
}

/// Parse CSV source. Never fails; empty input yields a document with an empty header.
pub fn parse(text: &str) -> CsvParseResult {
    let tokens = tokenize(text);
    let location = SourceLocation::new(text);
    let ast = CsvParser::new(&tokens, &location).parse_document();
    CsvParseResult { ast, tokens }
}

pub struct CsvParser<'a> {
    tokens: &'a [CsvToken],
    index: usize,
    location: &'a SourceLocation,
}

impl<'a> CsvParser<'a> {
    pub fn new(tokens: &'a [CsvToken], location: &'a SourceLocation) -> Self {
        Self {
            tokens,
            index: 0,
            location,
        }
    }

    fn peek(&self) -> Option<&'a CsvToken> {
        self.tokens.get(self.index)
    }

    fn peek_kind(&self) -> Option<CsvTokenKind> {
        self.peek().map(|token| token.kind)
    }

    pub fn parse_document(&mut self) -> CsvDocument {
        self.skip_leading_empty_line();
        let header = self.parse_row();
        let mut rows = Vec::new();
        loop {
            while matches!(
                self.peek_kind(),
                Some(CsvTokenKind::Eol | CsvTokenKind::Separator)
            ) {
                self.index += 1;
            }
            if self.peek().is_none() {
                break;
            }
            let row = self.parse_row();
            if !row.is_blank() {
                rows.push(row);
            }
        }
        CsvDocument { header, rows }
    }

    fn skip_leading_empty_line(&mut self) {
        let empty_field = self
            .tokens
            .first()
            .is_some_and(|token| token.kind == CsvTokenKind::Text && token.value.is_empty());
        let then_eol = self
            .tokens
            .get(1)
            .is_some_and(|token| token.kind == CsvTokenKind::Eol);
        if self.index == 0 && empty_field && then_eol {
            self.index = 2;
        }
    }

    /// Parse one row starting at the cursor. Consumes the terminating end-of-line.
    pub fn parse_row(&mut self) -> CsvRow {
        let mut fields = Vec::new();
        while let Some(token) = self.peek() {
            self.index += 1;
            match token.kind {
                CsvTokenKind::Eol => break,
                CsvTokenKind::Text | CsvTokenKind::EscapedText => fields.push(self.field(token)),
                CsvTokenKind::Separator => {
                    let next_is_field = self.peek().is_some_and(CsvToken::is_field);
                    if !next_is_field {
                        let position = self.location.position_at(token.end);
                        fields.push(CsvField {
                            value: String::new(),
                            quoted: false,
                            range: Range::empty_at(token.end, position),
                        });
                    }
                }
            }
        }

        let range = match (fields.first(), fields.last()) {
            (Some(first), Some(last)) => self
                .location
                .range_at(first.range.span.start, last.range.span.end),
            _ => Range::default(),
        };
        CsvRow { fields, range }
    }

    fn field(&self, token: &CsvToken) -> CsvField {
        CsvField {
            value: token.value.clone(),
            quoted: token.kind == CsvTokenKind::EscapedText,
            range: self.location.range_at(token.start, token.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::ast::Position;

    fn values(row: &CsvRow) -> Vec<&str> {
        row.fields.iter().map(|f| f.value.as_str()).collect()
    }

    #[test]
    fn test_header_and_rows() {
        let doc = parse("key;en;de\nBook;Book;Buch\n").ast;
        assert_eq!(values(&doc.header), vec!["key", "en", "de"]);
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(values(&doc.rows[0]), vec!["Book", "Book", "Buch"]);
        assert_eq!(doc.rows[0].range.span, 10..24);
        assert_eq!(doc.rows[0].range.start, Position::new(1, 0));
    }

    #[test]
    fn test_quoted_fields() {
        let doc = parse("key,en\na,\"b,c\",d\n").ast;
        let row = &doc.rows[0];
        assert_eq!(values(row), vec!["a", "b,c", "d"]);
        assert!(!row.fields[0].quoted);
        assert!(row.fields[1].quoted);
        assert_eq!(row.fields[1].range.span, 9..14);
    }

    #[test]
    fn test_consecutive_separators_give_empty_fields() {
        let doc = parse("key;en;de\nk;;x\n").ast;
        assert_eq!(values(&doc.rows[0]), vec!["k", "", "x"]);
    }

    #[test]
    fn test_trailing_separator_at_eof() {
        let doc = parse("key;en;\nk;v;").ast;
        assert_eq!(values(&doc.header), vec!["key", "en", ""]);
        let row = &doc.rows[0];
        assert_eq!(values(row), vec!["k", "v", ""]);
        assert_eq!(row.fields[2].range.span, 12..12);
        assert_eq!(row.range.span, 8..12);
    }

    #[test]
    fn test_leading_empty_line_and_blank_rows() {
        let doc = parse("\nkey;en\n\na;1\n\n\nb;2").ast;
        assert_eq!(values(&doc.header), vec!["key", "en"]);
        let keys: Vec<_> = doc.rows.iter().map(|r| r.fields[0].value.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_quoted_empty_row_is_kept() {
        let doc = parse("key\n\"\"\n").ast;
        assert_eq!(doc.rows.len(), 1);
        assert!(doc.rows[0].fields[0].quoted);
    }

    #[test]
    fn test_ragged_rows() {
        let doc = parse("key;en;de\nonly\nk;v\n").ast;
        assert_eq!(doc.rows[0].fields.len(), 1);
        assert_eq!(doc.rows[1].fields.len(), 2);
        assert!(doc.rows[1].field(2).is_none());
    }

    #[test]
    fn test_empty_input() {
        let doc = parse("").ast;
        assert!(doc.header.is_empty());
        assert_eq!(doc.header.range, Range::default());
        assert!(doc.rows.is_empty());
    }

    #[test]
    fn test_column_index() {
        let doc = parse("key\ten\tde\n").ast;
        assert_eq!(doc.column_index("de"), Some(2));
        assert_eq!(doc.column_index("fr"), None);
    }
}
