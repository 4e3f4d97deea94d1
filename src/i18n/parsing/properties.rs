//! `.properties` parser
//!
//!     A peek/consume cursor over the token list. Outside of a key/element line the
//!     parser skips whitespace, separators and end-of-lines; a comment token becomes a
//!     [`CommentLine`]; the first text token starts a [`KeyElementLine`].
//!
//!     The element is every text token up to the next end-of-line. Continuation markers
//!     and the indentation that follows them are skipped, so a continued element's segments
//!     are joined into one value whose range runs from the first to the last segment.
//!
//!     Lines come out in source order. Duplicate keys are kept; the bundle decides which
//!     one wins.

use crate::i18n::ast::{
    CommentLine, KeyElementLine, PropertyLine, PropertyList, Range, SourceLocation, TextNode,
};
use crate::i18n::lexing::properties::tokenize;
use crate::i18n::token::{PropertiesToken, PropertiesTokenKind};

/// AST plus the tokens it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesParseResult {
    pub ast: PropertyList,
    pub tokens: Vec<PropertiesToken>,
}

/// Parse `.properties` source. Never fails; any input yields a (possibly empty) list.
pub fn parse(text: &str) -> PropertiesParseResult {
    let tokens = tokenize(text);
    let location = SourceLocation::new(text);
    let ast = PropertiesParser::new(&tokens, &location).parse();
    PropertiesParseResult { ast, tokens }
}

struct PropertiesParser<'a> {
    tokens: &'a [PropertiesToken],
    index: usize,
    location: &'a SourceLocation,
}

impl<'a> PropertiesParser<'a> {
    fn new(tokens: &'a [PropertiesToken], location: &'a SourceLocation) -> Self {
        Self {
            tokens,
            index: 0,
            location,
        }
    }

    fn peek(&self) -> Option<&'a PropertiesToken> {
        self.tokens.get(self.index)
    }

    fn consume(&mut self) -> Option<&'a PropertiesToken> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }

    fn parse(mut self) -> PropertyList {
        let mut lines = Vec::new();
        while let Some(token) = self.peek() {
            match token.kind {
                PropertiesTokenKind::Comment => {
                    self.index += 1;
                    lines.push(PropertyLine::CommentLine(self.comment_line(token)));
                }
                PropertiesTokenKind::Text => {
                    self.index += 1;
                    lines.push(PropertyLine::KeyElementLine(self.key_element_line(token)));
                }
                _ => self.index += 1,
            }
        }
        lines
    }

    fn comment_line(&self, token: &PropertiesToken) -> CommentLine {
        // The image always starts with the ASCII `#` or `!` marker
        let value = token.image.get(1..).unwrap_or_default().to_string();
        CommentLine {
            value,
            range: self.location.range_at(token.start, token.end),
        }
    }

    fn key_element_line(&mut self, key_token: &PropertiesToken) -> KeyElementLine {
        let key = TextNode::new(
            key_token.image.clone(),
            self.location.range_at(key_token.start, key_token.end),
        );

        let mut value = String::new();
        let mut span: Option<(usize, usize)> = None;
        while let Some(token) = self.peek() {
            match token.kind {
                PropertiesTokenKind::EndOfLine | PropertiesTokenKind::Comment => break,
                PropertiesTokenKind::Text => {
                    value.push_str(&token.image);
                    span = Some(match span {
                        Some((start, _)) => (start, token.end),
                        None => (token.start, token.end),
                    });
                }
                PropertiesTokenKind::Whitespace
                | PropertiesTokenKind::Separator
                | PropertiesTokenKind::ContinuationLineMarker => {}
            }
            self.consume();
        }

        let element = match span {
            Some((start, end)) => TextNode::new(value, self.location.range_at(start, end)),
            None => TextNode::new(
                String::new(),
                Range::empty_at(key.range.span.end, key.range.end),
            ),
        };
        let range = self
            .location
            .range_at(key.range.span.start, element.range.span.end);
        KeyElementLine {
            key,
            element,
            range,
        }
    }
}
