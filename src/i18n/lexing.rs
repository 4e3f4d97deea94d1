//! Lexers
//!
//!     Both lexers are hand-written single pass scanners. Each one turns the full source
//!     into a flat `Vec` of tokens:
//!         1. [properties](properties): comments, whitespace, separators, key/element
//!            text with escapes decoded, end-of-lines and continuation markers.
//!         2. [csv](csv): fields (plain or quote-escaped), separators and end-of-lines.
//!
//! Source Offsets
//!
//!     Tokens carry the byte span of their source text. The parsers turn these spans into
//!     [`Range`](crate::i18n::ast::Range)s, and the writers use them to edit files in
//!     place, so no stage may alter them. Concatenating the raw slices of all tokens
//!     reproduces the input.

pub mod csv;
pub mod properties;
