//! Token types shared by the lexers, parsers and tooling.
//!
//! Each format has its own token type. Both share the same offset contract: `start..end`
//! is a half-open byte span into the source, tokens come out in source order and no two
//! tokens overlap.

pub mod csv;
pub mod properties;

pub use csv::{CsvToken, CsvTokenKind};
pub use properties::{PropertiesToken, PropertiesTokenKind};
