//! # ux-i18n
//!
//! Parsers and minimal-diff writers for localization resource files.
//!
//! File Layout
//!
//! Everything lives under [`i18n`], split the same way for every format:
//! src/i18n
//!   ├── ast         Ranges, positions and the AST node types
//!   ├── token       Token types produced by the lexers
//!   ├── lexing      Hand-written lexers (.properties, .csv)
//!   ├── parsing     Parsers over the token streams, plus the JSON tree reader
//!   ├── heuristics  Default annotations for new texts
//!   ├── bundle      Locale-keyed entry collections
//!   ├── transforms  AST -> locale-keyed bundle conversion
//!   ├── writing     Text edits that add or remove entries without reformatting
//!   └── loader      Filesystem reads and writes, with the crate error type
//!
//! The contract for every format is the same: any input text produces an AST (possibly
//! empty). Lexers and parsers never fail; only the [loader](i18n::loader) touching the
//! filesystem returns errors.

pub mod i18n;
