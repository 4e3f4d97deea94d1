//! Localization file support
//!
//!     Three formats are understood: Java-style `.properties` files (one locale per file),
//!     `.csv` files (one locale per column) and locale-keyed `.json` files.
//!
//! Pipeline
//!
//!     text -> [lexing] -> tokens -> [parsing] -> AST -> [transforms] -> [`I18nBundle`]
//!
//!     The [writing] side starts from text again: it parses, computes edits and applies
//!     them, so untouched bytes survive. The [loader] wraps both directions around the
//!     filesystem.
//!
//! Locations
//!
//!     Every token and node carries byte offsets into the source; AST nodes additionally
//!     carry zero-based line/character [`Position`]s. See [ast::range].

pub mod ast;
pub mod bundle;
pub mod error;
pub mod heuristics;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod token;
pub mod transforms;
pub mod writing;

pub use ast::{
    CommentLine, CsvDocument, CsvField, CsvRow, I18nAnnotation, I18nAnnotationNode,
    KeyElementLine, Position, PropertyLine, PropertyList, Range, SapTextType, SourceLocation,
    TextNode, ValueNode,
};
pub use bundle::{I18nBundle, I18nEntry, NewI18nEntry};
pub use error::{Error, Result};
pub use loader::{
    add_i18n_texts_to_file, read_i18n_bundle, write_to_existing_i18n_properties_file,
    BundleLoader,
};
pub use parsing::{
    parse, print_properties_i18n_annotation, print_properties_i18n_entry, Format, Parsed,
};
pub use transforms::{
    csv_to_i18n_bundle, json_to_i18n_bundle, properties_to_i18n_bundle,
    properties_to_i18n_entries,
};
pub use writing::{
    add_csv_texts, add_csv_texts_with, add_json_texts, add_json_texts_with, apply_edits,
    write_properties_text, write_properties_text_with, TextEdit, WriterOptions,
};
