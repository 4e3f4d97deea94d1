//! Transforms
//!
//!     Turn parsed files into [`I18nBundle`](crate::i18n::bundle::I18nBundle)s. Each
//!     transform takes the raw text plus the path it came from, parses it, and walks the
//!     AST:
//!         - [csv]: one locale per header column after the key column
//!         - [json]: one locale per top-level member
//!         - [properties]: one locale per file, detected from the file name
//!
//!     Structural gaps are not errors. Rows without a value for a column and locale members
//!     that are not objects are skipped; leaves that are not text degrade to empty text.

pub mod csv;
pub mod json;
pub mod properties;

pub use csv::csv_to_i18n_bundle;
pub use json::json_to_i18n_bundle;
pub use properties::{
    locale_from_file_name, properties_to_i18n_bundle, properties_to_i18n_entries,
};
