//! AST
//!
//!     Node types for the parsed formats, and the location types every node carries.
//!
//!     - [range]: byte spans plus line/character positions
//!     - [text_node]: leaf values with their range
//!     - [properties]: comment and key/element lines of a `.properties` file
//!     - [csv]: header and data rows of a `.csv` file
//!     - [annotation]: SAP text-type annotations attached to properties entries
//!
//!     Nodes are plain data. Every node has a mandatory range; nodes synthesized for
//!     missing input (an element with no value, a trailing empty CSV field) get a zero-width
//!     range where the text would have been.

pub mod annotation;
pub mod csv;
pub mod properties;
pub mod range;
pub mod text_node;

pub use annotation::{I18nAnnotation, I18nAnnotationNode, SapTextType};
pub use csv::{CsvDocument, CsvField, CsvRow};
pub use properties::{CommentLine, KeyElementLine, PropertyLine, PropertyList};
pub use range::{line_offsets, position_at, range_at, Position, Range, SourceLocation};
pub use text_node::{TextNode, ValueNode};
