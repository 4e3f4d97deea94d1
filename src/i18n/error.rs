//! Errors at the filesystem boundary
//!
//! Lexing, parsing, transforms and writers never fail; only the
//! [loader](crate::i18n::loader) returns these.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported localization file: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
