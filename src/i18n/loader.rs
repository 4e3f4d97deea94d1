//! Bundle loading utilities
//!
//! [`BundleLoader`] reads a localization file (or takes a string), remembers its format and
//! path, and gives access to the parse result and the bundle. The free functions below it
//! cover the common read and write round trips:
//!
//! - [`read_i18n_bundle`]: read any supported file into a bundle
//! - [`write_to_existing_i18n_properties_file`]: remove and append properties entries
//! - [`add_i18n_texts_to_file`]: add texts to a file of any supported format
//!
//! Files are read and written as UTF-8. A leading byte order mark is set aside while the
//! text is processed and put back on write. Writing to a missing file creates it (and its
//! parent directories).

use crate::i18n::bundle::{I18nBundle, NewI18nEntry};
use crate::i18n::error::{Error, Result};
use crate::i18n::parsing::{self, Format, Parsed};
use crate::i18n::transforms::{csv_to_i18n_bundle, json_to_i18n_bundle, properties_to_i18n_bundle};
use crate::i18n::writing::{
    add_csv_texts_with, add_json_texts_with, write_properties_text_with, WriterOptions,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const BOM: &str = "\u{feff}";

/// Source text of one localization file together with its format.
#[derive(Debug, Clone)]
pub struct BundleLoader {
    source: String,
    format: Format,
    path: PathBuf,
}

impl BundleLoader {
    /// Read a file; the format comes from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = format_of(path)?;
        let source = fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), bytes = source.len(), "read localization file");
        Ok(Self {
            source: strip_bom(&source).to_string(),
            format,
            path: path.to_path_buf(),
        })
    }

    /// Wrap text that did not come from disk. `path` is recorded in the entries and, for
    /// properties, decides the locale.
    pub fn from_string<S: Into<String>, P: AsRef<Path>>(source: S, format: Format, path: P) -> Self {
        let source = source.into();
        Self {
            source: strip_bom(&source).to_string(),
            format,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn parse(&self) -> Parsed {
        parsing::parse(&self.source, self.format)
    }

    pub fn bundle(&self) -> I18nBundle {
        match self.format {
            Format::Properties => properties_to_i18n_bundle(&self.source, &self.path),
            Format::Csv => csv_to_i18n_bundle(&self.source, &self.path),
            Format::Json => json_to_i18n_bundle(&self.source, &self.path),
        }
    }
}

/// Read a localization file into a bundle.
pub fn read_i18n_bundle(path: impl AsRef<Path>) -> Result<I18nBundle> {
    Ok(BundleLoader::from_path(path)?.bundle())
}

/// Remove `keys_to_remove` from a properties file and append `new_entries`.
pub fn write_to_existing_i18n_properties_file<S: AsRef<str>>(
    path: impl AsRef<Path>,
    new_entries: &[NewI18nEntry],
    keys_to_remove: &[S],
) -> Result<()> {
    let path = path.as_ref();
    if format_of(path)? != Format::Properties {
        return Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }
    update_file(path, |text| {
        write_properties_text_with(text, new_entries, keys_to_remove, &WriterOptions::default())
    })
}

/// Add `new_entries` to a file of any supported format.
///
/// For CSV and JSON the entries go to `fallback_locale`. A properties file holds one
/// locale, so there the argument is ignored.
pub fn add_i18n_texts_to_file(
    path: impl AsRef<Path>,
    fallback_locale: &str,
    new_entries: &[NewI18nEntry],
    options: &WriterOptions,
) -> Result<()> {
    let path = path.as_ref();
    let format = format_of(path)?;
    update_file(path, |text| match format {
        Format::Properties => write_properties_text_with(text, new_entries, &[] as &[&str], options),
        Format::Csv => add_csv_texts_with(text, fallback_locale, new_entries, options),
        Format::Json => add_json_texts_with(text, fallback_locale, new_entries, options),
    })
}

fn format_of(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Read `path` (empty if missing), transform its text, write it back if it changed.
fn update_file(path: &Path, update: impl FnOnce(&str) -> String) -> Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => return Err(err.into()),
    };
    let original = existing.as_deref().unwrap_or_default();
    let had_bom = original.starts_with(BOM);
    let updated = update(strip_bom(original));
    let updated = if had_bom {
        format!("{}{}", BOM, updated)
    } else {
        updated
    };

    if existing.as_deref() == Some(updated.as_str()) {
        tracing::debug!(path = %path.display(), "file unchanged");
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &updated)?;
    tracing::info!(path = %path.display(), bytes = updated.len(), "wrote localization file");
    Ok(())
}
