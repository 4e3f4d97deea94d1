//! Shared configuration loader for the ux-i18n writers.
//!
//! `defaults/i18n.default.toml` is embedded into every build so that docs and
//! runtime behavior stay in sync. Applications layer project-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`I18nConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use ux_i18n::i18n::writing::WriterOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/i18n.default.toml");

/// Top-level configuration consumed by ux-i18n applications.
#[derive(Debug, Clone, Deserialize)]
pub struct I18nConfig {
    pub json: JsonConfig,
    pub csv: CsvConfig,
    pub properties: PropertiesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub indent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CsvConfig {
    pub separator: CsvSeparator,
    pub key_column: String,
}

/// The delimiters the CSV lexer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CsvSeparator {
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = ";")]
    Semicolon,
    #[serde(rename = "\t")]
    Tab,
}

impl CsvSeparator {
    pub fn as_char(self) -> char {
        match self {
            CsvSeparator::Comma => ',',
            CsvSeparator::Semicolon => ';',
            CsvSeparator::Tab => '\t',
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertiesConfig {
    pub annotate_new_entries: bool,
}

impl I18nConfig {
    /// Writer options matching this configuration.
    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            json_indent: self.json.indent.clone(),
            csv_separator: self.csv.separator.as_char(),
            csv_key_column: self.csv.key_column.clone(),
            annotate_new_entries: self.properties.annotate_new_entries,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `("csv.separator", ",")`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<I18nConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<I18nConfig, ConfigError> {
    Loader::new().build()
}
