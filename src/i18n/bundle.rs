//! Locale-keyed translation bundles
//!
//! An [`I18nBundle`] maps locale codes to the entries read for that locale, in file
//! order. Bundles are built fresh by the [transforms](crate::i18n::transforms) and are
//! plain values afterwards; the writers never touch a bundle, they edit raw text.
//!
//! Duplicate keys stay in the entry lists. [`I18nBundle::lookup`] resolves them with
//! last-wins precedence, which also makes [`I18nBundle::merge`] an override: entries of a
//! bundle merged later shadow earlier ones.

use crate::i18n::ast::{I18nAnnotation, I18nAnnotationNode, TextNode};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

/// One translation read from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct I18nEntry {
    pub file_path: PathBuf,
    pub key: TextNode,
    pub value: TextNode,
    pub annotation: Option<I18nAnnotationNode>,
}

/// A translation to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewI18nEntry {
    pub key: String,
    pub value: String,
    pub annotation: Option<I18nAnnotation>,
}

impl NewI18nEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            annotation: None,
        }
    }

    pub fn with_annotation(mut self, annotation: I18nAnnotation) -> Self {
        self.annotation = Some(annotation);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct I18nBundle(IndexMap<String, Vec<I18nEntry>>);

impl I18nBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries of `locale` in file order, duplicates included.
    pub fn get(&self, locale: &str) -> Option<&[I18nEntry]> {
        self.0.get(locale).map(Vec::as_slice)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[I18nEntry])> {
        self.0
            .iter()
            .map(|(locale, entries)| (locale.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append an entry to `locale`, creating the locale if needed.
    pub fn push(&mut self, locale: impl Into<String>, entry: I18nEntry) {
        self.0.entry(locale.into()).or_default().push(entry);
    }

    /// Make sure `locale` exists, even without entries.
    pub fn ensure_locale(&mut self, locale: impl Into<String>) {
        self.0.entry(locale.into()).or_default();
    }

    /// Append every entry of `other` after this bundle's entries of the same locale.
    pub fn merge(&mut self, other: I18nBundle) {
        for (locale, entries) in other.0 {
            self.0.entry(locale).or_default().extend(entries);
        }
    }

    /// The entry that wins for `key` in `locale`: the last one.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&I18nEntry> {
        self.0
            .get(locale)?
            .iter()
            .rev()
            .find(|entry| entry.key.value == key)
    }
}

impl IntoIterator for I18nBundle {
    type Item = (String, Vec<I18nEntry>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<I18nEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
