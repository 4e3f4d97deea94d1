//! Properties -> bundle
//!
//! A properties file holds a single locale. The locale comes from the file name suffix
//! (`i18n_de.properties`, `i18n_en_US.properties`); a file without one is the default
//! bundle and gets the empty locale `""`.

use crate::i18n::ast::{PropertyLine, TextNode};
use crate::i18n::bundle::{I18nBundle, I18nEntry};
use crate::i18n::parsing::annotation::parse_annotation;
use crate::i18n::parsing::properties::parse;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static LOCALE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_([a-z]{2}(?:_[A-Z]{2})?)\.properties$").expect("locale suffix pattern")
});

/// Locale encoded in a properties file name, or `""` for the default bundle.
pub fn locale_from_file_name(file_path: impl AsRef<Path>) -> String {
    file_path
        .as_ref()
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| LOCALE_SUFFIX.captures(name))
        .and_then(|captures| captures.get(1))
        .map(|locale| locale.as_str().to_string())
        .unwrap_or_default()
}

/// Entries of a properties file in source order.
///
/// A comment line directly above an entry is read as its annotation. Entries separated
/// from a comment by a blank line, or preceded by another entry, get none.
pub fn properties_to_i18n_entries(text: &str, file_path: impl AsRef<Path>) -> Vec<I18nEntry> {
    let file_path = file_path.as_ref();
    let lines = parse(text).ast;
    let mut entries = Vec::new();
    let mut previous: Option<&PropertyLine> = None;

    for line in &lines {
        if let PropertyLine::KeyElementLine(entry) = line {
            let comment = previous
                .and_then(PropertyLine::as_comment)
                .filter(|comment| comment.range.end.line + 1 == entry.range.start.line);
            entries.push(I18nEntry {
                file_path: file_path.to_path_buf(),
                key: TextNode::new(entry.key.value.clone(), entry.key.range.clone()),
                value: TextNode::new(entry.element.value.clone(), entry.element.range.clone()),
                annotation: parse_annotation(comment),
            });
        }
        previous = Some(line);
    }

    tracing::debug!(path = %file_path.display(), entries = entries.len(), "read properties entries");
    entries
}

/// Single-locale bundle of a properties file, locale taken from the file name.
pub fn properties_to_i18n_bundle(text: &str, file_path: impl AsRef<Path>) -> I18nBundle {
    let file_path = file_path.as_ref();
    let locale = locale_from_file_name(file_path);
    let mut bundle = I18nBundle::new();
    bundle.ensure_locale(locale.as_str());
    for entry in properties_to_i18n_entries(text, file_path) {
        bundle.push(locale.as_str(), entry);
    }
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("i18n/i18n.properties", "")]
    #[case("i18n/i18n_de.properties", "de")]
    #[case("webapp/i18n/i18n_en_US.properties", "en_US")]
    #[case("i18n_pt_br.properties", "")]
    #[case("i18n_de.json", "")]
    #[case("my_app.properties", "")]
    fn test_locale_from_file_name(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(locale_from_file_name(path), expected);
    }

    #[test]
    fn test_annotation_from_comment_above() {
        let entries =
            properties_to_i18n_entries("#XTIT: App name\nappTitle=My App\n", "i18n.properties");
        assert_eq!(entries.len(), 1);
        let annotation = entries[0].annotation.as_ref().unwrap().to_annotation();
        assert_eq!(annotation.text_type.code(), "XTIT");
        assert_eq!(annotation.max_length, None);
        assert_eq!(annotation.note.as_deref(), Some(" App name"));
    }

    #[test]
    fn test_no_annotation_without_adjacent_comment() {
        let text = "#XFLD\n\nfirst=1\nsecond=2\n";
        let entries = properties_to_i18n_entries(text, "i18n.properties");
        assert!(entries.iter().all(|entry| entry.annotation.is_none()));
    }

    #[test]
    fn test_bundle_uses_file_locale() {
        let bundle = properties_to_i18n_bundle("k=Wert\n", "i18n/i18n_de.properties");
        assert_eq!(bundle.locales().collect::<Vec<_>>(), vec!["de"]);
        assert_eq!(bundle.lookup("de", "k").unwrap().value.value, "Wert");
    }

    #[test]
    fn test_empty_file_still_has_its_locale() {
        let bundle = properties_to_i18n_bundle("", "i18n.properties");
        assert_eq!(bundle.get(""), Some(&[][..]));
    }
}
