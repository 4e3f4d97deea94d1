//! CSV -> bundle

use crate::i18n::ast::TextNode;
use crate::i18n::bundle::{I18nBundle, I18nEntry};
use crate::i18n::parsing::csv::parse;
use std::path::Path;

/// Build a bundle from CSV text. Column 0 holds the keys; every further header field is
/// a locale code and becomes a bundle key, even if no row has a value for it.
pub fn csv_to_i18n_bundle(text: &str, file_path: impl AsRef<Path>) -> I18nBundle {
    let file_path = file_path.as_ref();
    let document = parse(text).ast;
    let (header, rows) = document.header_and_rows();
    let mut bundle = I18nBundle::new();

    for (column, locale) in header.fields.iter().enumerate().skip(1) {
        bundle.ensure_locale(locale.value.as_str());
        for row in rows {
            let (Some(key), Some(value)) = (row.field(0), row.field(column)) else {
                continue;
            };
            bundle.push(
                locale.value.as_str(),
                I18nEntry {
                    file_path: file_path.to_path_buf(),
                    key: TextNode::new(key.value.clone(), key.range.clone()),
                    value: TextNode::new(value.value.clone(), value.range.clone()),
                    annotation: None,
                },
            );
        }
    }

    tracing::debug!(
        path = %file_path.display(),
        locales = bundle.len(),
        rows = rows.len(),
        "read csv bundle"
    );
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(bundle: &I18nBundle, locale: &str) -> Vec<(String, String)> {
        bundle
            .get(locale)
            .unwrap_or_default()
            .iter()
            .map(|e| (e.key.value.clone(), e.value.value.clone()))
            .collect()
    }

    #[test]
    fn test_columns_become_locales() {
        let bundle = csv_to_i18n_bundle("key;en;de\nBook;Book;Buch\n", "i18n.csv");
        assert_eq!(bundle.locales().collect::<Vec<_>>(), vec!["en", "de"]);
        assert_eq!(pairs(&bundle, "en"), vec![("Book".to_string(), "Book".to_string())]);
        assert_eq!(pairs(&bundle, "de"), vec![("Book".to_string(), "Buch".to_string())]);
        assert_eq!(bundle.get("en").unwrap()[0].file_path, Path::new("i18n.csv"));
    }

    #[test]
    fn test_rows_missing_the_column_are_skipped() {
        let bundle = csv_to_i18n_bundle("key,en,de\na,1\nb,2,zwei\n", "i18n.csv");
        assert_eq!(pairs(&bundle, "en").len(), 2);
        assert_eq!(pairs(&bundle, "de"), vec![("b".to_string(), "zwei".to_string())]);
    }

    #[test]
    fn test_value_range_points_at_field() {
        let text = "key;en\nk;\"quoted; value\"\n";
        let bundle = csv_to_i18n_bundle(text, "i18n.csv");
        let entry = &bundle.get("en").unwrap()[0];
        assert_eq!(entry.value.value, "quoted; value");
        assert_eq!(&text[entry.value.range.span.clone()], "\"quoted; value\"");
    }

    #[test]
    fn test_header_only_and_empty() {
        let bundle = csv_to_i18n_bundle("key;en\n", "i18n.csv");
        assert_eq!(bundle.get("en").map(<[_]>::len), Some(0));
        assert!(csv_to_i18n_bundle("", "i18n.csv").is_empty());
    }

    #[test]
    fn test_header_after_blank_lines() {
        let bundle = csv_to_i18n_bundle("\n\n\nkey;en\nBook;Book\n", "i18n.csv");
        assert_eq!(bundle.locales().collect::<Vec<_>>(), vec!["en"]);
        assert_eq!(pairs(&bundle, "en"), vec![("Book".to_string(), "Book".to_string())]);
    }
}
