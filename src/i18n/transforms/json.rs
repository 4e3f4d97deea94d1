//! JSON -> bundle

use crate::i18n::ast::TextNode;
use crate::i18n::bundle::{I18nBundle, I18nEntry};
use crate::i18n::parsing::json::{parse, JsonNode, JsonValue};
use std::path::Path;

/// Build a bundle from locale-keyed JSON:
///
/// ```text
/// { "en": { "greeting": "Hello" }, "de": { "greeting": "Hallo" } }
/// ```
///
/// Numbers and booleans are read as their literal text. Other leaves (null, arrays,
/// nested objects) become empty text at the leaf's own range. Locales whose value is not
/// an object are skipped.
pub fn json_to_i18n_bundle(text: &str, file_path: impl AsRef<Path>) -> I18nBundle {
    let file_path = file_path.as_ref();
    let mut bundle = I18nBundle::new();
    let Some(locales) = parse(text).and_then(|root| match root.value {
        JsonValue::Object(members) => Some(members),
        _ => None,
    }) else {
        tracing::debug!(path = %file_path.display(), "json bundle has no root object");
        return bundle;
    };

    for locale in locales {
        let JsonValue::Object(members) = locale.value.value else {
            tracing::debug!(locale = %locale.key.value, "skipping non-object locale");
            continue;
        };
        bundle.ensure_locale(locale.key.value.as_str());
        for member in members {
            let value = leaf_text(&member.value);
            bundle.push(
                locale.key.value.as_str(),
                I18nEntry {
                    file_path: file_path.to_path_buf(),
                    key: member.key,
                    value,
                    annotation: None,
                },
            );
        }
    }
    bundle
}

fn leaf_text(node: &JsonNode) -> TextNode {
    match &node.value {
        JsonValue::String(text) => text.clone(),
        JsonValue::Number(literal) => TextNode::new(literal.clone(), node.range.clone()),
        JsonValue::Bool(flag) => TextNode::new(flag.to_string(), node.range.clone()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => {
            TextNode::new(String::new(), node.range.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locales_and_leaves() {
        let text = r#"{
    "en": { "title": "Title", "count": 3, "on": true, "off": null },
    "de": { "title": "Titel" }
}"#;
        let bundle = json_to_i18n_bundle(text, "i18n.json");
        assert_eq!(bundle.locales().collect::<Vec<_>>(), vec!["en", "de"]);

        let en = bundle.get("en").unwrap();
        let values: Vec<_> = en.iter().map(|e| e.value.value.as_str()).collect();
        assert_eq!(values, vec!["Title", "3", "true", ""]);
        assert_eq!(&text[en[0].value.range.span.clone()], "Title");
        assert_eq!(&text[en[3].value.range.span.clone()], "null");
        assert_eq!(&text[en[1].key.range.span.clone()], "count");

        assert_eq!(bundle.lookup("de", "title").unwrap().value.value, "Titel");
    }

    #[test]
    fn test_non_object_locale_is_skipped() {
        let bundle = json_to_i18n_bundle(r#"{"en": "oops", "de": {"a": "b"}}"#, "i18n.json");
        assert_eq!(bundle.locales().collect::<Vec<_>>(), vec!["de"]);
    }

    #[test]
    fn test_no_root_object() {
        assert!(json_to_i18n_bundle("", "i18n.json").is_empty());
        assert!(json_to_i18n_bundle("[1, 2]", "i18n.json").is_empty());
    }

    #[test]
    fn test_comments_are_tolerated() {
        let text = "{\n  // German\n  \"de\": {\n    \"a\": \"b\", // trailing\n  },\n}\n";
        let bundle = json_to_i18n_bundle(text, "i18n.json");
        assert_eq!(bundle.lookup("de", "a").unwrap().value.value, "b");
    }
}
