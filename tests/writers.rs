//! Integration tests for the minimal-diff writers

use rstest::rstest;
use ux_i18n::i18n::ast::I18nAnnotation;
use ux_i18n::i18n::{
    add_csv_texts, add_json_texts, csv_to_i18n_bundle, json_to_i18n_bundle,
    print_properties_i18n_entry, properties_to_i18n_entries, write_properties_text,
    NewI18nEntry,
};

const NO_KEYS: &[&str] = &[];

#[test]
fn test_json_from_empty_file() {
    let out = add_json_texts("", "en", &[NewI18nEntry::new("k", "v")]);
    insta::assert_snapshot!(out, @r###"
    {
        "en": {
            "k": "v"
        }
    }
    "###);
}

#[test]
fn test_json_keeps_untouched_bytes() {
    let text = "{\n  // keep me\n  \"en\": {\n    \"a\": \"A\"\n  },\n  \"de\": {\"a\": \"Ä\"}\n}\n";
    let out = add_json_texts(
        text,
        "en",
        &[NewI18nEntry::new("a", "AA"), NewI18nEntry::new("b", "B")],
    );
    insta::assert_snapshot!(out, @r###"
    {
      // keep me
      "en": {
        "a": "AA",
        "b": "B"
      },
      "de": {"a": "Ä"}
    }
    "###);

    let bundle = json_to_i18n_bundle(&out, "i18n.json");
    assert_eq!(bundle.lookup("en", "b").map(|e| e.value.value.as_str()), Some("B"));
    assert_eq!(bundle.lookup("de", "a").map(|e| e.value.value.as_str()), Some("Ä"));
}

#[test]
fn test_properties_remove_and_append() {
    let text = "# Comment\n\nkey1=a\nkey2=b\n\nkey3=c\n";
    let out = write_properties_text(text, &[NewI18nEntry::new("key4", "d")], &["key2"]);
    insta::assert_snapshot!(out, @r###"
    # Comment

    key1=a
    key3=c
    key4=d
    "###);
    assert_eq!(out, "# Comment\n\nkey1=a\nkey3=c\nkey4=d\n");
}

#[test]
fn test_properties_written_entries_read_back() {
    let entries = vec![
        NewI18nEntry::new("greeting", "Hello, world")
            .with_annotation(I18nAnnotation::new("XMSG").with_max_length(40)),
        NewI18nEntry::new("key with spaces", "  leading\tand\nnewline"),
        NewI18nEntry::new("#hash", "back\\slash"),
    ];
    let out = write_properties_text("existing=1", &entries, NO_KEYS);
    let read = properties_to_i18n_entries(&out, "i18n.properties");
    let pairs: Vec<_> = read
        .iter()
        .map(|e| (e.key.value.as_str(), e.value.value.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("existing", "1"),
            ("greeting", "Hello, world"),
            ("key with spaces", "  leading\tand\nnewline"),
            ("#hash", "back\\slash"),
        ]
    );
    let annotation = read[1].annotation.as_ref().expect("annotation").to_annotation();
    assert_eq!(annotation.text_type.code(), "XMSG");
    assert_eq!(annotation.max_length, Some(40));
}

#[test]
fn test_properties_removal_is_idempotent() {
    let text = "#XFLD\na=1\n\n#XFLD\nb=2\n";
    let once = write_properties_text(text, &[], &["b"]);
    assert_eq!(once, "#XFLD\na=1\n\n");
    assert_eq!(write_properties_text(&once, &[], &["b"]), once);
}

#[test]
fn test_print_entry_guesses_annotation() {
    assert_eq!(print_properties_i18n_entry("k", "ok", None), "\n#XFLD,10\nk=ok\n");
}

#[test]
fn test_print_entry_with_annotation() {
    let annotation = I18nAnnotation::new("XBUT").with_note(" Confirm");
    assert_eq!(
        print_properties_i18n_entry("k", "ok", Some(&annotation)),
        "\n#XBUT: Confirm\nk=ok\n"
    );
}

#[rstest]
#[case::lf("a=1\n", "a=1\nb=2\n")]
#[case::crlf("a=1\r\n", "a=1\r\nb=2\r\n")]
#[case::cr("a=1\r", "a=1\rb=2\r")]
#[case::no_final_break("a=1", "a=1\nb=2\n")]
#[case::empty("", "b=2\n")]
fn test_properties_append_follows_line_endings(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(
        write_properties_text(text, &[NewI18nEntry::new("b", "2")], NO_KEYS),
        expected
    );
}

#[test]
fn test_csv_adds_column_and_rows() {
    let text = "key;en\nBook;Book\n";
    let out = add_csv_texts(
        text,
        "de",
        &[NewI18nEntry::new("Book", "Buch"), NewI18nEntry::new("Pen", "Stift")],
    );
    insta::assert_snapshot!(out, @r###"
    key;en;de
    Book;Book;Buch
    Pen;;Stift
    "###);

    let bundle = csv_to_i18n_bundle(&out, "i18n.csv");
    assert_eq!(bundle.lookup("de", "Pen").map(|e| e.value.value.as_str()), Some("Stift"));
    assert_eq!(bundle.lookup("en", "Pen").map(|e| e.value.value.as_str()), Some(""));
}

#[test]
fn test_csv_values_needing_quotes_read_back() {
    let value = "one; \"two\"\nthree";
    let out = add_csv_texts("key,en\n", "en", &[NewI18nEntry::new("k", value)]);
    let bundle = csv_to_i18n_bundle(&out, "i18n.csv");
    assert_eq!(bundle.lookup("en", "k").map(|e| e.value.value.as_str()), Some(value));
}
