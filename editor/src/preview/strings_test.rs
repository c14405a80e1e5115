use super::*;
use crate::preview::xml;

fn entries(content: &str) -> Vec<StringEntry> {
    extract_entries(&xml::scan(content))
}

#[test]
fn extracts_name_value_pairs() {
    let found = entries(
        r#"<resources>
            <string name="app_name">Demo</string>
            <string name="hello_world">Hello World!</string>
        </resources>"#,
    );
    assert_eq!(
        found,
        vec![
            StringEntry { name: "app_name".into(), value: "Demo".into() },
            StringEntry { name: "hello_world".into(), value: "Hello World!".into() },
        ]
    );
}

#[test]
fn self_closing_entry_has_empty_value() {
    let found = entries(r#"<resources><string name="spacer"/></resources>"#);
    assert_eq!(found, vec![StringEntry { name: "spacer".into(), value: String::new() }]);
}

#[test]
fn entry_without_name_is_dropped() {
    assert!(entries("<resources><string>orphan</string></resources>").is_empty());
}

#[test]
fn value_survives_interleaved_comment() {
    let found = entries(r#"<string name="x">one <!-- note --> two</string>"#);
    assert_eq!(found[0].value, "one two");
}

#[test]
fn classify_follows_naming_convention() {
    assert_eq!(classify("app_name"), StringRole::Title);
    assert_eq!(classify("screen_title"), StringRole::Title);
    assert_eq!(classify("button_text"), StringRole::Button);
    assert_eq!(classify("submit_btn"), StringRole::Button);
    assert_eq!(classify("hello_world"), StringRole::Plain);
}

#[test]
fn classify_is_case_insensitive() {
    assert_eq!(classify("Main_Title"), StringRole::Title);
    assert_eq!(classify("OK_BUTTON"), StringRole::Button);
}
