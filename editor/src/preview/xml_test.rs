use super::*;

#[test]
fn scans_nested_elements_as_well_formed() {
    let scan = scan("<LinearLayout><Button/></LinearLayout>");
    assert!(scan.well_formed);
    assert_eq!(
        scan.events,
        vec![
            XmlEvent::Open(Tag { name: "LinearLayout", raw: "LinearLayout" }),
            XmlEvent::SelfClose(Tag { name: "Button", raw: "Button" }),
            XmlEvent::Close("LinearLayout"),
        ]
    );
}

#[test]
fn unclosed_element_is_not_well_formed() {
    let scan = scan("<LinearLayout><Button>");
    assert!(!scan.well_formed);
    // Both opens were still recognized.
    assert_eq!(scan.events.len(), 2);
}

#[test]
fn mismatched_close_is_not_well_formed() {
    let scan = scan("<a><b></a></b>");
    assert!(!scan.well_formed);
}

#[test]
fn unterminated_tag_is_not_well_formed() {
    let scan = scan("<Button ");
    assert!(!scan.well_formed);
}

#[test]
fn text_between_tags_is_captured_trimmed() {
    let scan = scan("<string>  Demo \n</string>");
    assert!(scan.well_formed);
    assert_eq!(scan.events[1], XmlEvent::Text("Demo"));
}

#[test]
fn prolog_comment_and_doctype_are_skipped() {
    let scan = scan("<?xml version=\"1.0\"?><!-- c --><!DOCTYPE x><root></root>");
    assert!(scan.well_formed);
    assert_eq!(scan.events.len(), 2);
}

#[test]
fn unterminated_comment_degrades_verdict() {
    let scan = scan("<root><!-- never closed</root>");
    assert!(!scan.well_formed);
}

#[test]
fn attributes_are_looked_up_by_exact_name() {
    let scan = scan(r#"<string name="app_name" android:id="x">Demo</string>"#);
    let XmlEvent::Open(tag) = scan.events[0] else {
        panic!("expected open tag");
    };
    assert_eq!(tag.attr("name"), Some("app_name"));
    assert_eq!(tag.attr("android:id"), Some("x"));
    // Bare `id` must not match inside `android:id`.
    assert_eq!(tag.attr("id"), None);
}

#[test]
fn single_quoted_attributes_work() {
    let scan = scan("<item type='drawable'/>");
    let XmlEvent::SelfClose(tag) = scan.events[0] else {
        panic!("expected self-closing tag");
    };
    assert_eq!(tag.attr("type"), Some("drawable"));
}

#[test]
fn empty_input_scans_clean() {
    let scan = scan("");
    assert!(scan.well_formed);
    assert!(scan.events.is_empty());
}
