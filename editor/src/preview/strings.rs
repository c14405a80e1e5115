//! String-resource extraction and naming-convention classification.

#[cfg(test)]
#[path = "strings_test.rs"]
mod strings_test;

use super::xml::{Scan, XmlEvent};

/// One `<string name="...">value</string>` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringEntry {
    pub name: String,
    pub value: String,
}

/// How a string entry should be rendered, keyed by its resource name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringRole {
    Title,
    Button,
    Plain,
}

/// Pull `<string>` entries out of a scanned `strings.xml`.
///
/// Entries without a `name` attribute are dropped; a self-closing entry
/// yields an empty value. Text is concatenated up to the matching close so
/// values survive interleaved comments.
#[must_use]
pub fn extract_entries(scan: &Scan<'_>) -> Vec<StringEntry> {
    let mut entries = Vec::new();
    let mut events = scan.events.iter();

    while let Some(event) = events.next() {
        match event {
            XmlEvent::SelfClose(tag) if tag.name == "string" => {
                if let Some(name) = tag.attr("name") {
                    entries.push(StringEntry { name: name.to_owned(), value: String::new() });
                }
            }
            XmlEvent::Open(tag) if tag.name == "string" => {
                let Some(name) = tag.attr("name") else {
                    continue;
                };
                let mut value = String::new();
                for inner in events.by_ref() {
                    match inner {
                        XmlEvent::Close("string") => break,
                        XmlEvent::Text(text) => {
                            if !value.is_empty() {
                                value.push(' ');
                            }
                            value.push_str(text);
                        }
                        _ => {}
                    }
                }
                entries.push(StringEntry { name: name.to_owned(), value });
            }
            _ => {}
        }
    }

    entries
}

/// Classify a string resource by its name.
///
/// `app_name` and anything containing `title` render as headings; names
/// containing `button`/`btn` render button-like; everything else is plain
/// text.
#[must_use]
pub fn classify(name: &str) -> StringRole {
    let lower = name.to_ascii_lowercase();
    if lower == "app_name" || lower.contains("title") {
        StringRole::Title
    } else if lower.contains("button") || lower.contains("btn") {
        StringRole::Button
    } else {
        StringRole::Plain
    }
}
