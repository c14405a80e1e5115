//! Live preview rendering.
//!
//! DESIGN
//! ======
//! `render` is a pure function of (resource kind, content) to a list of
//! coarse fragments plus a well-formedness flag. It never fails: malformed
//! input still renders whatever structure was recognizable, with
//! `well_formed` cleared so the host can flag it inline. Idempotent by
//! construction; re-rendering the same content yields the same preview.


pub mod layout;
pub mod strings;
pub mod xml;

use crate::state::ResourceKind;
use layout::WidgetKind;
use strings::StringRole;

/// One rendered preview element, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// Prominent heading text (e.g. the app name string).
    Title(String),
    /// Button-like string entry.
    Button(String),
    /// Plain text string entry.
    Text(String),
    /// Coarse placeholder for a layout element.
    Widget { kind: WidgetKind, element: String },
    /// Reference to an image resource; no pixel data is decoded.
    ImageRef { path: String },
}

/// A rendered preview: fragments plus structural validity of the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    pub fragments: Vec<Fragment>,
    pub well_formed: bool,
}

/// Render `content` as a preview for the given resource kind.
#[must_use]
pub fn render(kind: ResourceKind, content: &str) -> Preview {
    match kind {
        ResourceKind::String => render_strings(content),
        ResourceKind::Layout => render_layout(content),
        ResourceKind::Image => Preview {
            fragments: vec![Fragment::ImageRef { path: content.trim().to_owned() }],
            well_formed: true,
        },
    }
}

fn render_strings(content: &str) -> Preview {
    let scan = xml::scan(content);
    let fragments = strings::extract_entries(&scan)
        .into_iter()
        .map(|entry| match strings::classify(&entry.name) {
            StringRole::Title => Fragment::Title(entry.value),
            StringRole::Button => Fragment::Button(entry.value),
            StringRole::Plain => Fragment::Text(entry.value),
        })
        .collect();

    Preview { fragments, well_formed: scan.well_formed }
}

fn render_layout(content: &str) -> Preview {
    let scan = xml::scan(content);
    let mut fragments = Vec::new();

    for event in &scan.events {
        let element = match event {
            xml::XmlEvent::Open(tag) | xml::XmlEvent::SelfClose(tag) => tag.name,
            _ => continue,
        };
        fragments.push(Fragment::Widget {
            kind: layout::widget_kind(element),
            element: element.to_owned(),
        });
    }

    Preview { fragments, well_formed: scan.well_formed }
}
