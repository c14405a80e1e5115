//! Coarse widget classification for layout previews.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

/// Recognized widget families, each mapped to one visual placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetKind {
    Button,
    Label,
    Input,
    Image,
    Toggle,
    Container,
    Unknown,
}

/// Map a layout element name to its placeholder family.
///
/// Fully-qualified custom views (`com.example.FancyButton`) are classified
/// by their final path segment.
#[must_use]
pub fn widget_kind(element: &str) -> WidgetKind {
    let local = element.rsplit('.').next().unwrap_or(element);

    match local {
        "Button" | "ImageButton" | "FloatingActionButton" => WidgetKind::Button,
        "TextView" => WidgetKind::Label,
        "EditText" | "AutoCompleteTextView" | "SearchView" => WidgetKind::Input,
        "ImageView" => WidgetKind::Image,
        "CheckBox" | "Switch" | "RadioButton" | "ToggleButton" => WidgetKind::Toggle,
        "ScrollView" | "ListView" | "RecyclerView" | "GridView" | "CardView" => WidgetKind::Container,
        _ if local.ends_with("Layout") => WidgetKind::Container,
        _ => WidgetKind::Unknown,
    }
}
