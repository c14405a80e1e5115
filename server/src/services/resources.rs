//! Resource indexing and editing inside a decompiled project tree.
//!
//! Resource paths arriving from the client are always project-relative
//! (`res/layout/main.xml`); [`resolve`] refuses anything that would step
//! outside the decompiled directory.

use std::path::{Component, Path, PathBuf};

use editor::state::ResourceKind;

/// Density-suffixed drawable directories scanned for images.
pub const DRAWABLE_DIRS: [&str; 6] = [
    "res/drawable",
    "res/drawable-hdpi",
    "res/drawable-mdpi",
    "res/drawable-xhdpi",
    "res/drawable-xxhdpi",
    "res/drawable-xxxhdpi",
];

const STRINGS_XML: &str = "res/values/strings.xml";
const LAYOUT_DIR: &str = "res/layout";
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("resource path escapes the project tree: {0}")]
    OutsideTree(String),
    #[error("resource is not text: {0}")]
    NotText(String),
    #[error("resource storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// One editable resource in the index.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResourceEntry {
    pub name: String,
    /// Project-relative path, usable with the resource endpoints.
    pub path: String,
    pub size: u64,
}

/// Everything editable in one decompiled project.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ResourceIndex {
    pub images: Vec<ResourceEntry>,
    pub strings: Vec<ResourceEntry>,
    pub layouts: Vec<ResourceEntry>,
}

/// Content of one resource, shaped for the client.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResourceContent {
    pub kind: ResourceKind,
    pub path: String,
    /// Text content for string/layout resources; absent for images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Size in bytes for image resources; absent for text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Scan a decompiled tree for editable resources. Missing directories
/// simply contribute nothing.
#[must_use]
pub fn index(decompiled: &Path) -> ResourceIndex {
    let mut resources = ResourceIndex::default();

    for dir in DRAWABLE_DIRS {
        scan_dir(decompiled, dir, &mut resources.images, is_image_name);
    }

    let strings = decompiled.join(STRINGS_XML);
    if let Ok(meta) = std::fs::metadata(&strings) {
        resources.strings.push(ResourceEntry {
            name: "strings.xml".to_owned(),
            path: STRINGS_XML.to_owned(),
            size: meta.len(),
        });
    }

    scan_dir(decompiled, LAYOUT_DIR, &mut resources.layouts, |name| {
        std::path::Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
    });

    resources
}

fn scan_dir(decompiled: &Path, rel_dir: &str, out: &mut Vec<ResourceEntry>, keep: impl Fn(&str) -> bool) {
    let Ok(entries) = std::fs::read_dir(decompiled.join(rel_dir)) else {
        return;
    };

    let mut found: Vec<ResourceEntry> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !keep(&name) {
                return None;
            }
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            Some(ResourceEntry { path: format!("{rel_dir}/{name}"), name, size })
        })
        .collect();

    found.sort_by(|a, b| a.name.cmp(&b.name));
    out.extend(found);
}

fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|img| ext.eq_ignore_ascii_case(img)))
}

/// Resolve a project-relative resource path, rejecting traversal.
///
/// # Errors
///
/// [`ResourceError::OutsideTree`] for absolute paths or any `..` component.
pub fn resolve(decompiled: &Path, rel: &str) -> Result<PathBuf, ResourceError> {
    let rel_path = Path::new(rel);
    let escapes = rel_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if rel.is_empty() || escapes {
        return Err(ResourceError::OutsideTree(rel.to_owned()));
    }
    Ok(decompiled.join(rel_path))
}

/// Read a text resource (string or layout XML).
///
/// # Errors
///
/// Traversal, missing file, or non-UTF-8 content.
pub fn read_text(decompiled: &Path, rel: &str) -> Result<String, ResourceError> {
    let path = resolve(decompiled, rel)?;
    let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ResourceError::NotFound(rel.to_owned()),
        _ => ResourceError::Io(e),
    })?;
    String::from_utf8(bytes).map_err(|_| ResourceError::NotText(rel.to_owned()))
}

/// Size of an image resource.
///
/// # Errors
///
/// Traversal or missing file.
pub fn image_size(decompiled: &Path, rel: &str) -> Result<u64, ResourceError> {
    let path = resolve(decompiled, rel)?;
    std::fs::metadata(&path).map(|m| m.len()).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ResourceError::NotFound(rel.to_owned()),
        _ => ResourceError::Io(e),
    })
}

/// Write a text resource, creating parent directories as needed.
///
/// # Errors
///
/// Traversal or I/O failure.
pub fn write_text(decompiled: &Path, rel: &str, content: &str) -> Result<(), ResourceError> {
    write_bytes(decompiled, rel, content.as_bytes())
}

/// Write binary resource content, creating parent directories as needed.
///
/// # Errors
///
/// Traversal or I/O failure.
pub fn write_bytes(decompiled: &Path, rel: &str, bytes: &[u8]) -> Result<(), ResourceError> {
    let path = resolve(decompiled, rel)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, bytes)?;
    Ok(())
}

#[cfg(test)]
#[path = "resources_test.rs"]
mod tests;
