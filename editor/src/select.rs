//! Local APK file selection and validation.
//!
//! Validation runs before any upload starts; a rejected file never changes
//! state or reaches the server. The server applies the same rules again on
//! the multipart upload, sharing this module.

#[cfg(test)]
#[path = "select_test.rs"]
mod select_test;

use crate::state::SelectedFile;

/// Accepted package extension, lowercase, without the dot.
pub const APK_EXTENSION: &str = "apk";

/// Default upload ceiling: 100 MB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Client-enforced upload limits. The server re-validates with the same
/// values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self { max_bytes: DEFAULT_MAX_UPLOAD_BYTES }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("no file name given")]
    EmptyName,
    #[error("only .{APK_EXTENSION} files can be edited (got \"{0}\")")]
    WrongExtension(String),
    #[error("file is {size}, above the {limit} upload limit")]
    TooLarge { size: String, limit: String },
}

/// Validate a locally chosen file and derive its display metadata.
///
/// # Errors
///
/// Returns a [`SelectError`] describing why the file was rejected; the
/// message is suitable for showing to the user as-is.
pub fn select_file(file_name: &str, size_bytes: u64, limits: &UploadLimits) -> Result<SelectedFile, SelectError> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        return Err(SelectError::EmptyName);
    }

    if !has_apk_extension(trimmed) {
        return Err(SelectError::WrongExtension(trimmed.to_owned()));
    }

    if size_bytes > limits.max_bytes {
        return Err(SelectError::TooLarge {
            size: format_size(size_bytes),
            limit: format_size(limits.max_bytes),
        });
    }

    Ok(SelectedFile {
        file_name: trimmed.to_owned(),
        project_name: derive_project_name(trimmed),
        size_bytes,
    })
}

/// Case-insensitive `.apk` extension check.
#[must_use]
pub fn has_apk_extension(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(APK_EXTENSION))
}

/// Derive a default project name from the file name: extension stripped,
/// separators replaced with spaces.
#[must_use]
pub fn derive_project_name(file_name: &str) -> String {
    let stem = std::path::Path::new(file_name)
        .file_stem()
        .map_or(file_name, |s| s.to_str().unwrap_or(file_name));
    let cleaned = stem.replace(['_', '-'], " ");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() { "Untitled Project".to_owned() } else { cleaned.to_owned() }
}

/// Human-readable size: `0 B`, `12.0 KB`, `3.4 MB`.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_owned();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
