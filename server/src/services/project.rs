//! Filesystem project store.
//!
//! DESIGN
//! ======
//! One directory per project under the configured root, named by UUID:
//!
//! ```text
//! <root>/<id>/metadata.json    project metadata
//! <root>/<id>/original.apk     the uploaded package
//! <root>/<id>/decompiled/      apktool output, edited in place
//! <root>/<id>/compiled.apk     rebuild output
//! <root>/<id>/signed.apk       signing output
//! ```
//!
//! ERROR HANDLING
//! ==============
//! Listing skips directories with missing or unreadable metadata instead of
//! failing the whole listing; a foreign directory in the projects root must
//! not take the dashboard down.

use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use uuid::Uuid;

use editor::select::format_size;

pub const METADATA_FILE: &str = "metadata.json";
pub const ORIGINAL_APK: &str = "original.apk";
pub const DECOMPILED_DIR: &str = "decompiled";
pub const COMPILED_APK: &str = "compiled.apk";
pub const SIGNED_APK: &str = "signed.apk";

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("project not found: {0}")]
    NotFound(Uuid),
    #[error("metadata for project {0} is unreadable: {1}")]
    Metadata(Uuid, serde_json::Error),
    #[error("project storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build lifecycle of a project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Decompiled,
    Compiled,
    Signed,
}

impl ProjectStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decompiled => "decompiled",
            Self::Compiled => "compiled",
            Self::Signed => "signed",
        }
    }
}

/// Persisted project metadata, mirrored in `metadata.json`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProjectMeta {
    pub id: Uuid,
    pub name: String,
    /// File name of the uploaded APK, for display and downloads.
    pub original_apk: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub status: ProjectStatus,
}

impl ProjectMeta {
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>, original_apk: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            original_apk: original_apk.into(),
            created_at: OffsetDateTime::now_utc(),
            status: ProjectStatus::Decompiled,
        }
    }
}

/// Metadata plus computed listing fields.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub meta: ProjectMeta,
    pub size_bytes: u64,
    pub size_display: String,
    pub has_compiled: bool,
    pub has_signed: bool,
}

/// Root-anchored store of all projects.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    /// Open (and create if needed) the projects root.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the root cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ProjectError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn project_dir(&self, id: Uuid) -> PathBuf {
        self.root.join(id.to_string())
    }

    #[must_use]
    pub fn decompiled_dir(&self, id: Uuid) -> PathBuf {
        self.project_dir(id).join(DECOMPILED_DIR)
    }

    #[must_use]
    pub fn original_apk_path(&self, id: Uuid) -> PathBuf {
        self.project_dir(id).join(ORIGINAL_APK)
    }

    #[must_use]
    pub fn compiled_apk_path(&self, id: Uuid) -> PathBuf {
        self.project_dir(id).join(COMPILED_APK)
    }

    #[must_use]
    pub fn signed_apk_path(&self, id: Uuid) -> PathBuf {
        self.project_dir(id).join(SIGNED_APK)
    }

    /// Persist metadata, creating the project directory if needed.
    ///
    /// # Errors
    ///
    /// I/O failure writing the metadata file.
    pub fn save_meta(&self, meta: &ProjectMeta) -> Result<(), ProjectError> {
        let dir = self.project_dir(meta.id);
        std::fs::create_dir_all(&dir)?;
        let json = serde_json::to_string_pretty(meta).map_err(|e| ProjectError::Metadata(meta.id, e))?;
        std::fs::write(dir.join(METADATA_FILE), json)?;
        Ok(())
    }

    /// Read one project's metadata.
    ///
    /// # Errors
    ///
    /// [`ProjectError::NotFound`] when the directory or metadata file is
    /// absent, [`ProjectError::Metadata`] when it does not parse.
    pub fn read_meta(&self, id: Uuid) -> Result<ProjectMeta, ProjectError> {
        let path = self.project_dir(id).join(METADATA_FILE);
        let raw = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ProjectError::NotFound(id),
            _ => ProjectError::Io(e),
        })?;
        serde_json::from_str(&raw).map_err(|e| ProjectError::Metadata(id, e))
    }

    /// Update the stored status.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ProjectStore::read_meta`] and
    /// [`ProjectStore::save_meta`].
    pub fn set_status(&self, id: Uuid, status: ProjectStatus) -> Result<(), ProjectError> {
        let mut meta = self.read_meta(id)?;
        meta.status = status;
        self.save_meta(&meta)
    }

    /// Metadata plus computed size and build flags.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ProjectStore::read_meta`].
    pub fn summary(&self, id: Uuid) -> Result<ProjectSummary, ProjectError> {
        let meta = self.read_meta(id)?;
        let size_bytes = dir_size(&self.project_dir(id));
        Ok(ProjectSummary {
            has_compiled: self.compiled_apk_path(id).exists(),
            has_signed: self.signed_apk_path(id).exists(),
            size_display: format_size(size_bytes),
            size_bytes,
            meta,
        })
    }

    /// All projects, newest first. Unreadable entries are skipped.
    ///
    /// # Errors
    ///
    /// I/O failure reading the projects root itself.
    pub fn list(&self) -> Result<Vec<ProjectSummary>, ProjectError> {
        let mut projects = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let Ok(id) = entry.file_name().to_string_lossy().parse::<Uuid>() else {
                continue;
            };
            match self.summary(id) {
                Ok(summary) => projects.push(summary),
                Err(e) => tracing::warn!(%id, error = %e, "skipping unreadable project"),
            }
        }
        projects.sort_by(|a, b| b.meta.created_at.cmp(&a.meta.created_at));
        Ok(projects)
    }

    /// Delete a project directory recursively.
    ///
    /// # Errors
    ///
    /// [`ProjectError::NotFound`] when the project does not exist.
    pub fn delete(&self, id: Uuid) -> Result<(), ProjectError> {
        let dir = self.project_dir(id);
        if !dir.exists() {
            return Err(ProjectError::NotFound(id));
        }
        std::fs::remove_dir_all(dir)?;
        tracing::info!(%id, "project deleted");
        Ok(())
    }

    /// Remove a half-created project, e.g. after a failed decompile.
    pub fn discard(&self, id: Uuid) {
        let dir = self.project_dir(id);
        if dir.exists() {
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                tracing::warn!(%id, error = %e, "could not clean up partial project");
            }
        }
    }

    /// Path of the best built output: signed if present, else compiled.
    #[must_use]
    pub fn built_apk_path(&self, id: Uuid) -> Option<PathBuf> {
        let signed = self.signed_apk_path(id);
        if signed.exists() {
            return Some(signed);
        }
        let compiled = self.compiled_apk_path(id);
        compiled.exists().then_some(compiled)
    }
}

fn dir_size(dir: &Path) -> u64 {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                dir_size(&path)
            } else {
                entry.metadata().map(|m| m.len()).unwrap_or(0)
            }
        })
        .sum()
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
