//! Shared application state and server configuration.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! External tools (apktool, apksigner, the AI backend) are optional: a
//! missing tool disables its operations with a clear message instead of
//! preventing startup, so the rest of the editor stays usable.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use editor::select::{DEFAULT_MAX_UPLOAD_BYTES, UploadLimits};

use crate::services::ai::AiClient;
use crate::services::apktool::ApkTool;
use crate::services::project::ProjectStore;
use crate::services::signer::Signer;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PROJECTS_DIR: &str = "./projects";
const DEFAULT_STATIC_DIR: &str = "./static";

/// Server configuration from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub projects_dir: PathBuf,
    /// Directory served as the front-end shell.
    pub static_dir: PathBuf,
    pub limits: UploadLimits,
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            projects_dir: std::env::var("PROJECTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROJECTS_DIR)),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR)),
            limits: UploadLimits { max_bytes: env_parse("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES) },
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Shared application state, injected into Axum handlers via State
/// extractor. Clone is required by Axum; all inner fields are Arc-wrapped
/// or Copy.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProjectStore>,
    /// `None` when no apktool installation was found.
    pub apktool: Option<Arc<ApkTool>>,
    /// `None` when apksigner or the keystore is not configured.
    pub signer: Option<Arc<Signer>>,
    /// `None` until the AI backend is configured, either from the
    /// environment at startup or through the configuration form.
    pub ai: Arc<RwLock<Option<Arc<AiClient>>>>,
    pub limits: UploadLimits,
}

impl AppState {
    #[must_use]
    pub fn new(
        store: ProjectStore,
        apktool: Option<ApkTool>,
        signer: Option<Signer>,
        ai: Option<AiClient>,
        limits: UploadLimits,
    ) -> Self {
        Self {
            store: Arc::new(store),
            apktool: apktool.map(Arc::new),
            signer: signer.map(Arc::new),
            ai: Arc::new(RwLock::new(ai.map(Arc::new))),
            limits,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
