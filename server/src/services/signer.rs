//! APK signing via the external `apksigner` tool.
//!
//! No signature material is produced in-process; the keystore and its
//! password come from the environment and are handed to the tool.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;

use super::apktool::find_in_path;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("apksigner not found; install the Android build tools or set APKSIGNER_PATH")]
    ToolNotFound,
    #[error("no signing keystore configured; set APK_KEYSTORE and APK_KEYSTORE_PASS")]
    KeystoreNotConfigured,
    #[error("signing timed out after {0}s")]
    TimedOut(u64),
    #[error("apksigner failed: {0}")]
    Failed(String),
    #[error("apksigner could not be started: {0}")]
    Io(#[from] std::io::Error),
}

/// Keystore location and password, from the environment.
#[derive(Debug, Clone)]
pub struct Keystore {
    pub path: PathBuf,
    pass: String,
}

/// Handle to a located apksigner installation plus its keystore.
#[derive(Debug, Clone)]
pub struct Signer {
    tool: PathBuf,
    keystore: Keystore,
    timeout_secs: u64,
}

impl Signer {
    /// Locate apksigner and read the keystore configuration.
    ///
    /// # Errors
    ///
    /// [`SignError::ToolNotFound`] or [`SignError::KeystoreNotConfigured`].
    pub fn from_env() -> Result<Self, SignError> {
        let tool = std::env::var("APKSIGNER_PATH")
            .ok()
            .map(PathBuf::from)
            .filter(|p| p.exists())
            .or_else(|| find_in_path("apksigner"))
            .ok_or(SignError::ToolNotFound)?;

        let path = std::env::var("APK_KEYSTORE")
            .ok()
            .map(PathBuf::from)
            .ok_or(SignError::KeystoreNotConfigured)?;
        let pass = std::env::var("APK_KEYSTORE_PASS").map_err(|_| SignError::KeystoreNotConfigured)?;

        let timeout_secs = crate::state::env_parse("APKSIGNER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        Ok(Self { tool, keystore: Keystore { path, pass }, timeout_secs })
    }

    /// Sign `input` into `output`.
    ///
    /// # Errors
    ///
    /// A non-zero tool exit (carrying stderr) or the timeout.
    pub async fn sign(&self, input: &Path, output: &Path) -> Result<(), SignError> {
        let output_result = tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            Command::new(&self.tool)
                .args(sign_args(&self.keystore, input, output))
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| SignError::TimedOut(self.timeout_secs))??;

        if output_result.status.success() {
            Ok(())
        } else {
            Err(SignError::Failed(
                String::from_utf8_lossy(&output_result.stderr).trim().to_owned(),
            ))
        }
    }
}

/// `apksigner sign --ks <ks> --ks-pass pass:<pw> --out <out> <in>`
pub(crate) fn sign_args(keystore: &Keystore, input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "sign".into(),
        "--ks".into(),
        keystore.path.as_path().into(),
        "--ks-pass".into(),
        format!("pass:{}", keystore.pass).into(),
        "--out".into(),
        output.into(),
        input.into(),
    ]
}

#[cfg(test)]
#[path = "signer_test.rs"]
mod tests;
