//! External apktool orchestration.
//!
//! DESIGN
//! ======
//! Decompilation and recompilation are delegated entirely to the apktool
//! binary (or jar, run through a JRE). This module only locates the tool,
//! builds its argument lists, and runs it as an async subprocess with a
//! timeout. Nothing APK-shaped is produced in-process: a missing tool is a
//! typed error, not a degraded code path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;

/// Generous ceiling; large APKs can take minutes to decode.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Conventional install locations probed when `APKTOOL_PATH` is not set.
const CANDIDATE_PATHS: [&str; 4] = [
    "/usr/local/bin/apktool",
    "/usr/bin/apktool",
    "./tools/apktool.jar",
    "./apktool.jar",
];

#[derive(Debug, thiserror::Error)]
pub enum ApkToolError {
    #[error("apktool not found; install it or set APKTOOL_PATH")]
    NotFound,
    #[error("java not found but apktool is a jar; install a JRE or set JAVA_PATH")]
    JavaNotFound,
    #[error("apktool timed out after {0}s")]
    TimedOut(u64),
    #[error("apktool failed: {0}")]
    Failed(String),
    #[error("apktool could not be started: {0}")]
    Io(#[from] std::io::Error),
}

/// How the tool is launched.
#[derive(Debug, Clone)]
enum Invocation {
    /// A self-contained `apktool` wrapper script or binary.
    Binary(PathBuf),
    /// `java -jar apktool.jar`.
    Jar { java: PathBuf, jar: PathBuf },
}

/// Handle to a located apktool installation.
#[derive(Debug, Clone)]
pub struct ApkTool {
    invocation: Invocation,
    timeout_secs: u64,
}

impl ApkTool {
    /// Locate apktool from `APKTOOL_PATH`, `PATH`, or conventional
    /// locations.
    ///
    /// # Errors
    ///
    /// [`ApkToolError::NotFound`] when nothing is installed, or
    /// [`ApkToolError::JavaNotFound`] when only a jar is available and no
    /// JRE can be located.
    pub fn discover() -> Result<Self, ApkToolError> {
        let tool = std::env::var("APKTOOL_PATH")
            .ok()
            .map(PathBuf::from)
            .filter(|p| p.exists())
            .or_else(|| find_in_path("apktool"))
            .or_else(|| CANDIDATE_PATHS.iter().map(PathBuf::from).find(|p| p.exists()))
            .ok_or(ApkToolError::NotFound)?;

        let invocation = if tool.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("jar")) {
            let java = std::env::var("JAVA_PATH")
                .ok()
                .map(PathBuf::from)
                .filter(|p| p.exists())
                .or_else(|| find_in_path("java"))
                .ok_or(ApkToolError::JavaNotFound)?;
            Invocation::Jar { java, jar: tool }
        } else {
            Invocation::Binary(tool)
        };

        let timeout_secs = crate::state::env_parse("APKTOOL_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        Ok(Self { invocation, timeout_secs })
    }

    /// Decompile `apk` into `out_dir` (created or overwritten).
    ///
    /// # Errors
    ///
    /// Tool discovery problems, a non-zero exit (carrying stderr), or the
    /// timeout.
    pub async fn decompile(&self, apk: &Path, out_dir: &Path) -> Result<(), ApkToolError> {
        self.run(decompile_args(apk, out_dir)).await
    }

    /// Build the decompiled tree in `dir` back into `out_apk`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApkTool::decompile`].
    pub async fn build(&self, dir: &Path, out_apk: &Path) -> Result<(), ApkToolError> {
        self.run(build_args(dir, out_apk)).await
    }

    async fn run(&self, args: Vec<OsString>) -> Result<(), ApkToolError> {
        let mut command = match &self.invocation {
            Invocation::Binary(path) => Command::new(path),
            Invocation::Jar { java, jar } => {
                let mut command = Command::new(java);
                command.arg("-jar").arg(jar);
                command
            }
        };
        command.args(args).kill_on_drop(true);

        let output = tokio::time::timeout(Duration::from_secs(self.timeout_secs), command.output())
            .await
            .map_err(|_| ApkToolError::TimedOut(self.timeout_secs))??;

        if output.status.success() {
            Ok(())
        } else {
            Err(ApkToolError::Failed(
                String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            ))
        }
    }
}

/// `apktool d <apk> -o <out> -f`
pub(crate) fn decompile_args(apk: &Path, out_dir: &Path) -> Vec<OsString> {
    vec![
        "d".into(),
        apk.into(),
        "-o".into(),
        out_dir.into(),
        "-f".into(),
    ]
}

/// `apktool b <dir> -o <apk>`
pub(crate) fn build_args(dir: &Path, out_apk: &Path) -> Vec<OsString> {
    vec!["b".into(), dir.into(), "-o".into(), out_apk.into()]
}

/// Search the `PATH` environment for an executable by name.
pub(crate) fn find_in_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
#[path = "apktool_test.rs"]
mod tests;
