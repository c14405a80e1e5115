//! Editor application state.
//!
//! DESIGN
//! ======
//! One explicit aggregate, passed into the dispatch function and mutated
//! there, instead of module-level singletons. A host shell owns exactly one
//! `EditorState`; everything it renders (file metadata, banners, button
//! enablement) is a projection of these fields.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::HashMap;

use crate::select::UploadLimits;

/// Kind of an editable resource inside a decompiled project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    String,
    Layout,
    Image,
}

/// A locally chosen APK file that passed validation. Client-side only; the
/// server learns about it when the upload form is submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as reported by the file input.
    pub file_name: String,
    /// Default project name derived from the file name.
    pub project_name: String,
    pub size_bytes: u64,
}

/// The resource currently open in the edit pane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenResource {
    /// Opaque project id issued by the server.
    pub project_id: String,
    pub kind: ResourceKind,
    /// Project-relative resource path, e.g. `res/values/strings.xml`.
    pub path: String,
}

/// Asynchronous server actions a control can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Compile,
    Sign,
    TestAi,
}

/// Lifecycle of one in-flight action, used to drive button/spinner UI.
///
/// `Running` carries the sequence number of the request it belongs to, so a
/// response that arrives after a timeout (or after the UI moved on) can be
/// recognized as stale and ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PendingOp {
    #[default]
    Idle,
    Running {
        seq: u64,
    },
    Succeeded {
        message: String,
    },
    Failed {
        message: String,
    },
}

impl PendingOp {
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

/// Severity of a notification banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A user-visible notification banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// The whole controller state.
#[derive(Clone, Debug)]
pub struct EditorState {
    /// Locally selected APK awaiting upload, if any.
    pub selected: Option<SelectedFile>,
    /// Project currently open in the editor.
    pub project_id: Option<String>,
    /// Resource currently open in the edit pane.
    pub resource: Option<OpenResource>,
    /// Current notification banner.
    pub notice: Option<Notice>,
    /// Upload validation limits, fixed at construction.
    pub limits: UploadLimits,
    pending: HashMap<ActionKind, PendingOp>,
    next_seq: u64,
}

impl EditorState {
    #[must_use]
    pub fn new(limits: UploadLimits) -> Self {
        Self {
            selected: None,
            project_id: None,
            resource: None,
            notice: None,
            limits,
            pending: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Pending operation for one action. Absent entries read as `Idle`.
    #[must_use]
    pub fn pending(&self, kind: ActionKind) -> PendingOp {
        self.pending.get(&kind).cloned().unwrap_or_default()
    }

    pub fn set_pending(&mut self, kind: ActionKind, op: PendingOp) {
        self.pending.insert(kind, op);
    }

    /// Hand out the next request sequence number. Monotonic per state.
    pub fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(UploadLimits::default())
    }
}
