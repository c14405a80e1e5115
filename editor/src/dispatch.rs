//! Command dispatch: one entry point from UI events to state transitions.
//!
//! DESIGN
//! ======
//! The host shell translates raw DOM events into [`Event`]s and executes the
//! returned [`Effect`]s (render a preview, show a banner, issue a request).
//! `handle` itself performs no I/O, so every transition is testable without
//! a DOM or a network.
//!
//! Re-entrancy: a control whose action is `Running` ignores further
//! requests, so at most one request per control is ever outstanding. Each
//! request gets a sequence number; responses and timeouts carrying a stale
//! sequence are dropped, which is how a late response after the fallback
//! timeout is ignored rather than applied.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use std::time::Duration;

use crate::net::{self, ActionOutcome};
use crate::preview::{self, Preview};
use crate::select::{self, format_size};
use crate::state::{ActionKind, EditorState, Notice, OpenResource, PendingOp, ResourceKind};

/// Fallback timeout after which a control is force re-enabled even if no
/// response arrived. Soft cancellation only: the request may still complete
/// and its late response is then discarded by the sequence guard.
#[must_use]
pub fn fallback_timeout(kind: ActionKind) -> Duration {
    match kind {
        ActionKind::Compile | ActionKind::Sign => Duration::from_secs(30),
        ActionKind::TestAi => Duration::from_secs(10),
    }
}

/// A UI event, as translated by the host shell.
#[derive(Clone, Debug)]
pub enum Event {
    /// The user picked a local file in the upload form.
    FileChosen { name: String, size_bytes: u64 },
    /// A resource was opened for editing; `content` is its current text.
    ResourceOpened { project_id: String, kind: ResourceKind, path: String, content: String },
    /// Debounced editor input for the currently open resource.
    EditorInput { content: String },
    /// The user clicked an action control.
    ActionRequested { kind: ActionKind },
    /// The host received the HTTP response for a submitted action.
    ActionResponse { kind: ActionKind, seq: u64, outcome: ActionOutcome },
    /// The fallback timer for a submitted action fired.
    ActionTimedOut { kind: ActionKind, seq: u64 },
    /// The host rendered the terminal state of an action.
    ActionSettled { kind: ActionKind },
    /// The user dismissed the notification banner.
    NoticeDismissed,
}

/// Work for the host shell to perform after a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Replace the preview pane content.
    RenderPreview(Preview),
    /// Show (or replace) the notification banner.
    ShowNotice(Notice),
    /// Update the upload form's file metadata display.
    ShowFileInfo { file_name: String, size_display: String, project_name: String },
    /// Issue the HTTP request for an action and arm its fallback timer.
    SubmitRequest { kind: ActionKind, endpoint: String, seq: u64, timeout: Duration },
    /// Re-fetch the open project's state from the server.
    ReloadProject { project_id: String },
}

/// Apply one event to the state, returning the effects to execute.
pub fn handle(state: &mut EditorState, event: Event) -> Vec<Effect> {
    match event {
        Event::FileChosen { name, size_bytes } => file_chosen(state, &name, size_bytes),
        Event::ResourceOpened { project_id, kind, path, content } => {
            state.project_id = Some(project_id.clone());
            state.resource = Some(OpenResource { project_id, kind, path });
            vec![Effect::RenderPreview(preview::render(kind, &content))]
        }
        Event::EditorInput { content } => match &state.resource {
            Some(open) => vec![Effect::RenderPreview(preview::render(open.kind, &content))],
            None => Vec::new(),
        },
        Event::ActionRequested { kind } => action_requested(state, kind),
        Event::ActionResponse { kind, seq, outcome } => action_response(state, kind, seq, &outcome),
        Event::ActionTimedOut { kind, seq } => action_timed_out(state, kind, seq),
        Event::ActionSettled { kind } => {
            if !state.pending(kind).is_running() {
                state.set_pending(kind, PendingOp::Idle);
            }
            Vec::new()
        }
        Event::NoticeDismissed => {
            state.notice = None;
            Vec::new()
        }
    }
}

fn file_chosen(state: &mut EditorState, name: &str, size_bytes: u64) -> Vec<Effect> {
    match select::select_file(name, size_bytes, &state.limits) {
        Ok(file) => {
            let effect = Effect::ShowFileInfo {
                file_name: file.file_name.clone(),
                size_display: format_size(file.size_bytes),
                project_name: file.project_name.clone(),
            };
            state.selected = Some(file);
            vec![effect]
        }
        Err(err) => notify(state, Notice::error(err.to_string())),
    }
}

fn action_requested(state: &mut EditorState, kind: ActionKind) -> Vec<Effect> {
    if state.pending(kind).is_running() {
        return Vec::new();
    }

    // Project-bound actions need an open project; the AI probe does not.
    let project_id = match kind {
        ActionKind::TestAi => String::new(),
        ActionKind::Compile | ActionKind::Sign => match &state.project_id {
            Some(id) => id.clone(),
            None => return notify(state, Notice::error("open a project first")),
        },
    };

    let seq = state.next_seq();
    state.set_pending(kind, PendingOp::Running { seq });
    vec![Effect::SubmitRequest {
        kind,
        endpoint: net::action_endpoint(kind, &project_id),
        seq,
        timeout: fallback_timeout(kind),
    }]
}

fn action_response(state: &mut EditorState, kind: ActionKind, seq: u64, outcome: &ActionOutcome) -> Vec<Effect> {
    if !running_with_seq(state, kind, seq) {
        return Vec::new();
    }

    let message = outcome.message().to_owned();
    let mut effects = Vec::new();

    if outcome.is_success() {
        state.set_pending(kind, PendingOp::Succeeded { message: message.clone() });
        effects.extend(notify(state, Notice::success(message)));
        // Signing changes server-side project state; re-fetch it.
        if kind == ActionKind::Sign {
            if let Some(project_id) = &state.project_id {
                effects.push(Effect::ReloadProject { project_id: project_id.clone() });
            }
        }
    } else {
        state.set_pending(kind, PendingOp::Failed { message: message.clone() });
        effects.extend(notify(state, Notice::error(message)));
    }

    effects
}

fn action_timed_out(state: &mut EditorState, kind: ActionKind, seq: u64) -> Vec<Effect> {
    if !running_with_seq(state, kind, seq) {
        return Vec::new();
    }

    let message = "request timed out".to_owned();
    state.set_pending(kind, PendingOp::Failed { message: message.clone() });
    notify(state, Notice::error(message))
}

fn running_with_seq(state: &EditorState, kind: ActionKind, seq: u64) -> bool {
    state.pending(kind) == PendingOp::Running { seq }
}

fn notify(state: &mut EditorState, notice: Notice) -> Vec<Effect> {
    state.notice = Some(notice.clone());
    vec![Effect::ShowNotice(notice)]
}
