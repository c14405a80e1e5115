//! Server wire contract: endpoint paths and action-response parsing.
//!
//! ERROR HANDLING
//! ==============
//! Transport problems (non-2xx status, non-JSON body) collapse into a
//! generic failure outcome with a status-bearing message; an application
//! failure (`success: false`) carries the server's message verbatim. Either
//! way the caller gets a typed outcome, never a panic.

#[cfg(test)]
#[path = "net_test.rs"]
mod net_test;

use crate::state::ActionKind;

/// Sign behavior for the compile action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignOption {
    #[default]
    Signed,
    Unsigned,
}

impl SignOption {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signed => "signed",
            Self::Unsigned => "unsigned",
        }
    }
}

/// Endpoint for one action, per the server contract.
#[must_use]
pub fn action_endpoint(kind: ActionKind, project_id: &str) -> String {
    match kind {
        ActionKind::Compile => format!("/compile/{project_id}"),
        ActionKind::Sign => format!("/sign_apk/{project_id}"),
        ActionKind::TestAi => "/test_ai".to_owned(),
    }
}

/// Compile endpoint with an explicit sign option.
#[must_use]
pub fn compile_endpoint(project_id: &str, option: SignOption) -> String {
    format!("/compile/{project_id}/{}", option.as_str())
}

/// JSON body of the `sign_apk` / `test_ai` responses.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Terminal outcome of one submitted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Success { message: String },
    Failure { message: String },
}

impl ActionOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message } | Self::Failure { message } => message,
        }
    }
}

/// Interpret an HTTP response to an action request.
///
/// A 2xx status with a parsable `{success, message}` body maps to the
/// server-reported outcome; everything else is a transport failure.
#[must_use]
pub fn outcome_from_response(status: u16, body: &str) -> ActionOutcome {
    if !(200..300).contains(&status) {
        return ActionOutcome::Failure { message: format!("request failed: {status}") };
    }

    match serde_json::from_str::<ActionResponse>(body) {
        Ok(ActionResponse { success: true, message }) => ActionOutcome::Success { message },
        Ok(ActionResponse { success: false, message }) => ActionOutcome::Failure { message },
        Err(_) => ActionOutcome::Failure { message: "unexpected server response".to_owned() },
    }
}
