//! Action routes: compile, sign, and the AI capability probe.
//!
//! ERROR HANDLING
//! ==============
//! `sign_apk` and `test_ai` always answer 200 with `{success, message}`;
//! the editor surfaces the message verbatim, so tool failures belong in the
//! body rather than in the status line. Compile keeps navigation semantics:
//! success redirects to the download, failure answers with a plain status.

use std::sync::Arc;

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use uuid::Uuid;

use editor::net::{ActionResponse, SignOption};

use crate::routes::projects::project_error_response;
use crate::services::ai::{AiClient, AiConfig};
use crate::services::project::ProjectStatus;
use crate::state::AppState;

/// `POST /compile/:id` — compile and sign (the default).
pub async fn compile_default(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    run_compile(&state, id, SignOption::default()).await
}

/// `POST /compile/:id/:sign_option` — compile with explicit sign behavior.
pub async fn compile_with_option(
    State(state): State<AppState>,
    Path((id, raw_option)): Path<(Uuid, String)>,
) -> Response {
    let Some(option) = parse_sign_option(&raw_option) else {
        return (
            StatusCode::BAD_REQUEST,
            format!("unknown sign option \"{raw_option}\" (expected signed or unsigned)"),
        )
            .into_response();
    };
    run_compile(&state, id, option).await
}

async fn run_compile(state: &AppState, id: Uuid, option: SignOption) -> Response {
    if let Err(e) = state.store.read_meta(id) {
        return project_error_response(e).into_response();
    }

    let Some(apktool) = state.apktool.clone() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "apktool is not available on this server".to_owned())
            .into_response();
    };

    let compiled = state.store.compiled_apk_path(id);
    if let Err(e) = apktool.build(&state.store.decompiled_dir(id), &compiled).await {
        return (StatusCode::BAD_GATEWAY, format!("compile failed: {e}")).into_response();
    }

    let mut status = ProjectStatus::Compiled;
    if option == SignOption::Signed {
        // A failed or unconfigured signer still leaves a usable unsigned
        // build; the warning is the only trace.
        match &state.signer {
            Some(signer) => match signer.sign(&compiled, &state.store.signed_apk_path(id)).await {
                Ok(()) => status = ProjectStatus::Signed,
                Err(e) => tracing::warn!(%id, error = %e, "compiled, but signing failed; keeping unsigned build"),
            },
            None => tracing::warn!(%id, "no signer configured; keeping unsigned build"),
        }
    }

    if let Err(e) = state.store.set_status(id, status) {
        tracing::warn!(%id, error = %e, "could not update project status");
    }

    tracing::info!(%id, status = status.as_str(), "compile finished");
    Redirect::to(&format!("/api/project/{id}/download")).into_response()
}

/// `POST /sign_apk/:id` — sign the compiled build; `{success, message}`.
pub async fn sign(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<ActionResponse> {
    Json(match run_sign(&state, id).await {
        Ok(message) => ActionResponse { success: true, message },
        Err(message) => ActionResponse { success: false, message },
    })
}

async fn run_sign(state: &AppState, id: Uuid) -> Result<String, String> {
    state.store.read_meta(id).map_err(|e| e.to_string())?;

    let Some(signer) = state.signer.as_ref() else {
        return Err("signing is not configured; apksigner and a keystore are required".to_owned());
    };

    let compiled = state.store.compiled_apk_path(id);
    if !compiled.exists() {
        return Err("no compiled APK to sign; compile the project first".to_owned());
    }

    signer
        .sign(&compiled, &state.store.signed_apk_path(id))
        .await
        .map_err(|e| e.to_string())?;
    state.store.set_status(id, ProjectStatus::Signed).map_err(|e| e.to_string())?;

    tracing::info!(%id, "project signed");
    Ok("APK signed successfully".to_owned())
}

/// `POST /test_ai` — probe the configured AI backend; `{success, message}`.
pub async fn test_ai(State(state): State<AppState>) -> Json<ActionResponse> {
    let ai = state.ai.read().await.clone();
    let result = match ai {
        None => Err("AI backend not configured; set AI_API_KEY or submit the configuration form".to_owned()),
        Some(ai) => ai.probe().await.map_err(|e| e.to_string()),
    };

    Json(match result {
        Ok(message) => ActionResponse { success: true, message },
        Err(message) => ActionResponse { success: false, message },
    })
}

/// Form body for AI configuration.
#[derive(serde::Deserialize)]
pub struct AiConfigBody {
    pub api_key: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// `POST /api/config` — set or replace the AI configuration at runtime.
pub async fn configure_ai(
    State(state): State<AppState>,
    Form(body): Form<AiConfigBody>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    if body.api_key.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "api_key must not be empty".to_owned()));
    }

    let client = AiClient::new(AiConfig::for_key(body.api_key, body.model))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let model = client.model().to_owned();
    *state.ai.write().await = Some(Arc::new(client));

    tracing::info!(%model, "AI configuration updated");
    Ok(Json(serde_json::json!({ "ok": true, "model": model })))
}

pub(crate) fn parse_sign_option(raw: &str) -> Option<SignOption> {
    match raw {
        "signed" => Some(SignOption::Signed),
        "unsigned" => Some(SignOption::Unsigned),
        _ => None,
    }
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
