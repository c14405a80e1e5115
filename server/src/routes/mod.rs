//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON/form API consumed by the editor front end and
//! serves the front-end shell as static files. Action endpoints live at
//! top-level paths (`/compile/{id}`, `/sign_apk/{id}`, `/test_ai`) because
//! the editor's wire contract names them that way; the rest of the API
//! lives under `/api`.

pub mod actions;
pub mod projects;
pub mod resources;

use std::path::Path;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Extra room on top of the APK ceiling for multipart framing and the
/// other form fields.
const BODY_LIMIT_SLACK_BYTES: usize = 1024 * 1024;

pub fn app(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = usize::try_from(state.limits.max_bytes).unwrap_or(usize::MAX).saturating_add(BODY_LIMIT_SLACK_BYTES);

    let static_files = ServeDir::new(static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/api/projects", get(projects::list).post(projects::create))
        .route(
            "/api/project/{id}",
            get(projects::detail).delete(projects::delete),
        )
        .route("/api/project/{id}/download", get(projects::download))
        .route(
            "/api/project/{id}/resource",
            get(resources::fetch).post(resources::save),
        )
        .route("/api/project/{id}/image", post(resources::upload_image))
        .route("/api/config", post(actions::configure_ai))
        .route("/compile/{id}", post(actions::compile_default))
        .route("/compile/{id}/{sign_option}", post(actions::compile_with_option))
        .route("/sign_apk/{id}", post(actions::sign))
        .route("/test_ai", post(actions::test_ai))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .fallback_service(static_files)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
