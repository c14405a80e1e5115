//! Project lifecycle routes: upload, list, detail, delete, download.

use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use uuid::Uuid;

use editor::select;

use crate::services::project::{ProjectError, ProjectMeta, ProjectSummary};
use crate::services::resources::{self, ResourceIndex};
use crate::state::AppState;

const APK_MIME: &str = "application/vnd.android.package-archive";

/// Project metadata plus its editable resources.
#[derive(Debug, serde::Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub summary: ProjectSummary,
    pub resources: ResourceIndex,
}

/// `POST /api/projects` — multipart APK upload; decompiles and creates the
/// project.
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ProjectSummary>), (StatusCode, String)> {
    let mut name: Option<String> = None;
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| bad_request(&e))? {
        match field.name() {
            Some("name") => name = Some(field.text().await.map_err(|e| bad_request(&e))?),
            Some("apk") => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(|e| bad_request(&e))?;
                upload = Some((file_name, bytes));
            }
            _ => {}
        }
    }

    let Some((file_name, bytes)) = upload else {
        return Err((StatusCode::BAD_REQUEST, "missing apk upload field".to_owned()));
    };

    // Same rules the client enforces before submitting.
    let selected = select::select_file(&file_name, bytes.len() as u64, &state.limits)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let Some(apktool) = state.apktool.clone() else {
        return Err((StatusCode::SERVICE_UNAVAILABLE, "apktool is not available on this server".to_owned()));
    };

    let id = Uuid::new_v4();
    let original = state.store.original_apk_path(id);
    std::fs::create_dir_all(state.store.project_dir(id)).map_err(|e| internal(&e))?;
    std::fs::write(&original, &bytes).map_err(|e| internal(&e))?;

    if let Err(e) = apktool.decompile(&original, &state.store.decompiled_dir(id)).await {
        state.store.discard(id);
        return Err((StatusCode::BAD_GATEWAY, format!("decompile failed: {e}")));
    }

    let project_name = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| selected.project_name.clone());
    let meta = ProjectMeta::new(id, project_name, selected.file_name);
    state.store.save_meta(&meta).map_err(project_error_response)?;

    tracing::info!(%id, name = %meta.name, "project created");
    let summary = state.store.summary(id).map_err(project_error_response)?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// `GET /api/projects` — all projects, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProjectSummary>>, (StatusCode, String)> {
    let projects = state.store.list().map_err(project_error_response)?;
    Ok(Json(projects))
}

/// `GET /api/project/:id` — metadata plus resource index.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectDetail>, (StatusCode, String)> {
    let summary = state.store.summary(id).map_err(project_error_response)?;
    let resources = resources::index(&state.store.decompiled_dir(id));
    Ok(Json(ProjectDetail { summary, resources }))
}

/// `DELETE /api/project/:id` — destroy a project.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    state.store.delete(id).map_err(project_error_response)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `GET /api/project/:id/download` — the best built APK as an attachment.
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, (StatusCode, String)> {
    let meta = state.store.read_meta(id).map_err(project_error_response)?;

    let Some(path) = state.store.built_apk_path(id) else {
        return Err((StatusCode::NOT_FOUND, "no built APK yet; compile the project first".to_owned()));
    };
    let bytes = std::fs::read(&path).map_err(|e| internal(&e))?;

    Ok((
        [
            (CONTENT_TYPE, APK_MIME.to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download_file_name(&meta)),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// `app.apk` signed becomes `app-signed.apk`, etc.
pub(crate) fn download_file_name(meta: &ProjectMeta) -> String {
    let stem = std::path::Path::new(&meta.original_apk)
        .file_stem()
        .map_or("project", |s| s.to_str().unwrap_or("project"));
    format!("{stem}-{}.apk", meta.status.as_str())
}

pub(crate) fn project_error_to_status(err: &ProjectError) -> StatusCode {
    match err {
        ProjectError::NotFound(_) => StatusCode::NOT_FOUND,
        ProjectError::Metadata(_, _) | ProjectError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn project_error_response(err: ProjectError) -> (StatusCode, String) {
    (project_error_to_status(&err), err.to_string())
}

fn bad_request(err: &dyn std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

fn internal(err: &dyn std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
