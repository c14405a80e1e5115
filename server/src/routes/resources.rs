//! Resource editing routes: fetch, save, image replacement.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

use editor::state::ResourceKind;

use crate::routes::projects::project_error_response;
use crate::services::resources::{self, ResourceContent, ResourceError};
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ResourceQuery {
    pub kind: ResourceKind,
    pub path: String,
}

/// Form body for text resource saves (`application/x-www-form-urlencoded`).
#[derive(serde::Deserialize)]
pub struct SaveResourceBody {
    pub kind: ResourceKind,
    pub path: String,
    pub content: String,
}

/// `GET /api/project/:id/resource?kind=&path=` — resource content.
pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<ResourceContent>, (StatusCode, String)> {
    state.store.read_meta(id).map_err(project_error_response)?;
    let decompiled = state.store.decompiled_dir(id);

    let content = match query.kind {
        ResourceKind::String | ResourceKind::Layout => ResourceContent {
            kind: query.kind,
            content: Some(resources::read_text(&decompiled, &query.path).map_err(resource_error_response)?),
            size: None,
            path: query.path,
        },
        ResourceKind::Image => ResourceContent {
            kind: query.kind,
            content: None,
            size: Some(resources::image_size(&decompiled, &query.path).map_err(resource_error_response)?),
            path: query.path,
        },
    };

    Ok(Json(content))
}

/// `POST /api/project/:id/resource` — save edited text content.
pub async fn save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::extract::Form(body): axum::extract::Form<SaveResourceBody>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    state.store.read_meta(id).map_err(project_error_response)?;

    if body.kind == ResourceKind::Image {
        return Err((
            StatusCode::BAD_REQUEST,
            "image resources are replaced via the image upload endpoint".to_owned(),
        ));
    }

    resources::write_text(&state.store.decompiled_dir(id), &body.path, &body.content)
        .map_err(resource_error_response)?;
    tracing::info!(%id, path = %body.path, "resource saved");
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/project/:id/image` — multipart image replacement with `path`
/// and `image` fields.
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    state.store.read_meta(id).map_err(project_error_response)?;

    let mut path: Option<String> = None;
    let mut bytes: Option<axum::body::Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        match field.name() {
            Some("path") => {
                path = Some(field.text().await.map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?);
            }
            Some("image") => {
                bytes = Some(field.bytes().await.map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?);
            }
            _ => {}
        }
    }

    let (Some(path), Some(bytes)) = (path, bytes) else {
        return Err((StatusCode::BAD_REQUEST, "image upload needs path and image fields".to_owned()));
    };

    resources::write_bytes(&state.store.decompiled_dir(id), &path, &bytes).map_err(resource_error_response)?;
    tracing::info!(%id, path = %path, size = bytes.len(), "image replaced");
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub(crate) fn resource_error_to_status(err: &ResourceError) -> StatusCode {
    match err {
        ResourceError::NotFound(_) => StatusCode::NOT_FOUND,
        ResourceError::OutsideTree(_) => StatusCode::BAD_REQUEST,
        ResourceError::NotText(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ResourceError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn resource_error_response(err: ResourceError) -> (StatusCode, String) {
    (resource_error_to_status(&err), err.to_string())
}

#[cfg(test)]
#[path = "resources_test.rs"]
mod tests;
