//! Letter template management routes.
//!
//! Templates are ordinary `.docx` files stored under the configured template
//! directory and filled in via `{tag}` substitution (see the `documents`
//! routes for generation).

use std::fs;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};

use chainletter_common::error::AppError;
use chainletter_docgen::template;

use crate::state::AppState;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/templates/{name}", put(upload_template))
        .route("/api/templates/{name}", get(download_template))
        .route("/api/templates/{name}/tags", get(template_tags))
}

/// Reject template names that could escape the template directory.
pub(crate) fn sanitized(name: &str) -> Result<&str, AppError> {
    if name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
    {
        return Err(AppError::Validation(format!(
            "Invalid template name '{}'",
            name
        )));
    }
    if !name.ends_with(".docx") {
        return Err(AppError::Validation(
            "Template name must end with .docx".to_string(),
        ));
    }
    Ok(name)
}

/// PUT /api/templates/:name — Upload a letter template.
///
/// The body is the raw `.docx` bytes; they must parse as a Word archive.
async fn upload_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let name = sanitized(&name)?;
    if body.is_empty() {
        return Err(AppError::Validation("Template file is empty".to_string()));
    }

    // Parse up front so a broken upload fails here, not at generation time.
    // At this boundary a bad archive is the client's fault.
    let tags = template::tags(&body).map_err(|e| AppError::Validation(e.to_string()))?;

    fs::create_dir_all(&state.config.template_dir)?;
    fs::write(state.config.template_dir.join(name), &body)?;

    tracing::info!(template = name, tags = tags.len(), "Template uploaded");
    Ok(Json(serde_json::json!({ "name": name, "tags": tags })))
}

/// GET /api/templates/:name — Download a stored template.
async fn download_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let name = sanitized(&name)?;
    let bytes = read_template(&state, name)?;

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", name),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// GET /api/templates/:name/tags — List a template's `{tag}` placeholders.
async fn template_tags(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let name = sanitized(&name)?;
    let bytes = read_template(&state, name)?;
    let tags = template::tags(&bytes)?;
    Ok(Json(serde_json::json!({ "name": name, "tags": tags })))
}

pub(crate) fn read_template(state: &AppState, name: &str) -> Result<Vec<u8>, AppError> {
    let path = state.config.template_dir.join(name);
    if !path.exists() {
        return Err(AppError::NotFound(format!("Template {} not found", name)));
    }
    Ok(fs::read(path)?)
}
