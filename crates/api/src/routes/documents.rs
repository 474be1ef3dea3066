//! Document generation routes — the letter's final render step.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use chainletter_common::error::AppError;
use chainletter_common::types::AddressEntry;
use chainletter_docgen::{LetterData, Recipient, date_line, docx, pdf, template};
use chainletter_extract::AddressCollection;

use crate::routes::templates::{DOCX_MIME, read_template, sanitized};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/documents", post(generate_letter))
        .route(
            "/api/documents/from-template/{name}",
            post(generate_from_template),
        )
}

/// Output format for the rendered letter.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    Docx,
    Pdf,
}

/// A letter request as submitted by the form page.
///
/// Optional fields fall back to the stored settings defaults.
#[derive(Debug, Deserialize)]
pub struct LetterRequest {
    pub addresses: Vec<AddressEntry>,
    pub exchange_ids: Vec<Uuid>,
    pub format: DocFormat,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub contact_id: Option<Uuid>,
    #[serde(default)]
    pub activity_id: Option<Uuid>,
    #[serde(default)]
    pub signature_id: Option<Uuid>,
}

/// POST /api/documents — Render the letter as a downloadable artifact.
async fn generate_letter(
    State(state): State<AppState>,
    Json(params): Json<LetterRequest>,
) -> Result<Response, AppError> {
    let letter = build_letter(&state, &params)?;

    let (bytes, content_type, filename) = match params.format {
        DocFormat::Docx => (
            docx::render(&letter)?,
            DOCX_MIME,
            "crypto_address_notification.docx",
        ),
        DocFormat::Pdf => (
            pdf::render(&letter)?,
            "application/pdf",
            "crypto_address_notification.pdf",
        ),
    };

    tracing::info!(
        recipients = letter.recipients.len(),
        addresses = params.addresses.len(),
        filename,
        "Letter generated"
    );
    Ok(download(bytes, content_type, filename))
}

/// POST /api/documents/from-template/:name — Fill a stored template.
///
/// The body is a flat map of tag values; non-string JSON values are rendered
/// with their JSON notation.
async fn generate_from_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(values): Json<HashMap<String, serde_json::Value>>,
) -> Result<Response, AppError> {
    let name = sanitized(&name)?;
    let bytes = read_template(&state, name)?;

    let values: HashMap<String, String> = values
        .into_iter()
        .map(|(tag, value)| {
            let rendered = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (tag, rendered)
        })
        .collect();

    let filled = template::substitute(&bytes, &values)?;

    tracing::info!(template = name, "Letter generated from template");
    Ok(download(filled, DOCX_MIME, name))
}

/// Resolve the request plus settings defaults into renderer input.
fn build_letter(state: &AppState, params: &LetterRequest) -> Result<LetterData, AppError> {
    if params.exchange_ids.is_empty() {
        return Err(AppError::Validation(
            "At least one recipient exchange is required".to_string(),
        ));
    }

    // Deduplicate through the collection so repeated literals (under any
    // chain label) appear once in the letter.
    let mut collection = AddressCollection::new();
    for entry in &params.addresses {
        collection.add_single(&entry.address, entry.blockchain);
    }
    if collection.is_empty() {
        return Err(AppError::Validation(
            "At least one address is required".to_string(),
        ));
    }

    let recipients: Vec<Recipient> = params
        .exchange_ids
        .iter()
        .map(|id| state.store.get_exchange(*id))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|e| Recipient {
            name: e.name,
            emails: e.emails,
        })
        .collect();

    let settings = state.store.get_settings();

    let body = params
        .body
        .clone()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| settings.default_letter_body.clone());

    let contact = resolve(
        params.contact_id.or(settings.default_contact),
        &settings.points_of_contact,
        |c| c.id,
        "Point of contact",
    )?;
    let activity = resolve(
        params.activity_id.or(settings.default_activity),
        &settings.activities,
        |a| a.id,
        "Activity",
    )?
    .map(|a| a.label);
    let signature = resolve(
        params.signature_id.or(settings.default_signature),
        &settings.signature_blocks,
        |s| s.id,
        "Signature block",
    )?;

    Ok(LetterData {
        agency_header: state.config.agency_header.clone(),
        agency_unit: state.config.agency_unit.clone(),
        date_line: date_line(&state.config.letter_city),
        recipients,
        body,
        address_groups: collection.group_by_chain(),
        contact,
        activity,
        signature,
    })
}

fn resolve<T: Clone>(
    id: Option<Uuid>,
    items: &[T],
    key: impl Fn(&T) -> Uuid,
    what: &str,
) -> Result<Option<T>, AppError> {
    match id {
        None => Ok(None),
        Some(id) => items
            .iter()
            .find(|item| key(item) == id)
            .cloned()
            .map(Some)
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", what, id))),
    }
}

fn download(bytes: Vec<u8>, content_type: &str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}
