//! Bulk address extraction route.

use std::collections::HashSet;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use chainletter_common::types::{AddressEntry, ChainId};
use chainletter_extract::extract_addresses;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/addresses/extract", post(extract))
}

#[derive(Debug, Deserialize)]
pub struct ExtractParams {
    /// Free-form pasted text to scan.
    pub text: String,
    /// Chain whose shape pattern is applied.
    pub blockchain: ChainId,
    /// Address strings already in the caller's collection.
    #[serde(default)]
    pub existing: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub entries: Vec<AddressEntry>,
    pub count: usize,
}

/// POST /api/addresses/extract — Scan pasted text for addresses of one chain.
///
/// Total over its input: non-matching text yields an empty list, not an error.
async fn extract(
    State(_state): State<AppState>,
    Json(params): Json<ExtractParams>,
) -> Json<ExtractResponse> {
    let existing: HashSet<String> = params.existing.into_iter().collect();
    let entries = extract_addresses(&params.text, params.blockchain, &existing);
    let count = entries.len();
    Json(ExtractResponse { entries, count })
}
