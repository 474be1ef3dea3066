//! Integration tests for API routes.
//!
//! Uses `tower::ServiceExt` to test Axum routes without a real HTTP server,
//! against a throwaway data directory.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use docx_rs::{Docx, Paragraph, Run};
use tower::ServiceExt;

use chainletter_api::routes::create_router;
use chainletter_api::state::AppState;
use chainletter_common::config::AppConfig;
use chainletter_store::Store;

// ============================================================
// Helpers
// ============================================================

fn build_test_state(dir: &tempfile::TempDir) -> AppState {
    let config = AppConfig {
        data_dir: dir.path().join("data"),
        template_dir: dir.path().join("templates"),
        port: 0,
        agency_header: "FINANCIAL CRIMES ENFORCEMENT COMMAND".to_string(),
        agency_unit: "CRYPTOCURRENCY UNIT".to_string(),
        letter_city: "Rome".to_string(),
        exchange_seed_file: None,
    };
    let store = Arc::new(Store::open(&config.data_dir).unwrap());
    AppState::new(store, config)
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// A minimal one-paragraph `.docx` usable as an uploaded template.
fn sample_template() -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    Docx::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Dear {recipient}, {body}")))
        .build()
        .pack(&mut cursor)
        .unwrap();
    cursor.into_inner()
}

// ============================================================
// Routes
// ============================================================

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(build_test_state(&dir));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "chainletter-api");
}

#[tokio::test]
async fn test_exchange_crud_via_api() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_test_state(&dir);

    // 1. Create exchange
    let app = create_router(state.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/exchanges",
            &serde_json::json!({
                "name": "Binance",
                "emails": ["compliance@binance.example"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["selected"], true);

    // 2. List
    let app = create_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/exchanges")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // 3. Deselect
    let app = create_router(state.clone());
    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/exchanges/{}", id),
            &serde_json::json!({"selected": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["selected"], false);

    // 4. Delete
    let app = create_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/exchanges/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 5. Delete again → 404
    let app = create_router(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/exchanges/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_extract_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(build_test_state(&dir));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/addresses/extract",
            &serde_json::json!({
                "text": "addr1: bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh, random text, \
                         bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh again",
                "blockchain": "bitcoin"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(
        json["entries"][0]["address"],
        "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh"
    );
    assert_eq!(json["entries"][0]["blockchain"], "bitcoin");
}

#[tokio::test]
async fn test_extract_respects_existing_addresses() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(build_test_state(&dir));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/addresses/extract",
            &serde_json::json!({
                "text": "0x1234567890abcdef1234567890abcdef12345678",
                "blockchain": "ethereum",
                "existing": ["0x1234567890abcdef1234567890abcdef12345678"]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn test_generate_docx_letter() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_test_state(&dir);

    let app = create_router(state.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/exchanges",
            &serde_json::json!({"name": "Kraken", "emails": ["compliance@kraken.example"]}),
        ))
        .await
        .unwrap();
    let exchange = body_json(response).await;
    let exchange_id = exchange["id"].as_str().unwrap().to_string();

    let app = create_router(state);
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/documents",
            &serde_json::json!({
                "addresses": [
                    {"address": "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh", "blockchain": "bitcoin"},
                    {"address": "0x1234567890abcdef1234567890abcdef12345678", "blockchain": "ethereum"}
                ],
                "exchange_ids": [exchange_id],
                "body": "Please monitor the listed addresses.",
                "format": "docx"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    let bytes = body_bytes(response).await;
    // .docx is a zip container
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn test_generate_pdf_letter() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_test_state(&dir);

    let app = create_router(state.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/exchanges",
            &serde_json::json!({"name": "Kraken", "emails": []}),
        ))
        .await
        .unwrap();
    let exchange_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let app = create_router(state);
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/documents",
            &serde_json::json!({
                "addresses": [
                    {"address": "rPEPPER7kfTD9w2To4CQk6UCfuHM9c6GDY", "blockchain": "ripple"}
                ],
                "exchange_ids": [exchange_id],
                "body": "Please monitor the listed addresses.",
                "format": "pdf"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    let bytes = body_bytes(response).await;
    assert_eq!(&bytes[..5], b"%PDF-");
}

#[tokio::test]
async fn test_letter_without_recipients_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(build_test_state(&dir));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/documents",
            &serde_json::json!({
                "addresses": [
                    {"address": "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh", "blockchain": "bitcoin"}
                ],
                "exchange_ids": [],
                "format": "docx"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("recipient"));
}

#[tokio::test]
async fn test_template_upload_tags_and_fill() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_test_state(&dir);

    // 1. Upload
    let app = create_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/templates/letter.docx")
                .body(Body::from(sample_template()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let uploaded = body_json(response).await;
    assert_eq!(uploaded["tags"], serde_json::json!(["recipient", "body"]));

    // 2. Tags listing
    let app = create_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/templates/letter.docx/tags")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["tags"], serde_json::json!(["recipient", "body"]));

    // 3. Fill
    let app = create_router(state);
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/documents/from-template/letter.docx",
            &serde_json::json!({
                "recipient": "Binance",
                "body": "Please monitor the listed addresses."
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body_bytes(response).await;
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn test_garbage_template_upload_is_a_client_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(build_test_state(&dir));

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/templates/letter.docx")
                .body(Body::from("not a zip"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_corrupt_stored_template_is_a_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_test_state(&dir);

    // A template corrupted on disk after upload bypasses upload validation.
    std::fs::create_dir_all(&state.config.template_dir).unwrap();
    std::fs::write(state.config.template_dir.join("letter.docx"), "not a zip").unwrap();

    let app = create_router(state);
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/documents/from-template/letter.docx",
            &serde_json::json!({"recipient": "Binance"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_template_name_traversal_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(build_test_state(&dir));

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/templates/..%2Fescape.docx")
                .body(Body::from(sample_template()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settings_roundtrip_and_validation() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_test_state(&dir);

    let contact_id = uuid::Uuid::new_v4();
    let app = create_router(state.clone());
    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/settings",
            &serde_json::json!({
                "points_of_contact": [{
                    "id": contact_id,
                    "name": "Maria Rossi",
                    "title": "Inspector",
                    "phone": "+39 06 0000 0000",
                    "email": "rossi@unit.example",
                    "office": "Via Nazionale 1"
                }],
                "default_contact": contact_id,
                "default_letter_body": "Please monitor the listed addresses."
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = create_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let settings = body_json(response).await;
    assert_eq!(settings["default_contact"], serde_json::json!(contact_id));
    assert_eq!(
        settings["default_letter_body"],
        "Please monitor the listed addresses."
    );

    // Dangling default reference → 400
    let app = create_router(state);
    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/settings",
            &serde_json::json!({"default_activity": uuid::Uuid::new_v4()}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_history() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_test_state(&dir);

    let app = create_router(state.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/reports",
            &serde_json::json!({
                "addresses": [
                    {"address": "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh", "blockchain": "bitcoin"}
                ],
                "exchanges": []
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["status"], "pending");
    let report_id = report["id"].as_str().unwrap().to_string();

    let app = create_router(state.clone());
    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/reports/{}", report_id),
            &serde_json::json!({"status": "sent"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], "sent");

    let app = create_router(state);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/reports")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}
