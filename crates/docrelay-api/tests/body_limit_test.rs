//! Request body limit and malformed body tests.
//!
//! Run with: `cargo test -p docrelay-api --test body_limit_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;
use helpers::{setup_test_app, setup_test_app_with_config, TestApp};
use serde_json::{json, Value};

const SMALL_LIMIT: usize = 1024;

async fn small_limit_app() -> TestApp {
    setup_test_app_with_config(|config| config.max_request_body_bytes = SMALL_LIMIT).await
}

fn four_kib_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(vec![b'a'; 4096])
            .file_name("notes.txt")
            .mime_type("text/plain"),
    )
}

#[tokio::test]
async fn test_oversized_upload_action_returns_failure_result() {
    let app = small_limit_app().await;

    let response = app
        .client()
        .post("/analyze/upload-document")
        .multipart(four_kib_form())
        .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "type": "failure",
            "status": 413,
            "data": { "error": "File must be less than 10MB" }
        })
    );
}

#[tokio::test]
async fn test_oversized_export_action_returns_failure_result() {
    let app = small_limit_app().await;

    let padding = "x".repeat(4096);
    let response = app
        .client()
        .post("/analyze/export-document")
        .form(&[("export", "PDF Report"), ("padding", padding.as_str())])
        .await;

    assert_eq!(response.status_code(), 413);
    let body = response.json::<Value>();
    assert_eq!(body["type"], json!("failure"));
    assert_eq!(body["data"]["error"], json!("Request body too large"));
}

#[tokio::test]
async fn test_oversized_relay_request_returns_json_error() {
    let app = small_limit_app().await;

    let response = app
        .client()
        .post("/analyze-document")
        .multipart(four_kib_form())
        .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Request body too large" })
    );

    let response = app
        .client()
        .post("/query")
        .json(&json!({ "question": "q".repeat(4096) }))
        .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Request body too large" })
    );
}

#[tokio::test]
async fn test_body_within_limit_is_unaffected() {
    let app = small_limit_app().await;

    let response = app
        .client()
        .post("/analyze/export-document")
        .form(&[("export", "JSON Data")])
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["data"]["format"], json!("JSON Data"));
}

#[tokio::test]
async fn test_malformed_multipart_gets_stable_message() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/analyze/upload-document")
        .content_type("multipart/form-data; boundary=docrelay-boundary")
        .bytes(Bytes::from_static(b"this is not a multipart body"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "type": "failure",
            "status": 400,
            "data": { "error": "Invalid form submission" }
        })
    );
}
