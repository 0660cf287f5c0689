//! Relay endpoint integration tests.
//!
//! Run with: `cargo test -p docrelay-api --test relay_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{setup_test_app, setup_unreachable_upstream_app};
use mockito::Matcher;
use serde_json::{json, Value};

fn pdf_form() -> MultipartForm {
    MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(b"%PDF-1.4 test".to_vec())
                .file_name("contract.pdf")
                .mime_type("application/pdf"),
        )
        .add_text("question", "What are the main topics?")
}

#[tokio::test]
async fn test_analyze_document_requires_file() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/analyze-document")
        .multipart(MultipartForm::new().add_text("question", "Anything?"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>(), json!({ "error": "File is required" }));
}

#[tokio::test]
async fn test_analyze_document_passes_json_through() {
    let mut app = setup_test_app().await;
    let mock = app
        .upstream
        .mock("POST", "/api/analyze")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"filename="contract.pdf""#.to_string()),
            Matcher::Regex("%PDF-1.4 test".to_string()),
            Matcher::Regex("What are the main topics\\?".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"summary":"x"}"#)
        .create_async()
        .await;

    let response = app.client().post("/analyze-document").multipart(pdf_form()).await;

    mock.assert_async().await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "summary": "x" }));
}

#[tokio::test]
async fn test_analyze_document_relays_upstream_status() {
    let mut app = setup_test_app().await;
    app.upstream
        .mock("POST", "/api/analyze")
        .with_status(503)
        .with_body(r#"{"detail":"overloaded"}"#)
        .create_async()
        .await;

    let response = app.client().post("/analyze-document").multipart(pdf_form()).await;

    assert_eq!(response.status_code(), 503);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Failed to analyze document" })
    );
}

#[tokio::test]
async fn test_analyze_document_forwards_request_id() {
    let mut app = setup_test_app().await;
    let mock = app
        .upstream
        .mock("POST", "/api/analyze")
        .match_header("x-request-id", "trace-abc")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let response = app
        .client()
        .post("/analyze-document")
        .add_header("X-Request-ID", "trace-abc")
        .multipart(pdf_form())
        .await;

    mock.assert_async().await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("x-request-id"), "trace-abc");
}

#[tokio::test]
async fn test_analyze_document_non_json_success_is_internal_error() {
    let mut app = setup_test_app().await;
    app.upstream
        .mock("POST", "/api/analyze")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let response = app.client().post("/analyze-document").multipart(pdf_form()).await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal Server Error" })
    );
}

#[tokio::test]
async fn test_analyze_document_unreachable_upstream() {
    let server = setup_unreachable_upstream_app().await;

    let response = server.post("/analyze-document").multipart(pdf_form()).await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal Server Error" })
    );
}

#[tokio::test]
async fn test_analyze_document_rejects_non_multipart_body() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/analyze-document")
        .json(&json!({ "file": "not a file" }))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal Server Error" })
    );
}

#[tokio::test]
async fn test_query_reencodes_context_and_passes_answer_through() {
    let mut app = setup_test_app().await;
    let mock = app
        .upstream
        .mock("POST", "/api/query")
        .match_body(Matcher::Json(json!({
            "doc_id": "doc-1",
            "question": "What is due?",
            "context": "{\"page\":2}"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"answer":"y"}"#)
        .create_async()
        .await;

    let response = app
        .client()
        .post("/query")
        .json(&json!({
            "question": "What is due?",
            "doc_id": "doc-1",
            "context": { "page": 2 }
        }))
        .await;

    mock.assert_async().await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "answer": "y" }));
}

#[tokio::test]
async fn test_query_relays_error_status_and_body() {
    let mut app = setup_test_app().await;
    app.upstream
        .mock("POST", "/api/query")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"document not found"}"#)
        .create_async()
        .await;

    let response = app
        .client()
        .post("/query")
        .json(&json!({ "question": "What is due?", "doc_id": "missing" }))
        .await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(
        response.json::<Value>(),
        json!({ "detail": "document not found" })
    );
}

#[tokio::test]
async fn test_query_omits_absent_context() {
    let mut app = setup_test_app().await;
    let mock = app
        .upstream
        .mock("POST", "/api/query")
        .match_body(Matcher::Json(json!({ "question": "What is due?" })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let response = app
        .client()
        .post("/query")
        .json(&json!({ "question": "What is due?" }))
        .await;

    mock.assert_async().await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_query_rejects_non_object_body() {
    let app = setup_test_app().await;

    let response = app.client().post("/query").json(&json!(["What is due?"])).await;

    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_query_rejects_short_question() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/query")
        .json(&json!({ "question": "hi", "doc_id": "doc-1" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_query_unreachable_upstream() {
    let server = setup_unreachable_upstream_app().await;

    let response = server
        .post("/query")
        .json(&json!({ "question": "What is due?" }))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Failed to fetch data from API" })
    );
}

#[tokio::test]
async fn test_query_non_json_upstream_body() {
    let mut app = setup_test_app().await;
    app.upstream
        .mock("POST", "/api/query")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let response = app
        .client()
        .post("/query")
        .json(&json!({ "question": "What is due?" }))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Failed to fetch data from API" })
    );
}
