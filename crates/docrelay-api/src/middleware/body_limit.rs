//! JSON rendering for requests rejected by the body size limit.
//!
//! `RequestBodyLimitLayer` answers an oversized `Content-Length` with a bare
//! text 413 before any handler runs. This middleware sits outside it and turns
//! that answer into the shape the route would have produced: an action result
//! for the analyze form actions, `{ "error": ... }` everywhere else.

use axum::{
    extract::Request,
    http::{header::CONTENT_TYPE, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use docrelay_core::constants::REQUEST_TOO_LARGE_MESSAGE;
use docrelay_core::AppError;

use crate::error::HttpAppError;
use crate::handlers::analyze_page::oversized_action_response;

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

pub async fn body_limit_middleware(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    // Handlers render their own 413s as JSON already.
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE || is_json(&response) {
        return response;
    }

    tracing::debug!(path = %path, "Request body exceeded the configured limit");
    oversized_action_response(&path).unwrap_or_else(|| {
        HttpAppError(AppError::PayloadTooLarge(
            REQUEST_TOO_LARGE_MESSAGE.to_string(),
        ))
        .into_response()
    })
}
