//! HTTP error response body
//!
//! Note: IntoResponse for AppError lives in the binary crate (docrelay-api)
//! due to Rust's orphan rule: external traits (axum::IntoResponse) for external types
//! (docrelay_core::AppError) cannot be implemented here.

use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response format: every failure the API returns is `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
