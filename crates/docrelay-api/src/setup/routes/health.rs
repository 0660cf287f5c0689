//! Health check handlers and response types.

use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct HealthCheckResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub analysis_provider: String,
    pub export_provider: String,
    pub timestamp: DateTime<Utc>,
}

/// Liveness check - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Health check. The upstream services are not contacted; they are only reached per request.
pub async fn health_check(state: Arc<AppState>) -> impl IntoResponse {
    let response = HealthCheckResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        analysis_provider: state.analysis.name().to_string(),
        export_provider: state.export.name().to_string(),
        timestamp: Utc::now(),
    };

    (StatusCode::OK, Json(response))
}
