use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use docrelay_core::constants::UPSTREAM_QUERY_PATH;
use docrelay_core::models::{AnalysisQuery, UpstreamQueryRequest};
use docrelay_core::AppError;
use docrelay_infra::RequestId;
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

const FETCH_FAILED: &str = "Failed to fetch data from API";

/// Forward a question to the query service and relay its status and JSON answer.
#[utoipa::path(
    post,
    path = "/query",
    tag = "relay",
    request_body = AnalysisQuery,
    responses(
        (status = 200, description = "Query service answer, passed through with its status", body = inline(Object)),
        (status = 400, description = "Body is not a valid query", body = ErrorResponse),
        (status = 500, description = "Query service unreachable or answered with non-JSON", body = ErrorResponse)
    )
)]
pub async fn query(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    ValidatedJson(body): ValidatedJson<Value>,
) -> Result<Response, HttpAppError> {
    let request_id = request_id.map(|Extension(RequestId(id))| id);

    if !body.is_object() {
        return Err(AppError::InvalidInput(
            "Invalid request body: expected a JSON object".to_string(),
        )
        .into());
    }
    let query: AnalysisQuery = serde_json::from_value(body)
        .map_err(|e| AppError::InvalidInput(format!("Invalid request body: {}", e)))?;
    query.validate()?;

    let outbound = UpstreamQueryRequest::try_from(query)
        .map_err(|e| AppError::internal_with_source(FETCH_FAILED, e))?;

    let response = state
        .upstream
        .post_json(UPSTREAM_QUERY_PATH, &outbound, request_id.as_deref())
        .await
        .map_err(|e| AppError::internal_with_source(FETCH_FAILED, e))?;

    let status = StatusCode::from_u16(response.status)
        .map_err(|e| AppError::internal_with_source(FETCH_FAILED, e))?;
    let body = response
        .json()
        .map_err(|e| AppError::internal_with_source(FETCH_FAILED, e))?;

    tracing::debug!(status = response.status, "Query relayed");
    Ok((status, Json(body)).into_response())
}
