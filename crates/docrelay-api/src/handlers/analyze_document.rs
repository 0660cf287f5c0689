use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::form::read_multipart;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Extension, Json,
};
use docrelay_core::constants::{FILE_FIELD, UPSTREAM_ANALYZE_PATH};
use docrelay_core::AppError;
use docrelay_infra::RequestId;
use docrelay_services::FormPart;
use std::sync::Arc;

const ANALYZE_FAILED: &str = "Failed to analyze document";
const INTERNAL_ERROR: &str = "Internal Server Error";

/// Forward a document upload to the analysis service and relay its JSON answer.
#[utoipa::path(
    post,
    path = "/analyze-document",
    tag = "relay",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis service answer, passed through", body = inline(Object)),
        (status = 400, description = "No file field in the form", body = ErrorResponse),
        (status = 413, description = "Request body over the configured limit", body = ErrorResponse),
        (status = 500, description = "Relay failure", body = ErrorResponse)
    )
)]
pub async fn analyze_document(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    let request_id = request_id.map(|Extension(RequestId(id))| id);
    tracing::info!("Received document analysis request");

    // Anything that is not a readable multipart body is an internal fault here.
    // Client errors are a missing file and a body over the size limit.
    let multipart = multipart.map_err(|e| {
        AppError::internal_with_source(INTERNAL_ERROR, anyhow::anyhow!(e.body_text()))
    })?;
    let payload = read_multipart(multipart).await.map_err(|e| match e {
        too_large @ AppError::PayloadTooLarge(_) => too_large,
        other => AppError::internal_with_source(INTERNAL_ERROR, other),
    })?;

    let file_name = match payload.get(FILE_FIELD) {
        Some(FormPart::File { file_name, .. }) => file_name.clone().unwrap_or_default(),
        Some(FormPart::Text { .. }) => String::new(),
        None => {
            tracing::warn!("No file provided in analysis request");
            return Err(AppError::MissingField("File is required".to_string()).into());
        }
    };
    tracing::info!(file_name = %file_name, "File received");

    tracing::info!(
        upstream = %state.upstream.base_url(),
        path = UPSTREAM_ANALYZE_PATH,
        "Forwarding document to analysis service"
    );
    let response = state
        .upstream
        .post_multipart(UPSTREAM_ANALYZE_PATH, &payload, request_id.as_deref())
        .await
        .map_err(|e| AppError::internal_with_source(INTERNAL_ERROR, e))?;

    if !response.is_success() {
        tracing::error!(
            status = response.status,
            body = %String::from_utf8_lossy(&response.body),
            "Analysis service returned an error"
        );
        return Err(AppError::Upstream {
            status: response.status,
            message: ANALYZE_FAILED.to_string(),
        }
        .into());
    }

    let body = response
        .json()
        .map_err(|e| AppError::internal_with_source(INTERNAL_ERROR, e))?;

    tracing::info!(file_name = %file_name, "Document analyzed successfully");
    Ok(Json(body))
}
