//! The analyze page: its load data and its two form actions.
//!
//! Form actions never fail at the HTTP layer. Both success and failure render as an
//! action result object whose `status` is also the response status.

use crate::error::{status_of, HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::utils::form::FormData;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docrelay_core::constants::{
    EXPORT_FIELD, FILE_FIELD, QUESTION_FIELD, REQUEST_TOO_LARGE_MESSAGE,
};
use docrelay_core::validation::SCHEMA_TOO_LARGE_MESSAGE;
use docrelay_core::models::{
    ActionResult, AnalyzePageData, UploadActionData, UploadedFile, ValidationResult,
};
use docrelay_core::{validate_file, validate_upload, AppError, ErrorMetadata};
use docrelay_services::{FormPart, MultipartPayload};
use serde::Serialize;
use std::sync::Arc;

const PROCESSING_FAILED: &str = "Failed to process document. Please try again.";
const EXPORT_FAILED: &str = "Failed to export document";
const FILE_REQUIRED: &str = "File is required";
const EXPORT_FORMAT_REQUIRED: &str = "Export format is required";

pub(crate) const UPLOAD_DOCUMENT_PATH: &str = "/analyze/upload-document";
pub(crate) const EXPORT_DOCUMENT_PATH: &str = "/analyze/export-document";

pub(crate) fn action_response<T: Serialize>(result: ActionResult<T>) -> Response {
    let status = StatusCode::from_u16(result.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result)).into_response()
}

fn error_result<T>(error: &AppError) -> ActionResult<T> {
    crate::error::log_error(error);
    ActionResult::failure(status_of(error).as_u16(), error.client_message())
}

/// Unpack the form or turn its rejection into a failure result.
/// `too_large` replaces the message of a body over the size limit.
fn submitted_form<T>(
    form: Result<FormData, HttpAppError>,
    too_large: &str,
) -> Result<MultipartPayload, ActionResult<T>> {
    form.map(|FormData(payload)| payload)
        .map_err(|HttpAppError(err)| match err {
            AppError::PayloadTooLarge(_) => {
                error_result(&AppError::PayloadTooLarge(too_large.to_string()))
            }
            err => error_result(&err),
        })
}

/// Failure result for a form action whose body hit the size limit before reaching the handler.
pub(crate) fn oversized_action_response(path: &str) -> Option<Response> {
    let message = match path {
        UPLOAD_DOCUMENT_PATH => SCHEMA_TOO_LARGE_MESSAGE,
        EXPORT_DOCUMENT_PATH => REQUEST_TOO_LARGE_MESSAGE,
        _ => return None,
    };
    let failure: ActionResult<()> =
        ActionResult::failure(StatusCode::PAYLOAD_TOO_LARGE.as_u16(), message);
    Some(action_response(failure))
}

/// Upload constraints, suggested questions and export formats for the analyze page.
#[utoipa::path(
    get,
    path = "/analyze",
    tag = "analyze",
    responses(
        (status = 200, description = "Analyze page data", body = AnalyzePageData)
    )
)]
pub async fn load_analyze_page() -> Json<AnalyzePageData> {
    Json(AnalyzePageData::default())
}

/// Pre-upload check of a file descriptor, run before the form is submitted.
#[utoipa::path(
    post,
    path = "/analyze/validate-file",
    tag = "analyze",
    request_body = UploadedFile,
    responses(
        (status = 200, description = "Validation outcome", body = ValidationResult),
        (status = 400, description = "Body is not a file descriptor", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_file(ValidatedJson(file): ValidatedJson<UploadedFile>) -> Json<ValidationResult> {
    Json(validate_file(&file))
}

/// Form action `uploadDocument`: validate the file and run it through the analysis provider.
#[utoipa::path(
    post,
    path = "/analyze/upload-document",
    tag = "analyze",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Success result carrying `processedData`", body = inline(Object)),
        (status = 400, description = "Failure result: missing, oversized or unsupported file", body = inline(Object)),
        (status = 413, description = "Failure result: request body over the configured limit", body = inline(Object)),
        (status = 500, description = "Failure result: analysis failed", body = inline(Object))
    )
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    form: Result<FormData, HttpAppError>,
) -> Response {
    let payload = match submitted_form(form, SCHEMA_TOO_LARGE_MESSAGE) {
        Ok(payload) => payload,
        Err(failure) => return action_response::<UploadActionData>(failure),
    };

    let (document, data) = match payload.get(FILE_FIELD) {
        Some(FormPart::File {
            file_name,
            content_type,
            data,
            ..
        }) => (
            UploadedFile::new(
                file_name.clone().unwrap_or_default(),
                content_type
                    .clone()
                    .unwrap_or_else(|| "application/octet-stream".to_string()),
                data.len() as u64,
            ),
            data.clone(),
        ),
        _ => {
            let err = AppError::MissingField(FILE_REQUIRED.to_string());
            return action_response(error_result::<UploadActionData>(&err));
        }
    };

    if let Err(err) = validate_upload(&document) {
        return action_response(error_result::<UploadActionData>(&err));
    }

    let question = payload.text(QUESTION_FIELD);
    tracing::info!(
        file_name = %document.name,
        mime_type = %document.mime_type,
        size_bytes = document.size_bytes,
        provider = state.analysis.name(),
        "Processing document"
    );

    let result = match state.analysis.analyze(&document, data, question).await {
        Ok(processed_data) => ActionResult::success(UploadActionData { processed_data }),
        Err(e) => error_result(&AppError::internal_with_source(PROCESSING_FAILED, e)),
    };
    action_response(result)
}

/// Form action `exportDocument`: acknowledge an export in the requested format.
#[utoipa::path(
    post,
    path = "/analyze/export-document",
    tag = "analyze",
    request_body(content = inline(Object), content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Success result carrying `{exported, format}`", body = inline(Object)),
        (status = 400, description = "Failure result: no export format", body = inline(Object))
    )
)]
pub async fn export_document(
    State(state): State<Arc<AppState>>,
    form: Result<FormData, HttpAppError>,
) -> Response {
    let payload = match submitted_form(form, REQUEST_TOO_LARGE_MESSAGE) {
        Ok(payload) => payload,
        Err(failure) => return action_response::<()>(failure),
    };

    let Some(format) = payload.text(EXPORT_FIELD).filter(|f| !f.is_empty()) else {
        let err = AppError::MissingField(EXPORT_FORMAT_REQUIRED.to_string());
        return action_response(error_result::<()>(&err));
    };

    tracing::info!(format = %format, provider = state.export.name(), "Export requested");
    let result = match state.export.export(format).await {
        Ok(ack) => ActionResult::success(ack),
        Err(e) => error_result(&AppError::internal_with_source(EXPORT_FAILED, e)),
    };
    action_response(result)
}
