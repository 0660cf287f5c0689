//! Form body helpers
//!
//! Browsers submit forms either as `multipart/form-data` (when a file input is
//! present) or as `application/x-www-form-urlencoded`. Both are read into the same
//! `MultipartPayload` so the relays and form actions see one shape.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form,
};
use docrelay_core::constants::REQUEST_TOO_LARGE_MESSAGE;
use docrelay_core::AppError;
use docrelay_services::MultipartPayload;
use std::fmt::Display;

use crate::error::HttpAppError;

const INVALID_FORM: &str = "Invalid form submission";

/// Map a body read failure to a stable client message; the parser detail is only logged.
fn body_error(status: StatusCode, detail: impl Display) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(REQUEST_TOO_LARGE_MESSAGE.to_string());
    }
    tracing::debug!(error = %detail, "Rejected form body");
    AppError::InvalidInput(INVALID_FORM.to_string())
}

/// Read every field of a multipart body, keeping file parts as bytes.
pub async fn read_multipart(mut multipart: Multipart) -> Result<MultipartPayload, AppError> {
    let mut payload = MultipartPayload::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| body_error(e.status(), e))?
    {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field.file_name().is_some() {
            let file_name = field.file_name().map(|s| s.to_string());
            let content_type = field.content_type().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| body_error(e.status(), e))?;
            payload.push_file(name, file_name, content_type, data);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| body_error(e.status(), e))?;
            payload.push_text(name, value);
        }
    }

    Ok(payload)
}

/// A submitted form, multipart or urlencoded.
#[derive(Debug)]
pub struct FormData(pub MultipartPayload);

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            Ok(FormData(read_multipart(multipart).await?))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;

            let mut payload = MultipartPayload::new();
            for (name, value) in fields {
                payload.push_text(name, value);
            }
            Ok(FormData(payload))
        } else {
            Err(AppError::InvalidInput(
                "Expected multipart/form-data or application/x-www-form-urlencoded body"
                    .to_string(),
            )
            .into())
        }
    }
}
