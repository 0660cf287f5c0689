//! Upload validation and size formatting.
//!
//! Two entry points share the same allow-list and ceiling:
//! `validate_file` is the browser-facing check (type first, then size) and
//! `validate_upload` is the form action's schema check (size first, then type).

use crate::constants::{ALLOWED_DOCUMENT_CONTENT_TYPES, BYTES_PER_MB, MAX_DOCUMENT_SIZE_BYTES};
use crate::error::AppError;
use crate::models::{UploadedFile, ValidationResult};

pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Please upload a PDF, DOC, DOCX, or TXT file";
pub const FILE_TOO_LARGE_MESSAGE: &str = "File size must be less than 10MB";

pub const SCHEMA_TOO_LARGE_MESSAGE: &str = "File must be less than 10MB";
const SCHEMA_UNSUPPORTED_MESSAGE: &str =
    "Unsupported file type. Please upload PDF, DOC, DOCX, or TXT.";

/// Normalize MIME type by stripping parameters (e.g. "text/plain; charset=utf-8" -> "text/plain").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Whether the declared MIME type is on the document allow-list.
pub fn is_allowed_content_type(content_type: &str) -> bool {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    ALLOWED_DOCUMENT_CONTENT_TYPES
        .iter()
        .any(|allowed| normalized == *allowed)
}

/// Check a file's declared type and size against the allow-list and the 10 MiB ceiling.
pub fn validate_file(file: &UploadedFile) -> ValidationResult {
    if !is_allowed_content_type(&file.mime_type) {
        return ValidationResult::invalid(UNSUPPORTED_TYPE_MESSAGE);
    }

    if file.size_bytes > MAX_DOCUMENT_SIZE_BYTES {
        return ValidationResult::invalid(FILE_TOO_LARGE_MESSAGE);
    }

    ValidationResult::valid()
}

/// Schema check used by the upload form action.
pub fn validate_upload(file: &UploadedFile) -> Result<(), AppError> {
    if file.size_bytes > MAX_DOCUMENT_SIZE_BYTES {
        return Err(AppError::FileTooLarge(SCHEMA_TOO_LARGE_MESSAGE.to_string()));
    }

    if !is_allowed_content_type(&file.mime_type) {
        return Err(AppError::UnsupportedFileType(
            SCHEMA_UNSUPPORTED_MESSAGE.to_string(),
        ));
    }

    Ok(())
}

/// Render a byte count in megabytes with two decimals, e.g. `1048576` -> `"1.00 MB"`.
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}
