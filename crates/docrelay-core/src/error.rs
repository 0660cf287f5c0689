//! Error types module
//!
//! All request-level failures are unified under `AppError`. Each variant describes
//! its own HTTP presentation through `ErrorMetadata`, so the HTTP layer only has to
//! render `{ "error": client_message }` with the matching status.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for upstream failures outside our control
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPSTREAM_ERROR"), used in logs
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large: {0}")]
    FileTooLarge(String),

    /// The upstream service answered with a non-success status. The status is relayed.
    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The request body exceeded the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Internal failure whose `message` is safe to show to clients; `source` is only logged.
    #[error("{message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Wrap an internal failure with a client-safe message.
    pub fn internal_with_source(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::InternalWithSource {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Get the error type name for logs
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::MissingField(_) => "MissingField",
            AppError::UnsupportedFileType(_) => "UnsupportedFileType",
            AppError::FileTooLarge(_) => "FileTooLarge",
            AppError::Upstream { .. } => "Upstream",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: "Internal Server Error".to_string(),
            source: err,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_)
            | AppError::MissingField(_)
            | AppError::UnsupportedFileType(_)
            | AppError::FileTooLarge(_) => 400,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Upstream { status, .. } => *status,
            AppError::InternalWithSource { .. } => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::MissingField(_) => "MISSING_FIELD",
            AppError::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            AppError::FileTooLarge(_) => "FILE_TOO_LARGE",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::MissingField(ref msg) => msg.clone(),
            AppError::UnsupportedFileType(ref msg) => msg.clone(),
            AppError::FileTooLarge(ref msg) => msg.clone(),
            AppError::Upstream { ref message, .. } => message.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::InternalWithSource { ref message, .. } => message.clone(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_)
            | AppError::MissingField(_)
            | AppError::UnsupportedFileType(_)
            | AppError::FileTooLarge(_)
            | AppError::PayloadTooLarge(_) => LogLevel::Debug,
            AppError::Upstream { .. } => LogLevel::Warn,
            AppError::InternalWithSource { .. } => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_missing_field() {
        let err = AppError::MissingField("File is required".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "MISSING_FIELD");
        assert_eq!(err.client_message(), "File is required");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_upstream_relays_status() {
        let err = AppError::Upstream {
            status: 503,
            message: "Failed to analyze document".to_string(),
        };
        assert_eq!(err.http_status_code(), 503);
        assert_eq!(err.client_message(), "Failed to analyze document");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_payload_too_large_is_413() {
        let err = AppError::PayloadTooLarge("Request body too large".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
        assert_eq!(err.client_message(), "Request body too large");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_internal_with_source_uses_client_message() {
        let err = AppError::internal_with_source(
            "Failed to fetch data from API",
            anyhow::anyhow!("connection refused"),
        );
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Failed to fetch data from API");
        assert!(err.detailed_message().contains("connection refused"));
    }

    #[test]
    fn test_from_anyhow_is_generic_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.client_message(), "Internal Server Error");
        assert_eq!(err.error_type(), "Internal");
    }
}
