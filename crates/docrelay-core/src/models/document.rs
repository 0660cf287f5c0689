use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{
    ALLOWED_DOCUMENT_CONTENT_TYPES, EXPORT_FORMATS, MAX_DOCUMENT_SIZE_BYTES, SUGGESTED_QUESTIONS,
};
use crate::validation::format_file_size;

/// Descriptor of a file received in a form submission. The bytes themselves are
/// carried separately and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    /// Declared MIME type, as sent by the client
    pub mime_type: String,
    pub size_bytes: u64,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// Outcome of the file validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

/// Upload constraints advertised to the browser.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub max_size: u64,
    /// `max_size` rendered by the size formatter, e.g. "10.00 MB"
    pub max_size_label: String,
    pub valid_types: Vec<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            max_size: MAX_DOCUMENT_SIZE_BYTES,
            max_size_label: format_file_size(MAX_DOCUMENT_SIZE_BYTES),
            valid_types: ALLOWED_DOCUMENT_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Data returned when the analyze page loads.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePageData {
    pub file_config: FileConfig,
    pub suggested_questions: Vec<String>,
    pub export_formats: Vec<String>,
}

impl Default for AnalyzePageData {
    fn default() -> Self {
        Self {
            file_config: FileConfig::default(),
            suggested_questions: SUGGESTED_QUESTIONS.iter().map(|s| s.to_string()).collect(),
            export_formats: EXPORT_FORMATS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
