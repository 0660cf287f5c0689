//! Result objects returned by the analyze page form actions.

use serde::Serialize;

/// Success or failure of a form action. Failures carry an HTTP-equivalent status
/// and an error message instead of data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionResult<T> {
    Success { status: u16, data: T },
    Failure { status: u16, data: ActionFailure },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionFailure {
    pub error: String,
}

impl<T> ActionResult<T> {
    pub fn success(data: T) -> Self {
        ActionResult::Success { status: 200, data }
    }

    pub fn failure(status: u16, error: impl Into<String>) -> Self {
        ActionResult::Failure {
            status,
            data: ActionFailure {
                error: error.into(),
            },
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ActionResult::Success { status, .. } | ActionResult::Failure { status, .. } => *status,
        }
    }
}

/// Data of a successful `uploadDocument` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadActionData {
    #[serde(rename = "processedData")]
    pub processed_data: String,
}

/// Acknowledgement of an `exportDocument` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportAck {
    pub exported: bool,
    pub format: String,
}
