//! Request and response models shared between the services and the HTTP layer.

pub mod action;
pub mod document;
pub mod query;

pub use action::{ActionFailure, ActionResult, ExportAck, UploadActionData};
pub use document::{AnalyzePageData, FileConfig, UploadedFile, ValidationResult};
pub use query::{AnalysisQuery, UpstreamQueryRequest};
