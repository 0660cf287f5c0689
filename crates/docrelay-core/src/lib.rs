//! Docrelay Core Library
//!
//! This crate provides the domain models, error types, configuration, and upload
//! validation shared by all Docrelay components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{AnalysisProviderKind, Config, UpstreamConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use validation::{format_file_size, validate_file, validate_upload};
