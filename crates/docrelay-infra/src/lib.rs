//! Docrelay Infrastructure Library
//!
//! This crate provides shared infrastructure components used by the Docrelay services:
//! - Middleware (request ID)
//! - Telemetry initialization (tracing subscriber)
//! - The wire format of error responses

#[cfg(feature = "middleware")]
pub mod middleware;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

pub mod error;

// Re-export commonly used types
#[cfg(feature = "middleware")]
pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry, LogFormat};

pub use error::ErrorResponse;
