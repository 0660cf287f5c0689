//! Tracing initialization
//!
//! Installs the process-wide tracing subscriber. The OpenTelemetry exporter is not
//! part of this service; logs go to stdout as text or JSON lines.

mod init_basic;

pub use init_basic::{init_telemetry, shutdown_telemetry, LogFormat};
