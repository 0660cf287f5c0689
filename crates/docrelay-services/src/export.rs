//! Document export capability
//!
//! Exporting is acknowledged only; no file is produced.

use anyhow::Result;
use async_trait::async_trait;
use docrelay_core::models::ExportAck;
use std::fmt::Debug;

#[async_trait]
pub trait ExportProvider: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Export the current analysis in `format` (e.g. "PDF Report").
    async fn export(&self, format: &str) -> Result<ExportAck>;
}

/// Acknowledges every export request.
#[derive(Debug, Clone, Default)]
pub struct StubExportProvider;

#[async_trait]
impl ExportProvider for StubExportProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn export(&self, format: &str) -> Result<ExportAck> {
        tracing::info!(format = %format, "Exporting document");
        Ok(ExportAck {
            exported: true,
            format: format.to_string(),
        })
    }
}
