//! Document analysis capability
//!
//! The upload form action hands a validated document to an `AnalysisProvider` and
//! shows the returned text. Which provider is used is chosen by configuration.

mod factory;
mod mock;
mod upstream;

pub use factory::create_analysis_provider;
pub use mock::MockAnalysisProvider;
pub use upstream::UpstreamAnalysisProvider;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use docrelay_core::models::UploadedFile;
use std::fmt::Debug;

/// Produces analysis text for an uploaded document.
#[async_trait]
pub trait AnalysisProvider: Send + Sync + Debug {
    /// Provider name, used in logs and the health endpoint
    fn name(&self) -> &str;

    /// Analyze `document` (whose bytes are `data`), optionally guided by `question`.
    async fn analyze(
        &self,
        document: &UploadedFile,
        data: Bytes,
        question: Option<&str>,
    ) -> Result<String>;
}
