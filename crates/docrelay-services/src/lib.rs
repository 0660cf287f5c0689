//! Docrelay Services
//!
//! Outbound collaborators of the relay: the HTTP client for the upstream analysis and
//! query services, and the analysis/export provider capabilities used by the form
//! actions.

pub mod analysis;
pub mod export;
pub mod upstream;

pub use analysis::{
    create_analysis_provider, AnalysisProvider, MockAnalysisProvider, UpstreamAnalysisProvider,
};
pub use export::{ExportProvider, StubExportProvider};
pub use upstream::{
    FormPart, MultipartPayload, RetryPolicy, UpstreamClient, UpstreamError, UpstreamResponse,
};
