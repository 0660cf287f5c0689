//! Application state shared by all handlers.

use docrelay_core::Config;
use docrelay_services::{AnalysisProvider, ExportProvider, UpstreamClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Client for the analysis and query services
    pub upstream: UpstreamClient,
    /// Backs the `uploadDocument` form action
    pub analysis: Arc<dyn AnalysisProvider>,
    /// Backs the `exportDocument` form action
    pub export: Arc<dyn ExportProvider>,
}
