use docrelay_core::{AnalysisProviderKind, Config};
use std::sync::Arc;
use std::time::Duration;

use super::{AnalysisProvider, MockAnalysisProvider, UpstreamAnalysisProvider};
use crate::upstream::UpstreamClient;

/// Create the analysis provider selected by `config.analysis_provider`.
pub fn create_analysis_provider(
    config: &Config,
    client: &UpstreamClient,
) -> Arc<dyn AnalysisProvider> {
    let provider: Arc<dyn AnalysisProvider> = match config.analysis_provider {
        AnalysisProviderKind::Mock => Arc::new(MockAnalysisProvider::new(Duration::from_millis(
            config.mock_analysis_delay_ms,
        ))),
        AnalysisProviderKind::Upstream => Arc::new(UpstreamAnalysisProvider::new(client.clone())),
    };

    tracing::info!(provider = provider.name(), "Analysis provider initialized");
    provider
}
