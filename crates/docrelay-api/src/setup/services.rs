//! Construction of the outbound client and the capability providers.

use crate::state::AppState;
use anyhow::Result;
use docrelay_core::Config;
use docrelay_services::{create_analysis_provider, StubExportProvider, UpstreamClient};
use std::sync::Arc;

pub fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let upstream = UpstreamClient::new(config.upstream.clone())?;
    tracing::info!(
        base_url = %upstream.base_url(),
        timeout_secs = config.upstream.timeout_secs,
        connect_timeout_secs = config.upstream.connect_timeout_secs,
        max_retries = config.upstream.max_retries,
        "Upstream client initialized"
    );

    let analysis = create_analysis_provider(config, &upstream);

    Ok(Arc::new(AppState {
        config: config.clone(),
        upstream,
        analysis,
        export: Arc::new(StubExportProvider),
    }))
}
