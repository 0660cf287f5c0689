//! Configuration validation
//!
//! Validates configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use docrelay_core::{AnalysisProviderKind, Config};

/// Upper bound on retries before a warning is logged.
const RETRY_WARN_THRESHOLD: u32 = 5;

/// Validate configuration values
///
/// Hard errors come from `Config::validate`; suspicious but legal settings are
/// logged as warnings.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.analysis_provider == AnalysisProviderKind::Mock {
        tracing::warn!(
            "Mock analysis provider enabled in production - uploads will not reach the analysis service"
        );
    }

    if config.upstream.max_retries > RETRY_WARN_THRESHOLD {
        tracing::warn!(
            max_retries = config.upstream.max_retries,
            "UPSTREAM_MAX_RETRIES is high - a dead upstream will hold requests for a long time"
        );
    }

    let max_request_mb = config.max_request_body_bytes / 1024 / 1024;
    if (config.max_request_body_bytes as u64) < docrelay_core::constants::MAX_DOCUMENT_SIZE_BYTES {
        tracing::warn!(
            max_request_mb,
            "MAX_REQUEST_BODY_MB is below the 10MB document limit - large uploads are cut off before validation"
        );
    }

    Ok(())
}
