//! Configuration module
//!
//! Configuration is read once from the environment at startup and handed to the
//! application state. Nothing else in the workspace reads environment variables.

use std::env;
use std::time::Duration;

// Common constants
const SERVER_PORT: u16 = 3000;
const UPSTREAM_TIMEOUT_SECS: u64 = 30;
const UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 10;
const UPSTREAM_MAX_RETRIES: u32 = 0;
const UPSTREAM_RETRY_BACKOFF_MS: u64 = 250;
const MOCK_ANALYSIS_DELAY_MS: u64 = 1000;
const MAX_REQUEST_BODY_MB: usize = 25;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Which analysis provider backs the upload form action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisProviderKind {
    /// Stand-in that echoes file details after an artificial delay.
    Mock,
    /// Calls the external analysis service.
    Upstream,
}

impl AnalysisProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisProviderKind::Mock => "mock",
            AnalysisProviderKind::Upstream => "upstream",
        }
    }
}

impl std::str::FromStr for AnalysisProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(AnalysisProviderKind::Mock),
            "upstream" => Ok(AnalysisProviderKind::Upstream),
            other => Err(anyhow::anyhow!(
                "ANALYSIS_PROVIDER must be 'mock' or 'upstream', got '{}'",
                other
            )),
        }
    }
}

/// Outbound connection settings for the analysis and query services.
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8000`
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Extra attempts after a transport failure. 0 = single attempt.
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: UPSTREAM_TIMEOUT_SECS,
            connect_timeout_secs: UPSTREAM_CONNECT_TIMEOUT_SECS,
            max_retries: UPSTREAM_MAX_RETRIES,
            retry_backoff_ms: UPSTREAM_RETRY_BACKOFF_MS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Absolute URL for an upstream path such as `/api/analyze`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    /// "text" or "json"
    pub log_format: String,
    pub cors_origins: Vec<String>,
    pub upstream: UpstreamConfig,
    pub analysis_provider: AnalysisProviderKind,
    pub mock_analysis_delay_ms: u64,
    pub max_request_body_bytes: usize,
    pub http_concurrency_limit: usize,
}

impl Config {
    /// Configuration with defaults for everything except the upstream base URL.
    pub fn with_upstream(base_url: impl Into<String>) -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            log_format: "text".to_string(),
            cors_origins: vec!["*".to_string()],
            upstream: UpstreamConfig::new(base_url),
            analysis_provider: AnalysisProviderKind::Mock,
            mock_analysis_delay_ms: MOCK_ANALYSIS_DELAY_MS,
            max_request_body_bytes: MAX_REQUEST_BODY_MB * 1024 * 1024,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
        }
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base_url = env::var("UPSTREAM_BASE_URL")
            .or_else(|_| env::var("SERVER_URI"))
            .or_else(|_| env::var("VITE_SERVER_URI"))
            .map_err(|_| {
                anyhow::anyhow!("UPSTREAM_BASE_URL (or SERVER_URI) environment variable not set")
            })?;

        let upstream = UpstreamConfig {
            timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", UPSTREAM_TIMEOUT_SECS),
            connect_timeout_secs: parse_env(
                "UPSTREAM_CONNECT_TIMEOUT_SECS",
                UPSTREAM_CONNECT_TIMEOUT_SECS,
            ),
            max_retries: parse_env("UPSTREAM_MAX_RETRIES", UPSTREAM_MAX_RETRIES),
            retry_backoff_ms: parse_env("UPSTREAM_RETRY_BACKOFF_MS", UPSTREAM_RETRY_BACKOFF_MS),
            ..UpstreamConfig::new(base_url)
        };

        let analysis_provider = env::var("ANALYSIS_PROVIDER")
            .unwrap_or_else(|_| "mock".to_string())
            .parse::<AnalysisProviderKind>()?;

        let max_request_body_bytes =
            megabytes_to_bytes(parse_env("MAX_REQUEST_BODY_MB", MAX_REQUEST_BODY_MB))?;

        let config = Config {
            server_port: parse_env("SERVER_PORT", SERVER_PORT),
            environment,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "text".to_string())
                .to_lowercase(),
            cors_origins,
            upstream,
            analysis_provider,
            mock_analysis_delay_ms: parse_env("MOCK_ANALYSIS_DELAY_MS", MOCK_ANALYSIS_DELAY_MS),
            max_request_body_bytes,
            http_concurrency_limit: parse_env("HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT)
                .max(1),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let base = &self.upstream.base_url;
        if base.is_empty() {
            return Err(anyhow::anyhow!("Upstream base URL cannot be empty"));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "Upstream base URL must start with http:// or https:// (got '{}')",
                base
            ));
        }

        if self.upstream.timeout_secs == 0 {
            return Err(anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS cannot be 0"));
        }

        if self.upstream.connect_timeout_secs == 0 {
            return Err(anyhow::anyhow!("UPSTREAM_CONNECT_TIMEOUT_SECS cannot be 0"));
        }

        if self.max_request_body_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_REQUEST_BODY_MB cannot be 0"));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }
}

fn megabytes_to_bytes(mb: usize) -> Result<usize, anyhow::Error> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_REQUEST_BODY_MB is too large ({} MB)", mb))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
