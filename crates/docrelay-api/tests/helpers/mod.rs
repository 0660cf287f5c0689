//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p docrelay-api`. The upstream analysis and
//! query services are stood in for by a mockito server per test.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use docrelay_api::setup::routes;
use docrelay_api::state::AppState;
use docrelay_core::models::UploadedFile;
use docrelay_core::Config;
use docrelay_services::{
    AnalysisProvider, MockAnalysisProvider, StubExportProvider, UpstreamClient,
};
use mockito::ServerGuard;
use std::sync::Arc;
use std::time::Duration;

/// Test application: server plus the mock upstream it talks to.
pub struct TestApp {
    pub server: TestServer,
    pub upstream: ServerGuard,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Config pointing at `upstream_url` with the mock provider and no artificial delay.
pub fn test_config(upstream_url: &str) -> Config {
    let mut config = Config::with_upstream(upstream_url);
    config.mock_analysis_delay_ms = 0;
    config
}

pub fn build_state(config: Config, analysis: Arc<dyn AnalysisProvider>) -> Arc<AppState> {
    let upstream = UpstreamClient::new(config.upstream.clone()).expect("upstream client");
    Arc::new(AppState {
        config,
        upstream,
        analysis,
        export: Arc::new(StubExportProvider),
    })
}

pub async fn test_server(config: &Config, state: Arc<AppState>) -> TestServer {
    let router = routes::setup_routes(config, state)
        .await
        .expect("Failed to build router");
    TestServer::new(router).expect("Failed to start test server")
}

/// Setup test app with a mock upstream and the mock analysis provider.
pub async fn setup_test_app() -> TestApp {
    let upstream = mockito::Server::new_async().await;
    let config = test_config(&upstream.url());
    let state = build_state(
        config.clone(),
        Arc::new(MockAnalysisProvider::new(Duration::ZERO)),
    );
    let server = test_server(&config, state).await;
    TestApp { server, upstream }
}

/// Setup test app with the mock provider and a caller-adjusted config.
pub async fn setup_test_app_with_config(adjust: impl FnOnce(&mut Config)) -> TestApp {
    let upstream = mockito::Server::new_async().await;
    let mut config = test_config(&upstream.url());
    adjust(&mut config);
    let state = build_state(
        config.clone(),
        Arc::new(MockAnalysisProvider::new(Duration::ZERO)),
    );
    let server = test_server(&config, state).await;
    TestApp { server, upstream }
}

/// Setup test app with a custom analysis provider.
pub async fn setup_test_app_with_provider(analysis: Arc<dyn AnalysisProvider>) -> TestApp {
    let upstream = mockito::Server::new_async().await;
    let config = test_config(&upstream.url());
    let state = build_state(config.clone(), analysis);
    let server = test_server(&config, state).await;
    TestApp { server, upstream }
}

/// Test server whose upstream base URL points at a port nobody listens on.
pub async fn setup_unreachable_upstream_app() -> TestServer {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    let config = test_config(&format!("http://127.0.0.1:{}", port));
    let state = build_state(
        config.clone(),
        Arc::new(MockAnalysisProvider::new(Duration::ZERO)),
    );
    test_server(&config, state).await
}

/// Analysis provider that always fails.
#[derive(Debug)]
pub struct FailingAnalysisProvider;

#[async_trait]
impl AnalysisProvider for FailingAnalysisProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn analyze(
        &self,
        _document: &UploadedFile,
        _data: Bytes,
        _question: Option<&str>,
    ) -> anyhow::Result<String> {
        anyhow::bail!("model backend exploded")
    }
}
