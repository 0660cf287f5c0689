//! HTTP client for the upstream analysis and query services.

mod multipart;
mod retry;

pub use multipart::{FormPart, MultipartPayload};
pub use retry::RetryPolicy;

use anyhow::Context;
use bytes::Bytes;
use docrelay_core::UpstreamConfig;
use serde::Serialize;

/// Header used to correlate relay requests with upstream requests.
const REQUEST_ID_HEADER: &str = "X-Request-ID";

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// No response was received (connect failure, timeout, broken connection).
    #[error("upstream request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived but its body could not be read.
    #[error("failed to read upstream response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The outgoing request could not be built.
    #[error("failed to build upstream request: {0}")]
    Request(#[source] reqwest::Error),
}

/// A fully read upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: reqwest::Client,
    config: UpstreamConfig,
    retry: RetryPolicy,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .context("Failed to create upstream HTTP client")?;

        let retry = RetryPolicy::new(config.max_retries, config.retry_backoff());

        Ok(Self {
            client,
            config,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// POST a multipart form to `path`. Any status code is returned as a response.
    pub async fn post_multipart(
        &self,
        path: &str,
        payload: &MultipartPayload,
        request_id: Option<&str>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.config.url(path);

        // Surface a bad content type before the first attempt
        payload.to_form().map_err(UpstreamError::Request)?;

        let target = url.as_str();
        let response = self
            .retry
            .run("post_multipart", is_transient, move || async move {
                let form = payload.to_form().map_err(UpstreamError::Request)?;
                let request = self.client.post(target).multipart(form);
                self.send(target, request, request_id).await
            })
            .await?;

        self.read(&url, response).await
    }

    /// POST a JSON body to `path`. Any status code is returned as a response.
    pub async fn post_json<T: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &T,
        request_id: Option<&str>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.config.url(path);

        let target = url.as_str();
        let response = self
            .retry
            .run("post_json", is_transient, move || async move {
                let request = self.client.post(target).json(body);
                self.send(target, request, request_id).await
            })
            .await?;

        self.read(&url, response).await
    }

    async fn send(
        &self,
        url: &str,
        mut request: reqwest::RequestBuilder,
        request_id: Option<&str>,
    ) -> Result<reqwest::Response, UpstreamError> {
        if let Some(request_id) = request_id {
            request = request.header(REQUEST_ID_HEADER, request_id);
        }

        request.send().await.map_err(|source| {
            if source.is_builder() {
                UpstreamError::Request(source)
            } else {
                UpstreamError::Transport {
                    url: url.to_string(),
                    source,
                }
            }
        })
    }

    async fn read(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|source| UpstreamError::Body {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!(url = %url, status, body_len = body.len(), "Upstream responded");

        Ok(UpstreamResponse { status, body })
    }
}

fn is_transient(err: &UpstreamError) -> bool {
    match err {
        UpstreamError::Transport { source, .. } => source.is_connect() || source.is_timeout(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(url: &str) -> UpstreamClient {
        UpstreamClient::new(UpstreamConfig::new(url)).unwrap()
    }

    #[tokio::test]
    async fn post_json_returns_body_and_forwards_request_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/query")
            .match_header("x-request-id", "req-123")
            .match_body(Matcher::Json(json!({"question": "Summarize key findings"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"answer":"ok"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let response = client
            .post_json(
                "/api/query",
                &json!({"question": "Summarize key findings"}),
                Some("req-123"),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(response.is_success());
        assert_eq!(response.json().unwrap(), json!({"answer": "ok"}));
    }

    #[tokio::test]
    async fn error_statuses_are_responses_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/query")
            .with_status(503)
            .with_body("unavailable")
            .expect(1)
            .create_async()
            .await;

        let mut config = UpstreamConfig::new(server.url());
        config.max_retries = 3;
        config.retry_backoff_ms = 1;
        let client = UpstreamClient::new(config).unwrap();

        let response = client
            .post_json("/api/query", &json!({}), None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 503);
        assert!(!response.is_success());
        assert!(response.json().is_err());
    }

    #[tokio::test]
    async fn post_multipart_sends_form_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/analyze")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=.+".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="notes.txt""#.to_string()),
                Matcher::Regex("hello upstream".to_string()),
                Matcher::Regex(r#"name="question""#.to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"summary":"done"}"#)
            .create_async()
            .await;

        let mut payload = MultipartPayload::new();
        payload.push_file(
            "file",
            Some("notes.txt".to_string()),
            Some("text/plain".to_string()),
            Bytes::from_static(b"hello upstream"),
        );
        payload.push_text("question", "List requirements");

        let client = client_for(&server.url());
        let response = client
            .post_multipart("/api/analyze", &payload, None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut config = UpstreamConfig::new(format!("http://127.0.0.1:{}", port));
        config.max_retries = 1;
        config.retry_backoff_ms = 1;
        let client = UpstreamClient::new(config).unwrap();

        let err = client
            .post_json("/api/query", &json!({}), None)
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::Transport { .. }));
        assert!(is_transient(&err));
    }
}
