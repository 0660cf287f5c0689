use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use docrelay_core::constants::{FILE_FIELD, QUESTION_FIELD, UPSTREAM_ANALYZE_PATH};
use docrelay_core::models::UploadedFile;

use super::AnalysisProvider;
use crate::upstream::{MultipartPayload, UpstreamClient};

/// Sends the document to the upstream analysis service.
///
/// The `summary` field of the JSON answer is used when present; otherwise the whole
/// answer is shown as JSON text.
#[derive(Debug, Clone)]
pub struct UpstreamAnalysisProvider {
    client: UpstreamClient,
}

impl UpstreamAnalysisProvider {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnalysisProvider for UpstreamAnalysisProvider {
    fn name(&self) -> &str {
        "upstream"
    }

    async fn analyze(
        &self,
        document: &UploadedFile,
        data: Bytes,
        question: Option<&str>,
    ) -> Result<String> {
        let mut payload = MultipartPayload::new();
        payload.push_file(
            FILE_FIELD,
            Some(document.name.clone()),
            Some(document.mime_type.clone()),
            data,
        );
        if let Some(question) = question.filter(|q| !q.is_empty()) {
            payload.push_text(QUESTION_FIELD, question);
        }

        let response = self
            .client
            .post_multipart(UPSTREAM_ANALYZE_PATH, &payload, None)
            .await
            .context("Analysis service unreachable")?;

        if !response.is_success() {
            anyhow::bail!("Analysis service returned status {}", response.status);
        }

        let body = response
            .json()
            .context("Analysis service returned invalid JSON")?;

        Ok(match body.get("summary").and_then(|s| s.as_str()) {
            Some(summary) => summary.to_string(),
            None => body.to_string(),
        })
    }
}
