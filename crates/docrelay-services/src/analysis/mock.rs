use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use docrelay_core::models::UploadedFile;
use std::time::Duration;

use super::AnalysisProvider;

/// Echoes the document's details after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockAnalysisProvider {
    delay: Duration,
}

impl MockAnalysisProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The text produced for `document` and `question`.
    pub fn describe(document: &UploadedFile, question: Option<&str>) -> String {
        let question = match question.filter(|q| !q.is_empty()) {
            Some(q) => format!("Question asked: {}", q),
            None => "No specific question provided.".to_string(),
        };

        format!(
            "Analyzed document \"{}\". Key insights: document contains {} file type with size {} bytes. {}",
            document.name, document.mime_type, document.size_bytes, question
        )
    }
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(
        &self,
        document: &UploadedFile,
        _data: Bytes,
        question: Option<&str>,
    ) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        tracing::debug!(
            file_name = %document.name,
            size_bytes = document.size_bytes,
            "Mock analysis complete"
        );

        Ok(Self::describe(document, question))
    }
}
