use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Question about a previously analyzed document, as posted by the browser.
///
/// `doc_id` and `context` are opaque to this service. A key that is present with a
/// `null` value is kept apart from an absent key so the outbound body matches what
/// the browser sent.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AnalysisQuery {
    #[serde(default)]
    #[validate(length(
        min = 3,
        max = 500,
        message = "Question must be between 3 and 500 characters"
    ))]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub doc_id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub context: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Body sent to the query service. `context` travels as JSON text, not nested JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamQueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl TryFrom<AnalysisQuery> for UpstreamQueryRequest {
    type Error = serde_json::Error;

    fn try_from(query: AnalysisQuery) -> Result<Self, Self::Error> {
        let context = query
            .context
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        Ok(Self {
            doc_id: query.doc_id,
            question: query.question,
            context,
        })
    }
}
