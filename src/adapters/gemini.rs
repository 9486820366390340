//! Client for the hosted Gemini `generateContent` endpoint.
//!
//! Wire types stay private to this module. Callers only see
//! [`GenerationRequest`] in and response text out.

use crate::core::{ConfigProvider, GenerationRequest, GenerativeModel};
use crate::utils::error::{HomestayError, Result};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.ai_endpoint(),
            config.ai_model(),
            config.ai_api_key().map(str::to_string),
            config.ai_timeout(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let api_key = validate_required_field("ai.api_key", &self.api_key)?.as_str();

        let body = GenerateContentRequest::from(request);
        let url = self.url();
        tracing::debug!(
            "Sending generateContent to {} (model: {}, json: {})",
            url,
            self.model,
            body.generation_config.is_some()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Model response status: {}", status);
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(HomestayError::AiResponseError {
                message: format!("HTTP {}: {}", status, truncate(&detail, 200)),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.into_text()
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// Wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl From<GenerationRequest> for GenerateContentRequest {
    fn from(request: GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt),
                }],
            }],
            generation_config: request.response_schema.map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| HomestayError::AiResponseError {
                message: "response has no candidates".to_string(),
            })?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(HomestayError::AiResponseError {
                message: "empty or missing text in response".to_string(),
            });
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_with_schema() {
        let schema = json!({"type": "OBJECT"});
        let body = GenerateContentRequest::from(GenerationRequest::json("hi", schema.clone()));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_request_body_without_schema_omits_config() {
        let body = GenerateContentRequest::from(GenerationRequest::text("hi"));
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "world"}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(parsed.into_text().unwrap(), "Hello, world");
    }

    #[test]
    fn test_response_without_candidates_is_error() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            parsed.into_text(),
            Err(HomestayError::AiResponseError { .. })
        ));
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = GeminiClient::new(
            "http://localhost:9000/v1beta/",
            "test-model",
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.url(),
            "http://localhost:9000/v1beta/models/test-model:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_request() {
        let client = GeminiClient::new(
            "http://127.0.0.1:1",
            DEFAULT_MODEL,
            None,
            Duration::from_secs(1),
        )
        .unwrap();
        let err = client
            .generate(GenerationRequest::text("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, HomestayError::MissingConfigError { .. }));
    }
}
