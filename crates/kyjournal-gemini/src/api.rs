//! Gemini `generateContent` HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use kyjournal_config::ModelConfig;
use kyjournal_report::{GenerateError, ModelClient};

use crate::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Google Generative Language API base URL.
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// HTTP client for the Gemini API. One request per report, no streaming.
pub struct GeminiApi {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiApi {
    /// Create a new API client with the given key and model settings.
    ///
    /// An empty key is accepted here; `complete` reports it as a
    /// configuration error without touching the network.
    pub fn new(api_key: impl Into<String>, config: &ModelConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            base_url: API_BASE.to_string(),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// Create a client with the key taken from the environment
    /// (GOOGLE_API_KEY / GEMINI_API_KEY).
    pub fn from_env(config: &ModelConfig) -> Self {
        let key = kyjournal_config::api_key_from_env().unwrap_or_default();
        Self::new(key, config)
    }

    /// Point the client at a different endpoint. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ModelClient for GeminiApi {
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        if self.api_key.is_empty() {
            return Err(GenerateError::Config(
                "no model API key configured; set GOOGLE_API_KEY or GEMINI_API_KEY".into(),
            ));
        }

        let body =
            GenerateContentRequest::for_prompt(prompt, self.temperature, self.max_output_tokens);

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "calling generateContent");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerateError::Transient(format!("generateContent response parse failed: {e}"))
        })?;

        extract_text(parsed)
    }
}

fn transport_error(e: reqwest::Error) -> GenerateError {
    if e.is_timeout() {
        GenerateError::Transient(format!("generateContent request timed out: {e}"))
    } else {
        GenerateError::Transient(format!("generateContent request failed: {e}"))
    }
}

/// Map an HTTP error status to the error taxonomy. Credential problems are
/// configuration errors; everything else is transient.
fn classify_status(status: StatusCode, body: &str) -> GenerateError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| status.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GenerateError::Config(format!("API key rejected: {message}"))
        }
        // Gemini reports a malformed key as 400 INVALID_ARGUMENT
        StatusCode::BAD_REQUEST if message.to_lowercase().contains("api key") => {
            GenerateError::Config(format!("API key invalid: {message}"))
        }
        StatusCode::TOO_MANY_REQUESTS => GenerateError::Transient(format!("rate limited: {message}")),
        _ => GenerateError::Transient(format!("generateContent failed ({status}): {message}")),
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, GenerateError> {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return Err(GenerateError::Transient(format!(
                "prompt blocked by the service: {reason}"
            )));
        }
    }

    let text: String = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|content| content.parts)
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        return Err(GenerateError::Transient(
            "model returned no candidates".into(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ModelConfig {
        ModelConfig::default()
    }

    #[test]
    fn test_endpoint_url() {
        let api = GeminiApi::new("key", &config());
        assert_eq!(
            api.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro-latest:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error_without_network() {
        // Point at a dead endpoint: if a request were attempted it would
        // surface as a transient transport error instead.
        let api = GeminiApi::new("", &config()).with_base_url("http://127.0.0.1:1");
        let err = api.complete("prompt").await.unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transient() {
        let api = GeminiApi::new("key", &config()).with_base_url("http://127.0.0.1:1");
        let err = api.complete("prompt").await.unwrap_err();
        assert!(err.is_transient());
    }

    #[test]
    fn test_classify_auth_statuses() {
        let err = classify_status(StatusCode::FORBIDDEN, "");
        assert!(matches!(err, GenerateError::Config(_)));

        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        let err = classify_status(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, GenerateError::Config(_)));
    }

    #[test]
    fn test_classify_transient_statuses() {
        assert!(classify_status(StatusCode::TOO_MANY_REQUESTS, "").is_transient());
        assert!(classify_status(StatusCode::SERVICE_UNAVAILABLE, "").is_transient());
        // A 400 unrelated to credentials stays retryable by hand
        let body = r#"{"error":{"code":400,"message":"Unknown field.","status":"INVALID_ARGUMENT"}}"#;
        assert!(classify_status(StatusCode::BAD_REQUEST, body).is_transient());
    }

    #[test]
    fn test_extract_text_concatenates_parts() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"Today "},{"text":"I visited."}],"role":"model"}}]}"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_text(resp).unwrap(), "Today I visited.");
    }

    #[test]
    fn test_extract_text_empty_is_error() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(resp).unwrap_err().is_transient());
    }

    #[test]
    fn test_extract_text_blocked_prompt_is_error() {
        let json = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let err = extract_text(resp).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }
}
