//! Groq API vision provider implementation.

use crate::error::{Result, VlmError};
use crate::provider::{VlmProvider, VlmReply};
use crate::providers::common::{build_http_client, ChatRequest, ChatResponse};
use async_trait::async_trait;
use reqwest::Client;

/// Groq vision provider.
///
/// Queries Groq's OpenAI-compatible `chat/completions` endpoint with an
/// inline base64 image.
pub struct GroqProvider {
    api_key: String,
    model: String,
    client: Client,
    base_url: String,
}

impl GroqProvider {
    /// Create a new Groq provider with the given API key and model.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_url(api_key, model, "https://api.groq.com/openai/v1", 60)
    }

    /// Create a new Groq provider with a custom base URL and request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            client: build_http_client(timeout_secs)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl VlmProvider for GroqProvider {
    async fn describe_image(&self, prompt: &str, image_jpeg: &[u8]) -> Result<VlmReply> {
        let request = ChatRequest::vision(&self.model, prompt, image_jpeg);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VlmError::Api {
                provider: "groq".to_string(),
                status: status.as_u16(),
                message: error_text,
            });
        }

        let api_response: ChatResponse = response.json().await.map_err(|e| VlmError::Parse {
            provider: "groq".to_string(),
            message: format!("failed to parse response: {e}"),
        })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| VlmError::Parse {
                provider: "groq".to_string(),
                message: "no choices in response".to_string(),
            })?;

        Ok(VlmReply {
            content,
            model: api_response.model.unwrap_or_else(|| self.model.clone()),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
