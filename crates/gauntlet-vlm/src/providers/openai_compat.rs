//! Generic OpenAI-compatible vision provider.
//!
//! Covers any server exposing the `chat/completions` wire shape, including
//! local inference servers, so sessions can run against self-hosted models.

use crate::error::{Result, VlmError};
use crate::provider::{VlmProvider, VlmReply};
use crate::providers::common::{build_http_client, ChatRequest, ChatResponse};
use async_trait::async_trait;
use reqwest::Client;

/// Provider for any OpenAI-compatible vision endpoint.
pub struct OpenAiCompatProvider {
    api_key: Option<String>,
    model: String,
    client: Client,
    base_url: String,
}

impl OpenAiCompatProvider {
    /// Create a new provider for the given endpoint and model.
    ///
    /// `api_key` is optional; local servers typically do not require one.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            api_key,
            model: model.into(),
            client: build_http_client(timeout_secs)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl VlmProvider for OpenAiCompatProvider {
    async fn describe_image(&self, prompt: &str, image_jpeg: &[u8]) -> Result<VlmReply> {
        let request = ChatRequest::vision(&self.model, prompt, image_jpeg);

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VlmError::Api {
                provider: "openai-compat".to_string(),
                status: status.as_u16(),
                message: error_text,
            });
        }

        let api_response: ChatResponse = response.json().await.map_err(|e| VlmError::Parse {
            provider: "openai-compat".to_string(),
            message: format!("failed to parse response: {e}"),
        })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| VlmError::Parse {
                provider: "openai-compat".to_string(),
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
