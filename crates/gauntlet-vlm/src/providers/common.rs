//! Common wire types shared across OpenAI-compatible vision providers.

use crate::error::{Result, VlmError};
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Build a standard HTTP client with a bounded request timeout.
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| VlmError::Internal(format!("failed to create HTTP client: {e}")))
}

/// Encode a JPEG image as a `data:` URL for inline upload.
#[must_use]
pub fn to_data_url(image_jpeg: &[u8]) -> String {
    format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(image_jpeg)
    )
}

/// Chat completion request for OpenAI-compatible vision endpoints.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages; a single user message for VLM queries
    pub messages: Vec<ChatMessage>,
}

/// One message in an OpenAI-compatible conversation.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    /// Role of the sender, `"user"` for VLM queries
    pub role: String,
    /// Mixed text and image content parts
    pub content: Vec<ContentPart>,
}

/// One part of a mixed-content message.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text part
    Text {
        /// The prompt text
        text: String,
    },
    /// Inline image part
    ImageUrl {
        /// Image reference, a base64 data URL here
        image_url: ImageUrl,
    },
}

/// Image reference inside a content part.
#[derive(Debug, Serialize)]
pub struct ImageUrl {
    /// The image URL or data URL
    pub url: String,
}

impl ChatRequest {
    /// Build the single-message vision request the solver uses.
    #[must_use]
    pub fn vision(model: impl Into<String>, prompt: &str, image_jpeg: &[u8]) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: to_data_url(image_jpeg),
                        },
                    },
                ],
            }],
        }
    }
}

/// Chat completion response from OpenAI-compatible endpoints.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Candidate completions; the first one is used
    pub choices: Vec<ChatChoice>,
    /// Model that produced the completion
    #[serde(default)]
    pub model: Option<String>,
}

/// One candidate completion.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The completion message
    pub message: ResponseMessage,
}

/// Message body of a completion choice.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    /// Generated text content
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(30).is_ok());
    }

    #[test]
    fn test_data_url_prefix() {
        let url = to_data_url(&[0xFF, 0xD8, 0xFF]);
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_vision_request_shape() {
        let req = ChatRequest::vision("test-model", "count the pins", &[1, 2, 3]);
        let json = serde_json::to_value(&req).expect("serialize request");

        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"][0]["type"], "text");
        assert_eq!(json["messages"][0]["content"][0]["text"], "count the pins");
        assert_eq!(json["messages"][0]["content"][1]["type"], "image_url");
        let url = json["messages"][0]["content"][1]["image_url"]["url"]
            .as_str()
            .expect("image url");
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"content":"The number is 7"}}],"model":"m1"}"#;
        let parsed: ChatResponse = serde_json::from_str(body).expect("parse response");
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("The number is 7")
        );
        assert_eq!(parsed.model.as_deref(), Some("m1"));
    }

    #[test]
    fn test_response_parsing_missing_content() {
        let body = r#"{"choices":[{"message":{}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).expect("parse response");
        assert!(parsed.choices[0].message.content.is_none());
        assert!(parsed.model.is_none());
    }
}
