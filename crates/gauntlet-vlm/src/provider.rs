//! Core VLM provider trait and reply type.

use crate::error::Result;
use async_trait::async_trait;

/// Trait for vision-language model backends.
///
/// Implementations must be thread-safe (`Send + Sync`) for use in async
/// contexts. Requests are synchronous from the caller's point of view: one
/// prompt plus one image in, one free-text reply out, bounded by the
/// provider's configured request timeout.
#[async_trait]
pub trait VlmProvider: Send + Sync {
    /// Send a prompt and a JPEG image, returning the model's free-text reply.
    ///
    /// # Errors
    /// Returns error if the provider fails, network issues occur, or the
    /// response cannot be parsed. Callers in the solver treat any error here
    /// as an absent response.
    async fn describe_image(&self, prompt: &str, image_jpeg: &[u8]) -> Result<VlmReply>;

    /// Identifier of the model this provider queries, recorded in run logs.
    fn model_name(&self) -> &str;
}

/// Reply from a vision-language model query.
#[derive(Debug, Clone)]
pub struct VlmReply {
    /// The generated text
    pub content: String,
    /// Model that generated the reply
    pub model: String,
}
