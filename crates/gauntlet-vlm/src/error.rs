//! Error types for the VLM boundary.

use thiserror::Error;

/// Errors that can occur while querying a vision-language model.
#[derive(Error, Debug)]
pub enum VlmError {
    /// API error with status code
    #[error("API error ({provider}): status {status}, {message}")]
    Api {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Response parsing error
    #[error("failed to parse response from {provider}: {message}")]
    Parse {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using `VlmError`.
pub type Result<T> = std::result::Result<T, VlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = VlmError::Api {
            provider: "groq".to_string(),
            status: 429,
            message: "rate limit".to_string(),
        };
        assert!(err.to_string().contains("groq"));
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = VlmError::Parse {
            provider: "groq".to_string(),
            message: "no choices in response".to_string(),
        };
        assert!(err.to_string().contains("no choices"));
    }
}
