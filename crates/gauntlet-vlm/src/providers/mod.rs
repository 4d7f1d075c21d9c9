//! VLM provider implementations.

pub mod common;
pub mod groq;
pub mod openai_compat;

pub use groq::GroqProvider;
pub use openai_compat::OpenAiCompatProvider;
