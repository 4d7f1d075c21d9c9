//! Gauntlet VLM - vision-language model boundary.
//!
//! This crate provides a unified interface for querying vision-language
//! models with an image plus a text prompt. The solver treats these models
//! as unreliable text-generation oracles: any provider failure upstream is
//! absorbed as an extraction failure, never a crash.
//!
//! # Example
//!
//! ```rust,ignore
//! use gauntlet_vlm::{GroqProvider, VlmProvider};
//!
//! let provider = GroqProvider::new(api_key, "llama-3.2-11b-vision-preview")?;
//! let reply = provider
//!     .describe_image("What is the number on the picture?", &jpeg_bytes)
//!     .await?;
//! println!("{}", reply.content);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod provider;
pub mod providers;

pub use error::{Result, VlmError};
pub use provider::{VlmProvider, VlmReply};
pub use providers::{GroqProvider, OpenAiCompatProvider};
