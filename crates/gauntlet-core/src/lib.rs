//! Gauntlet Core - Foundation crate for the Gauntlet challenge solver.
//!
//! This crate provides shared types, error handling, and configuration
//! management that all other Gauntlet crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared domain types (`TaskKind`, `ExtractedValue`, run keys)
//!
//! # Example
//!
//! ```rust
//! use gauntlet_core::{AppConfig, TaskKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration
//! let config = AppConfig::default();
//! assert_eq!(config.solver.max_rounds, 3);
//!
//! // Task kinds carry their wire names
//! assert_eq!(TaskKind::SeatLabel.as_str(), "seats");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, ArtifactConfig, BrowserConfig, SolverConfig, VlmConfig};
pub use error::{ConfigError, ConfigResult};
pub use types::{run_key, ExtractedValue, TaskKind};
