//! Gauntlet Solver - round/attempt orchestration for visual challenges.
//!
//! The challenge widget presents a reference value on the left and a
//! sequence of candidate images on the right; the solver extracts both
//! sides with a vision-language model and submits when they agree. Each
//! attempt is appended to a durable run log, together with the persisted
//! screenshot halves, so runs double as labeled-dataset collection.
//!
//! # Components
//!
//! - [`extract`] - parse free-text model replies into typed answers
//! - [`classify`] - determine the session's task kind once, with fallback
//! - [`prompts`] - per-kind prompt pairs, fixed for the session
//! - [`runlog`] - append-only attempt log and screenshot artifacts
//! - [`session`] - the round/attempt state machine
//!
//! # Example
//!
//! ```rust,ignore
//! use gauntlet_solver::ChallengeSession;
//! use std::sync::Arc;
//!
//! let mut session = ChallengeSession::new(
//!     Arc::new(frame),
//!     Arc::new(reference_vlm),
//!     Arc::new(candidate_vlm),
//!     config,
//!     locators,
//! )?;
//!
//! session.authenticate().await?;
//! let outcome = session.solve().await?;
//! println!("solved: {}", outcome.solved);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod classify;
pub mod error;
pub mod extract;
pub mod prompts;
pub mod runlog;
pub mod session;

pub use classify::{Classification, ClassificationSource};
pub use error::{Result, SolverError};
pub use extract::{extract, Extraction};
pub use prompts::{PromptSet, CLASSIFY_PROMPT};
pub use runlog::{ArtifactStore, AttemptRecord, RunLogger};
pub use session::{ChallengeSession, RoundOutcome, SessionOutcome};
