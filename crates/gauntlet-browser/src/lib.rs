//! Browser automation boundary for the Gauntlet challenge solver.
//!
//! The solver consumes a small set of UI primitives: screenshot the
//! challenge document, wait for a control to become clickable, click it,
//! and enter the challenge frame. This crate defines that boundary as the
//! [`ChallengeUi`] trait and provides a chromiumoxide-backed
//! implementation, [`ChallengeFrame`].

pub mod error;
pub mod frame;
pub mod locator;
pub mod ui;

pub use error::{BrowserError, Result};
pub use frame::ChallengeFrame;
pub use locator::{ChallengeLocators, Locator};
pub use ui::ChallengeUi;
