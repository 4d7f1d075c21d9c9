//! Error types for the solver.
//!
//! Only conditions that end the session surface here: a required UI
//! control that never appears, a screenshot that cannot be decoded, or a
//! failure persisting artifacts. Extraction failures, mismatches, and VLM
//! provider errors are absorbed by the controller loop as state
//! transitions, never raised.

use thiserror::Error;

/// Session-fatal solver errors.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A required UI control could not be driven within its wait budget
    #[error("UI error: {0}")]
    Ui(#[from] gauntlet_browser::BrowserError),

    /// Screenshot decode or image encode failure
    #[error("vision error: {0}")]
    Vision(#[from] gauntlet_vision::VisionError),

    /// Failure writing the run log or screenshot artifacts
    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] gauntlet_core::ConfigError),
}

/// Result type alias using `SolverError`.
pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;
    use gauntlet_browser::BrowserError;

    #[test]
    fn test_ui_error_conversion() {
        let err: SolverError = BrowserError::Timeout("button".to_string()).into();
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SolverError = io.into();
        assert!(err.to_string().contains("artifact I/O error"));
    }
}
