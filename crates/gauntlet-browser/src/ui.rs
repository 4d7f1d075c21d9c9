use crate::error::Result;
use crate::locator::Locator;
use std::time::Duration;

/// UI primitives the challenge solver consumes.
///
/// The solver never depends on a specific automation product beyond these
/// operations; tests drive it with in-memory implementations.
#[async_trait::async_trait]
pub trait ChallengeUi: Send + Sync {
    /// Take a PNG screenshot of the challenge document root.
    async fn screenshot_frame(&self) -> Result<Vec<u8>>;

    /// Poll until an element matching the locator is present and clickable.
    ///
    /// Returns `BrowserError::Timeout` when the budget elapses; for the
    /// required session controls that condition is fatal upstream.
    async fn find_clickable(&self, locator: &Locator, timeout: Duration) -> Result<()>;

    /// Click the first element matching the locator.
    async fn click(&self, locator: &Locator) -> Result<()>;

    /// Check whether an element matching the locator is currently present,
    /// without waiting.
    async fn is_present(&self, locator: &Locator) -> Result<bool>;

    /// Move the automation context into the embedded challenge frame.
    async fn enter_challenge_frame(&self, locator: &Locator, timeout: Duration) -> Result<()>;

    /// Report the browser's user agent string.
    async fn user_agent(&self) -> Result<String>;
}
