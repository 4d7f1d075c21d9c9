//! Chromium-backed implementation of the [`ChallengeUi`] boundary.

use crate::error::{BrowserError, Result};
use crate::locator::Locator;
use crate::ui::ChallengeUi;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::{Duration, Instant};

/// Interval between locator lookups while waiting for a control.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chromium-driven challenge frame.
///
/// Holds the launched browser alongside the page so the CDP connection
/// stays alive for the session's lifetime.
pub struct ChallengeFrame {
    #[allow(dead_code)]
    browser: Browser,
    page: Page,
    root: Locator,
}

impl ChallengeFrame {
    /// Launch a browser and open a blank page.
    ///
    /// `root` is the screenshot target inside the challenge document,
    /// normally the `html` element.
    pub async fn launch(headless: bool, root: Locator) -> Result<Self> {
        let mut builder = BrowserConfig::builder().no_sandbox();
        if !headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Drain CDP events for the lifetime of the connection.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        Ok(Self {
            browser,
            page,
            root,
        })
    }

    /// Navigate the page to the given URL.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
        Ok(())
    }

    /// Resolve a locator to its first matching element, applying the
    /// visible-text filter when present.
    async fn resolve(&self, locator: &Locator) -> Result<Element> {
        let elements = self
            .page
            .find_elements(locator.css.as_str())
            .await
            .map_err(|_| BrowserError::SelectorNotFound(locator.to_string()))?;

        match &locator.text {
            None => elements
                .into_iter()
                .next()
                .ok_or_else(|| BrowserError::SelectorNotFound(locator.to_string())),
            Some(needle) => {
                for element in elements {
                    if let Ok(Some(text)) = element.inner_text().await {
                        if text.contains(needle.as_str()) {
                            return Ok(element);
                        }
                    }
                }
                Err(BrowserError::SelectorNotFound(locator.to_string()))
            }
        }
    }
}

#[async_trait::async_trait]
impl ChallengeUi for ChallengeFrame {
    async fn screenshot_frame(&self) -> Result<Vec<u8>> {
        let root = self.resolve(&self.root).await?;
        root.screenshot(CaptureScreenshotFormat::Png)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    async fn find_clickable(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.resolve(locator).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(locator.to_string()));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let element = self.resolve(locator).await?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn is_present(&self, locator: &Locator) -> Result<bool> {
        Ok(self.resolve(locator).await.is_ok())
    }

    async fn enter_challenge_frame(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        self.find_clickable(locator, timeout).await?;
        let iframe = self.resolve(locator).await?;

        // Drive the challenge document directly: navigating to the iframe's
        // src puts every subsequent lookup inside the widget without frame
        // indirection.
        let src = iframe
            .attribute("src")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?
            .ok_or_else(|| {
                BrowserError::NavigationError(format!("challenge frame {locator} has no src"))
            })?;

        tracing::debug!("Entering challenge frame at {}", src);
        self.goto(&src).await
    }

    async fn user_agent(&self) -> Result<String> {
        self.page
            .evaluate("navigator.userAgent")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?
            .into_value::<String>()
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }
}
