//! Locator specs for challenge widget controls.
//!
//! The production selectors are tied to a third-party widget's live DOM and
//! will rot; they are carried here as configurable defaults rather than
//! hard-coded at the call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A locator spec: a CSS selector plus an optional visible-text filter.
///
/// CSS cannot match on element text, so controls identified by their label
/// ("Submit", "Try again") pair a broad selector with a text substring
/// filter applied to the matched elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    /// CSS selector to query
    pub css: String,
    /// Optional case-sensitive substring the element's visible text must contain
    pub text: Option<String>,
}

impl Locator {
    /// Locator matching purely on a CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            css: selector.into(),
            text: None,
        }
    }

    /// Locator for a `button` carrying the given visible text.
    pub fn button_text(text: impl Into<String>) -> Self {
        Self {
            css: "button".to_string(),
            text: Some(text.into()),
        }
    }

}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} (text: {text:?})", self.css),
            None => write!(f, "{}", self.css),
        }
    }
}

/// The full set of controls the solver drives, with observed defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeLocators {
    /// The embedded challenge iframe
    pub challenge_frame: Locator,
    /// Document root inside the frame, screenshot target
    pub frame_root: Locator,
    /// Authenticate/Verify button starting the handshake
    pub authenticate: Locator,
    /// Submit button committing the current candidate
    pub submit: Locator,
    /// Link advancing to the next candidate image
    pub next_image: Locator,
    /// Recovery button presenting a fresh challenge set
    pub try_again: Locator,
}

impl Default for ChallengeLocators {
    fn default() -> Self {
        Self {
            challenge_frame: Locator::css("iframe[src*='arkoselabs.com']"),
            frame_root: Locator::css("html"),
            authenticate: Locator::button_text("Authenticate"),
            submit: Locator::button_text("Submit"),
            next_image: Locator::css("a[aria-label='Navigate to next image']"),
            try_again: Locator::button_text("Try again"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_locator() {
        let loc = Locator::css("iframe");
        assert_eq!(loc.css, "iframe");
        assert!(loc.text.is_none());
    }

    #[test]
    fn test_button_text_locator() {
        let loc = Locator::button_text("Submit");
        assert_eq!(loc.css, "button");
        assert_eq!(loc.text.as_deref(), Some("Submit"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Locator::css("html").to_string(), "html");
        assert_eq!(
            Locator::button_text("Try again").to_string(),
            "button (text: \"Try again\")"
        );
    }

    #[test]
    fn test_defaults_serde_round_trip() {
        let locators = ChallengeLocators::default();
        assert!(locators.challenge_frame.css.contains("arkoselabs"));

        let json = serde_json::to_string(&locators).expect("serialize");
        let back: ChallengeLocators = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.submit, locators.submit);
        assert_eq!(back.next_image, locators.next_image);
    }
}
