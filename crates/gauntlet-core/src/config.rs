//! Configuration management for Gauntlet.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. All UI wait budgets, post-click delays,
//! and retry budgets live here so that tuning them against the live widget
//! does not require code changes.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// This is loaded from `~/.config/gauntlet/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Vision-language model settings
    pub vlm: VlmConfig,
    /// Solver round/attempt budgets and recovery policy
    pub solver: SolverConfig,
    /// Run log and screenshot artifact settings
    pub artifacts: ArtifactConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `GAUNTLET_HEADLESS`: Override browser headless mode (true/false)
    /// - `GAUNTLET_MAX_ROUNDS`: Override the per-session round budget
    /// - `GAUNTLET_MAX_ATTEMPTS`: Override the per-round attempt budget
    /// - `GAUNTLET_DATA_DIR`: Override the artifact data directory
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env();
        Ok(config)
    }

    /// Apply environment variable overrides to an already-loaded config.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("GAUNTLET_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Ok(val) = std::env::var("GAUNTLET_MAX_ROUNDS") {
            if let Ok(rounds) = val.parse() {
                self.solver.max_rounds = rounds;
                tracing::debug!("Override solver.max_rounds from env: {}", rounds);
            }
        }

        if let Ok(val) = std::env::var("GAUNTLET_MAX_ATTEMPTS") {
            if let Ok(attempts) = val.parse() {
                self.solver.max_attempts_per_round = attempts;
                tracing::debug!("Override solver.max_attempts_per_round from env: {}", attempts);
            }
        }

        if let Ok(val) = std::env::var("GAUNTLET_DATA_DIR") {
            self.artifacts.data_dir = Some(PathBuf::from(val));
            tracing::debug!("Override artifacts.data_dir from env");
        }
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/gauntlet/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("io", "gauntlet", "gauntlet").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve the artifact data directory.
    ///
    /// Uses the configured override when present, otherwise the XDG data
    /// directory: `~/.local/share/gauntlet`
    pub fn data_dir(&self) -> ConfigResult<PathBuf> {
        if let Some(dir) = &self.artifacts.data_dir {
            return Ok(dir.clone());
        }
        let dirs =
            ProjectDirs::from("io", "gauntlet", "gauntlet").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// Browser automation settings.
///
/// Wait budgets fall into two classes: the long budget covers the iframe
/// handshake and initial widget load; the short budget covers per-attempt
/// controls (Next/Submit/Try again) that are either present quickly or not
/// at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run the browser without a visible window
    pub headless: bool,
    /// Wait budget in seconds for the handshake and widget load
    pub wait_timeout_secs: u64,
    /// Wait budget in seconds for per-attempt controls
    pub short_wait_timeout_secs: u64,
    /// Delay in milliseconds after clicking Next, while the widget swaps images
    pub post_click_delay_ms: u64,
    /// Delay in milliseconds after clicking Submit, while the widget verifies
    pub post_submit_delay_ms: u64,
    /// Delay in milliseconds before looking for the Try again control
    pub recovery_delay_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            wait_timeout_secs: 30,
            short_wait_timeout_secs: 10,
            post_click_delay_ms: 3000,
            post_submit_delay_ms: 5000,
            recovery_delay_ms: 10_000,
        }
    }
}

/// Vision-language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VlmConfig {
    /// Base URL of the OpenAI-compatible completions endpoint
    pub base_url: String,
    /// Model queried for the reference (left) image
    pub reference_model: String,
    /// Model queried for candidate (right) images and classification
    pub candidate_model: String,
    /// Per-request timeout in seconds; bounds per-attempt latency
    pub request_timeout_secs: u64,
}

impl Default for VlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            reference_model: "llama-3.2-11b-vision-preview".to_string(),
            candidate_model: "llama-3.2-90b-vision-preview".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Solver round/attempt budgets and recovery policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Rounds attempted per session
    pub max_rounds: u32,
    /// Candidate attempts per round
    pub max_attempts_per_round: u32,
    /// Click the "Try again" control after round 1 regardless of outcome.
    ///
    /// The widget presents a fresh challenge set after the first round; the
    /// observed flow clicks Try again unconditionally, which also discards a
    /// successful first-round solve. Disable to stop after a solved round 1.
    pub retry_after_first_round: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            max_attempts_per_round: 6,
            retry_after_first_round: true,
        }
    }
}

/// Run log and screenshot artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Override for the artifact data directory (default: XDG data dir)
    pub data_dir: Option<PathBuf>,
    /// File name of the append-only attempt log
    pub log_file_name: String,
    /// Directory name for persisted challenge screenshots
    pub screenshot_dir_name: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_file_name: "runs.csv".to_string(),
            screenshot_dir_name: "captcha_screenshots".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.browser.headless);
        assert_eq!(config.browser.wait_timeout_secs, 30);
        assert_eq!(config.browser.short_wait_timeout_secs, 10);
        assert_eq!(config.solver.max_rounds, 3);
        assert_eq!(config.solver.max_attempts_per_round, 6);
        assert!(config.solver.retry_after_first_round);
        assert_eq!(config.artifacts.log_file_name, "runs.csv");
        assert_eq!(config.vlm.request_timeout_secs, 60);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize config");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse config");
        assert_eq!(parsed.solver.max_rounds, config.solver.max_rounds);
        assert_eq!(parsed.vlm.reference_model, config.vlm.reference_model);
        assert_eq!(
            parsed.browser.post_submit_delay_ms,
            config.browser.post_submit_delay_ms
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: AppConfig =
            toml::from_str("[solver]\nmax_rounds = 5\n").expect("parse partial config");
        assert_eq!(parsed.solver.max_rounds, 5);
        // Not listed in the file, so defaults apply
        assert_eq!(parsed.solver.max_attempts_per_round, 6);
        assert!(parsed.browser.headless);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        std::env::set_var("GAUNTLET_MAX_ROUNDS", "7");
        std::env::set_var("GAUNTLET_HEADLESS", "false");
        config.apply_env();
        std::env::remove_var("GAUNTLET_MAX_ROUNDS");
        std::env::remove_var("GAUNTLET_HEADLESS");

        assert_eq!(config.solver.max_rounds, 7);
        assert!(!config.browser.headless);
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = AppConfig::default();
        config.artifacts.data_dir = Some(PathBuf::from("/tmp/gauntlet-test"));
        let dir = config.data_dir().expect("resolve data dir");
        assert_eq!(dir, PathBuf::from("/tmp/gauntlet-test"));
    }
}
