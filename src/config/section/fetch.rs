//! `[fetch]` section configuration.
//!
//! HTTP settings shared by every download command.
//!
//! # Example
//!
//! ```toml
//! [fetch]
//! user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)"
//! timeout_secs = 30           # Per-request timeout
//! delay_ms = 300              # Pause after each download (default: per command)
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Browser-like agent; Wikimedia rejects some default client agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Courtesy delay after each download, in milliseconds.
    /// Unset means the command's own default.
    pub delay_ms: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            delay_ms: None,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured delay, or `default_ms` when unset.
    pub fn delay_or(&self, default_ms: u64) -> Duration {
        Duration::from_millis(self.delay_ms.unwrap_or(default_ms))
    }
}
