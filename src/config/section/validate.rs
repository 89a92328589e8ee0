//! `[validate]` section configuration.
//!
//! Settings for `cardforge validate`. CLI flags can only switch checks on.
//!
//! # Example
//!
//! ```toml
//! [validate]
//! timeout_secs = 10           # Kill external validators after this long
//! svgcheck = false            # Also run `svgcheck`
//! render = false              # Also parse every file with usvg
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Timeout for each external validator run, in seconds.
    pub timeout_secs: u64,

    /// Run the `svgcheck` validator.
    pub svgcheck: bool,

    /// Check that `usvg` can build a render tree.
    pub render: bool,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            svgcheck: false,
            render: false,
        }
    }
}

impl ValidateConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
