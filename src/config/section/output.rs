//! `[output]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [output]
//! root = "~/cards"            # Deck directories are created under this path
//! ```
//!
//! Relative paths resolve against the directory holding `cardforge.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Parent directory of `atlasnye/`, `brescia/`, `htdebeer/`, ...
    pub root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl OutputConfig {
    /// Directory for one deck, e.g. `root/atlasnye`.
    pub fn deck_dir(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root.join(name)
    }

    /// Expand `~` and anchor a relative root at `base`.
    pub fn resolve(&mut self, base: &Path) {
        let raw = self.root.to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
        self.root = if expanded.is_relative() {
            base.join(expanded)
        } else {
            expanded
        };
    }
}
