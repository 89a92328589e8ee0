//! Configuration management for `cardforge.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── fetch      # [fetch]
//! │   ├── output     # [output]
//! │   └── validate   # [validate]
//! ├── error          # ConfigError
//! └── mod.rs         # CardforgeConfig (this file)
//! ```
//!
//! The file is optional: a missing `cardforge.toml` means defaults.
//! CLI flags are applied on top of whatever was loaded.

mod error;
pub mod section;

pub use error::ConfigError;
pub use section::{FetchConfig, OutputConfig, ValidateConfig};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing cardforge.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardforgeConfig {
    /// HTTP settings
    pub fetch: FetchConfig,

    /// Output locations
    pub output: OutputConfig,

    /// Validation settings
    pub validate: ValidateConfig,
}

impl CardforgeConfig {
    /// Load configuration for a parsed command line.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = if cli.config.is_absolute() {
            cli.config.clone()
        } else {
            cwd.join(&cli.config)
        };

        let mut config = if config_path.is_file() {
            debug!("config"; "loading {}", config_path.display());
            Self::from_path(&config_path)?
        } else {
            debug!("config"; "{} not found, using defaults", config_path.display());
            Self::default()
        };

        let base = config_path.parent().unwrap_or(&cwd).to_path_buf();
        config.output.resolve(&base);
        config.apply_cli(cli, &cwd);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let (config, _) = Self::parse_with_ignored(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply CLI overrides.
    fn apply_cli(&mut self, cli: &Cli, cwd: &Path) {
        if let Some(output) = &cli.output {
            let expanded = PathBuf::from(shellexpand::tilde(&output.to_string_lossy()).into_owned());
            self.output.root = cwd.join(expanded);
        }

        if let Commands::Validate { args } = &cli.command {
            self.validate.svgcheck |= args.svgcheck;
            self.validate.render |= args.render;
        }
    }

    /// Reject values no command can work with.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation("[fetch] user_agent must not be empty".into()).into());
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Validation("[fetch] timeout_secs must be positive".into()).into());
        }
        if self.validate.timeout_secs == 0 {
            return Err(
                ConfigError::Validation("[validate] timeout_secs must be positive".into()).into(),
            );
        }
        Ok(())
    }
}
