//! Output file helpers.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Create `dir` and its parents.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory '{}'", dir.display()))
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write '{}'", path.display()))
}

/// An existing output file marks the card as done.
pub fn already_done(path: &Path, force: bool) -> bool {
    !force && path.is_file()
}
