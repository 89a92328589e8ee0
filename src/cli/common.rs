//! Helpers shared by the download commands.

use anyhow::Result;
use std::path::Path;

use crate::fetch::FetchError;
use crate::logger::{status_error, status_success};
use crate::svg::Element;
use crate::utils::fs::write_file;

/// Record a per-item fetch failure and keep going; scheme violations
/// abort the whole command.
pub fn skip_or_abort(item: &str, err: FetchError) -> Result<()> {
    if err.is_fatal() {
        return Err(err.into());
    }
    status_error(item, &err.to_string());
    Ok(())
}

/// Serialize `doc` and write it to `path`.
pub fn save_svg(doc: &Element, path: &Path, xml_declaration: bool) -> Result<()> {
    let text = doc.to_document(xml_declaration)?;
    write_file(path, text)?;
    status_success(&format!("saved {}", path.display()));
    Ok(())
}
