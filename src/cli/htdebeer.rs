//! `htdebeer`: split the htdebeer SVG-cards sprite sheet into one file per card.

use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

use super::common::save_svg;
use crate::config::CardforgeConfig;
use crate::fetch::Fetcher;
use crate::log;
use crate::logger::status_error;
use crate::svg::dom;
use crate::svg::sprite::{ExtractError, SpriteSheet, sheet_cards, sprite_key};
use crate::utils::fs::ensure_dir;

const SHEET_URL: &str = "https://raw.githubusercontent.com/htdebeer/SVG-cards/master/svg-cards.svg";
const SHEET_FILE: &str = "svg-cards.svg";
const OUTPUT_DIR: &str = "htdebeer";

/// Cards written and cards whose id was missing from the sheet.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Extracted {
    pub saved: usize,
    pub missing: usize,
}

pub fn run(config: &CardforgeConfig, input: Option<&Path>) -> Result<()> {
    let out_dir = config.output.deck_dir(OUTPUT_DIR);
    if out_dir.exists() {
        bail!(
            "Output directory already exists: {}\nDelete or move it before re-running.",
            out_dir.display()
        );
    }

    let sheet_path = input.map_or_else(|| config.output.root.join(SHEET_FILE), PathBuf::from);
    if !sheet_path.exists() {
        log!("htdebeer"; "downloading {SHEET_FILE}");
        Fetcher::new(&config.fetch)?
            .download_to(SHEET_URL, &sheet_path)
            .context("Failed to download sprite sheet")?;
    }

    let text = fs::read_to_string(&sheet_path)
        .with_context(|| format!("Failed to read '{}'", sheet_path.display()))?;
    let root = dom::parse(&text)
        .with_context(|| format!("Failed to parse '{}'", sheet_path.display()))?;
    let sheet = SpriteSheet::new(root)?;

    ensure_dir(&out_dir)?;
    let cards = sheet_cards();
    log!("htdebeer"; "extracting {} cards to {}", cards.len(), out_dir.display());
    let result = extract_all(&sheet, &out_dir)?;
    log!("done"; "{} saved, {} missing", result.saved, result.missing);
    Ok(())
}

/// Write every card the sheet provides into `out_dir`.
pub fn extract_all(sheet: &SpriteSheet, out_dir: &Path) -> Result<Extracted> {
    let mut result = Extracted::default();
    for id in sheet_cards() {
        let Some(key) = sprite_key(&id) else { continue };
        match sheet.extract(&key) {
            Ok(doc) => {
                save_svg(&doc, &out_dir.join(id.file_name()), true)?;
                result.saved += 1;
            }
            Err(err @ ExtractError::MissingId(_)) => {
                status_error(&id.file_name(), &err.to_string());
                result.missing += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(result)
}
