//! `brescia`: the Brescia deck from its Wikimedia Commons category table.

mod extras;

pub use extras::run_extras;

use anyhow::{Context, Result};

use super::common::skip_or_abort;
use crate::cli::DownloadArgs;
use crate::config::CardforgeConfig;
use crate::fetch::{Fetcher, commons, pause, table};
use crate::logger::{status_success, status_warning};
use crate::utils::fs::{already_done, ensure_dir};
use crate::utils::plural::plural_count;
use crate::{debug, log};

const CATEGORY_URL: &str = "https://commons.wikimedia.org/wiki/Category:Brescia_deck";
const OUTPUT_DIR: &str = "brescia";
const DELAY_MS: u64 = 500;

pub fn run(config: &CardforgeConfig, args: &DownloadArgs) -> Result<()> {
    let out_dir = config.output.deck_dir(OUTPUT_DIR);
    ensure_dir(&out_dir)?;
    let fetcher = Fetcher::new(&config.fetch)?;
    let delay = config.fetch.delay_or(DELAY_MS);

    log!("brescia"; "scanning {CATEGORY_URL}");
    let html = fetcher
        .get_text(CATEGORY_URL)
        .context("Failed to fetch category page")?;

    let mut cards = table::parse_deck_table(&html);
    log!("brescia"; "found {} in the table", plural_count(cards.len(), "card"));
    for (id, page) in commons::brescia_extras(&html) {
        match cards.iter_mut().find(|(card, _)| *card == id) {
            Some(slot) => slot.1 = page,
            None => cards.push((id, page)),
        }
    }

    let mut saved = 0;
    for (id, page) in &cards {
        let file_name = id.file_name();
        let dest = out_dir.join(&file_name);
        if already_done(&dest, args.force) {
            debug!("brescia"; "{file_name} exists");
            continue;
        }

        log!("brescia"; "fetching {file_name}");
        match commons::download_file_page(&fetcher, page, &dest) {
            Ok(true) => {
                status_success(&format!("saved {file_name}"));
                saved += 1;
            }
            Ok(false) => status_warning(&format!("no download link for {file_name}")),
            Err(err) => skip_or_abort(&file_name, err)?,
        }
        pause(delay);
    }

    log!("done"; "{} saved to {}", plural_count(saved, "card"), out_dir.display());
    Ok(())
}
