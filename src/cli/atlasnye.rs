//! `atlasnye`: the Atlas deck from Wikimedia Commons.
//!
//! File names in the category are free-form (English and transliterated
//! Russian), so each one goes through the classifier to find its card.

use anyhow::{Context, Result};
use std::collections::HashSet;

use super::common::skip_or_abort;
use crate::cli::DownloadArgs;
use crate::config::CardforgeConfig;
use crate::core::Classifier;
use crate::core::url::{wiki_file_name, wiki_file_tail};
use crate::fetch::{Fetcher, commons, pause};
use crate::logger::{status_success, status_warning};
use crate::utils::fs::{already_done, ensure_dir};
use crate::utils::plural::plural_count;
use crate::{debug, log};

const CATEGORY_URL: &str = "https://commons.wikimedia.org/wiki/Category:SVG_Atlasnye_playing_cards";
const OUTPUT_DIR: &str = "atlasnye";
const DELAY_MS: u64 = 300;

pub fn run(config: &CardforgeConfig, args: &DownloadArgs) -> Result<()> {
    let out_dir = config.output.deck_dir(OUTPUT_DIR);
    ensure_dir(&out_dir)?;
    let fetcher = Fetcher::new(&config.fetch)?;
    let delay = config.fetch.delay_or(DELAY_MS);

    log!("atlasnye"; "scanning {CATEGORY_URL}");
    let html = fetcher
        .get_text(CATEGORY_URL)
        .context("Failed to fetch category page")?;
    let links = commons::file_page_links(&html);
    log!("atlasnye"; "found {} potential svg files", links.len());

    let mut classifier = Classifier::new();
    let mut collected = HashSet::new();

    for link in &links {
        // the classifier decodes; hand it the raw tail
        let name = wiki_file_name(link);
        let Some(id) = classifier.classify(wiki_file_tail(link)) else {
            debug!("atlasnye"; "ignored: {name}");
            continue;
        };
        if collected.contains(&id) {
            debug!("atlasnye"; "{id} already collected, skipping {name}");
            continue;
        }

        let file_name = id.file_name();
        let dest = out_dir.join(&file_name);
        if already_done(&dest, args.force) {
            debug!("atlasnye"; "{file_name} exists");
            collected.insert(id);
            continue;
        }

        log!("atlasnye"; "processing {name} -> {file_name}");
        match commons::download_file_page(&fetcher, link, &dest) {
            Ok(true) => {
                status_success(&format!("saved {file_name}"));
                collected.insert(id);
                pause(delay);
            }
            Ok(false) => status_warning(&format!("{name}: no svg source link found")),
            Err(err) => skip_or_abort(&name, err)?,
        }
    }

    let counters = classifier.counters();
    debug!("atlasnye"; "slots used: {} backs, {} jokers", counters.backs, counters.jokers);
    log!("done"; "{} collected in {}", plural_count(collected.len(), "card"), out_dir.display());
    Ok(())
}
