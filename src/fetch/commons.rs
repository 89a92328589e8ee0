//! Wikimedia Commons scraping.
//!
//! Category pages link to file description pages (`/wiki/File:...svg`);
//! each description page links to the raw upload.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{FetchError, Fetcher};
use crate::core::CardId;
use crate::core::url::join_web_url;

pub const COMMONS_BASE: &str = "https://commons.wikimedia.org";

static FILE_PAGE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="(/wiki/File:[^"]+\.svg)""#).unwrap());

static UPLOAD_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href="(https://upload\.wikimedia\.org/wikipedia/commons/[^"]+\.svg)""#).unwrap()
});

static BACK_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href="(/wiki/File:[^"]*?(?:dorso|back)[^"]*?\.svg)""#).unwrap()
});

static JOKER_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href="(/wiki/File:[^"]*?(?:jolly|joker)[^"]*?\.svg)""#).unwrap()
});

/// File description pages linked from a category page, deduplicated and sorted.
pub fn file_page_links(html: &str) -> Vec<String> {
    let mut links: Vec<String> = FILE_PAGE_LINK
        .captures_iter(html)
        .map(|c| c[1].to_string())
        .collect();
    links.sort();
    links.dedup();
    links
}

/// Raw upload URL on a file description page.
pub fn upload_url(html: &str) -> Option<String> {
    UPLOAD_LINK.captures(html).map(|c| c[1].to_string())
}

/// Back and joker pages on a category page: the first back link becomes
/// `1B`, the first two distinct joker links in sorted order `1J` and `2J`.
pub fn brescia_extras(html: &str) -> Vec<(CardId, String)> {
    let mut extras = Vec::new();
    if let Some(c) = BACK_LINK.captures(html) {
        extras.push((CardId::Back(1), c[1].to_string()));
    }

    let mut jokers: Vec<&str> = JOKER_LINK
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    jokers.sort_unstable();
    jokers.dedup();
    extras.extend(
        jokers
            .into_iter()
            .take(2)
            .zip(1..)
            .map(|(href, n)| (CardId::Joker(n), href.to_string())),
    );
    extras
}

/// Download the SVG behind a file description page into `dest`.
///
/// Returns `Ok(false)` when the page carries no upload link.
pub fn download_file_page(
    fetcher: &Fetcher,
    page_path: &str,
    dest: &Path,
) -> Result<bool, FetchError> {
    let page_url = join_web_url(COMMONS_BASE, page_path)?;
    let html = fetcher.get_text(page_url.as_str())?;
    let Some(raw) = upload_url(&html) else {
        return Ok(false);
    };
    fetcher.download_to(&raw, dest)?;
    Ok(true)
}
