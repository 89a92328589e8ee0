//! `ddl`: DigitalDesignLabs responsive cards, split per size class.

mod extras;

pub use extras::run_extras;

use anyhow::Result;
use std::path::Path;

use super::common::skip_or_abort;
use crate::cli::DownloadArgs;
use crate::config::CardforgeConfig;
use crate::core::{CardId, Rank, Suit};
use crate::fetch::Fetcher;
use crate::logger::{status_error, status_success, status_warning};
use crate::svg::dom;
use crate::svg::variant::{self, SizeClass};
use crate::utils::fs::{ensure_dir, write_file};
use crate::utils::plural::plural_count;
use crate::{debug, log};

const BASE_URL: &str =
    "https://raw.githubusercontent.com/digitaldesignlabs/responsive-playing-cards/main/minified/";
const OUTPUT_DIR: &str = "digitaldesignlabs";

/// Source path of a card inside the repository, e.g. `hearts/qh.svg`.
pub fn source_path(rank: Rank, suit: Suit) -> String {
    let folder = match suit {
        Suit::Spades => "spades",
        Suit::Hearts => "hearts",
        Suit::Diamonds => "diamonds",
        Suit::Clubs => "clubs",
    };
    let rank = match rank {
        Rank::Jack => "j".to_string(),
        Rank::Queen => "q".to_string(),
        Rank::King => "k".to_string(),
        other => other.value().to_string(),
    };
    let suit = suit.code().to_ascii_lowercase();
    format!("{folder}/{rank}{suit}.svg")
}

/// Split one downloaded card and write its renditions under `out_dir`.
///
/// Returns the size classes written, or `None` when the card has no `viewBox`.
pub fn save_variants(text: &str, out_dir: &Path, file_name: &str) -> Result<Option<Vec<SizeClass>>> {
    let root = dom::parse(text)?;
    let Some(variants) = variant::split(&root) else {
        return Ok(None);
    };

    let mut sizes = Vec::with_capacity(variants.len());
    for v in &variants {
        let path = out_dir.join(v.size.dir_name()).join(file_name);
        write_file(&path, v.document.to_document(false)?)?;
        sizes.push(v.size);
    }
    Ok(Some(sizes))
}

fn already_split(out_dir: &Path, file_name: &str) -> bool {
    SizeClass::ALL
        .iter()
        .any(|size| out_dir.join(size.dir_name()).join(file_name).is_file())
}

pub fn run(config: &CardforgeConfig, args: &DownloadArgs) -> Result<()> {
    let out_dir = config.output.deck_dir(OUTPUT_DIR);
    ensure_dir(&out_dir)?;
    let fetcher = Fetcher::new(&config.fetch)?;

    log!("ddl"; "processing DigitalDesignLabs");
    let mut saved = 0;
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            let file_name = CardId::new(rank, suit).file_name();
            if !args.force && already_split(&out_dir, &file_name) {
                debug!("ddl"; "{file_name} exists");
                continue;
            }

            let src = source_path(rank, suit);
            log!("ddl"; "{src} -> {file_name}");
            let text = match fetcher.get_text(&format!("{BASE_URL}{src}")) {
                Ok(text) => text,
                Err(err) => {
                    skip_or_abort(&src, err)?;
                    continue;
                }
            };

            match save_variants(&text, &out_dir, &file_name) {
                Ok(Some(sizes)) => {
                    let sizes: Vec<_> = sizes.iter().map(|s| s.dir_name()).collect();
                    status_success(&format!("{file_name} [{}]", sizes.join(", ")));
                    saved += 1;
                }
                Ok(None) => status_warning(&format!("{src}: no viewBox, skipped")),
                Err(err) => status_error(&src, &format!("{err:#}")),
            }
        }
    }

    log!("done"; "{} split into {}", plural_count(saved, "card"), out_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_source_path() {
        assert_eq!(source_path(Rank::Ace, Suit::Spades), "spades/1s.svg");
        assert_eq!(source_path(Rank::Ten, Suit::Hearts), "hearts/10h.svg");
        assert_eq!(source_path(Rank::Queen, Suit::Diamonds), "diamonds/qd.svg");
        assert_eq!(source_path(Rank::Seven, Suit::Clubs), "clubs/7c.svg");
    }

    #[test]
    fn test_save_variants_per_size() {
        let temp = TempDir::new().unwrap();
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 280">
<g id="x-large"><rect/></g><g id="small" style="display:none"><rect/></g></svg>"#;

        let sizes = save_variants(text, temp.path(), "QH.svg").unwrap().unwrap();

        assert_eq!(sizes, [SizeClass::Xl, SizeClass::Sm]);
        let sm = std::fs::read_to_string(temp.path().join("sm/QH.svg")).unwrap();
        assert!(sm.starts_with("<svg"));
        assert!(!sm.contains("display"));
        assert!(already_split(temp.path(), "QH.svg"));
        assert!(!already_split(temp.path(), "KH.svg"));
    }

    #[test]
    fn test_save_variants_without_viewbox() {
        let temp = TempDir::new().unwrap();
        let result = save_variants(r#"<svg width="10" height="10"/>"#, temp.path(), "AS.svg");
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_save_variants_malformed() {
        let temp = TempDir::new().unwrap();
        assert!(save_variants("<svg><g></svg>", temp.path(), "AS.svg").is_err());
    }
}
