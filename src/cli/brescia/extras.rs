//! `brescia-extras`: synthesized backs and jokers for the Brescia deck.

use anyhow::Result;

use crate::cli::common::save_svg;
use crate::config::CardforgeConfig;
use crate::log;
use crate::svg::brescia;
use crate::utils::plural::plural_count;

use super::OUTPUT_DIR;

/// Always overwrites: the output is deterministic.
pub fn run_extras(config: &CardforgeConfig) -> Result<()> {
    let out_dir = config.output.deck_dir(OUTPUT_DIR);
    let extras = brescia::extras();
    log!("brescia"; "generating {}", plural_count(extras.len(), "card"));

    for (id, doc) in &extras {
        save_svg(doc, &out_dir.join(id.file_name()), false)?;
    }
    log!("done"; "extras written to {}", out_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_all_extras() {
        let temp = TempDir::new().unwrap();
        let mut config = CardforgeConfig::default();
        config.output.root = temp.path().to_path_buf();

        run_extras(&config).unwrap();

        for name in ["1B.svg", "2B.svg", "1J.svg", "2J.svg"] {
            let path = temp.path().join("brescia").join(name);
            let text = std::fs::read_to_string(&path).unwrap();
            assert!(text.starts_with("<svg"), "{name}");
        }
    }
}
