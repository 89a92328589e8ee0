//! `ddl-extras`: backs and jokers fitted into the DDL card template.
//!
//! Wikimedia backs and jokers are whole cards with their own frames. They
//! are scaled into the DDL interior and clipped to its rounded corners.
//! The small size class gets generated text jokers instead.

use anyhow::Result;
use std::collections::HashMap;

use super::OUTPUT_DIR;
use crate::cli::common::{save_svg, skip_or_abort};
use crate::config::CardforgeConfig;
use crate::core::CardId;
use crate::fetch::Fetcher;
use crate::log;
use crate::logger::status_error;
use crate::svg::compose::{AssetClass, ComposeError, FitMode, FitOptions, composite_str};
use crate::svg::joker::{JokerColor, text_joker};
use crate::svg::template::CardTemplate;
use crate::svg::variant::SizeClass;
use crate::svg::Element;

const CARD_BACK: &str = "https://upload.wikimedia.org/wikipedia/commons/d/d4/Card_back_01.svg";
const JOKER_RED: &str = "https://upload.wikimedia.org/wikipedia/commons/8/82/Joker_red_02.svg";
const JOKER_BLACK: &str = "https://upload.wikimedia.org/wikipedia/commons/d/d0/Joker_black_02.svg";

/// Breathing room above and below downloaded jokers.
const JOKER_VERTICAL_PADDING: f64 = 16.0;

const DOWNLOADS: [(SizeClass, CardId, &str); 4] = [
    (SizeClass::Xl, CardId::Back(1), CARD_BACK),
    (SizeClass::Xl, CardId::Joker(1), JOKER_RED),
    (SizeClass::Xl, CardId::Joker(2), JOKER_BLACK),
    (SizeClass::Sm, CardId::Back(1), CARD_BACK),
];

const TEXT_JOKERS: [(CardId, JokerColor); 2] = [
    (CardId::Joker(1), JokerColor::Red),
    (CardId::Joker(2), JokerColor::Black),
];

/// Jokers fill the interior and lose their own border; backs keep their margin.
pub fn fit_options(id: &CardId) -> FitOptions {
    let class = AssetClass::of(id);
    match class {
        AssetClass::Joker => FitOptions::new(FitMode::Cover)
            .with_padding(JOKER_VERTICAL_PADDING)
            .with_overscale(class),
        _ => FitOptions::new(FitMode::Contain).with_overscale(class),
    }
}

/// Fit a downloaded asset into the DDL template.
pub fn fit_asset(text: &str, id: &CardId) -> Result<Element, ComposeError> {
    composite_str(text, &CardTemplate::ddl(), &fit_options(id))
}

/// Always overwrites.
pub fn run_extras(config: &CardforgeConfig) -> Result<()> {
    let out_dir = config.output.deck_dir(OUTPUT_DIR);
    let fetcher = Fetcher::new(&config.fetch)?;
    let mut sources: HashMap<&str, String> = HashMap::new();

    log!("ddl"; "processing DigitalDesignLabs extras");
    for (size, id, url) in DOWNLOADS {
        let dest = out_dir.join(size.dir_name()).join(id.file_name());
        if !sources.contains_key(url) {
            log!("ddl"; "downloading {url}");
            match fetcher.get_text(url) {
                Ok(text) => {
                    sources.insert(url, text);
                }
                Err(err) => {
                    skip_or_abort(url, err)?;
                    continue;
                }
            }
        }
        let Some(text) = sources.get(url) else { continue };

        match fit_asset(text, &id) {
            Ok(doc) => save_svg(&doc, &dest, false)?,
            Err(err) => status_error(&format!("{size}/{id}"), &err.to_string()),
        }
    }

    let template = CardTemplate::ddl();
    let sm_dir = out_dir.join(SizeClass::Sm.dir_name());
    for (id, color) in TEXT_JOKERS {
        save_svg(&text_joker(&template, color), &sm_dir.join(id.file_name()), false)?;
    }

    log!("done"; "extras written to {}", out_dir.display());
    Ok(())
}
