//! Sprite-sheet extraction.
//!
//! The htdebeer sheet keeps every card inside one top-level `<defs>`, keyed
//! `{suit}_{rank}` (`heart_queen`, `club_1`). Extracting a card yields a
//! standalone document: the sheet's root attributes, the shared `defs`
//! (without the extracted card), and the card itself, made visible.

use thiserror::Error;

use super::dom::Element;
use crate::core::{CardId, Rank, Suit};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no <defs> section found in sprite sheet")]
    MissingDefs,

    #[error("id `{0}` not found in sprite sheet")]
    MissingId(String),
}

/// Sheet key for a card, or `None` for extras the sheet does not carry.
pub fn sprite_key(id: &CardId) -> Option<String> {
    match id {
        CardId::Standard { rank, suit } => {
            let suit = match suit {
                Suit::Diamonds => "diamond",
                Suit::Hearts => "heart",
                Suit::Spades => "spade",
                Suit::Clubs => "club",
            };
            let rank = match rank {
                Rank::Jack => "jack".to_string(),
                Rank::Queen => "queen".to_string(),
                Rank::King => "king".to_string(),
                other => other.value().to_string(),
            };
            Some(format!("{suit}_{rank}"))
        }
        CardId::Back(1) => Some("back".into()),
        CardId::Joker(1) => Some("joker_red".into()),
        CardId::Joker(2) => Some("joker_black".into()),
        _ => None,
    }
}

/// Every card the sheet provides: the 52 standard cards plus `1B`, `1J`, `2J`.
pub fn sheet_cards() -> Vec<CardId> {
    CardId::standard_deck()
        .chain([CardId::Back(1), CardId::Joker(1), CardId::Joker(2)])
        .collect()
}

/// A parsed sprite sheet with a shared `defs` block.
pub struct SpriteSheet {
    root: Element,
}

impl SpriteSheet {
    /// Fails with [`ExtractError::MissingDefs`] when the root has no `defs`.
    pub fn new(root: Element) -> Result<Self, ExtractError> {
        if root.child("defs").is_none() {
            return Err(ExtractError::MissingDefs);
        }
        Ok(Self { root })
    }

    /// Standalone document for the subtree with id `key`.
    pub fn extract(&self, key: &str) -> Result<Element, ExtractError> {
        let mut defs = self
            .root
            .child("defs")
            .cloned()
            .ok_or(ExtractError::MissingDefs)?;
        let mut card = defs
            .take_by_id(key)
            .ok_or_else(|| ExtractError::MissingId(key.to_string()))?;
        reveal(&mut card);

        let mut doc = Element::new(self.root.name.clone());
        doc.attrs = self.root.attrs.clone();
        doc.push(defs);
        doc.push(card);
        Ok(doc)
    }
}

/// Clear `display` from the attribute and from an inline style.
fn reveal(el: &mut Element) {
    el.remove_attr("display");
    if let Some(style) = el.remove_attr("style") {
        let kept: Vec<&str> = style
            .split(';')
            .map(str::trim)
            .filter(|decl| {
                !decl.is_empty()
                    && decl
                        .split(':')
                        .next()
                        .is_none_or(|prop| prop.trim() != "display")
            })
            .collect();
        if !kept.is_empty() {
            el.attrs.push(("style".into(), kept.join(";")));
        }
    }
}
