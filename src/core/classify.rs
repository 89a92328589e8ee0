//! Filename → card identifier classification.
//!
//! Wikimedia category files follow no single naming scheme: English words,
//! Russian transliterations (`chervi`, `bubny`, `korol`, `tuz`) and bare
//! numbers all occur. The classifier checks, in order:
//!
//! 1. back keywords → next back slot (at most [`MAX_BACKS`])
//! 2. joker keywords → next joker slot (unbounded)
//! 3. the first matching suit and the first matching rank
//!
//! Table order is significant: the first hit wins, so reordering the tables
//! changes which card an ambiguous filename becomes.

use std::sync::LazyLock;

use regex::Regex;

use super::card::{CardId, Rank, Suit};
use super::url;

/// Number of back slots handed out per run; further backs are dropped.
pub const MAX_BACKS: u32 = 2;

const BACK_KEYWORDS: [&str; 3] = ["back", "rubashka", "dorso"];
const JOKER_KEYWORDS: [&str; 2] = ["joker", "jolly"];

/// Suit keyword table, in precedence order.
static SUIT_TABLE: LazyLock<Vec<(Suit, Regex)>> = LazyLock::new(|| {
    [
        (Suit::Hearts, "heart|chervi|worm"),
        (Suit::Diamonds, "diamond|bubn"),
        (Suit::Clubs, "club|tref"),
        (Suit::Spades, "spade|pik"),
    ]
    .into_iter()
    .map(|(suit, pattern)| (suit, Regex::new(pattern).expect("static suit pattern")))
    .collect()
});

/// Rank keyword table, in precedence order.
///
/// Numeric entries only match a standalone number: `10` inside `100` or
/// `2` inside `2012` are not ranks.
static RANK_TABLE: LazyLock<Vec<(Rank, Regex)>> = LazyLock::new(|| {
    [
        (Rank::Ace, format!("ace|tuz|{}", standalone("1"))),
        (Rank::King, "king|korol".to_string()),
        (Rank::Queen, "queen|dama".to_string()),
        (Rank::Jack, "jack|knave|valet".to_string()),
        (Rank::Ten, standalone("10")),
        (Rank::Nine, standalone("9")),
        (Rank::Eight, standalone("8")),
        (Rank::Seven, standalone("7")),
        (Rank::Six, standalone("6")),
        (Rank::Five, standalone("5")),
        (Rank::Four, standalone("4")),
        (Rank::Three, standalone("3")),
        (Rank::Two, standalone("2")),
    ]
    .into_iter()
    .map(|(rank, pattern)| (rank, Regex::new(&pattern).expect("static rank pattern")))
    .collect()
});

/// Pattern for a number not embedded in a longer digit run.
fn standalone(number: &str) -> String {
    format!("(?:^|[^0-9]){number}(?:[^0-9]|$)")
}

/// Per-run slot counters for extras. A fresh classifier starts at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotCounters {
    pub backs: u32,
    pub jokers: u32,
}

/// Stateful filename classifier for one run.
#[derive(Debug, Default)]
pub struct Classifier {
    counters: SlotCounters,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current slot counters.
    pub fn counters(&self) -> SlotCounters {
        self.counters
    }

    /// Classify a raw (possibly percent-encoded) filename.
    ///
    /// Returns `None` when the file should be skipped: no suit, no rank, or
    /// a back beyond the second.
    pub fn classify(&mut self, filename: &str) -> Option<CardId> {
        let name = normalize(filename);

        if BACK_KEYWORDS.iter().any(|k| name.contains(k)) {
            if self.counters.backs < MAX_BACKS {
                self.counters.backs += 1;
                return Some(CardId::Back(self.counters.backs));
            }
            return None;
        }

        if JOKER_KEYWORDS.iter().any(|k| name.contains(k)) {
            self.counters.jokers += 1;
            return Some(CardId::Joker(self.counters.jokers));
        }

        let suit = detect_suit(&name)?;
        let rank = detect_rank(&name)?;
        Some(CardId::new(rank, suit))
    }
}

/// Percent-decode and lowercase a filename.
fn normalize(filename: &str) -> String {
    url::decode(filename).to_lowercase()
}

/// First suit whose keyword occurs in the (normalized) name.
pub fn detect_suit(name: &str) -> Option<Suit> {
    SUIT_TABLE
        .iter()
        .find(|(_, re)| re.is_match(name))
        .map(|(suit, _)| *suit)
}

/// First rank whose keyword or standalone number occurs in the (normalized) name.
pub fn detect_rank(name: &str) -> Option<Rank> {
    RANK_TABLE
        .iter()
        .find(|(_, re)| re.is_match(name))
        .map(|(rank, _)| *rank)
}
