//! Canonical card identifiers.
//!
//! Every produced file is named after a [`CardId`]:
//!
//! | Card              | Stem | File      |
//! |-------------------|------|-----------|
//! | King of Hearts    | `KH` | `KH.svg`  |
//! | Ten of Spades     | `TS` | `TS.svg`  |
//! | first card back   | `1B` | `1B.svg`  |
//! | second joker      | `2J` | `2J.svg`  |

use std::fmt;

/// Card rank, ace high in declaration order only for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks, ace first.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Single-character code used in filenames.
    pub const fn code(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }

    /// Numeric pip value (ace = 1, jack = 11, queen = 12, king = 13).
    pub const fn value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
        }
    }
}

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Single-character code used in filenames.
    pub const fn code(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }
}

/// Canonical identifier for one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardId {
    Standard { rank: Rank, suit: Suit },
    /// Card back, numbered from 1.
    Back(u32),
    /// Joker, numbered from 1.
    Joker(u32),
}

impl CardId {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self::Standard { rank, suit }
    }

    /// The 52 standard cards, rank-major (`AS AH AD AC 2S ...`).
    pub fn standard_deck() -> impl Iterator<Item = CardId> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| CardId::new(rank, suit)))
    }

    /// Output filename, e.g. `KH.svg`.
    pub fn file_name(&self) -> String {
        format!("{self}.svg")
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardId::Standard { rank, suit } => write!(f, "{}{}", rank.code(), suit.code()),
            CardId::Back(n) => write!(f, "{n}B"),
            CardId::Joker(n) => write!(f, "{n}J"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_file_names() {
        assert_eq!(CardId::new(Rank::King, Suit::Hearts).file_name(), "KH.svg");
        assert_eq!(CardId::new(Rank::Ten, Suit::Spades).file_name(), "TS.svg");
        assert_eq!(CardId::new(Rank::Ace, Suit::Clubs).to_string(), "AC");
    }

    #[test]
    fn test_extra_file_names() {
        assert_eq!(CardId::Back(1).file_name(), "1B.svg");
        assert_eq!(CardId::Joker(2).file_name(), "2J.svg");
    }

    #[test]
    fn test_standard_deck_has_52_unique_cards() {
        let deck: std::collections::HashSet<_> = CardId::standard_deck().collect();
        assert_eq!(deck.len(), 52);
    }
}
