//! Brescia deck table on Wikimedia Commons.
//!
//! The category page lays the deck out as a `wikitable`: one row per suit,
//! the suit named in a header or leading cell, and one `td` per rank in
//! the order `A K Q J T 9 .. 2`.

use tl::{Node, NodeHandle, Parser, ParserOptions};

use crate::core::{CardId, Rank, Suit};

/// Italian and English suit names. Later entries win on a multi-match.
const SUIT_KEYWORDS: &[(&str, Suit)] = &[
    ("swords", Suit::Spades),
    ("spade", Suit::Spades),
    ("cups", Suit::Hearts),
    ("coppe", Suit::Hearts),
    ("coins", Suit::Diamonds),
    ("denari", Suit::Diamonds),
    ("clubs", Suit::Clubs),
    ("bastoni", Suit::Clubs),
    ("batons", Suit::Clubs),
];

/// Rank of each `td` column.
const COLUMN_RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::King,
    Rank::Queen,
    Rank::Jack,
    Rank::Ten,
    Rank::Nine,
    Rank::Eight,
    Rank::Seven,
    Rank::Six,
    Rank::Five,
    Rank::Four,
    Rank::Three,
    Rank::Two,
];

/// Suit named in a cell's text, if any.
pub fn suit_from_text(text: &str) -> Option<Suit> {
    let lower = text.to_lowercase();
    SUIT_KEYWORDS
        .iter()
        .filter(|(keyword, _)| lower.contains(keyword))
        .map(|(_, suit)| *suit)
        .last()
}

#[derive(Default)]
struct TableState {
    in_table: bool,
    in_row: bool,
    in_cell: bool,
    suit: Option<Suit>,
    column: Option<usize>,
    cards: Vec<(CardId, String)>,
}

impl TableState {
    fn record(&mut self, href: &str) {
        if !(href.contains("File:") && href.ends_with(".svg")) {
            return;
        }
        let rank = self.column.and_then(|c| COLUMN_RANKS.get(c).copied());
        let (Some(suit), Some(rank)) = (self.suit, rank) else {
            return;
        };
        let id = CardId::new(rank, suit);
        match self.cards.iter_mut().find(|(card, _)| *card == id) {
            Some(slot) => slot.1 = href.to_string(),
            None => self.cards.push((id, href.to_string())),
        }
    }

    fn visit(&mut self, handle: NodeHandle, parser: &Parser) {
        let Some(node) = handle.get(parser) else {
            return;
        };
        match node {
            Node::Tag(tag) => {
                let name = tag.name().as_utf8_str().to_ascii_lowercase();
                let attrs = tag.attributes();
                match name.as_str() {
                    "table" => {
                        let class = attrs.get("class").flatten().map(|c| c.as_utf8_str());
                        if class.is_some_and(|c| c.contains("wikitable")) {
                            self.in_table = true;
                        }
                    }
                    "tr" if self.in_table => {
                        self.in_row = true;
                        self.column = None;
                        self.suit = None;
                    }
                    "td" | "th" if self.in_row => {
                        self.in_cell = true;
                        if name == "td" {
                            self.column = Some(self.column.map_or(0, |c| c + 1));
                        }
                    }
                    "a" if self.in_cell => {
                        if let Some(href) = attrs.get("href").flatten() {
                            self.record(&href.as_utf8_str());
                        }
                    }
                    _ => {}
                }

                for child in tag.children().top().iter() {
                    self.visit(*child, parser);
                }

                match name.as_str() {
                    "table" => self.in_table = false,
                    "tr" => self.in_row = false,
                    "td" | "th" => self.in_cell = false,
                    _ => {}
                }
            }
            Node::Raw(bytes) if self.in_cell => {
                let text = bytes.as_utf8_str();
                if let Some(suit) = suit_from_text(text.trim()) {
                    self.suit = Some(suit);
                }
            }
            _ => {}
        }
    }
}

/// Card file pages listed in the deck table, in document order.
/// A later link for the same card replaces the earlier one.
pub fn parse_deck_table(html: &str) -> Vec<(CardId, String)> {
    let Ok(dom) = tl::parse(html, ParserOptions::default()) else {
        return Vec::new();
    };
    let parser = dom.parser();
    let mut state = TableState::default();
    for handle in dom.children() {
        state.visit(*handle, parser);
    }
    state.cards
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(n: u32) -> String {
        format!(r#"<td><a href="/wiki/File:Brescia_{n}.svg" class="image"><img src="x.png"/></a></td>"#)
    }

    fn row(label: &str, count: u32) -> String {
        let cells: String = (0..count).map(link).collect();
        format!("<tr><th>{label}</th>{cells}</tr>")
    }

    #[test]
    fn test_suit_keywords() {
        assert_eq!(suit_from_text("Spade"), Some(Suit::Spades));
        assert_eq!(suit_from_text("COPPE (cups)"), Some(Suit::Hearts));
        assert_eq!(suit_from_text("Denari"), Some(Suit::Diamonds));
        assert_eq!(suit_from_text("Bastoni"), Some(Suit::Clubs));
        assert_eq!(suit_from_text("Trumps"), None);
    }

    #[test]
    fn test_rows_map_columns_to_ranks() {
        let html = format!(
            r#"<table class="wikitable sortable"><tbody>{}{}</tbody></table>"#,
            row("Coppe", 13),
            row("Bastoni", 2)
        );
        let cards = parse_deck_table(&html);
        assert_eq!(cards.len(), 15);
        assert_eq!(
            cards[0],
            (CardId::new(Rank::Ace, Suit::Hearts), "/wiki/File:Brescia_0.svg".to_string())
        );
        assert_eq!(cards[4].0, CardId::new(Rank::Ten, Suit::Hearts));
        assert_eq!(cards[12].0, CardId::new(Rank::Two, Suit::Hearts));
        assert_eq!(cards[14].0, CardId::new(Rank::King, Suit::Clubs));
    }

    #[test]
    fn test_extra_columns_and_rows_without_suit_ignored() {
        let html = format!(
            r#"<table class="wikitable">{}{}</table>"#,
            row("Legend", 3),
            row("Spade", 14)
        );
        let cards = parse_deck_table(&html);
        assert_eq!(cards.len(), 13);
        assert!(cards.iter().all(|(id, _)| matches!(id, CardId::Standard { suit: Suit::Spades, .. })));
    }

    #[test]
    fn test_other_tables_ignored() {
        let html = format!(r#"<table class="infobox">{}</table>"#, row("Denari", 4));
        assert!(parse_deck_table(&html).is_empty());
    }

    #[test]
    fn test_non_svg_links_skipped() {
        let html = r#"<table class="wikitable"><tr><td>Denari</td>
<td><a href="/wiki/File:Brescia.png">png</a></td>
<td><a href="/wiki/Brescia">page</a></td></tr></table>"#;
        assert!(parse_deck_table(html).is_empty());
    }
}
