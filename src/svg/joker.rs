//! Synthetic text jokers for the DDL template.
//!
//! The letters `J O K E R` stacked down the card centerline, stretched
//! horizontally and emboldened with a same-colored stroke, since
//! `font-weight` is not reliably honored for system fonts.

use super::compose::scaffold;
use super::dom::Element;
use super::template::CardTemplate;

const LETTERS: [&str; 5] = ["J", "O", "K", "E", "R"];
const FONT_SIZE: f64 = 56.0;
const LETTER_SPACING: f64 = 56.0;
const X_SCALE: f64 = 1.18;
const Y_OFFSET: f64 = 6.0;

/// Joker ink color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JokerColor {
    Red,
    Black,
}

impl JokerColor {
    pub const fn fill(self) -> &'static str {
        match self {
            JokerColor::Red => "#d40000",
            JokerColor::Black => "#000000",
        }
    }
}

/// Build a complete text-joker card on `template`.
pub fn text_joker(template: &CardTemplate, color: JokerColor) -> Element {
    scaffold(template, letters(template, color))
}

fn letters(template: &CardTemplate, color: JokerColor) -> Element {
    let fill = color.fill();
    let (_, center_y) = template.interior().center();
    let start_y = center_y - ((LETTERS.len() - 1) as f64 * LETTER_SPACING / 2.0) + Y_OFFSET;
    let cx = template.width / 2.0;

    let mut stretched = Element::new("g").with_attr(
        "transform",
        format!("translate({cx} 0) scale({X_SCALE} 1) translate({} 0)", -cx),
    );

    for (i, letter) in LETTERS.iter().enumerate() {
        stretched.push(
            Element::new("text")
                .with_attr("x", cx.to_string())
                .with_attr("y", (start_y + i as f64 * LETTER_SPACING).to_string())
                .with_attr("font-family", "Times New Roman, serif")
                .with_attr("font-weight", "bold")
                .with_attr("font-size", FONT_SIZE.to_string())
                .with_attr("fill", fill)
                .with_attr("stroke", fill)
                .with_attr("stroke-width", "1.2")
                .with_attr("paint-order", "stroke fill")
                .with_attr("text-anchor", "middle")
                .with_attr("dominant-baseline", "middle")
                .with_text(letter),
        );
    }
    stretched
}
