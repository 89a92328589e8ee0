//! Synthetic Brescia backs and jokers.
//!
//! The Brescia category ships no usable backs or jokers, so they are drawn
//! to match the downloaded cards: 159×319 paper with rounded corners and an
//! inner frame at a fixed margin.

use super::dom::{Element, SVG_NS};
use crate::core::CardId;

const WIDTH: f64 = 159.0;
const HEIGHT: f64 = 319.0;
const CORNER_RADIUS: f64 = 12.0;
const MARGIN: f64 = 10.0;
const PAPER_COLOR: &str = "#f2f2f2";
const STROKE_COLOR: &str = "#000000";

const HAT_PATH: &str = "M 50 130 \
    C 20 130, 10 90, 25 80 \
    C 40 95, 55 115, 65 115 \
    C 70 80, 75 50, 80 50 \
    C 85 50, 90 80, 95 115 \
    C 105 115, 120 95, 135 80 \
    C 150 90, 140 130, 110 130 \
    Q 80 145, 50 130 Z";
const BELLS: [(f64, f64); 3] = [(25.0, 80.0), (80.0, 50.0), (135.0, 80.0)];
const BELL_COLOR: &str = "#FFD700";
const STAR_POINTS: &str = "80,240 84,252 96,252 86,260 90,272 80,264 70,272 74,260 64,252 76,252";

/// Two-color lattice for a back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackColors {
    pub primary: &'static str,
    pub secondary: &'static str,
}

/// `1B` deep blue, `2B` dark red.
pub const BACKS: [(CardId, BackColors); 2] = [
    (
        CardId::Back(1),
        BackColors {
            primary: "#003366",
            secondary: "#ffffff",
        },
    ),
    (
        CardId::Back(2),
        BackColors {
            primary: "#8b0000",
            secondary: "#ffffff",
        },
    ),
];

/// `1J` red, `2J` black.
pub const JOKERS: [(CardId, &str); 2] = [(CardId::Joker(1), "#d40000"), (CardId::Joker(2), "#000000")];

fn canvas() -> Element {
    Element::new("svg")
        .with_attr("width", WIDTH.to_string())
        .with_attr("height", HEIGHT.to_string())
        .with_attr("viewBox", format!("0 0 {WIDTH} {HEIGHT}"))
        .with_attr("xmlns", SVG_NS)
}

fn paper() -> Element {
    rect(0.5, 0.5, WIDTH - 1.0, HEIGHT - 1.0, CORNER_RADIUS)
        .with_attr("fill", PAPER_COLOR)
        .with_attr("stroke", STROKE_COLOR)
        .with_attr("stroke-width", "1")
}

fn inner_frame(fill: &str) -> Element {
    rect(
        MARGIN,
        MARGIN,
        WIDTH - MARGIN * 2.0,
        HEIGHT - MARGIN * 2.0,
        CORNER_RADIUS / 2.0,
    )
    .with_attr("fill", fill)
    .with_attr("stroke", STROKE_COLOR)
    .with_attr("stroke-width", "1")
}

fn rect(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Element {
    Element::new("rect")
        .with_attr("x", x.to_string())
        .with_attr("y", y.to_string())
        .with_attr("width", width.to_string())
        .with_attr("height", height.to_string())
        .with_attr("rx", radius.to_string())
        .with_attr("ry", radius.to_string())
}

/// Card back with a diamond lattice inside the frame.
pub fn back(colors: BackColors) -> Element {
    let BackColors { primary, secondary } = colors;
    let pattern = Element::new("pattern")
        .with_attr("id", "BackPattern")
        .with_attr("x", "0")
        .with_attr("y", "0")
        .with_attr("width", "16")
        .with_attr("height", "16")
        .with_attr("patternUnits", "userSpaceOnUse")
        .with_child(
            Element::new("rect")
                .with_attr("width", "16")
                .with_attr("height", "16")
                .with_attr("fill", primary),
        )
        .with_child(
            Element::new("path")
                .with_attr("d", "M8 0 L16 8 L8 16 L0 8 Z")
                .with_attr("fill", "none")
                .with_attr("stroke", secondary)
                .with_attr("stroke-width", "1.5")
                .with_attr("opacity", "0.9"),
        )
        .with_child(
            Element::new("circle")
                .with_attr("cx", "8")
                .with_attr("cy", "8")
                .with_attr("r", "1.5")
                .with_attr("fill", secondary),
        )
        .with_child(
            Element::new("path")
                .with_attr("d", "M0 0 L16 16 M16 0 L0 16")
                .with_attr("stroke", secondary)
                .with_attr("stroke-width", "0.5")
                .with_attr("opacity", "0.4"),
        );

    canvas()
        .with_child(Element::new("defs").with_child(pattern))
        .with_child(paper())
        .with_child(inner_frame("url(#BackPattern)"))
}

/// Jester joker in `color`.
pub fn joker(color: &str) -> Element {
    let index = |x: f64, y: f64| {
        Element::new("text")
            .with_attr("x", x.to_string())
            .with_attr("y", y.to_string())
            .with_attr("font-family", "Times New Roman, serif")
            .with_attr("font-size", "22")
            .with_attr("font-weight", "bold")
            .with_attr("fill", color)
            .with_attr("text-anchor", "middle")
            .with_text("J")
    };
    let (bx, by) = (WIDTH - 22.0, HEIGHT - 35.0);

    let mut art = Element::new("g")
        .with_attr("transform", "translate(0, 10)")
        .with_child(
            Element::new("path")
                .with_attr("d", HAT_PATH)
                .with_attr("fill", color)
                .with_attr("stroke", "black")
                .with_attr("stroke-width", "1.5"),
        );
    for (cx, cy) in BELLS {
        art.push(
            Element::new("circle")
                .with_attr("cx", cx.to_string())
                .with_attr("cy", cy.to_string())
                .with_attr("r", "6")
                .with_attr("fill", BELL_COLOR)
                .with_attr("stroke", "black")
                .with_attr("stroke-width", "1"),
        );
    }
    art.push(
        Element::new("path")
            .with_attr("d", "M 55 155 Q 80 175 105 155")
            .with_attr("fill", "none")
            .with_attr("stroke", "black")
            .with_attr("stroke-width", "2")
            .with_attr("stroke-linecap", "round"),
    );
    art.push(
        Element::new("text")
            .with_attr("x", (WIDTH / 2.0).to_string())
            .with_attr("y", "210")
            .with_attr("font-family", "Times New Roman, serif")
            .with_attr("font-size", "26")
            .with_attr("font-weight", "bold")
            .with_attr("fill", color)
            .with_attr("text-anchor", "middle")
            .with_attr("letter-spacing", "1")
            .with_text("JOLLY"),
    );
    art.push(
        Element::new("polygon")
            .with_attr("points", STAR_POINTS)
            .with_attr("fill", color)
            .with_attr("transform", "translate(0, -5)"),
    );

    canvas()
        .with_child(paper())
        .with_child(inner_frame("none"))
        .with_child(index(22.0, 35.0))
        .with_child(index(bx, by).with_attr("transform", format!("rotate(180, {bx}, {by})")))
        .with_child(art)
}

/// All synthesized extras, in output order.
pub fn extras() -> Vec<(CardId, Element)> {
    BACKS
        .iter()
        .map(|(id, colors)| (*id, back(*colors)))
        .chain(JOKERS.iter().map(|(id, color)| (*id, joker(color))))
        .collect()
}
