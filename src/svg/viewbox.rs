//! Bounding box discovery for source fragments.

use std::fmt;

use super::dom::Element;

/// Source coordinate box (`min_x min_y width height`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Used when neither `viewBox` nor a usable `width`/`height` exists.
    pub const FALLBACK: ViewBox = ViewBox::new(0.0, 0.0, 200.0, 300.0);

    pub const fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Parse a `viewBox` attribute value; needs exactly four numbers.
    pub fn parse(value: &str) -> Option<Self> {
        let parts: Vec<f64> = value
            .split([' ', ',', '\t', '\n', '\r'])
            .filter(|p| !p.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .ok()?;
        match parts[..] {
            [min_x, min_y, width, height] => Some(Self::new(min_x, min_y, width, height)),
            _ => None,
        }
    }

    /// Strict lookup: only an explicit `viewBox`.
    pub fn declared(root: &Element) -> Option<Self> {
        root.attr("viewBox").and_then(Self::parse)
    }

    /// Box of a source root: a non-degenerate `viewBox`, else
    /// `width`/`height` with units stripped, else [`ViewBox::FALLBACK`].
    pub fn from_element(root: &Element) -> Self {
        if let Some(vb) = Self::declared(root)
            && vb.width > 0.0
            && vb.height > 0.0
        {
            return vb;
        }
        let width = root.attr("width").map(parse_length).unwrap_or(0.0);
        let height = root.attr("height").map(parse_length).unwrap_or(0.0);
        if width > 0.0 && height > 0.0 {
            return Self::new(0.0, 0.0, width, height);
        }
        Self::FALLBACK
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}

/// `"100mm"` -> `100.0`; anything unparsable is `0.0`.
fn parse_length(value: &str) -> f64 {
    let digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().unwrap_or(0.0)
}
