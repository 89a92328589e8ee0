//! Target card templates.
//!
//! A template is the fixed scaffold every produced card shares: canvas size,
//! a rounded background, a clip path over the interior and a border stroke.

use super::dom::{Element, SVG_NS};

/// Axis-aligned rectangle in template coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// `<rect>` with rounded corners of `radius`.
    pub fn rounded(&self, radius: f64) -> Element {
        Element::new("rect")
            .with_attr("x", self.x.to_string())
            .with_attr("y", self.y.to_string())
            .with_attr("width", self.width.to_string())
            .with_attr("height", self.height.to_string())
            .with_attr("rx", radius.to_string())
            .with_attr("ry", radius.to_string())
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardTemplate {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub stroke_width: f64,
    pub stroke: &'static str,
    pub background: &'static str,
}

impl CardTemplate {
    /// Default clip path identifier.
    pub const CLIP_ID: &'static str = "card-clip";

    /// DigitalDesignLabs card: 225×314, radius 11.25, 2px black border.
    pub const fn ddl() -> Self {
        Self {
            width: 225.0,
            height: 314.0,
            radius: 11.25,
            stroke_width: 2.0,
            stroke: "black",
            background: "#fefefe",
        }
    }

    /// Template sized to a source card, with radius 5% of its width.
    pub fn for_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            radius: round2(width * 0.05),
            ..Self::ddl()
        }
    }

    /// Area inside the border stroke.
    pub fn interior(&self) -> Rect {
        let inset = self.stroke_width / 2.0;
        Rect {
            x: inset,
            y: inset,
            width: self.width - self.stroke_width,
            height: self.height - self.stroke_width,
        }
    }

    /// Empty `<svg>` root with the template canvas.
    pub fn container(&self) -> Element {
        Element::new("svg")
            .with_attr("xmlns", SVG_NS)
            .with_attr("width", self.width.to_string())
            .with_attr("height", self.height.to_string())
            .with_attr(
                "viewBox",
                format!("0 0 {} {}", self.width, self.height),
            )
    }

    /// Solid rounded fill behind the content.
    pub fn background_rect(&self) -> Element {
        self.interior()
            .rounded(self.radius)
            .with_attr("fill", self.background)
    }

    /// Stroke-only rounded border, drawn last.
    pub fn border_rect(&self) -> Element {
        self.interior()
            .rounded(self.radius)
            .with_attr("fill", "none")
            .with_attr("stroke", self.stroke)
            .with_attr("stroke-width", self.stroke_width.to_string())
    }

    /// Add a rounded interior clip path to `root`'s `defs` unless one with
    /// `clip_id` already exists. Returns the `url(#...)` reference.
    pub fn ensure_clip_path(&self, root: &mut Element, clip_id: &str) -> String {
        let reference = format!("url(#{clip_id})");
        let defs = ensure_defs(root);
        let exists = defs
            .elements()
            .any(|el| el.local_name() == "clipPath" && el.id() == Some(clip_id));
        if !exists {
            defs.push(
                Element::new("clipPath")
                    .with_attr("id", clip_id)
                    .with_child(self.interior().rounded(self.radius)),
            );
        }
        reference
    }
}

/// First direct `defs` child of `root`, created at index 0 when missing.
fn ensure_defs(root: &mut Element) -> &mut Element {
    if root.child("defs").is_none() {
        root.insert(0, Element::new("defs"));
    }
    root.child_mut("defs").expect("defs exists")
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddl_interior() {
        let t = CardTemplate::ddl();
        assert_eq!(
            t.interior(),
            Rect {
                x: 1.0,
                y: 1.0,
                width: 223.0,
                height: 312.0
            }
        );
    }

    #[test]
    fn test_radius_from_width() {
        assert_eq!(CardTemplate::for_size(169.075, 244.64).radius, 8.45);
        assert_eq!(CardTemplate::for_size(225.0, 314.0).radius, 11.25);
    }

    #[test]
    fn test_border_has_no_fill() {
        let border = CardTemplate::ddl().border_rect();
        assert_eq!(border.attr("fill"), Some("none"));
        assert_eq!(border.attr("stroke-width"), Some("2"));
        assert_eq!(border.attr("rx"), Some("11.25"));
    }

    #[test]
    fn test_clip_path_deduplicated() {
        let t = CardTemplate::ddl();
        let mut root = t.container();
        root.push(Element::new("g"));
        assert_eq!(t.ensure_clip_path(&mut root, "card-clip"), "url(#card-clip)");
        t.ensure_clip_path(&mut root, "card-clip");

        let defs = root.elements().next().unwrap();
        assert_eq!(defs.local_name(), "defs");
        assert_eq!(defs.elements().count(), 1);
        assert_eq!(root.elements().filter(|e| e.local_name() == "defs").count(), 1);
    }

    #[test]
    fn test_clip_path_reuses_existing_defs() {
        let t = CardTemplate::ddl();
        let mut root = t.container();
        root.push(Element::new("rect"));
        root.push(Element::new("defs").with_child(Element::new("linearGradient")));
        t.ensure_clip_path(&mut root, "other");
        let defs = root.child("defs").unwrap();
        assert_eq!(defs.elements().count(), 2);
    }
}
