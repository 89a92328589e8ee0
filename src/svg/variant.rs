//! DigitalDesignLabs size-class splitting.
//!
//! Each DDL card carries several renditions in one file, one group per size
//! class, switched by CSS media queries. Splitting writes one self-contained
//! document per class with the media-query styles removed.

use std::fmt;

use super::dom::Element;
use super::template::CardTemplate;
use super::viewbox::ViewBox;

/// DDL rendition size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeClass {
    Xl,
    Lg,
    Md,
    Sm,
    Xs,
}

impl SizeClass {
    pub const ALL: [SizeClass; 5] = [
        SizeClass::Xl,
        SizeClass::Lg,
        SizeClass::Md,
        SizeClass::Sm,
        SizeClass::Xs,
    ];

    /// Output subdirectory name.
    pub const fn dir_name(self) -> &'static str {
        match self {
            SizeClass::Xl => "xl",
            SizeClass::Lg => "lg",
            SizeClass::Md => "md",
            SizeClass::Sm => "sm",
            SizeClass::Xs => "xs",
        }
    }

    /// Group `id` (standard format) or `class` (optimized format).
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "x-large" | "maxi-card" => Some(SizeClass::Xl),
            "large" => Some(SizeClass::Lg),
            "medium" => Some(SizeClass::Md),
            "small" | "mini-card" => Some(SizeClass::Sm),
            "x-small" => Some(SizeClass::Xs),
            _ => None,
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One split rendition.
#[derive(Debug, Clone)]
pub struct Variant {
    pub size: SizeClass,
    pub document: Element,
}

/// Split a DDL card into its size-class renditions.
///
/// Returns `None` when the card has no `viewBox`. A card without any
/// recognized group is passed through whole as [`SizeClass::Xl`].
pub fn split(root: &Element) -> Option<Vec<Variant>> {
    let viewbox = ViewBox::declared(root)?;
    let template = CardTemplate::for_size(viewbox.width, viewbox.height);

    let groups = size_groups(root);
    if groups.is_empty() {
        return Some(vec![Variant {
            size: SizeClass::Xl,
            document: frame(root.clone(), &template),
        }]);
    }

    let variants = groups
        .into_iter()
        .map(|(size, group)| {
            let mut doc = Element::new(root.name.clone());
            doc.attrs = root.attrs.clone();
            if let Some(defs) = root.child("defs") {
                doc.push(defs.clone());
            }
            doc.remove_descendants("style");

            let mut group = group.clone();
            group.remove_attr("style");
            group.remove_attr("display");
            doc.push(group);

            Variant {
                size,
                document: frame(doc, &template),
            }
        })
        .collect();
    Some(variants)
}

/// Groups keyed by size class, in document order of first appearance.
/// A later group with the same key replaces the earlier one.
fn size_groups(root: &Element) -> Vec<(SizeClass, &Element)> {
    let mut groups: Vec<(SizeClass, &Element)> = Vec::new();
    for el in root.descendants().filter(|el| el.local_name() == "g") {
        let size = el
            .id()
            .and_then(SizeClass::from_identifier)
            .or_else(|| el.attr("class").and_then(SizeClass::from_identifier));
        let Some(size) = size else { continue };
        match groups.iter_mut().find(|(s, _)| *s == size) {
            Some(slot) => slot.1 = el,
            None => groups.push((size, el)),
        }
    }
    groups
}

/// Background first, border last.
fn frame(mut doc: Element, template: &CardTemplate) -> Element {
    doc.insert(0, template.background_rect());
    doc.push(template.border_rect());
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::dom::parse;

    const CARD: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 280">
  <style>@media (max-width: 100px) { #x-large { display: none } }</style>
  <defs><symbol id="pip"/><style>.a{}</style></defs>
  <g id="x-large" style="display:none"><use href="#pip"/></g>
  <g class="mini-card" display="none"><use href="#pip"/></g>
  <g id="medium"><rect/></g>
</svg>"##;

    #[test]
    fn test_identifiers() {
        assert_eq!(SizeClass::from_identifier("maxi-card"), Some(SizeClass::Xl));
        assert_eq!(SizeClass::from_identifier("x-small"), Some(SizeClass::Xs));
        assert_eq!(SizeClass::from_identifier("huge"), None);
    }

    #[test]
    fn test_split_by_id_and_class() {
        let variants = split(&parse(CARD).unwrap()).unwrap();
        let sizes: Vec<_> = variants.iter().map(|v| v.size).collect();
        assert_eq!(sizes, [SizeClass::Xl, SizeClass::Sm, SizeClass::Md]);

        for variant in &variants {
            let doc = &variant.document;
            assert!(doc.descendants().all(|e| e.local_name() != "style"));
            assert!(doc.find_by_id("pip").is_some());
            let order: Vec<_> = doc.elements().map(|e| e.local_name()).collect();
            assert_eq!(order, ["rect", "defs", "g", "rect"]);
        }

        let xl = &variants[0].document;
        let group = xl.elements().nth(2).unwrap();
        assert_eq!(group.attr("style"), None);
        let sm = &variants[1].document;
        assert_eq!(sm.elements().nth(2).unwrap().attr("display"), None);
    }

    #[test]
    fn test_frame_geometry() {
        let variants = split(&parse(CARD).unwrap()).unwrap();
        let doc = &variants[0].document;
        let bg = doc.elements().next().unwrap();
        assert_eq!(bg.attr("x"), Some("1"));
        assert_eq!(bg.attr("width"), Some("198"));
        assert_eq!(bg.attr("rx"), Some("10"));
        assert_eq!(bg.attr("fill"), Some("#fefefe"));
    }

    #[test]
    fn test_no_groups_goes_to_xl() {
        let root = parse(r#"<svg viewBox="0 0 100 140"><circle r="3"/></svg>"#).unwrap();
        let variants = split(&root).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].size, SizeClass::Xl);
        assert_eq!(variants[0].document.elements().count(), 3);
    }

    #[test]
    fn test_missing_viewbox_skipped() {
        let root = parse(r#"<svg width="100" height="140"/>"#).unwrap();
        assert!(split(&root).is_none());
    }
}
