//! Owned SVG element tree.
//!
//! A small DOM on top of `quick-xml`, enough to copy, move and wrap card
//! fragments between documents.
//!
//! Attribute values and text are kept in their escaped source form, so
//! entities round-trip untouched. [`Element::set_attr`] escapes its input.

use std::borrow::Cow;

use quick_xml::{
    Reader, Writer,
    escape::escape,
    events::{
        BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event, attributes::Attribute,
    },
    name::QName,
};
use thiserror::Error;

/// SVG namespace URI.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Error)]
pub enum SvgError {
    #[error("xml parse error at position {position}: {message}")]
    Parse { position: u64, message: String },

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("failed to serialize svg: {0}")]
    Write(String),
}

/// Child node of an [`Element`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Escaped character data.
    Text(String),
    CData(String),
    Comment(String),
}

/// One element with its attributes and children, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Qualified name as written (`svg`, `xlink:href`, `sodipodi:namedview`).
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder form of [`Element::set_attr`].
    pub fn with_attr(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder form of [`Element::push_text`].
    pub fn with_text(mut self, text: &str) -> Self {
        self.push_text(text);
        self
    }

    /// Builder form of [`Element::push`].
    pub fn with_child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    /// Name without namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    /// Raw (escaped) attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set (or replace) an attribute, escaping the value.
    pub fn set_attr(&mut self, key: &str, value: impl AsRef<str>) {
        let escaped = escape(value.as_ref()).into_owned();
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = escaped,
            None => self.attrs.push((key.to_string(), escaped)),
        }
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let index = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(index).1)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn insert(&mut self, index: usize, child: Element) {
        let index = index.min(self.children.len());
        self.children.insert(index, Node::Element(child));
    }

    /// Append text, escaping it.
    pub fn push_text(&mut self, text: &str) {
        self.children.push(Node::Text(escape(text).into_owned()));
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// First direct child with the given local name.
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.elements().find(|el| el.local_name() == local_name)
    }

    pub fn child_mut(&mut self, local_name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(el) if el.local_name() == local_name => Some(el),
            _ => None,
        })
    }

    /// Pre-order walk over this element and all descendant elements.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First element (self included) whose `id` equals `id`.
    #[cfg(test)]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.descendants().find(|el| el.id() == Some(id))
    }

    /// Detach and return the first descendant whose `id` equals `id`.
    pub fn take_by_id(&mut self, id: &str) -> Option<Element> {
        let index = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(el) if el.id() == Some(id)));
        if let Some(index) = index
            && let Node::Element(el) = self.children.remove(index)
        {
            return Some(el);
        }
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(el) => el.take_by_id(id),
            _ => None,
        })
    }

    /// Remove every descendant element with the given local name.
    pub fn remove_descendants(&mut self, local_name: &str) {
        self.children
            .retain(|node| !matches!(node, Node::Element(el) if el.local_name() == local_name));
        for node in &mut self.children {
            if let Node::Element(el) = node {
                el.remove_descendants(local_name);
            }
        }
    }

    /// Serialize as a standalone document.
    pub fn to_document(&self, xml_declaration: bool) -> Result<String, SvgError> {
        let mut writer = Writer::new(Vec::new());
        if xml_declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(|e| SvgError::Write(e.to_string()))?;
            writer
                .write_event(Event::Text(BytesText::from_escaped("\n")))
                .map_err(|e| SvgError::Write(e.to_string()))?;
        }
        write_element(&mut writer, self)?;
        String::from_utf8(writer.into_inner()).map_err(|e| SvgError::Write(e.to_string()))
    }
}

/// Iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let el = self.stack.pop()?;
        self.stack.extend(el.elements().collect::<Vec<_>>().into_iter().rev());
        Some(el)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a document and return its root element.
///
/// The XML declaration, doctype, processing instructions, comments and
/// whitespace outside the root are dropped. A document must have exactly
/// one root, and entity references are limited to the predefined five and
/// character references.
pub fn parse(text: &str) -> Result<Element, SvgError> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| SvgError::Parse {
            position: reader.error_position() as u64,
            message: e.to_string(),
        })?;

        match event {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let el = element_from_start(&start)?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::End(_) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| SvgError::Malformed("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::Text(text) => {
                let text = utf8(&text)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Text(text)),
                    None if is_blank(&text) => {}
                    None => {
                        return Err(SvgError::Malformed(
                            "text outside the root element".into(),
                        ));
                    }
                }
            }
            Event::GeneralRef(reference) => {
                let name = utf8(&reference)?;
                if !is_known_reference(&name) {
                    return Err(SvgError::Malformed(format!("undefined entity &{name};")));
                }
                let parent = stack.last_mut().ok_or_else(|| {
                    SvgError::Malformed("reference outside the root element".into())
                })?;
                parent.children.push(Node::Text(format!("&{name};")));
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::CData(utf8(&data)?));
                }
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Comment(utf8(&comment)?));
                }
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(SvgError::Malformed(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| SvgError::Malformed("no root element".into()))
}

/// Whitespace, or a byte-order mark, between top-level nodes.
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{feff}')
}

/// Predefined entities and well-formed character references.
fn is_known_reference(name: &str) -> bool {
    match name.strip_prefix('#') {
        Some(code) => {
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => code.parse::<u32>(),
            };
            value.ok().and_then(char::from_u32).is_some()
        }
        None => matches!(name, "lt" | "gt" | "amp" | "apos" | "quot"),
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, SvgError> {
    let mut el = Element::new(utf8(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SvgError::Malformed(e.to_string()))?;
        el.attrs
            .push((utf8(attr.key.as_ref())?, utf8(attr.value.as_ref())?));
    }
    Ok(el)
}

/// Hand a finished element to its parent, or make it the root.
fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    el: Element,
) -> Result<(), SvgError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(el)),
        None if root.is_none() => *root = Some(el),
        None => {
            return Err(SvgError::Malformed(format!(
                "second root element <{}>",
                el.name
            )));
        }
    }
    Ok(())
}

fn utf8(bytes: &[u8]) -> Result<String, SvgError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| SvgError::Malformed(e.to_string()))
}

// ============================================================================
// Writing
// ============================================================================

fn write_element(writer: &mut Writer<Vec<u8>>, el: &Element) -> Result<(), SvgError> {
    let mut start = BytesStart::new(el.name.as_str());
    for (key, value) in &el.attrs {
        // values are already escaped
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Borrowed(value.as_bytes()),
        });
    }

    if el.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for node in &el.children {
        match node {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => emit(writer, Event::Text(BytesText::from_escaped(text.as_str())))?,
            Node::CData(data) => emit(writer, Event::CData(BytesCData::new(data.as_str())))?,
            Node::Comment(comment) => {
                emit(writer, Event::Comment(BytesText::from_escaped(comment.as_str())))?
            }
        }
    }
    emit(writer, Event::End(BytesEnd::new(el.name.as_str())))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), SvgError> {
    writer
        .write_event(event)
        .map_err(|e| SvgError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<!-- exported -->
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 10 10">
  <defs><g id="heart_1" display="none"><use xlink:href="#pip"/></g></defs>
  <text x="1">A &amp; B</text>
  <style><![CDATA[.a { fill: red }]]></style>
</svg>"##;

    #[test]
    fn test_parse_structure() {
        let root = parse(SAMPLE).unwrap();
        assert_eq!(root.name, "svg");
        assert_eq!(root.attr("viewBox"), Some("0 0 10 10"));
        assert_eq!(root.attr("xmlns:xlink"), Some("http://www.w3.org/1999/xlink"));
        let defs = root.child("defs").unwrap();
        assert_eq!(defs.elements().count(), 1);
        assert!(root.find_by_id("heart_1").is_some());
    }

    #[test]
    fn test_entities_round_trip() {
        let root = parse(SAMPLE).unwrap();
        let out = root.to_document(false).unwrap();
        assert!(out.contains("A &amp; B"), "{out}");
        assert!(out.contains("<![CDATA[.a { fill: red }]]>"), "{out}");
        // reparse of own output must succeed
        parse(&out).unwrap();
    }

    #[test]
    fn test_declaration_toggle() {
        let root = Element::new("svg");
        assert!(root.to_document(true).unwrap().starts_with("<?xml version=\"1.0\""));
        assert_eq!(root.to_document(false).unwrap(), "<svg/>");
    }

    #[test]
    fn test_set_attr_escapes_and_replaces() {
        let mut el = Element::new("rect").with_attr("fill", "red");
        el.set_attr("fill", "a<b");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.attr("fill"), Some("a&lt;b"));
        assert_eq!(el.remove_attr("fill").as_deref(), Some("a&lt;b"));
        assert_eq!(el.attr("fill"), None);
    }

    #[test]
    fn test_take_by_id_detaches() {
        let mut root = parse(SAMPLE).unwrap();
        let card = root.take_by_id("heart_1").unwrap();
        assert_eq!(card.attr("display"), Some("none"));
        assert!(root.find_by_id("heart_1").is_none());
        assert!(root.take_by_id("heart_1").is_none());
    }

    #[test]
    fn test_remove_descendants() {
        let mut root = parse(SAMPLE).unwrap();
        root.remove_descendants("style");
        assert!(root.descendants().all(|el| el.local_name() != "style"));
    }

    #[test]
    fn test_descendants_preorder() {
        let root = parse("<a><b><c/></b><d/></a>").unwrap();
        let names: Vec<_> = root.descendants().map(|el| el.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_local_name_strips_prefix() {
        assert_eq!(Element::new("svg:defs").local_name(), "defs");
        assert_eq!(Element::new("defs").local_name(), "defs");
    }

    #[test]
    fn test_malformed_documents() {
        assert!(parse("<svg><g></svg>").is_err());
        assert!(parse("<svg>").is_err());
        assert!(parse("").is_err());
        assert!(parse("<a/><b/>").is_err());
        assert!(parse("<svg/>this is not xml").is_err());
        assert!(parse("garbage<svg/>").is_err());
        assert!(parse("<svg>&nbsp;</svg>").is_err());
        assert!(parse("<svg>&#xZZ;</svg>").is_err());
        assert!(parse("\u{feff}<svg/>\n").is_ok());
    }

    #[test]
    fn test_predefined_references_kept() {
        let root = parse("\n<svg>&lt;&#65;&#x42;</svg>\n").unwrap();
        let text: Vec<_> = root
            .children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) if !t.is_empty() => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(text, ["&lt;", "&#65;", "&#x42;"]);
    }
}
