//! Raw element preservation for pass-through content.
//!
//! Extension lists, graphic frame payloads and slide timing trees are kept
//! as captured markup so that decoding and re-encoding a part does not lose
//! them.

use crate::error::Result;
use crate::xml::namespace::MARKUP_COMPATIBILITY;
use crate::xml::reader::{ElementStart, XmlReader};
use crate::xml::writer::XmlWriter;
use crate::xml::{XmlRead, XmlWrite};
use std::io::{BufRead, Write};

/// A node inside a raw element.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    /// A nested element
    Element(RawElement),
    /// Character data (unescaped)
    Text(String),
}

/// An element captured verbatim: qualified name, attributes in document order
/// (namespace declarations included) and child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawElement {
    /// Qualified name as written in the source (e.g. `c14:style`)
    pub name: String,
    /// Attributes as (qualified name, unescaped value)
    pub attributes: Vec<(String, String)>,
    /// Child nodes
    pub children: Vec<RawNode>,
}

impl RawElement {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: RawElement) -> Self {
        self.children.push(RawNode::Element(child));
        self
    }

    /// Add a text node.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(RawNode::Text(text.into()));
        self
    }

    /// Local part of the element name.
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Look up an attribute by local name.
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| !name.starts_with("xmlns") && local_part(name) == local_name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over the child elements.
    pub fn elements(&self) -> impl Iterator<Item = &RawElement> {
        self.children.iter().filter_map(|node| match node {
            RawNode::Element(element) => Some(element),
            RawNode::Text(_) => None,
        })
    }

    /// Depth-first search for the first element (self included) with the given
    /// local name.
    pub fn find(&self, local_name: &str) -> Option<&RawElement> {
        if self.local_name() == local_name {
            return Some(self);
        }
        self.elements().find_map(|child| child.find(local_name))
    }

    /// Concatenated text content of this element and its descendants.
    pub fn text(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }
}

fn collect_text(nodes: &[RawNode], out: &mut String) {
    for node in nodes {
        match node {
            RawNode::Text(t) => out.push_str(t),
            RawNode::Element(e) => collect_text(&e.children, out),
        }
    }
}

/// Local part of a qualified name.
#[inline]
pub(crate) fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Capture an `mc:AlternateContent` block.
///
/// Office declares the markup-compatibility prefix on the part root, and part
/// roots are written with their own fixed declarations, so the captured
/// element carries the declaration itself.
pub(crate) fn read_alternate_content<R: BufRead>(
    reader: &mut XmlReader<R>,
    element: &ElementStart,
) -> Result<RawElement> {
    let mut content = reader.read_raw(element)?;
    if let Some((prefix, _)) = content.name.split_once(':') {
        let xmlns = format!("xmlns:{}", prefix);
        if !content.attributes.iter().any(|(name, _)| *name == xmlns) {
            content
                .attributes
                .insert(0, (xmlns, MARKUP_COMPATIBILITY.to_string()));
        }
    }
    Ok(content)
}

impl XmlRead for RawElement {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        reader.read_raw(element)
    }
}

impl XmlWrite for RawElement {
    /// Raw elements keep their own name; `name` is only used when the captured
    /// element has none.
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let element_name = if self.name.is_empty() { name } else { &self.name };
        let mut tag = writer.element(element_name);
        for (attr, value) in &self.attributes {
            tag = tag.raw_attr(attr, value);
        }
        if self.children.is_empty() {
            return tag.empty();
        }
        tag.open()?;
        for child in &self.children {
            match child {
                RawNode::Element(e) => e.write_xml(writer, &e.name)?,
                RawNode::Text(t) => writer.text(t)?,
            }
        }
        writer.end(element_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_fragment, to_fragment};

    #[derive(Debug)]
    struct Compat(RawElement);

    impl XmlRead for Compat {
        fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
            read_alternate_content(reader, element).map(Compat)
        }
    }

    #[test]
    fn test_alternate_content_gets_declaration() {
        let xml = r#"<mc:AlternateContent><mc:Choice Requires="c14"><c14:style val="102"/></mc:Choice></mc:AlternateContent>"#;
        let Compat(content) = from_fragment(xml).unwrap();
        assert_eq!(content.attributes[0].0, "xmlns:mc");
        assert_eq!(
            to_fragment(&content, "mc:AlternateContent").unwrap(),
            format!(
                r#"<mc:AlternateContent xmlns:mc="{}"><mc:Choice Requires="c14"><c14:style val="102"/></mc:Choice></mc:AlternateContent>"#,
                MARKUP_COMPATIBILITY
            )
        );
    }

    #[test]
    fn test_alternate_content_keeps_own_declaration() {
        let xml = r#"<x:AlternateContent xmlns:x="http://schemas.openxmlformats.org/markup-compatibility/2006"><x:Fallback/></x:AlternateContent>"#;
        let Compat(content) = from_fragment(xml).unwrap();
        assert_eq!(content.attributes.len(), 1);
        assert_eq!(to_fragment(&content, "mc:AlternateContent").unwrap(), xml);
    }

    #[test]
    fn test_find_and_text() {
        let raw = RawElement::new("a:hlinkClick")
            .with_attribute("r:id", "rId3")
            .with_child(RawElement::new("a:snd").with_text("chime"));
        assert_eq!(raw.attribute("id"), Some("rId3"));
        assert_eq!(raw.find("snd").map(RawElement::local_name), Some("snd"));
        assert_eq!(raw.text(), "chime");
    }
}
