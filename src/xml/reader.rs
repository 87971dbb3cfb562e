//! Pull-based decoding on top of `quick_xml::Reader`.
//!
//! Every schema type decodes itself from an [`ElementStart`] (the start tag
//! that was already consumed) by calling [`XmlReader::read_children`], which
//! owns the child loop: it hands each child start tag to a dispatch closure and
//! skips whatever the closure does not recognise.

use crate::error::{OoxmlError, Result};
use crate::xml::escape::{resolve_entity, unescape_xml};
use crate::xml::options::ReadOptions;
use crate::xml::raw::{RawElement, RawNode, local_part};
use crate::xml::value::XmlValue;
use crate::xml::{XmlChoice, XmlRead, XmlRoot};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;

/// A start tag that has been read from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStart {
    name: String,
    attributes: Vec<(String, String)>,
    empty: bool,
}

impl ElementStart {
    /// Create a start tag by hand (mostly useful in tests).
    pub fn new(name: impl Into<String>, empty: bool) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            empty,
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    fn from_bytes(e: &BytesStart<'_>, empty: bool) -> Result<Self> {
        let name = std::str::from_utf8(e.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = unescape_xml(std::str::from_utf8(&attr.value)?);
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            empty,
        })
    }

    /// Qualified name as written in the document.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local part of the name.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Whether the element was self-closing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// All attributes as (qualified name, value), namespace declarations included.
    #[inline]
    pub fn raw_attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute value by local name. Namespace declarations are
    /// never matched.
    pub fn attr(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| {
                name != "xmlns" && !name.starts_with("xmlns:") && local_part(name) == local_name
            })
            .map(|(_, value)| value.as_str())
    }

    /// Parse an optional attribute.
    pub fn parse_attr<T: XmlValue>(&self, local_name: &str) -> Result<Option<T>> {
        match self.attr(local_name) {
            Some(value) => T::parse_xml(value).map(Some).map_err(|e| self.annotate(local_name, e)),
            None => Ok(None),
        }
    }

    /// Parse a required attribute. A missing attribute yields the type's
    /// default value; validation is where absent data gets reported.
    pub fn required_attr<T: XmlValue + Default>(&self, local_name: &str) -> Result<T> {
        match self.parse_attr(local_name)? {
            Some(value) => Ok(value),
            None => {
                log::debug!(
                    "required attribute {} missing on <{}>, using default",
                    local_name,
                    self.name
                );
                Ok(T::default())
            },
        }
    }

    fn annotate(&self, attr: &str, err: OoxmlError) -> OoxmlError {
        match err {
            OoxmlError::InvalidValue { value, reason, .. } => OoxmlError::InvalidValue {
                name: format!("{}@{}", self.name, attr),
                value,
                reason,
            },
            other => other,
        }
    }
}

enum Node {
    Start(ElementStart),
    Text(String),
    End,
    Eof,
}

/// Decoder state: the quick-xml reader, its event buffer and the options.
pub struct XmlReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    options: ReadOptions,
    depth: usize,
}

impl<R: BufRead> XmlReader<R> {
    /// Create a reader with default options.
    pub fn new(inner: R) -> Self {
        Self::with_options(inner, ReadOptions::default())
    }

    /// Create a reader with the given options.
    pub fn with_options(inner: R, options: ReadOptions) -> Self {
        Self {
            reader: Reader::from_reader(inner),
            buf: Vec::new(),
            options,
            depth: 0,
        }
    }

    /// The options this reader was created with.
    #[inline]
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    fn next_node(&mut self) -> Result<Node> {
        loop {
            self.buf.clear();
            let node = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => Node::Start(ElementStart::from_bytes(&e, false)?),
                Event::Empty(e) => Node::Start(ElementStart::from_bytes(&e, true)?),
                Event::End(_) => Node::End,
                Event::Text(t) => Node::Text(unescape_xml(std::str::from_utf8(&t)?)),
                Event::CData(c) => Node::Text(std::str::from_utf8(&c)?.to_string()),
                Event::GeneralRef(r) => {
                    let entity = std::str::from_utf8(&r)?;
                    match resolve_entity(entity) {
                        Some(ch) => Node::Text(ch.to_string()),
                        None => Node::Text(format!("&{};", entity)),
                    }
                },
                Event::Eof => Node::Eof,
                // Declarations, comments, processing instructions, doctype
                _ => continue,
            };
            return Ok(node);
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(OoxmlError::DepthExceeded(self.options.max_depth));
        }
        Ok(())
    }

    #[inline]
    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Decode the document root.
    ///
    /// Anything before the first element (declaration, comments, whitespace)
    /// is ignored; the root's local name must match `T::ROOT`.
    pub fn read_root<T: XmlRoot>(&mut self) -> Result<T> {
        loop {
            match self.next_node()? {
                Node::Start(root) => {
                    let expected = local_part(T::ROOT);
                    if root.local_name() != expected {
                        return Err(OoxmlError::UnexpectedElement {
                            expected: T::ROOT.to_string(),
                            found: root.name().to_string(),
                        });
                    }
                    let value = T::read_xml(self, &root)?;
                    log::debug!("decoded <{}> as {}", root.name(), T::TYPE_NAME);
                    if self.options.validate {
                        value.validate()?;
                    }
                    return Ok(value);
                },
                Node::Text(_) => {},
                Node::End => {
                    return Err(OoxmlError::Xml("end tag before document root".to_string()));
                },
                Node::Eof => return Err(OoxmlError::UnexpectedEof("document".to_string())),
            }
        }
    }

    fn first_element(&mut self) -> Result<ElementStart> {
        loop {
            match self.next_node()? {
                Node::Start(element) => return Ok(element),
                Node::Text(_) => {},
                Node::End => {
                    return Err(OoxmlError::Xml("end tag before first element".to_string()));
                },
                Node::Eof => return Err(OoxmlError::UnexpectedEof("fragment".to_string())),
            }
        }
    }

    /// Decode the first element of the input as `T`, whatever its name.
    pub fn read_element<T: XmlRead>(&mut self) -> Result<T> {
        let element = self.first_element()?;
        T::read_xml(self, &element)
    }

    /// Decode the first element of the input as one alternative of `T`.
    pub fn read_choice_element<T: XmlChoice>(&mut self) -> Result<T> {
        let element = self.first_element()?;
        if !T::is_choice(element.local_name()) {
            return Err(OoxmlError::UnexpectedElement {
                expected: "a choice alternative".to_string(),
                found: element.name().to_string(),
            });
        }
        T::read_choice(self, &element)
    }

    /// Decode a wrapper element holding exactly one alternative of `T`
    /// (`c:tx`, `c:cat`, `c:val`, ...).
    pub fn read_wrapped_choice<T: XmlChoice>(&mut self, element: &ElementStart) -> Result<T> {
        let mut value = None;
        self.read_children(element, |reader, child| {
            if !T::is_choice(child.local_name()) {
                return Ok(false);
            }
            value = Some(T::read_choice(reader, child)?);
            Ok(true)
        })?;
        value.ok_or_else(|| OoxmlError::UnexpectedElement {
            expected: format!("a child element of <{}>", element.name()),
            found: "no child element".to_string(),
        })
    }

    /// Decode a child element as `T`.
    #[inline]
    pub fn read<T: XmlRead>(&mut self, element: &ElementStart) -> Result<T> {
        T::read_xml(self, element)
    }

    /// Decode a text-only child element as a simple type.
    pub fn read_value<T: XmlValue>(&mut self, element: &ElementStart) -> Result<T> {
        let text = self.read_text(element)?;
        T::parse_xml(&text).map_err(|e| match e {
            OoxmlError::InvalidValue { value, reason, .. } => OoxmlError::InvalidValue {
                name: element.name().to_string(),
                value,
                reason,
            },
            other => other,
        })
    }

    /// Walk the children of `element`, handing each child start tag to
    /// `handle`.
    ///
    /// `handle` returns `Ok(true)` when it consumed the child (including its
    /// end tag) and `Ok(false)` when the child is not part of the type; such
    /// children are skipped with a warning, or rejected in strict mode.
    /// Character data between children is ignored.
    pub fn read_children<F>(&mut self, element: &ElementStart, mut handle: F) -> Result<()>
    where
        F: FnMut(&mut Self, &ElementStart) -> Result<bool>,
    {
        if element.is_empty() {
            return Ok(());
        }
        self.enter()?;
        loop {
            match self.next_node()? {
                Node::Start(child) => {
                    if !handle(self, &child)? {
                        self.unknown(element, &child)?;
                    }
                },
                Node::Text(_) => {},
                Node::End => break,
                Node::Eof => return Err(OoxmlError::UnexpectedEof(element.name().to_string())),
            }
        }
        self.leave();
        Ok(())
    }

    /// Finish an element whose type has no child elements. Any children
    /// present are treated as unknown.
    #[inline]
    pub fn read_empty(&mut self, element: &ElementStart) -> Result<()> {
        self.read_children(element, |_, _| Ok(false))
    }

    fn unknown(&mut self, parent: &ElementStart, child: &ElementStart) -> Result<()> {
        if self.options.strict {
            return Err(OoxmlError::UnknownElement {
                parent: parent.name().to_string(),
                name: child.name().to_string(),
            });
        }
        log::warn!(
            "skipping unsupported element <{}> on <{}>",
            child.name(),
            parent.name()
        );
        self.skip(child)
    }

    /// Consume `element` and its whole subtree.
    pub fn skip(&mut self, element: &ElementStart) -> Result<()> {
        if element.is_empty() {
            return Ok(());
        }
        let mut depth = 0usize;
        loop {
            match self.next_node()? {
                Node::Start(child) if !child.is_empty() => depth += 1,
                Node::End if depth == 0 => return Ok(()),
                Node::End => depth -= 1,
                Node::Eof => return Err(OoxmlError::UnexpectedEof(element.name().to_string())),
                _ => {},
            }
        }
    }

    /// Collect the character data of a text-only element.
    pub fn read_text(&mut self, element: &ElementStart) -> Result<String> {
        let mut text = String::new();
        if element.is_empty() {
            return Ok(text);
        }
        loop {
            match self.next_node()? {
                Node::Text(t) => text.push_str(&t),
                Node::Start(child) => {
                    log::warn!(
                        "skipping element <{}> inside text element <{}>",
                        child.name(),
                        element.name()
                    );
                    self.skip(&child)?;
                },
                Node::End => return Ok(text),
                Node::Eof => return Err(OoxmlError::UnexpectedEof(element.name().to_string())),
            }
        }
    }

    /// Capture `element` and its subtree verbatim.
    pub fn read_raw(&mut self, element: &ElementStart) -> Result<RawElement> {
        let mut raw = RawElement::new(element.name());
        raw.attributes = element.raw_attributes().to_vec();
        if element.is_empty() {
            return Ok(raw);
        }
        self.enter()?;
        loop {
            match self.next_node()? {
                Node::Start(child) => {
                    let child = self.read_raw(&child)?;
                    raw.children.push(RawNode::Element(child));
                },
                Node::Text(t) => match raw.children.last_mut() {
                    Some(RawNode::Text(prev)) => prev.push_str(&t),
                    _ => raw.children.push(RawNode::Text(t)),
                },
                Node::End => break,
                Node::Eof => return Err(OoxmlError::UnexpectedEof(element.name().to_string())),
            }
        }
        self.leave();
        // Indentation between child elements is not content.
        if raw.children.iter().any(|c| matches!(c, RawNode::Element(_))) {
            raw.children
                .retain(|c| !matches!(c, RawNode::Text(t) if t.trim().is_empty()));
        }
        log::trace!("captured raw element <{}>", raw.name);
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_element<R: BufRead>(reader: &mut XmlReader<R>) -> ElementStart {
        reader.first_element().unwrap()
    }

    #[test]
    fn test_attributes_are_unescaped_and_namespaced() {
        let xml = r#"<c:f xmlns:c="urn:c" r:id="rId1" name="a &amp; b"/>"#;
        let mut reader = XmlReader::new(xml.as_bytes());
        let e = first_element(&mut reader);
        assert_eq!(e.local_name(), "f");
        assert!(e.is_empty());
        assert_eq!(e.attr("id"), Some("rId1"));
        assert_eq!(e.attr("name"), Some("a & b"));
        assert_eq!(e.attr("c"), None);
    }

    #[test]
    fn test_required_attr_defaults_when_missing() {
        let e = ElementStart::new("c:idx", true);
        let value: u32 = e.required_attr("val").unwrap();
        assert_eq!(value, 0);
    }

    #[test]
    fn test_invalid_attr_names_element() {
        let e = ElementStart::new("c:idx", true).with_attribute("val", "x");
        let err = e.parse_attr::<u32>("val").unwrap_err();
        assert!(err.to_string().contains("c:idx@val"));
    }

    #[test]
    fn test_read_text_resolves_references() {
        let xml = "<a:t>Q1 &amp; Q2 &#8212; <![CDATA[<raw>]]></a:t>";
        let mut reader = XmlReader::new(xml.as_bytes());
        let e = first_element(&mut reader);
        assert_eq!(reader.read_text(&e).unwrap(), "Q1 & Q2 \u{2014} <raw>");
    }

    #[test]
    fn test_unknown_children_are_skipped() {
        let xml = "<p><x><y/><z>t</z></x><k/></p>";
        let mut reader = XmlReader::new(xml.as_bytes());
        let p = first_element(&mut reader);
        let mut seen = Vec::new();
        reader
            .read_children(&p, |reader, child| {
                if child.local_name() == "k" {
                    seen.push("k".to_string());
                    reader.skip(child)?;
                    return Ok(true);
                }
                Ok(false)
            })
            .unwrap();
        assert_eq!(seen, vec!["k"]);
    }

    #[test]
    fn test_strict_mode_rejects_unknown_children() {
        let xml = "<p><x/></p>";
        let mut reader =
            XmlReader::with_options(xml.as_bytes(), ReadOptions::new().with_strict(true));
        let p = first_element(&mut reader);
        let err = reader.read_children(&p, |_, _| Ok(false)).unwrap_err();
        assert!(matches!(err, OoxmlError::UnknownElement { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let xml = "<a><b><c><d/></c></b></a>";
        let mut reader =
            XmlReader::with_options(xml.as_bytes(), ReadOptions::new().with_max_depth(2));
        let a = first_element(&mut reader);
        let err = reader.read_raw(&a).unwrap_err();
        assert!(matches!(err, OoxmlError::DepthExceeded(2)));
    }

    #[test]
    fn test_truncated_document() {
        let xml = "<a><b>";
        let mut reader = XmlReader::new(xml.as_bytes());
        let a = first_element(&mut reader);
        assert!(reader.read_raw(&a).is_err());
    }

    #[test]
    fn test_raw_capture_drops_indentation() {
        let xml = "<a:ext uri=\"{X}\">\n  <x:v xmlns:x=\"urn:x\"> keep </x:v>\n</a:ext>";
        let mut reader = XmlReader::new(xml.as_bytes());
        let e = first_element(&mut reader);
        let raw = reader.read_raw(&e).unwrap();
        assert_eq!(raw.children.len(), 1);
        let v = raw.elements().next().unwrap();
        assert_eq!(v.attributes[0], ("xmlns:x".to_string(), "urn:x".to_string()));
        assert_eq!(v.text(), " keep ");
    }
}
