//! Streaming encoder.
//!
//! Types write themselves through [`XmlWriter`]: a start tag is assembled with
//! [`XmlWriter::element`], children are emitted in schema order, and the
//! element is closed with [`XmlWriter::end`].

use crate::error::Result;
use crate::xml::{XmlChoice, XmlWrite};
use crate::xml::escape::escape_xml;
use crate::xml::options::WriteOptions;
use crate::xml::value::XmlValue;
use std::io::Write;

#[derive(Debug, Default, Clone, Copy)]
struct OpenElement {
    has_elements: bool,
    has_text: bool,
}

/// XML output sink.
pub struct XmlWriter<W: Write> {
    inner: W,
    options: WriteOptions,
    open: Vec<OpenElement>,
    started: bool,
    pending_namespaces: &'static [(&'static str, &'static str)],
}

impl<W: Write> XmlWriter<W> {
    /// Create a writer with default options.
    pub fn new(inner: W) -> Self {
        Self::with_options(inner, WriteOptions::default())
    }

    /// Create a writer with the given options.
    pub fn with_options(inner: W, options: WriteOptions) -> Self {
        Self {
            inner,
            options,
            open: Vec::new(),
            started: false,
            pending_namespaces: &[],
        }
    }

    /// The options this writer was created with.
    #[inline]
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Consume the writer, returning the sink.
    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write the XML declaration.
    pub fn declaration(&mut self) -> Result<()> {
        if self.options.standalone {
            self.inner
                .write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#)?;
        } else {
            self.inner
                .write_all(br#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        }
        self.started = true;
        Ok(())
    }

    /// Declare namespaces on the next start tag (used for document roots).
    pub fn declare_namespaces(&mut self, namespaces: &'static [(&'static str, &'static str)]) {
        self.pending_namespaces = namespaces;
    }

    /// Begin a start tag.
    pub fn element(&mut self, name: &str) -> StartTag<'_, W> {
        let mut tag = String::with_capacity(name.len() + 16);
        tag.push('<');
        tag.push_str(name);
        for (prefix, uri) in std::mem::take(&mut self.pending_namespaces) {
            if prefix.is_empty() {
                tag.push_str(" xmlns=\"");
            } else {
                tag.push_str(" xmlns:");
                tag.push_str(prefix);
                tag.push_str("=\"");
            }
            tag.push_str(uri);
            tag.push('"');
        }
        StartTag { writer: self, tag }
    }

    fn newline_before_element(&mut self) -> Result<()> {
        let Some(indent) = self.options.indent else {
            return Ok(());
        };
        let in_text = self.open.last().is_some_and(|e| e.has_text);
        if self.started && !in_text {
            let width = indent * self.open.len();
            self.inner.write_all(b"\n")?;
            write!(self.inner, "{:width$}", "", width = width)?;
        }
        Ok(())
    }

    fn write_tag(&mut self, tag: &str, empty: bool) -> Result<()> {
        self.newline_before_element()?;
        if let Some(parent) = self.open.last_mut() {
            parent.has_elements = true;
        }
        self.inner.write_all(tag.as_bytes())?;
        if empty {
            self.inner.write_all(b"/>")?;
        } else {
            self.inner.write_all(b">")?;
            self.open.push(OpenElement::default());
        }
        self.started = true;
        Ok(())
    }

    /// Write an end tag.
    pub fn end(&mut self, name: &str) -> Result<()> {
        let element = self.open.pop().unwrap_or_default();
        if let Some(indent) = self.options.indent {
            if element.has_elements && !element.has_text {
                let width = indent * self.open.len();
                self.inner.write_all(b"\n")?;
                write!(self.inner, "{:width$}", "", width = width)?;
            }
        }
        self.inner.write_all(b"</")?;
        self.inner.write_all(name.as_bytes())?;
        self.inner.write_all(b">")?;
        Ok(())
    }

    /// Write escaped character data.
    pub fn text(&mut self, text: &str) -> Result<()> {
        if let Some(element) = self.open.last_mut() {
            element.has_text = true;
        }
        self.inner.write_all(escape_xml(text).as_bytes())?;
        Ok(())
    }

    /// Write a nested type under `name`.
    #[inline]
    pub fn child<T: XmlWrite + ?Sized>(&mut self, name: &str, value: &T) -> Result<()> {
        value.write_xml(self, name)
    }

    /// Write an optional nested type; `None` writes nothing.
    #[inline]
    pub fn opt_child<T: XmlWrite>(&mut self, name: &str, value: &Option<T>) -> Result<()> {
        match value {
            Some(value) => value.write_xml(self, name),
            None => Ok(()),
        }
    }

    /// Write each element of a repeated child.
    pub fn children<T: XmlWrite>(&mut self, name: &str, values: &[T]) -> Result<()> {
        for value in values {
            value.write_xml(self, name)?;
        }
        Ok(())
    }

    /// Write a choice under the element name of its alternative.
    #[inline]
    pub fn choice<T: XmlChoice>(&mut self, value: &T) -> Result<()> {
        value.write_choice(self)
    }

    /// Write an optional choice.
    #[inline]
    pub fn opt_choice<T: XmlChoice>(&mut self, value: &Option<T>) -> Result<()> {
        match value {
            Some(value) => value.write_choice(self),
            None => Ok(()),
        }
    }

    /// Write a sequence of choices in order.
    pub fn choices<T: XmlChoice>(&mut self, values: &[T]) -> Result<()> {
        for value in values {
            value.write_choice(self)?;
        }
        Ok(())
    }

    /// Write a wrapper element around the present alternative of a choice.
    pub fn wrapped_choice<T: XmlChoice>(&mut self, name: &str, value: &T) -> Result<()> {
        self.element(name).open()?;
        value.write_choice(self)?;
        self.end(name)
    }

    /// Write `<name>value</name>` for a text-only element.
    pub fn value_element<T: XmlValue>(&mut self, name: &str, value: &T) -> Result<()> {
        self.element(name).open()?;
        self.text(&value.to_xml_string())?;
        self.end(name)
    }

    /// Write an optional text-only element.
    pub fn opt_value_element<T: XmlValue>(&mut self, name: &str, value: &Option<T>) -> Result<()> {
        match value {
            Some(value) => self.value_element(name, value),
            None => Ok(()),
        }
    }
}

/// A start tag being assembled; finish with [`StartTag::empty`] or
/// [`StartTag::open`].
pub struct StartTag<'w, W: Write> {
    writer: &'w mut XmlWriter<W>,
    tag: String,
}

impl<'w, W: Write> StartTag<'w, W> {
    /// Add an attribute.
    pub fn attr<T: XmlValue>(mut self, name: &str, value: &T) -> Self {
        self.push_name(name);
        let mut lexical = String::new();
        value.write_value(&mut lexical);
        self.tag.push_str(&escape_xml(&lexical));
        self.tag.push('"');
        self
    }

    /// Add an attribute if present.
    #[inline]
    pub fn opt_attr<T: XmlValue>(self, name: &str, value: Option<&T>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Add an attribute from an unescaped string.
    pub fn raw_attr(mut self, name: &str, value: &str) -> Self {
        self.push_name(name);
        self.tag.push_str(&escape_xml(value));
        self.tag.push('"');
        self
    }

    fn push_name(&mut self, name: &str) {
        self.tag.push(' ');
        self.tag.push_str(name);
        self.tag.push_str("=\"");
    }

    /// Finish as a self-closing element.
    pub fn empty(self) -> Result<()> {
        self.writer.write_tag(&self.tag, true)
    }

    /// Finish as a start tag; the caller writes content and then calls
    /// [`XmlWriter::end`].
    pub fn open(self) -> Result<()> {
        self.writer.write_tag(&self.tag, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(options: WriteOptions, f: impl FnOnce(&mut XmlWriter<Vec<u8>>) -> Result<()>) -> String {
        let mut writer = XmlWriter::with_options(Vec::new(), options);
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_compact_output() {
        let xml = render(WriteOptions::default(), |w| {
            w.element("c:ser").open()?;
            w.element("c:idx").attr("val", &3u32).empty()?;
            w.value_element("c:v", &"a<b".to_string())?;
            w.end("c:ser")
        });
        assert_eq!(xml, r#"<c:ser><c:idx val="3"/><c:v>a&lt;b</c:v></c:ser>"#);
    }

    #[test]
    fn test_optional_attributes() {
        let xml = render(WriteOptions::default(), |w| {
            w.element("a:off")
                .attr("x", &0i64)
                .opt_attr::<bool>("flipH", None)
                .opt_attr("flipV", Some(&true))
                .raw_attr("descr", "\"q\"")
                .empty()
        });
        assert_eq!(xml, r#"<a:off x="0" flipV="1" descr="&quot;q&quot;"/>"#);
    }

    #[test]
    fn test_indentation_skips_text_content() {
        let options = WriteOptions::new().with_indent(Some(2));
        let xml = render(options, |w| {
            w.element("a").open()?;
            w.element("b").open()?;
            w.text("x")?;
            w.end("b")?;
            w.element("c").empty()?;
            w.end("a")
        });
        assert_eq!(xml, "<a>\n  <b>x</b>\n  <c/>\n</a>");
    }

    #[test]
    fn test_root_namespaces() {
        static NS: &[(&str, &str)] = &[("c", "urn:c"), ("", "urn:default")];
        let xml = render(WriteOptions::default(), |w| {
            w.declare_namespaces(NS);
            w.element("c:chartSpace").empty()
        });
        assert_eq!(xml, r#"<c:chartSpace xmlns:c="urn:c" xmlns="urn:default"/>"#);
    }
}
