//! Extension lists (`CT_ExtensionList`).
//!
//! Extensions carry vendor markup (`c14:`, `c15:`, `a16:`, ...) this crate
//! does not model. Their content is captured as raw elements and written back
//! unchanged.

use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, RawElement, Validate, XmlRead, XmlReader, XmlWrite, XmlWriter, validate_all,
};
use std::io::{BufRead, Write};

/// `CT_Extension`: one extension, identified by its `uri`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extension {
    /// Extension identifier, usually a GUID in braces
    pub uri: String,
    /// Namespace declarations made on the `ext` element itself
    pub namespaces: Vec<(String, String)>,
    /// Extension markup, kept verbatim
    pub content: Vec<RawElement>,
}

impl Extension {
    /// Create an extension with the given URI and no content.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            namespaces: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Add a content element.
    pub fn with_content(mut self, element: RawElement) -> Self {
        self.content.push(element);
        self
    }
}

impl XmlRead for Extension {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut ext = Self::new(element.required_attr::<String>("uri")?);
        ext.namespaces = element
            .raw_attributes()
            .iter()
            .filter(|(name, _)| name == "xmlns" || name.starts_with("xmlns:"))
            .cloned()
            .collect();
        reader.read_children(element, |reader, child| {
            ext.content.push(reader.read_raw(child)?);
            Ok(true)
        })?;
        Ok(ext)
    }
}

impl XmlWrite for Extension {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let mut tag = writer.element(name).attr("uri", &self.uri);
        for (prefix, uri) in &self.namespaces {
            tag = tag.raw_attr(prefix, uri);
        }
        if self.content.is_empty() {
            return tag.empty();
        }
        tag.open()?;
        for element in &self.content {
            writer.child(&element.name, element)?;
        }
        writer.end(name)
    }
}

impl Validate for Extension {
    const TYPE_NAME: &'static str = "CT_Extension";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        if self.uri.is_empty() {
            return Err(OoxmlError::validation(path, "uri is required"));
        }
        Ok(())
    }
}

/// `CT_ExtensionList`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionList {
    pub ext: Vec<Extension>,
}

impl ExtensionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an extension by URI.
    pub fn find(&self, uri: &str) -> Option<&Extension> {
        self.ext.iter().find(|ext| ext.uri == uri)
    }
}

impl XmlRead for ExtensionList {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut list = Self::new();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "ext" {
                return Ok(false);
            }
            list.ext.push(reader.read(child)?);
            Ok(true)
        })?;
        Ok(list)
    }
}

impl XmlWrite for ExtensionList {
    /// The list keeps the caller's prefix for its `ext` children, since
    /// `c:extLst` holds `c:ext` and `a:extLst` holds `a:ext`.
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.ext.is_empty() {
            return writer.element(name).empty();
        }
        let ext_name = match name.split_once(':') {
            Some((prefix, _)) => format!("{}:ext", prefix),
            None => "ext".to_string(),
        };
        writer.element(name).open()?;
        writer.children(&ext_name, &self.ext)?;
        writer.end(name)
    }
}

impl Validate for ExtensionList {
    const TYPE_NAME: &'static str = "CT_ExtensionList";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_all(path, "ext", &self.ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{ReadOptions, from_fragment_with, to_fragment};

    #[test]
    fn test_extension_content_round_trips() {
        let xml = r#"<c:extLst><c:ext uri="{6F2FDCE9-48DA-4B69-8628-5D25D57E0C7C}" xmlns:c14="http://schemas.microsoft.com/office/drawing/2007/8/2/chart"><c14:pivotOptions><c14:dropZoneFilter val="1"/></c14:pivotOptions></c:ext></c:extLst>"#;
        let list: ExtensionList =
            from_fragment_with(xml, ReadOptions::new().with_strict(true)).unwrap();
        assert_eq!(list.ext.len(), 1);
        let ext = list.find("{6F2FDCE9-48DA-4B69-8628-5D25D57E0C7C}").unwrap();
        assert_eq!(ext.content[0].name, "c14:pivotOptions");
        assert_eq!(ext.namespaces[0].0, "xmlns:c14");

        assert_eq!(to_fragment(&list, "c:extLst").unwrap(), xml);
    }

    #[test]
    fn test_extension_requires_uri() {
        let list = ExtensionList {
            ext: vec![Extension::default()],
        };
        let err = list.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_ExtensionList/ext[0]: uri is required");
    }
}
