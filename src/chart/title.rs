//! Chart and axis titles (`c:title`).

use crate::chart::data::{Layout, StrRef, Tx};
use crate::chart::values::Boolean;
use crate::drawing::ext::ExtensionList;
use crate::drawing::shape::ShapeProperties;
use crate::drawing::text::TextBody;
use crate::error::Result;
use crate::xml::{
    ElementStart, Validate, XmlRead, XmlReader, XmlWrite, XmlWriter, validate_opt,
};
use std::io::{BufRead, Write};

/// `CT_Title`
///
/// Without `tx` the application generates the text (series name or
/// "Chart Title"); `overlay` lets the title sit on top of the plot area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Title {
    pub tx: Option<Tx>,
    pub layout: Option<Layout>,
    pub overlay: Option<Boolean>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub tx_pr: Option<Box<TextBody>>,
    pub ext_lst: Option<ExtensionList>,
}

impl Title {
    pub fn new() -> Self {
        Self::default()
    }

    /// A title with literal rich text.
    pub fn from_text(text: &str) -> Self {
        Self {
            tx: Some(Tx::Rich(Box::new(TextBody::from_text(text)))),
            overlay: Some(Boolean::new(false)),
            ..Self::default()
        }
    }

    /// A title linked to a cell.
    pub fn from_ref(f: impl Into<String>) -> Self {
        Self {
            tx: Some(Tx::StrRef(StrRef::new(f))),
            ..Self::default()
        }
    }

    /// The literal text, or the cached text of a reference.
    pub fn text(&self) -> Option<String> {
        match self.tx.as_ref()? {
            Tx::Rich(body) => Some(body.text()),
            Tx::StrRef(r) => r
                .str_cache
                .as_ref()
                .and_then(|cache| cache.pt.first())
                .map(|pt| pt.v.clone()),
        }
    }
}

impl XmlRead for Title {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut title = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "tx" => title.tx = Some(reader.read(child)?),
                "layout" => title.layout = Some(reader.read(child)?),
                "overlay" => title.overlay = Some(reader.read(child)?),
                "spPr" => title.sp_pr = Some(reader.read(child)?),
                "txPr" => title.tx_pr = Some(reader.read(child)?),
                "extLst" => title.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(title)
    }
}

impl XmlWrite for Title {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:tx", &self.tx)?;
        writer.opt_child("c:layout", &self.layout)?;
        writer.opt_child("c:overlay", &self.overlay)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:txPr", &self.tx_pr)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Title {
    const TYPE_NAME: &'static str = "CT_Title";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "tx", &self.tx)?;
        validate_opt(path, "layout", &self.layout)?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "txPr", &self.tx_pr)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_rich_title() {
        let xml = r#"<c:title><c:tx><c:rich><a:bodyPr/><a:lstStyle/><a:p><a:pPr><a:defRPr sz="1400" b="0"/></a:pPr><a:r><a:rPr lang="en-US"/><a:t>Quarterly Revenue</a:t></a:r></a:p></c:rich></c:tx><c:overlay val="0"/></c:title>"#;
        let title: Title = from_fragment(xml).unwrap();
        assert_eq!(title.text().as_deref(), Some("Quarterly Revenue"));
        assert!(title.validate().is_ok());
        assert_eq!(to_fragment(&title, "c:title").unwrap(), xml);
    }

    #[test]
    fn test_auto_title() {
        let title: Title = from_fragment("<c:title/>").unwrap();
        assert_eq!(title.text(), None);
        assert_eq!(to_fragment(&title, "c:title").unwrap(), "<c:title/>");
    }

    #[test]
    fn test_title_from_text() {
        let title = Title::from_text("Sales");
        assert_eq!(title.text().as_deref(), Some("Sales"));
        assert!(title.validate().is_ok());
    }
}
