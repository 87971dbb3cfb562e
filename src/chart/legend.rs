//! Chart legend (`c:legend`).

use crate::chart::data::Layout;
use crate::chart::types::LegendPos;
use crate::chart::values::{Boolean, OptVal, UnsignedInt};
use crate::drawing::ext::ExtensionList;
use crate::drawing::shape::ShapeProperties;
use crate::drawing::text::TextBody;
use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, Validate, XmlChoice, XmlRead, XmlReader, XmlWrite, XmlWriter, child_path,
    validate_opt, validate_opt_choice,
};
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// A legend entry is either hidden or carries its own text properties.
#[derive(Debug, Clone, PartialEq)]
pub enum LegendEntryContent {
    /// `c:delete`
    Delete(Boolean),
    /// `c:txPr`
    TxPr(Box<TextBody>),
}

impl XmlChoice for LegendEntryContent {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "delete" | "txPr")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "delete" => Ok(Self::Delete(reader.read(element)?)),
            "txPr" => Ok(Self::TxPr(reader.read(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "c:delete or c:txPr".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Delete(delete) => writer.child("c:delete", delete),
            Self::TxPr(body) => writer.child("c:txPr", body),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Delete(_) => "delete",
            Self::TxPr(_) => "txPr",
        }
    }
}

impl Validate for LegendEntryContent {
    const TYPE_NAME: &'static str = "CT_LegendEntry/content";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Delete(_) => Ok(()),
            Self::TxPr(body) => body.validate_with_path(path),
        }
    }
}

/// `CT_LegendEntry`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendEntry {
    pub idx: UnsignedInt,
    pub content: Option<LegendEntryContent>,
    pub ext_lst: Option<ExtensionList>,
}

impl LegendEntry {
    /// An entry hiding series (or point) `idx` from the legend.
    pub fn hidden(idx: u32) -> Self {
        Self {
            idx: UnsignedInt::new(idx),
            content: Some(LegendEntryContent::Delete(Boolean::new(true))),
            ext_lst: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(&self.content, Some(LegendEntryContent::Delete(delete)) if delete.is_true())
    }
}

impl XmlRead for LegendEntry {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut entry = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "idx" => entry.idx = reader.read(child)?,
                name if LegendEntryContent::is_choice(name) => {
                    entry.content = Some(LegendEntryContent::read_choice(reader, child)?)
                },
                "extLst" => entry.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(entry)
    }
}

impl XmlWrite for LegendEntry {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("c:idx", &self.idx)?;
        writer.opt_choice(&self.content)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for LegendEntry {
    const TYPE_NAME: &'static str = "CT_LegendEntry";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_choice(path, &self.content)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_Legend`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    pub legend_pos: Option<OptVal<LegendPos>>,
    pub legend_entry: Vec<LegendEntry>,
    pub layout: Option<Layout>,
    pub overlay: Option<Boolean>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub tx_pr: Option<Box<TextBody>>,
    pub ext_lst: Option<ExtensionList>,
}

impl Legend {
    /// A legend at `pos` that does not overlap the plot.
    pub fn new(pos: LegendPos) -> Self {
        Self {
            legend_pos: Some(OptVal::new(pos)),
            overlay: Some(Boolean::new(false)),
            ..Self::default()
        }
    }

    /// Position, falling back to the schema default (right).
    pub fn position(&self) -> LegendPos {
        self.legend_pos.map(|pos| pos.value()).unwrap_or_default()
    }
}

impl XmlRead for Legend {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut legend = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "legendPos" => legend.legend_pos = Some(reader.read(child)?),
                "legendEntry" => legend.legend_entry.push(reader.read(child)?),
                "layout" => legend.layout = Some(reader.read(child)?),
                "overlay" => legend.overlay = Some(reader.read(child)?),
                "spPr" => legend.sp_pr = Some(reader.read(child)?),
                "txPr" => legend.tx_pr = Some(reader.read(child)?),
                "extLst" => legend.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(legend)
    }
}

impl XmlWrite for Legend {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:legendPos", &self.legend_pos)?;
        writer.children("c:legendEntry", &self.legend_entry)?;
        writer.opt_child("c:layout", &self.layout)?;
        writer.opt_child("c:overlay", &self.overlay)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:txPr", &self.tx_pr)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Legend {
    const TYPE_NAME: &'static str = "CT_Legend";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for (i, entry) in self.legend_entry.iter().enumerate() {
            let entry_path = format!("{}/legendEntry[{}]", path, i);
            if !seen.insert(entry.idx.val) {
                return Err(OoxmlError::validation(
                    child_path(&entry_path, "idx"),
                    format!("duplicate entry {}", entry.idx.val),
                ));
            }
            entry.validate_with_path(&entry_path)?;
        }
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
    fn test_legend_with_hidden_entry() {
        let xml = r#"<c:legend><c:legendPos val="b"/><c:legendEntry><c:idx val="2"/><c:delete val="1"/></c:legendEntry><c:overlay val="0"/><c:spPr><a:noFill/><a:ln><a:noFill/></a:ln></c:spPr></c:legend>"#;
        let legend: Legend = from_fragment(xml).unwrap();
        assert_eq!(legend.position(), LegendPos::Bottom);
        assert!(legend.legend_entry[0].is_deleted());
        assert!(legend.validate().is_ok());
        assert_eq!(to_fragment(&legend, "c:legend").unwrap(), xml);
    }

    #[test]
    fn test_default_position() {
        let legend: Legend = from_fragment("<c:legend/>").unwrap();
        assert_eq!(legend.position(), LegendPos::Right);
        assert_eq!(
            to_fragment(&Legend::new(LegendPos::Top), "c:legend").unwrap(),
            r#"<c:legend><c:legendPos val="t"/><c:overlay val="0"/></c:legend>"#
        );
    }

    #[test]
    fn test_duplicate_entries() {
        let legend = Legend {
            legend_entry: vec![LegendEntry::hidden(0), LegendEntry::hidden(0)],
            ..Legend::new(LegendPos::Right)
        };
        let err = legend.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_Legend/legendEntry[1]/idx: duplicate entry 0");
    }
}
