//! Data labels (`c:dLbls`, `c:dLbl`).

use crate::chart::data::{Layout, NumFmt, Tx};
use crate::chart::types::DLblPos;
use crate::chart::values::{Boolean, UnsignedInt, Val};
use crate::drawing::ext::ExtensionList;
use crate::drawing::shape::ShapeProperties;
use crate::drawing::text::TextBody;
use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, Validate, XmlRead, XmlReader, XmlWrite, XmlWriter, child_path, validate_opt,
};
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// `CT_ChartLines`: leader, drop, high-low and series lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartLines {
    pub sp_pr: Option<Box<ShapeProperties>>,
}

impl XmlRead for ChartLines {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut lines = Self::default();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "spPr" {
                return Ok(false);
            }
            lines.sp_pr = Some(reader.read(child)?);
            Ok(true)
        })?;
        Ok(lines)
    }
}

impl XmlWrite for ChartLines {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        match &self.sp_pr {
            None => writer.element(name).empty(),
            Some(sp_pr) => {
                writer.element(name).open()?;
                writer.child("c:spPr", sp_pr)?;
                writer.end(name)
            },
        }
    }
}

impl Validate for ChartLines {
    const TYPE_NAME: &'static str = "CT_ChartLines";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "spPr", &self.sp_pr)
    }
}

/// The label settings groups `Group_DLbl` and `Group_DLbls`.
///
/// `layout` and `tx` only apply to a single label; `showLeaderLines` and
/// `leaderLines` only to the series-wide settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataLabelSettings {
    pub layout: Option<Layout>,
    pub tx: Option<Tx>,
    pub num_fmt: Option<NumFmt>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub tx_pr: Option<Box<TextBody>>,
    pub d_lbl_pos: Option<Val<DLblPos>>,
    pub show_legend_key: Option<Boolean>,
    pub show_val: Option<Boolean>,
    pub show_cat_name: Option<Boolean>,
    pub show_ser_name: Option<Boolean>,
    pub show_percent: Option<Boolean>,
    pub show_bubble_size: Option<Boolean>,
    pub separator: Option<String>,
    pub show_leader_lines: Option<Boolean>,
    pub leader_lines: Option<ChartLines>,
}

impl DataLabelSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings showing only the values, with every other flag written as
    /// off (the way Office writes a fresh label group).
    pub fn values_only() -> Self {
        let off = Some(Boolean::new(false));
        Self {
            show_legend_key: off,
            show_val: Some(Boolean::new(true)),
            show_cat_name: off,
            show_ser_name: off,
            show_percent: off,
            show_bubble_size: off,
            ..Self::default()
        }
    }

    fn is_member(local_name: &str) -> bool {
        matches!(
            local_name,
            "layout"
                | "tx"
                | "numFmt"
                | "spPr"
                | "txPr"
                | "dLblPos"
                | "showLegendKey"
                | "showVal"
                | "showCatName"
                | "showSerName"
                | "showPercent"
                | "showBubbleSize"
                | "separator"
                | "showLeaderLines"
                | "leaderLines"
        )
    }

    fn read_member<R: BufRead>(
        &mut self,
        reader: &mut XmlReader<R>,
        child: &ElementStart,
    ) -> Result<()> {
        match child.local_name() {
            "layout" => self.layout = Some(reader.read(child)?),
            "tx" => self.tx = Some(reader.read(child)?),
            "numFmt" => self.num_fmt = Some(reader.read(child)?),
            "spPr" => self.sp_pr = Some(reader.read(child)?),
            "txPr" => self.tx_pr = Some(reader.read(child)?),
            "dLblPos" => self.d_lbl_pos = Some(reader.read(child)?),
            "showLegendKey" => self.show_legend_key = Some(reader.read(child)?),
            "showVal" => self.show_val = Some(reader.read(child)?),
            "showCatName" => self.show_cat_name = Some(reader.read(child)?),
            "showSerName" => self.show_ser_name = Some(reader.read(child)?),
            "showPercent" => self.show_percent = Some(reader.read(child)?),
            "showBubbleSize" => self.show_bubble_size = Some(reader.read(child)?),
            "separator" => self.separator = Some(reader.read_text(child)?),
            "showLeaderLines" => self.show_leader_lines = Some(reader.read(child)?),
            "leaderLines" => self.leader_lines = Some(reader.read(child)?),
            _ => reader.skip(child)?,
        }
        Ok(())
    }

    fn write_members<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.opt_child("c:layout", &self.layout)?;
        writer.opt_child("c:tx", &self.tx)?;
        writer.opt_child("c:numFmt", &self.num_fmt)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:txPr", &self.tx_pr)?;
        writer.opt_child("c:dLblPos", &self.d_lbl_pos)?;
        writer.opt_child("c:showLegendKey", &self.show_legend_key)?;
        writer.opt_child("c:showVal", &self.show_val)?;
        writer.opt_child("c:showCatName", &self.show_cat_name)?;
        writer.opt_child("c:showSerName", &self.show_ser_name)?;
        writer.opt_child("c:showPercent", &self.show_percent)?;
        writer.opt_child("c:showBubbleSize", &self.show_bubble_size)?;
        writer.opt_value_element("c:separator", &self.separator)?;
        writer.opt_child("c:showLeaderLines", &self.show_leader_lines)?;
        writer.opt_child("c:leaderLines", &self.leader_lines)
    }

    fn validate_members(&self, path: &str, single: bool) -> Result<()> {
        let misplaced = if single {
            [
                ("showLeaderLines", self.show_leader_lines.is_some()),
                ("leaderLines", self.leader_lines.is_some()),
            ]
        } else {
            [("layout", self.layout.is_some()), ("tx", self.tx.is_some())]
        };
        for (name, present) in misplaced {
            if present {
                return Err(OoxmlError::validation(
                    child_path(path, name),
                    if single {
                        "only allowed on the series-wide labels"
                    } else {
                        "only allowed on a single label"
                    },
                ));
            }
        }
        validate_opt(path, "layout", &self.layout)?;
        validate_opt(path, "tx", &self.tx)?;
        validate_opt(path, "numFmt", &self.num_fmt)?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "txPr", &self.tx_pr)?;
        validate_opt(path, "dLblPos", &self.d_lbl_pos)?;
        validate_opt(path, "leaderLines", &self.leader_lines)
    }
}

/// Content of a label group: deleted, or the label settings.
#[derive(Debug, Clone, PartialEq)]
pub enum DataLabelContent {
    /// `c:delete`
    Delete(Boolean),
    Settings(DataLabelSettings),
}

/// Decode one child of `c:dLbl`/`c:dLbls` into the delete/settings choice.
/// Returns `false` for children outside the choice.
fn read_content<R: BufRead>(
    content: &mut Option<DataLabelContent>,
    reader: &mut XmlReader<R>,
    child: &ElementStart,
) -> Result<bool> {
    let local = child.local_name();
    if local == "delete" {
        if matches!(content, Some(DataLabelContent::Settings(_))) {
            log::warn!("<{}> alongside label settings, settings dropped", child.name());
        }
        *content = Some(DataLabelContent::Delete(reader.read(child)?));
        return Ok(true);
    }
    if !DataLabelSettings::is_member(local) {
        return Ok(false);
    }
    if !matches!(content, Some(DataLabelContent::Settings(_))) {
        if content.is_some() {
            log::warn!("<{}> after <delete>, delete dropped", child.name());
        }
        *content = Some(DataLabelContent::Settings(DataLabelSettings::new()));
    }
    if let Some(DataLabelContent::Settings(settings)) = content {
        settings.read_member(reader, child)?;
    }
    Ok(true)
}

fn write_content<W: Write>(
    content: &Option<DataLabelContent>,
    writer: &mut XmlWriter<W>,
) -> Result<()> {
    match content {
        None => Ok(()),
        Some(DataLabelContent::Delete(delete)) => writer.child("c:delete", delete),
        Some(DataLabelContent::Settings(settings)) => settings.write_members(writer),
    }
}

fn validate_content(content: &Option<DataLabelContent>, path: &str, single: bool) -> Result<()> {
    match content {
        None | Some(DataLabelContent::Delete(_)) => Ok(()),
        Some(DataLabelContent::Settings(settings)) => settings.validate_members(path, single),
    }
}

/// `CT_DLbl`: the label of one data point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataLabel {
    pub idx: UnsignedInt,
    pub content: Option<DataLabelContent>,
    pub ext_lst: Option<ExtensionList>,
}

impl DataLabel {
    pub fn new(idx: u32) -> Self {
        Self {
            idx: UnsignedInt::new(idx),
            ..Self::default()
        }
    }
}

impl XmlRead for DataLabel {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut d_lbl = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "idx" => d_lbl.idx = reader.read(child)?,
                "extLst" => d_lbl.ext_lst = Some(reader.read(child)?),
                _ => return read_content(&mut d_lbl.content, reader, child),
            }
            Ok(true)
        })?;
        Ok(d_lbl)
    }
}

impl XmlWrite for DataLabel {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("c:idx", &self.idx)?;
        write_content(&self.content, writer)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for DataLabel {
    const TYPE_NAME: &'static str = "CT_DLbl";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_content(&self.content, path, true)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_DLbls`: the labels of a series or chart group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataLabels {
    pub d_lbl: Vec<DataLabel>,
    pub content: Option<DataLabelContent>,
    pub ext_lst: Option<ExtensionList>,
}

impl DataLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels switched off (`<c:delete val="1"/>`).
    pub fn deleted() -> Self {
        Self {
            content: Some(DataLabelContent::Delete(Boolean::new(true))),
            ..Self::default()
        }
    }

    /// Labels showing the point values.
    pub fn values() -> Self {
        Self {
            content: Some(DataLabelContent::Settings(DataLabelSettings::values_only())),
            ..Self::default()
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(&self.content, Some(DataLabelContent::Delete(delete)) if delete.is_true())
    }
}

impl XmlRead for DataLabels {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut d_lbls = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "dLbl" => d_lbls.d_lbl.push(reader.read(child)?),
                "extLst" => d_lbls.ext_lst = Some(reader.read(child)?),
                _ => return read_content(&mut d_lbls.content, reader, child),
            }
            Ok(true)
        })?;
        Ok(d_lbls)
    }
}

impl XmlWrite for DataLabels {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.d_lbl.is_empty() && self.content.is_none() && self.ext_lst.is_none() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.children("c:dLbl", &self.d_lbl)?;
        write_content(&self.content, writer)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for DataLabels {
    const TYPE_NAME: &'static str = "CT_DLbls";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for (i, d_lbl) in self.d_lbl.iter().enumerate() {
            let lbl_path = format!("{}/dLbl[{}]", path, i);
            if !seen.insert(d_lbl.idx.val) {
                return Err(OoxmlError::validation(
                    child_path(&lbl_path, "idx"),
                    format!("duplicate label for point {}", d_lbl.idx.val),
                ));
            }
            d_lbl.validate_with_path(&lbl_path)?;
        }
        validate_content(&self.content, path, false)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_series_labels() {
        let xml = r#"<c:dLbls><c:dLbl><c:idx val="2"/><c:delete val="1"/></c:dLbl><c:numFmt formatCode="0.0%" sourceLinked="0"/><c:spPr><a:noFill/><a:ln><a:noFill/></a:ln></c:spPr><c:dLblPos val="outEnd"/><c:showLegendKey val="0"/><c:showVal val="1"/><c:showCatName val="0"/><c:showSerName val="0"/><c:showPercent val="0"/><c:showBubbleSize val="0"/><c:separator>; </c:separator><c:showLeaderLines val="0"/></c:dLbls>"#;
        let d_lbls: DataLabels = from_fragment(xml).unwrap();
        assert_eq!(d_lbls.d_lbl.len(), 1);
        assert!(matches!(d_lbls.d_lbl[0].content, Some(DataLabelContent::Delete(_))));
        let Some(DataLabelContent::Settings(settings)) = &d_lbls.content else {
            panic!("expected label settings");
        };
        assert_eq!(settings.d_lbl_pos.unwrap().val, DLblPos::OutEnd);
        assert_eq!(settings.separator.as_deref(), Some("; "));
        assert!(d_lbls.validate().is_ok());
        assert_eq!(to_fragment(&d_lbls, "c:dLbls").unwrap(), xml);
    }

    #[test]
    fn test_deleted_labels() {
        let d_lbls = DataLabels::deleted();
        assert!(d_lbls.is_deleted());
        assert_eq!(
            to_fragment(&d_lbls, "c:dLbls").unwrap(),
            r#"<c:dLbls><c:delete val="1"/></c:dLbls>"#
        );
    }

    #[test]
    fn test_leader_lines_only_on_series_labels() {
        let mut settings = DataLabelSettings::values_only();
        settings.leader_lines = Some(ChartLines::default());
        let d_lbl = DataLabel {
            content: Some(DataLabelContent::Settings(settings)),
            ..DataLabel::new(0)
        };
        let err = d_lbl.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "CT_DLbl/leaderLines: only allowed on the series-wide labels"
        );
    }

    #[test]
    fn test_duplicate_point_labels() {
        let d_lbls = DataLabels {
            d_lbl: vec![DataLabel::new(1), DataLabel::new(1)],
            ..DataLabels::values()
        };
        let err = d_lbls.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_DLbls/dLbl[1]/idx: duplicate label for point 1");
    }
}
