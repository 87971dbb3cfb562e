//! Outline properties (`CT_LineProperties`).

use crate::drawing::ext::ExtensionList;
use crate::drawing::fill::Fill;
use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, Validate, XmlChoice, XmlRead, XmlReader, XmlWrite, XmlWriter, validate_opt,
    validate_opt_choice, validate_opt_value,
};
use std::io::{BufRead, Write};

crate::st_range! {
    /// `ST_LineWidth`: outline width in EMUs.
    LineWidth(i32) = "ST_LineWidth", 0, 20_116_800, default 0
}

crate::st_enum! {
    /// `ST_LineCap`
    LineCap = "ST_LineCap" {
        Round => "rnd",
        Square => "sq",
        Flat => "flat",
    }
}

crate::st_enum! {
    /// `ST_CompoundLine`
    CompoundLine = "ST_CompoundLine" {
        Single => "sng",
        Double => "dbl",
        ThickThin => "thickThin",
        ThinThick => "thinThick",
        Triple => "tri",
    }
}

crate::st_enum! {
    /// `ST_PenAlignment`
    PenAlignment = "ST_PenAlignment" {
        Center => "ctr",
        Inset => "in",
    }
}

crate::st_enum! {
    /// `ST_PresetLineDashVal`
    PresetLineDashVal = "ST_PresetLineDashVal", default Solid {
        Solid => "solid",
        Dot => "dot",
        Dash => "dash",
        LgDash => "lgDash",
        DashDot => "dashDot",
        LgDashDot => "lgDashDot",
        LgDashDotDot => "lgDashDotDot",
        SysDash => "sysDash",
        SysDot => "sysDot",
        SysDashDot => "sysDashDot",
        SysDashDotDot => "sysDashDotDot",
    }
}

crate::st_enum! {
    /// `ST_LineEndType`
    LineEndType = "ST_LineEndType", default None {
        None => "none",
        Triangle => "triangle",
        Stealth => "stealth",
        Diamond => "diamond",
        Oval => "oval",
        Arrow => "arrow",
    }
}

crate::st_enum! {
    /// `ST_LineEndWidth` and `ST_LineEndLength`
    LineEndSize = "ST_LineEndWidth" {
        Small => "sm",
        Medium => "med",
        Large => "lg",
    }
}

/// `EG_LineJoinProperties`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    /// `a:round`
    Round,
    /// `a:bevel`
    Bevel,
    /// `a:miter` with its optional limit (thousandths of a percent)
    Miter(Option<i32>),
}

impl XmlChoice for LineJoin {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "round" | "bevel" | "miter")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let join = match element.local_name() {
            "round" => Self::Round,
            "bevel" => Self::Bevel,
            "miter" => Self::Miter(element.parse_attr("lim")?),
            _ => {
                return Err(OoxmlError::UnexpectedElement {
                    expected: "a line join".to_string(),
                    found: element.name().to_string(),
                });
            },
        };
        reader.read_empty(element)?;
        Ok(join)
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Round => writer.element("a:round").empty(),
            Self::Bevel => writer.element("a:bevel").empty(),
            Self::Miter(lim) => writer.element("a:miter").opt_attr("lim", lim.as_ref()).empty(),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Bevel => "bevel",
            Self::Miter(_) => "miter",
        }
    }
}

impl Validate for LineJoin {
    const TYPE_NAME: &'static str = "EG_LineJoinProperties";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `CT_LineEndProperties`: arrow heads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineEnd {
    pub kind: Option<LineEndType>,
    pub w: Option<LineEndSize>,
    pub len: Option<LineEndSize>,
}

impl XmlRead for LineEnd {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let end = Self {
            kind: element.parse_attr("type")?,
            w: element.parse_attr("w")?,
            len: element.parse_attr("len")?,
        };
        reader.read_empty(element)?;
        Ok(end)
    }
}

impl XmlWrite for LineEnd {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .opt_attr("type", self.kind.as_ref())
            .opt_attr("w", self.w.as_ref())
            .opt_attr("len", self.len.as_ref())
            .empty()
    }
}

impl Validate for LineEnd {
    const TYPE_NAME: &'static str = "CT_LineEndProperties";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `CT_LineProperties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineProperties {
    pub w: Option<LineWidth>,
    pub cap: Option<LineCap>,
    pub cmpd: Option<CompoundLine>,
    pub algn: Option<PenAlignment>,
    /// `EG_LineFillProperties`: no, solid, gradient or pattern fill
    pub fill: Option<Fill>,
    pub prst_dash: Option<PresetLineDashVal>,
    pub join: Option<LineJoin>,
    pub head_end: Option<LineEnd>,
    pub tail_end: Option<LineEnd>,
    pub ext_lst: Option<ExtensionList>,
}

impl LineProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// A solid outline of width `w` EMUs.
    pub fn solid(w: i32, fill: Fill) -> Self {
        Self {
            w: Some(LineWidth(w)),
            fill: Some(fill),
            ..Self::default()
        }
    }

    /// An invisible outline (`<a:ln><a:noFill/></a:ln>`).
    pub fn none() -> Self {
        Self {
            fill: Some(Fill::NoFill),
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.fill.is_none()
            && self.prst_dash.is_none()
            && self.join.is_none()
            && self.head_end.is_none()
            && self.tail_end.is_none()
            && self.ext_lst.is_none()
    }
}

impl XmlRead for LineProperties {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut ln = Self {
            w: element.parse_attr("w")?,
            cap: element.parse_attr("cap")?,
            cmpd: element.parse_attr("cmpd")?,
            algn: element.parse_attr("algn")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "prstDash" => {
                    ln.prst_dash = child.parse_attr("val")?;
                    reader.read_empty(child)?;
                },
                "headEnd" => ln.head_end = Some(reader.read(child)?),
                "tailEnd" => ln.tail_end = Some(reader.read(child)?),
                "extLst" => ln.ext_lst = Some(reader.read(child)?),
                name if Fill::is_choice(name) => ln.fill = Some(Fill::read_choice(reader, child)?),
                name if LineJoin::is_choice(name) => {
                    ln.join = Some(LineJoin::read_choice(reader, child)?)
                },
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(ln)
    }
}

impl XmlWrite for LineProperties {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("w", self.w.as_ref())
            .opt_attr("cap", self.cap.as_ref())
            .opt_attr("cmpd", self.cmpd.as_ref())
            .opt_attr("algn", self.algn.as_ref());
        if self.is_empty() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_choice(&self.fill)?;
        if let Some(dash) = &self.prst_dash {
            writer.element("a:prstDash").attr("val", dash).empty()?;
        }
        writer.opt_choice(&self.join)?;
        writer.opt_child("a:headEnd", &self.head_end)?;
        writer.opt_child("a:tailEnd", &self.tail_end)?;
        writer.opt_child("a:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for LineProperties {
    const TYPE_NAME: &'static str = "CT_LineProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_value(path, "@w", &self.w)?;
        if let Some(fill @ (Fill::Blip(_) | Fill::Group)) = &self.fill {
            return Err(OoxmlError::validation(
                path,
                format!("{} is not a line fill", fill.choice_name()),
            ));
        }
        validate_opt_choice(path, &self.fill)?;
        validate_opt_choice(path, &self.join)?;
        validate_opt(path, "headEnd", &self.head_end)?;
        validate_opt(path, "tailEnd", &self.tail_end)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::color::Color;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_outline_round_trip() {
        let xml = r#"<a:ln w="28575" cap="rnd" cmpd="sng"><a:solidFill><a:srgbClr val="4472C4"/></a:solidFill><a:prstDash val="sysDash"/><a:round/><a:tailEnd type="triangle" w="med" len="med"/></a:ln>"#;
        let ln: LineProperties = from_fragment(xml).unwrap();
        assert_eq!(ln.w, Some(LineWidth(28_575)));
        assert_eq!(ln.cap, Some(LineCap::Round));
        assert_eq!(ln.fill, Some(Fill::solid(Color::rgb("4472C4"))));
        assert_eq!(ln.prst_dash, Some(PresetLineDashVal::SysDash));
        assert_eq!(ln.join, Some(LineJoin::Round));
        assert_eq!(ln.tail_end.unwrap().kind, Some(LineEndType::Triangle));
        assert_eq!(to_fragment(&ln, "a:ln").unwrap(), xml);
    }

    #[test]
    fn test_invisible_outline() {
        assert_eq!(
            to_fragment(&LineProperties::none(), "c:ln").unwrap(),
            "<c:ln><a:noFill/></c:ln>"
        );
    }

    #[test]
    fn test_line_fill_restrictions() {
        let mut ln = LineProperties::new();
        ln.fill = Some(Fill::Group);
        let err = ln.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_LineProperties: grpFill is not a line fill");
    }

    #[test]
    fn test_width_range() {
        let ln = LineProperties::solid(30_000_000, Fill::NoFill);
        assert!(ln.validate().is_err());
    }
}
