//! Visual shape properties (`spPr`, `grpSpPr`).

use crate::drawing::ext::ExtensionList;
use crate::drawing::fill::Fill;
use crate::drawing::geometry::{GroupTransform2D, PresetGeometry2D, Transform2D};
use crate::drawing::line::LineProperties;
use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, RawElement, Validate, XmlChoice, XmlRead, XmlReader, XmlWrite, XmlWriter,
    validate_opt, validate_opt_choice,
};
use std::io::{BufRead, Write};

crate::st_enum! {
    /// `ST_BlackWhiteMode`
    BlackWhiteMode = "ST_BlackWhiteMode" {
        Color => "clr",
        Auto => "auto",
        Gray => "gray",
        LtGray => "ltGray",
        InvGray => "invGray",
        GrayWhite => "grayWhite",
        BlackGray => "blackGray",
        BlackWhite => "blackWhite",
        Black => "black",
        White => "white",
        Hidden => "hidden",
    }
}

/// `EG_Geometry`
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// `a:prstGeom`
    Preset(PresetGeometry2D),
    /// `a:custGeom`, kept verbatim
    Custom(RawElement),
}

impl XmlChoice for Geometry {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "prstGeom" | "custGeom")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "prstGeom" => Ok(Self::Preset(reader.read(element)?)),
            "custGeom" => Ok(Self::Custom(reader.read_raw(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "a:prstGeom or a:custGeom".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Preset(geom) => writer.child("a:prstGeom", geom),
            Self::Custom(raw) => writer.child("a:custGeom", raw),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Preset(_) => "prstGeom",
            Self::Custom(_) => "custGeom",
        }
    }
}

impl Validate for Geometry {
    const TYPE_NAME: &'static str = "EG_Geometry";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Preset(geom) => geom.validate_with_path(path),
            Self::Custom(_) => Ok(()),
        }
    }
}

/// `CT_ShapeProperties`
///
/// Effects (`a:effectLst`/`a:effectDag`) and 3-D properties (`a:scene3d`,
/// `a:sp3d`) are preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeProperties {
    pub bw_mode: Option<BlackWhiteMode>,
    pub xfrm: Option<Transform2D>,
    pub geometry: Option<Geometry>,
    pub fill: Option<Fill>,
    pub ln: Option<Box<LineProperties>>,
    pub effects: Option<RawElement>,
    pub scene3d: Option<RawElement>,
    pub sp3d: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl ShapeProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_ln(mut self, ln: LineProperties) -> Self {
        self.ln = Some(Box::new(ln));
        self
    }

    fn is_empty(&self) -> bool {
        self.xfrm.is_none()
            && self.geometry.is_none()
            && self.fill.is_none()
            && self.ln.is_none()
            && self.effects.is_none()
            && self.scene3d.is_none()
            && self.sp3d.is_none()
            && self.ext_lst.is_none()
    }
}

impl XmlRead for ShapeProperties {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut sp_pr = Self {
            bw_mode: element.parse_attr("bwMode")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "xfrm" => sp_pr.xfrm = Some(reader.read(child)?),
                "ln" => sp_pr.ln = Some(reader.read(child)?),
                "effectLst" | "effectDag" => sp_pr.effects = Some(reader.read_raw(child)?),
                "scene3d" => sp_pr.scene3d = Some(reader.read_raw(child)?),
                "sp3d" => sp_pr.sp3d = Some(reader.read_raw(child)?),
                "extLst" => sp_pr.ext_lst = Some(reader.read(child)?),
                name if Geometry::is_choice(name) => {
                    sp_pr.geometry = Some(Geometry::read_choice(reader, child)?)
                },
                name if Fill::is_choice(name) => {
                    sp_pr.fill = Some(Fill::read_choice(reader, child)?)
                },
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(sp_pr)
    }
}

impl XmlWrite for ShapeProperties {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer.element(name).opt_attr("bwMode", self.bw_mode.as_ref());
        if self.is_empty() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:xfrm", &self.xfrm)?;
        writer.opt_choice(&self.geometry)?;
        writer.opt_choice(&self.fill)?;
        writer.opt_child("a:ln", &self.ln)?;
        if let Some(effects) = &self.effects {
            writer.child(&effects.name, effects)?;
        }
        writer.opt_child("a:scene3d", &self.scene3d)?;
        writer.opt_child("a:sp3d", &self.sp3d)?;
        writer.opt_child("a:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for ShapeProperties {
    const TYPE_NAME: &'static str = "CT_ShapeProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "xfrm", &self.xfrm)?;
        validate_opt_choice(path, &self.geometry)?;
        validate_opt_choice(path, &self.fill)?;
        validate_opt(path, "ln", &self.ln)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_GroupShapeProperties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupShapeProperties {
    pub bw_mode: Option<BlackWhiteMode>,
    pub xfrm: Option<GroupTransform2D>,
    pub fill: Option<Fill>,
    pub effects: Option<RawElement>,
    pub scene3d: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl GroupShapeProperties {
    pub fn new() -> Self {
        Self::default()
    }
}

impl XmlRead for GroupShapeProperties {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut grp_sp_pr = Self {
            bw_mode: element.parse_attr("bwMode")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "xfrm" => grp_sp_pr.xfrm = Some(reader.read(child)?),
                "effectLst" | "effectDag" => grp_sp_pr.effects = Some(reader.read_raw(child)?),
                "scene3d" => grp_sp_pr.scene3d = Some(reader.read_raw(child)?),
                "extLst" => grp_sp_pr.ext_lst = Some(reader.read(child)?),
                name if Fill::is_choice(name) => {
                    grp_sp_pr.fill = Some(Fill::read_choice(reader, child)?)
                },
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(grp_sp_pr)
    }
}

impl XmlWrite for GroupShapeProperties {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer.element(name).opt_attr("bwMode", self.bw_mode.as_ref());
        if self.xfrm.is_none()
            && self.fill.is_none()
            && self.effects.is_none()
            && self.scene3d.is_none()
            && self.ext_lst.is_none()
        {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:xfrm", &self.xfrm)?;
        writer.opt_choice(&self.fill)?;
        if let Some(effects) = &self.effects {
            writer.child(&effects.name, effects)?;
        }
        writer.opt_child("a:scene3d", &self.scene3d)?;
        writer.opt_child("a:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for GroupShapeProperties {
    const TYPE_NAME: &'static str = "CT_GroupShapeProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "xfrm", &self.xfrm)?;
        validate_opt_choice(path, &self.fill)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::color::{Color, SchemeColorVal};
    use crate::drawing::geometry::ShapeType;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_chart_shape_properties() {
        let xml = r#"<c:spPr><a:solidFill><a:schemeClr val="accent1"/></a:solidFill><a:ln w="9525"><a:noFill/></a:ln><a:effectLst/></c:spPr>"#;
        let sp_pr: ShapeProperties = from_fragment(xml).unwrap();
        assert_eq!(sp_pr.fill, Some(Fill::solid(Color::scheme(SchemeColorVal::Accent1))));
        assert_eq!(sp_pr.ln.as_ref().unwrap().fill, Some(Fill::NoFill));
        assert_eq!(sp_pr.effects.as_ref().unwrap().name, "a:effectLst");
        assert_eq!(to_fragment(&sp_pr, "c:spPr").unwrap(), xml);
    }

    #[test]
    fn test_slide_shape_properties_order() {
        let mut sp_pr = ShapeProperties::new();
        sp_pr.fill = Some(Fill::NoFill);
        sp_pr.geometry = Some(Geometry::Preset(PresetGeometry2D::new(ShapeType::Rect)));
        sp_pr.xfrm = Some(Transform2D::from_rect(0, 0, 10, 10));
        assert_eq!(
            to_fragment(&sp_pr, "p:spPr").unwrap(),
            r#"<p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="10" cy="10"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#
        );
    }

    #[test]
    fn test_custom_geometry_is_preserved() {
        let xml = r#"<a:spPr><a:custGeom><a:pathLst><a:path w="10" h="10"><a:moveTo><a:pt x="0" y="0"/></a:moveTo></a:path></a:pathLst></a:custGeom></a:spPr>"#;
        let sp_pr: ShapeProperties = from_fragment(xml).unwrap();
        assert!(matches!(sp_pr.geometry, Some(Geometry::Custom(_))));
        assert_eq!(to_fragment(&sp_pr, "a:spPr").unwrap(), xml);
    }

    #[test]
    fn test_builders_chain() {
        let sp_pr = ShapeProperties::new()
            .with_fill(Fill::solid(Color::rgb("FF0000")))
            .with_ln(LineProperties::new());
        assert_eq!(sp_pr.fill, Some(Fill::solid(Color::rgb("FF0000"))));
        assert!(sp_pr.ln.is_some());
        assert_eq!(
            to_fragment(&sp_pr, "c:spPr").unwrap(),
            r#"<c:spPr><a:solidFill><a:srgbClr val="FF0000"/></a:solidFill><a:ln/></c:spPr>"#
        );
    }

    #[test]
    fn test_empty_properties() {
        let sp_pr: ShapeProperties = from_fragment("<p:spPr/>").unwrap();
        assert_eq!(sp_pr, ShapeProperties::new());
        assert_eq!(to_fragment(&sp_pr, "p:spPr").unwrap(), "<p:spPr/>");
    }
}
