//! Coordinates, transforms and preset geometry.

use crate::error::Result;
use crate::xml::{
    ElementStart, Validate, XmlRead, XmlReader, XmlWrite, XmlWriter, validate_all, validate_opt,
    validate_opt_value, validate_value,
};
use std::io::{BufRead, Write};

crate::st_range! {
    /// `ST_Coordinate`: a position in EMUs.
    Coordinate(i64) = "ST_Coordinate", -27_273_042_316_900, 27_273_042_316_900, default 0
}

crate::st_range! {
    /// `ST_PositiveCoordinate`: an extent in EMUs.
    PositiveCoordinate(i64) = "ST_PositiveCoordinate", 0, 27_273_042_316_900, default 0
}

crate::st_range! {
    /// `ST_Coordinate32`: a 32-bit position in EMUs (text insets, spacing).
    Coordinate32(i32) = "ST_Coordinate32", i32::MIN, i32::MAX, default 0
}

crate::st_range! {
    /// `ST_Angle`: an angle in 60,000ths of a degree.
    Angle(i32) = "ST_Angle", i32::MIN, i32::MAX, default 0
}

crate::st_range! {
    /// `ST_PositiveFixedAngle`: an angle in `[0, 360)` degrees, in 60,000ths.
    PositiveFixedAngle(i32) = "ST_PositiveFixedAngle", 0, 21_599_999, default 0
}

impl Angle {
    /// Build an angle from degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Self((degrees * 60_000.0).round() as i32)
    }

    /// The angle in degrees.
    pub fn degrees(&self) -> f64 {
        f64::from(self.0) / 60_000.0
    }
}

/// `CT_Point2D`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2D {
    pub x: Coordinate,
    pub y: Coordinate,
}

impl Point2D {
    pub fn new(x: i64, y: i64) -> Self {
        Self {
            x: Coordinate(x),
            y: Coordinate(y),
        }
    }
}

impl XmlRead for Point2D {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let point = Self {
            x: element.required_attr("x")?,
            y: element.required_attr("y")?,
        };
        reader.read_empty(element)?;
        Ok(point)
    }
}

impl XmlWrite for Point2D {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .attr("x", &self.x)
            .attr("y", &self.y)
            .empty()
    }
}

impl Validate for Point2D {
    const TYPE_NAME: &'static str = "CT_Point2D";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_value(path, "@x", &self.x)?;
        validate_value(path, "@y", &self.y)
    }
}

/// `CT_PositiveSize2D`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositiveSize2D {
    pub cx: PositiveCoordinate,
    pub cy: PositiveCoordinate,
}

impl PositiveSize2D {
    pub fn new(cx: i64, cy: i64) -> Self {
        Self {
            cx: PositiveCoordinate(cx),
            cy: PositiveCoordinate(cy),
        }
    }
}

impl XmlRead for PositiveSize2D {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let size = Self {
            cx: element.required_attr("cx")?,
            cy: element.required_attr("cy")?,
        };
        reader.read_empty(element)?;
        Ok(size)
    }
}

impl XmlWrite for PositiveSize2D {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .attr("cx", &self.cx)
            .attr("cy", &self.cy)
            .empty()
    }
}

impl Validate for PositiveSize2D {
    const TYPE_NAME: &'static str = "CT_PositiveSize2D";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_value(path, "@cx", &self.cx)?;
        validate_value(path, "@cy", &self.cy)
    }
}

/// `CT_Transform2D`: placement of a shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transform2D {
    pub rot: Option<Angle>,
    pub flip_h: Option<bool>,
    pub flip_v: Option<bool>,
    pub off: Option<Point2D>,
    pub ext: Option<PositiveSize2D>,
}

impl Transform2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transform with offset and extent, the common case.
    pub fn from_rect(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self {
            off: Some(Point2D::new(x, y)),
            ext: Some(PositiveSize2D::new(cx, cy)),
            ..Self::default()
        }
    }
}

impl XmlRead for Transform2D {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut xfrm = Self {
            rot: element.parse_attr("rot")?,
            flip_h: element.parse_attr("flipH")?,
            flip_v: element.parse_attr("flipV")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "off" => xfrm.off = Some(reader.read(child)?),
                "ext" => xfrm.ext = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(xfrm)
    }
}

impl XmlWrite for Transform2D {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("rot", self.rot.as_ref())
            .opt_attr("flipH", self.flip_h.as_ref())
            .opt_attr("flipV", self.flip_v.as_ref());
        if self.off.is_none() && self.ext.is_none() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:off", &self.off)?;
        writer.opt_child("a:ext", &self.ext)?;
        writer.end(name)
    }
}

impl Validate for Transform2D {
    const TYPE_NAME: &'static str = "CT_Transform2D";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_value(path, "@rot", &self.rot)?;
        validate_opt(path, "off", &self.off)?;
        validate_opt(path, "ext", &self.ext)
    }
}

/// `CT_GroupTransform2D`: placement of a group and its child coordinate
/// space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupTransform2D {
    pub rot: Option<Angle>,
    pub flip_h: Option<bool>,
    pub flip_v: Option<bool>,
    pub off: Option<Point2D>,
    pub ext: Option<PositiveSize2D>,
    pub ch_off: Option<Point2D>,
    pub ch_ext: Option<PositiveSize2D>,
}

impl GroupTransform2D {
    pub fn new() -> Self {
        Self::default()
    }
}

impl XmlRead for GroupTransform2D {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut xfrm = Self {
            rot: element.parse_attr("rot")?,
            flip_h: element.parse_attr("flipH")?,
            flip_v: element.parse_attr("flipV")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "off" => xfrm.off = Some(reader.read(child)?),
                "ext" => xfrm.ext = Some(reader.read(child)?),
                "chOff" => xfrm.ch_off = Some(reader.read(child)?),
                "chExt" => xfrm.ch_ext = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(xfrm)
    }
}

impl XmlWrite for GroupTransform2D {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("rot", self.rot.as_ref())
            .opt_attr("flipH", self.flip_h.as_ref())
            .opt_attr("flipV", self.flip_v.as_ref());
        if self.off.is_none() && self.ext.is_none() && self.ch_off.is_none() && self.ch_ext.is_none()
        {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:off", &self.off)?;
        writer.opt_child("a:ext", &self.ext)?;
        writer.opt_child("a:chOff", &self.ch_off)?;
        writer.opt_child("a:chExt", &self.ch_ext)?;
        writer.end(name)
    }
}

impl Validate for GroupTransform2D {
    const TYPE_NAME: &'static str = "CT_GroupTransform2D";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_value(path, "@rot", &self.rot)?;
        validate_opt(path, "off", &self.off)?;
        validate_opt(path, "ext", &self.ext)?;
        validate_opt(path, "chOff", &self.ch_off)?;
        validate_opt(path, "chExt", &self.ch_ext)
    }
}

crate::st_open_enum! {
    /// `ST_ShapeType`: preset shape geometry.
    ShapeType = "ST_ShapeType", default Rect {
        Line => "line",
        StraightConnector1 => "straightConnector1",
        BentConnector3 => "bentConnector3",
        CurvedConnector3 => "curvedConnector3",
        Rect => "rect",
        RoundRect => "roundRect",
        Snip1Rect => "snip1Rect",
        Ellipse => "ellipse",
        Triangle => "triangle",
        RtTriangle => "rtTriangle",
        Parallelogram => "parallelogram",
        Trapezoid => "trapezoid",
        Diamond => "diamond",
        Pentagon => "pentagon",
        Hexagon => "hexagon",
        Octagon => "octagon",
        Plus => "plus",
        Star5 => "star5",
        RightArrow => "rightArrow",
        LeftArrow => "leftArrow",
        UpArrow => "upArrow",
        DownArrow => "downArrow",
        HomePlate => "homePlate",
        Chevron => "chevron",
        BlockArc => "blockArc",
        Donut => "donut",
        Pie => "pie",
        Arc => "arc",
        Chord => "chord",
        Can => "can",
        Cube => "cube",
        Cloud => "cloud",
        Heart => "heart",
        WedgeRectCallout => "wedgeRectCallout",
        WedgeRoundRectCallout => "wedgeRoundRectCallout",
        FlowChartProcess => "flowChartProcess",
        FlowChartDecision => "flowChartDecision",
        FlowChartTerminator => "flowChartTerminator",
        LeftBrace => "leftBrace",
        RightBrace => "rightBrace",
    }
}

/// `CT_GeomGuide`: a named shape adjustment formula.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeomGuide {
    pub name: String,
    pub fmla: String,
}

impl GeomGuide {
    pub fn new(name: impl Into<String>, fmla: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fmla: fmla.into(),
        }
    }
}

impl XmlRead for GeomGuide {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let guide = Self {
            name: element.required_attr("name")?,
            fmla: element.required_attr("fmla")?,
        };
        reader.read_empty(element)?;
        Ok(guide)
    }
}

impl XmlWrite for GeomGuide {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .attr("name", &self.name)
            .attr("fmla", &self.fmla)
            .empty()
    }
}

impl Validate for GeomGuide {
    const TYPE_NAME: &'static str = "CT_GeomGuide";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `CT_GeomGuideList`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeomGuideList {
    pub gd: Vec<GeomGuide>,
}

impl XmlRead for GeomGuideList {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut list = Self::default();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "gd" {
                return Ok(false);
            }
            list.gd.push(reader.read(child)?);
            Ok(true)
        })?;
        Ok(list)
    }
}

impl XmlWrite for GeomGuideList {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.gd.is_empty() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.children("a:gd", &self.gd)?;
        writer.end(name)
    }
}

impl Validate for GeomGuideList {
    const TYPE_NAME: &'static str = "CT_GeomGuideList";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_all(path, "gd", &self.gd)
    }
}

/// `CT_PresetGeometry2D`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetGeometry2D {
    pub prst: ShapeType,
    pub av_lst: Option<GeomGuideList>,
}

impl PresetGeometry2D {
    /// Preset geometry with an empty adjustment list, as Office writes it.
    pub fn new(prst: ShapeType) -> Self {
        Self {
            prst,
            av_lst: Some(GeomGuideList::default()),
        }
    }
}

impl XmlRead for PresetGeometry2D {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut geom = Self {
            prst: element.required_attr("prst")?,
            av_lst: None,
        };
        reader.read_children(element, |reader, child| {
            if child.local_name() != "avLst" {
                return Ok(false);
            }
            geom.av_lst = Some(reader.read(child)?);
            Ok(true)
        })?;
        Ok(geom)
    }
}

impl XmlWrite for PresetGeometry2D {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer.element(name).attr("prst", &self.prst);
        if self.av_lst.is_none() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:avLst", &self.av_lst)?;
        writer.end(name)
    }
}

impl Validate for PresetGeometry2D {
    const TYPE_NAME: &'static str = "CT_PresetGeometry2D";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "avLst", &self.av_lst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_transform_round_trip() {
        let xml = r#"<a:xfrm rot="5400000" flipH="1"><a:off x="457200" y="274638"/><a:ext cx="8229600" cy="1143000"/></a:xfrm>"#;
        let xfrm: Transform2D = from_fragment(xml).unwrap();
        assert_eq!(xfrm.rot, Some(Angle(5_400_000)));
        assert_eq!(xfrm.rot.unwrap().degrees(), 90.0);
        assert_eq!(xfrm.flip_h, Some(true));
        assert_eq!(xfrm.ext, Some(PositiveSize2D::new(8_229_600, 1_143_000)));
        assert_eq!(to_fragment(&xfrm, "a:xfrm").unwrap(), xml);
    }

    #[test]
    fn test_negative_extent_fails_validation() {
        let xfrm = Transform2D::from_rect(0, 0, -5, 10);
        let err = xfrm.validate().unwrap_err();
        assert!(err.to_string().starts_with("CT_Transform2D/ext/@cx"));
    }

    #[test]
    fn test_group_transform_child_space() {
        let xml = r#"<a:xfrm><a:off x="1" y="2"/><a:ext cx="3" cy="4"/><a:chOff x="0" y="0"/><a:chExt cx="30" cy="40"/></a:xfrm>"#;
        let xfrm: GroupTransform2D = from_fragment(xml).unwrap();
        assert_eq!(xfrm.ch_ext, Some(PositiveSize2D::new(30, 40)));
        assert_eq!(to_fragment(&xfrm, "a:xfrm").unwrap(), xml);
    }

    #[test]
    fn test_preset_geometry() {
        let xml = r#"<a:prstGeom prst="roundRect"><a:avLst><a:gd name="adj" fmla="val 16667"/></a:avLst></a:prstGeom>"#;
        let geom: PresetGeometry2D = from_fragment(xml).unwrap();
        assert_eq!(geom.prst, ShapeType::RoundRect);
        assert_eq!(geom.av_lst.as_ref().unwrap().gd[0].fmla, "val 16667");
        assert_eq!(to_fragment(&geom, "a:prstGeom").unwrap(), xml);

        let empty = PresetGeometry2D::new(ShapeType::Rect);
        assert_eq!(
            to_fragment(&empty, "a:prstGeom").unwrap(),
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#
        );
    }
}
