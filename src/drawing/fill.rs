//! Fills (`EG_FillProperties`).

use crate::drawing::blip::{BlipFillProperties, RelativeRect, TileFlipMode};
use crate::drawing::color::{Color, ColorElement, PositiveFixedPercentage};
use crate::drawing::geometry::PositiveFixedAngle;
use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, Validate, XmlChoice, XmlRead, XmlReader, XmlWrite, XmlWriter, check_occurs,
    validate_all, validate_choice, validate_opt, validate_opt_choice, validate_opt_value,
    validate_value,
};
use std::io::{BufRead, Write};

crate::st_enum! {
    /// `ST_PathShadeType`
    PathShadeType = "ST_PathShadeType" {
        Shape => "shape",
        Circle => "circle",
        Rect => "rect",
    }
}

crate::st_enum! {
    /// `ST_PresetPatternVal`
    PresetPatternVal = "ST_PresetPatternVal" {
        Pct5 => "pct5",
        Pct10 => "pct10",
        Pct20 => "pct20",
        Pct25 => "pct25",
        Pct30 => "pct30",
        Pct40 => "pct40",
        Pct50 => "pct50",
        Pct60 => "pct60",
        Pct70 => "pct70",
        Pct75 => "pct75",
        Pct80 => "pct80",
        Pct90 => "pct90",
        Horz => "horz",
        Vert => "vert",
        LtHorz => "ltHorz",
        LtVert => "ltVert",
        DkHorz => "dkHorz",
        DkVert => "dkVert",
        NarHorz => "narHorz",
        NarVert => "narVert",
        DashHorz => "dashHorz",
        DashVert => "dashVert",
        Cross => "cross",
        DnDiag => "dnDiag",
        UpDiag => "upDiag",
        LtDnDiag => "ltDnDiag",
        LtUpDiag => "ltUpDiag",
        DkDnDiag => "dkDnDiag",
        DkUpDiag => "dkUpDiag",
        WdDnDiag => "wdDnDiag",
        WdUpDiag => "wdUpDiag",
        DashDnDiag => "dashDnDiag",
        DashUpDiag => "dashUpDiag",
        DiagCross => "diagCross",
        SmCheck => "smCheck",
        LgCheck => "lgCheck",
        SmGrid => "smGrid",
        LgGrid => "lgGrid",
        DotGrid => "dotGrid",
        SmConfetti => "smConfetti",
        LgConfetti => "lgConfetti",
        HorzBrick => "horzBrick",
        DiagBrick => "diagBrick",
        SolidDmnd => "solidDmnd",
        OpenDmnd => "openDmnd",
        DotDmnd => "dotDmnd",
        Plaid => "plaid",
        Sphere => "sphere",
        Weave => "weave",
        Divot => "divot",
        Shingle => "shingle",
        Wave => "wave",
        Trellis => "trellis",
        ZigZag => "zigZag",
    }
}

/// `CT_SolidColorFillProperties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolidColorFill {
    pub color: Option<Color>,
}

impl SolidColorFill {
    pub fn new(color: Color) -> Self {
        Self { color: Some(color) }
    }
}

impl XmlRead for SolidColorFill {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut fill = Self::default();
        reader.read_children(element, |reader, child| {
            if !Color::is_choice(child.local_name()) {
                return Ok(false);
            }
            fill.color = Some(Color::read_choice(reader, child)?);
            Ok(true)
        })?;
        Ok(fill)
    }
}

impl XmlWrite for SolidColorFill {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.color.is_none() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_choice(&self.color)?;
        writer.end(name)
    }
}

impl Validate for SolidColorFill {
    const TYPE_NAME: &'static str = "CT_SolidColorFillProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_choice(path, &self.color)
    }
}

/// `CT_GradientStop`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientStop {
    pub pos: PositiveFixedPercentage,
    pub color: Color,
}

impl GradientStop {
    pub fn new(pos: i32, color: Color) -> Self {
        Self {
            pos: PositiveFixedPercentage(pos),
            color,
        }
    }
}

impl XmlRead for GradientStop {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut stop = Self {
            pos: element.required_attr("pos")?,
            color: Color::default(),
        };
        reader.read_children(element, |reader, child| {
            if !Color::is_choice(child.local_name()) {
                return Ok(false);
            }
            stop.color = Color::read_choice(reader, child)?;
            Ok(true)
        })?;
        Ok(stop)
    }
}

impl XmlWrite for GradientStop {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).attr("pos", &self.pos).open()?;
        writer.choice(&self.color)?;
        writer.end(name)
    }
}

impl Validate for GradientStop {
    const TYPE_NAME: &'static str = "CT_GradientStop";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_value(path, "@pos", &self.pos)?;
        validate_choice(path, &self.color)
    }
}

/// `CT_GradientStopList`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientStopList {
    pub gs: Vec<GradientStop>,
}

impl XmlRead for GradientStopList {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut list = Self::default();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "gs" {
                return Ok(false);
            }
            list.gs.push(reader.read(child)?);
            Ok(true)
        })?;
        Ok(list)
    }
}

impl XmlWrite for GradientStopList {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.children("a:gs", &self.gs)?;
        writer.end(name)
    }
}

impl Validate for GradientStopList {
    const TYPE_NAME: &'static str = "CT_GradientStopList";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        check_occurs(path, "gs", self.gs.len(), 2, None)?;
        validate_all(path, "gs", &self.gs)
    }
}

/// `EG_ShadeProperties`
#[derive(Debug, Clone, PartialEq)]
pub enum ShadeProperties {
    /// `a:lin`
    Linear {
        ang: Option<PositiveFixedAngle>,
        scaled: Option<bool>,
    },
    /// `a:path`
    Path {
        path: Option<PathShadeType>,
        fill_to_rect: Option<RelativeRect>,
    },
}

impl XmlChoice for ShadeProperties {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "lin" | "path")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "lin" => {
                let shade = Self::Linear {
                    ang: element.parse_attr("ang")?,
                    scaled: element.parse_attr("scaled")?,
                };
                reader.read_empty(element)?;
                Ok(shade)
            },
            "path" => {
                let path = element.parse_attr("path")?;
                let mut fill_to_rect = None;
                reader.read_children(element, |reader, child| {
                    if child.local_name() != "fillToRect" {
                        return Ok(false);
                    }
                    fill_to_rect = Some(reader.read(child)?);
                    Ok(true)
                })?;
                Ok(Self::Path { path, fill_to_rect })
            },
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "a:lin or a:path".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Linear { ang, scaled } => writer
                .element("a:lin")
                .opt_attr("ang", ang.as_ref())
                .opt_attr("scaled", scaled.as_ref())
                .empty(),
            Self::Path { path, fill_to_rect } => {
                let tag = writer.element("a:path").opt_attr("path", path.as_ref());
                match fill_to_rect {
                    None => tag.empty(),
                    Some(rect) => {
                        tag.open()?;
                        writer.child("a:fillToRect", rect)?;
                        writer.end("a:path")
                    },
                }
            },
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Linear { .. } => "lin",
            Self::Path { .. } => "path",
        }
    }
}

impl Validate for ShadeProperties {
    const TYPE_NAME: &'static str = "EG_ShadeProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Linear { ang, .. } => validate_opt_value(path, "@ang", ang),
            Self::Path { .. } => Ok(()),
        }
    }
}

/// `CT_GradientFillProperties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientFill {
    pub flip: Option<TileFlipMode>,
    pub rot_with_shape: Option<bool>,
    pub gs_lst: Option<GradientStopList>,
    pub shade: Option<ShadeProperties>,
    pub tile_rect: Option<RelativeRect>,
}

impl GradientFill {
    /// A linear gradient through `stops` at angle `ang` (60,000ths of a
    /// degree).
    pub fn linear(stops: Vec<GradientStop>, ang: i32) -> Self {
        Self {
            gs_lst: Some(GradientStopList { gs: stops }),
            shade: Some(ShadeProperties::Linear {
                ang: Some(PositiveFixedAngle(ang)),
                scaled: Some(false),
            }),
            ..Self::default()
        }
    }
}

impl XmlRead for GradientFill {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut fill = Self {
            flip: element.parse_attr("flip")?,
            rot_with_shape: element.parse_attr("rotWithShape")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "gsLst" => fill.gs_lst = Some(reader.read(child)?),
                "tileRect" => fill.tile_rect = Some(reader.read(child)?),
                name if ShadeProperties::is_choice(name) => {
                    fill.shade = Some(ShadeProperties::read_choice(reader, child)?)
                },
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(fill)
    }
}

impl XmlWrite for GradientFill {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("flip", self.flip.as_ref())
            .opt_attr("rotWithShape", self.rot_with_shape.as_ref());
        if self.gs_lst.is_none() && self.shade.is_none() && self.tile_rect.is_none() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:gsLst", &self.gs_lst)?;
        writer.opt_choice(&self.shade)?;
        writer.opt_child("a:tileRect", &self.tile_rect)?;
        writer.end(name)
    }
}

impl Validate for GradientFill {
    const TYPE_NAME: &'static str = "CT_GradientFillProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "gsLst", &self.gs_lst)?;
        validate_opt_choice(path, &self.shade)?;
        validate_opt(path, "tileRect", &self.tile_rect)
    }
}

/// `CT_PatternFillProperties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternFill {
    pub prst: Option<PresetPatternVal>,
    pub fg_clr: Option<ColorElement>,
    pub bg_clr: Option<ColorElement>,
}

impl XmlRead for PatternFill {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut fill = Self {
            prst: element.parse_attr("prst")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "fgClr" => fill.fg_clr = Some(reader.read(child)?),
                "bgClr" => fill.bg_clr = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(fill)
    }
}

impl XmlWrite for PatternFill {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer.element(name).opt_attr("prst", self.prst.as_ref());
        if self.fg_clr.is_none() && self.bg_clr.is_none() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:fgClr", &self.fg_clr)?;
        writer.opt_child("a:bgClr", &self.bg_clr)?;
        writer.end(name)
    }
}

impl Validate for PatternFill {
    const TYPE_NAME: &'static str = "CT_PatternFillProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "fgClr", &self.fg_clr)?;
        validate_opt(path, "bgClr", &self.bg_clr)
    }
}

/// `EG_FillProperties`
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    /// `a:noFill`
    NoFill,
    /// `a:solidFill`
    Solid(SolidColorFill),
    /// `a:gradFill`
    Gradient(GradientFill),
    /// `a:blipFill`
    Blip(BlipFillProperties),
    /// `a:pattFill`
    Pattern(PatternFill),
    /// `a:grpFill`: inherit the fill of the containing group
    Group,
}

impl Fill {
    /// A solid fill of the given colour.
    pub fn solid(color: Color) -> Self {
        Self::Solid(SolidColorFill::new(color))
    }
}

impl XmlChoice for Fill {
    fn is_choice(local_name: &str) -> bool {
        matches!(
            local_name,
            "noFill" | "solidFill" | "gradFill" | "blipFill" | "pattFill" | "grpFill"
        )
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        Ok(match element.local_name() {
            "noFill" => {
                reader.read_empty(element)?;
                Self::NoFill
            },
            "solidFill" => Self::Solid(reader.read(element)?),
            "gradFill" => Self::Gradient(reader.read(element)?),
            "blipFill" => Self::Blip(reader.read(element)?),
            "pattFill" => Self::Pattern(reader.read(element)?),
            "grpFill" => {
                reader.read_empty(element)?;
                Self::Group
            },
            _ => {
                return Err(OoxmlError::UnexpectedElement {
                    expected: "a fill".to_string(),
                    found: element.name().to_string(),
                });
            },
        })
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::NoFill => writer.element("a:noFill").empty(),
            Self::Solid(fill) => writer.child("a:solidFill", fill),
            Self::Gradient(fill) => writer.child("a:gradFill", fill),
            Self::Blip(fill) => writer.child("a:blipFill", fill),
            Self::Pattern(fill) => writer.child("a:pattFill", fill),
            Self::Group => writer.element("a:grpFill").empty(),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::NoFill => "noFill",
            Self::Solid(_) => "solidFill",
            Self::Gradient(_) => "gradFill",
            Self::Blip(_) => "blipFill",
            Self::Pattern(_) => "pattFill",
            Self::Group => "grpFill",
        }
    }
}

impl Validate for Fill {
    const TYPE_NAME: &'static str = "EG_FillProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::NoFill | Self::Group => Ok(()),
            Self::Solid(fill) => fill.validate_with_path(path),
            Self::Gradient(fill) => fill.validate_with_path(path),
            Self::Blip(fill) => fill.validate_with_path(path),
            Self::Pattern(fill) => fill.validate_with_path(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::color::SchemeColorVal;
    use crate::xml::{choice_from_fragment, choice_to_fragment, from_fragment, to_fragment};

    fn round_trip(xml: &str) -> Fill {
        let fill: Fill = choice_from_fragment(xml).unwrap();
        assert_eq!(choice_to_fragment(&fill).unwrap(), xml);
        fill
    }

    #[test]
    fn test_solid_fill() {
        let fill = round_trip(r#"<a:solidFill><a:srgbClr val="FF0000"/></a:solidFill>"#);
        assert_eq!(fill, Fill::solid(Color::rgb("FF0000")));
    }

    #[test]
    fn test_no_fill() {
        assert_eq!(round_trip("<a:noFill/>"), Fill::NoFill);
    }

    #[test]
    fn test_gradient_fill() {
        let xml = r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="accent1"/></a:gs><a:gs pos="100000"><a:schemeClr val="accent2"/></a:gs></a:gsLst><a:lin ang="5400000" scaled="0"/></a:gradFill>"#;
        let Fill::Gradient(gradient) = round_trip(xml) else {
            panic!("expected a gradient");
        };
        let stops = &gradient.gs_lst.as_ref().unwrap().gs;
        assert_eq!(stops[1].pos, PositiveFixedPercentage(100_000));
        assert_eq!(stops[1].color, Color::scheme(SchemeColorVal::Accent2));
        assert!(gradient.validate().is_ok());
    }

    #[test]
    fn test_gradient_needs_two_stops() {
        let gradient = GradientFill::linear(vec![GradientStop::new(0, Color::rgb("FFFFFF"))], 0);
        let err = Fill::Gradient(gradient).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "EG_FillProperties/gsLst/gs: must occur at least 2 time(s) (have 1)"
        );
    }

    #[test]
    fn test_pattern_fill() {
        let xml = r#"<a:pattFill prst="ltUpDiag"><a:fgClr><a:srgbClr val="000000"/></a:fgClr><a:bgClr><a:srgbClr val="FFFFFF"/></a:bgClr></a:pattFill>"#;
        let fill: PatternFill = from_fragment(xml).unwrap();
        assert_eq!(fill.prst, Some(PresetPatternVal::LtUpDiag));
        assert_eq!(to_fragment(&fill, "a:pattFill").unwrap(), xml);
    }
}
