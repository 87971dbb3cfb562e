//! Picture fills (`a:blip`, `CT_BlipFillProperties`).

use crate::drawing::ext::ExtensionList;
use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, RawElement, Validate, XmlChoice, XmlRead, XmlReader, XmlWrite, XmlWriter,
    validate_opt, validate_opt_choice,
};
use std::io::{BufRead, Write};

crate::st_enum! {
    /// `ST_BlipCompression`
    BlipCompression = "ST_BlipCompression", default None {
        Email => "email",
        Screen => "screen",
        Print => "print",
        HqPrint => "hqprint",
        None => "none",
    }
}

crate::st_enum! {
    /// `ST_TileFlipMode`
    TileFlipMode = "ST_TileFlipMode", default None {
        None => "none",
        X => "x",
        Y => "y",
        Xy => "xy",
    }
}

crate::st_enum! {
    /// `ST_RectAlignment`
    RectAlignment = "ST_RectAlignment" {
        Tl => "tl",
        T => "t",
        Tr => "tr",
        L => "l",
        Ctr => "ctr",
        R => "r",
        Bl => "bl",
        B => "b",
        Br => "br",
    }
}

/// `CT_RelativeRect`: insets in thousandths of a percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeRect {
    pub l: Option<i32>,
    pub t: Option<i32>,
    pub r: Option<i32>,
    pub b: Option<i32>,
}

impl XmlRead for RelativeRect {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let rect = Self {
            l: element.parse_attr("l")?,
            t: element.parse_attr("t")?,
            r: element.parse_attr("r")?,
            b: element.parse_attr("b")?,
        };
        reader.read_empty(element)?;
        Ok(rect)
    }
}

impl XmlWrite for RelativeRect {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .opt_attr("l", self.l.as_ref())
            .opt_attr("t", self.t.as_ref())
            .opt_attr("r", self.r.as_ref())
            .opt_attr("b", self.b.as_ref())
            .empty()
    }
}

impl Validate for RelativeRect {
    const TYPE_NAME: &'static str = "CT_RelativeRect";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `CT_Blip`: reference to image data.
///
/// Image effects (`a:alphaModFix`, `a:lum`, `a:duotone`, ...) are kept as raw
/// elements in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blip {
    /// `r:embed`: relationship id of an embedded image
    pub embed: Option<String>,
    /// `r:link`: relationship id of a linked image
    pub link: Option<String>,
    pub cstate: Option<BlipCompression>,
    pub effects: Vec<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl Blip {
    /// A blip embedding the image of relationship `rel_id`.
    pub fn embedded(rel_id: impl Into<String>) -> Self {
        Self {
            embed: Some(rel_id.into()),
            ..Self::default()
        }
    }
}

impl XmlRead for Blip {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut blip = Self {
            embed: element.parse_attr("embed")?,
            link: element.parse_attr("link")?,
            cstate: element.parse_attr("cstate")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "extLst" => blip.ext_lst = Some(reader.read(child)?),
                _ => blip.effects.push(reader.read_raw(child)?),
            }
            Ok(true)
        })?;
        Ok(blip)
    }
}

impl XmlWrite for Blip {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("r:embed", self.embed.as_ref())
            .opt_attr("r:link", self.link.as_ref())
            .opt_attr("cstate", self.cstate.as_ref());
        if self.effects.is_empty() && self.ext_lst.is_none() {
            return tag.empty();
        }
        tag.open()?;
        for effect in &self.effects {
            writer.child(&effect.name, effect)?;
        }
        writer.opt_child("a:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Blip {
    const TYPE_NAME: &'static str = "CT_Blip";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_TileInfoProperties`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tile {
    pub tx: Option<i64>,
    pub ty: Option<i64>,
    pub sx: Option<i32>,
    pub sy: Option<i32>,
    pub flip: Option<TileFlipMode>,
    pub algn: Option<RectAlignment>,
}

impl XmlRead for Tile {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let tile = Self {
            tx: element.parse_attr("tx")?,
            ty: element.parse_attr("ty")?,
            sx: element.parse_attr("sx")?,
            sy: element.parse_attr("sy")?,
            flip: element.parse_attr("flip")?,
            algn: element.parse_attr("algn")?,
        };
        reader.read_empty(element)?;
        Ok(tile)
    }
}

impl XmlWrite for Tile {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .opt_attr("tx", self.tx.as_ref())
            .opt_attr("ty", self.ty.as_ref())
            .opt_attr("sx", self.sx.as_ref())
            .opt_attr("sy", self.sy.as_ref())
            .opt_attr("flip", self.flip.as_ref())
            .opt_attr("algn", self.algn.as_ref())
            .empty()
    }
}

/// `EG_FillModeProperties`
#[derive(Debug, Clone, PartialEq)]
pub enum FillMode {
    /// `a:tile`
    Tile(Tile),
    /// `a:stretch` with its optional `a:fillRect`
    Stretch(Option<RelativeRect>),
}

impl FillMode {
    /// Stretch to fill the whole shape, as Office writes it.
    pub fn stretch() -> Self {
        Self::Stretch(Some(RelativeRect::default()))
    }
}

impl XmlChoice for FillMode {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "tile" | "stretch")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "tile" => Ok(Self::Tile(reader.read(element)?)),
            "stretch" => {
                let mut fill_rect = None;
                reader.read_children(element, |reader, child| {
                    if child.local_name() != "fillRect" {
                        return Ok(false);
                    }
                    fill_rect = Some(reader.read(child)?);
                    Ok(true)
                })?;
                Ok(Self::Stretch(fill_rect))
            },
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "a:tile or a:stretch".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Tile(tile) => writer.child("a:tile", tile),
            Self::Stretch(None) => writer.element("a:stretch").empty(),
            Self::Stretch(Some(rect)) => {
                writer.element("a:stretch").open()?;
                writer.child("a:fillRect", rect)?;
                writer.end("a:stretch")
            },
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Tile(_) => "tile",
            Self::Stretch(_) => "stretch",
        }
    }
}

impl Validate for FillMode {
    const TYPE_NAME: &'static str = "EG_FillModeProperties";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `CT_BlipFillProperties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlipFillProperties {
    pub dpi: Option<u32>,
    pub rot_with_shape: Option<bool>,
    pub blip: Option<Blip>,
    pub src_rect: Option<RelativeRect>,
    pub fill_mode: Option<FillMode>,
}

impl BlipFillProperties {
    /// A stretched fill with the embedded image `rel_id`.
    pub fn stretched(rel_id: impl Into<String>) -> Self {
        Self {
            blip: Some(Blip::embedded(rel_id)),
            fill_mode: Some(FillMode::stretch()),
            ..Self::default()
        }
    }
}

impl XmlRead for BlipFillProperties {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut fill = Self {
            dpi: element.parse_attr("dpi")?,
            rot_with_shape: element.parse_attr("rotWithShape")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "blip" => fill.blip = Some(reader.read(child)?),
                "srcRect" => fill.src_rect = Some(reader.read(child)?),
                name if FillMode::is_choice(name) => {
                    fill.fill_mode = Some(FillMode::read_choice(reader, child)?)
                },
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(fill)
    }
}

impl XmlWrite for BlipFillProperties {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("dpi", self.dpi.as_ref())
            .opt_attr("rotWithShape", self.rot_with_shape.as_ref());
        if self.blip.is_none() && self.src_rect.is_none() && self.fill_mode.is_none() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:blip", &self.blip)?;
        writer.opt_child("a:srcRect", &self.src_rect)?;
        writer.opt_choice(&self.fill_mode)?;
        writer.end(name)
    }
}

impl Validate for BlipFillProperties {
    const TYPE_NAME: &'static str = "CT_BlipFillProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "blip", &self.blip)?;
        validate_opt(path, "srcRect", &self.src_rect)?;
        validate_opt_choice(path, &self.fill_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_picture_fill_round_trip() {
        let xml = r#"<p:blipFill><a:blip r:embed="rId2" cstate="print"><a:alphaModFix amt="50000"/></a:blip><a:srcRect/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#;
        let fill: BlipFillProperties = from_fragment(xml).unwrap();
        let blip = fill.blip.as_ref().unwrap();
        assert_eq!(blip.embed.as_deref(), Some("rId2"));
        assert_eq!(blip.cstate, Some(BlipCompression::Print));
        assert_eq!(blip.effects[0].attribute("amt"), Some("50000"));
        assert_eq!(fill.fill_mode, Some(FillMode::stretch()));
        assert_eq!(to_fragment(&fill, "p:blipFill").unwrap(), xml);
    }

    #[test]
    fn test_tile_fill() {
        let xml = r#"<a:blipFill><a:blip r:embed="rId1"/><a:tile tx="0" ty="0" sx="100000" sy="100000" flip="none" algn="tl"/></a:blipFill>"#;
        let fill: BlipFillProperties = from_fragment(xml).unwrap();
        let Some(FillMode::Tile(tile)) = &fill.fill_mode else {
            panic!("expected a tile");
        };
        assert_eq!(tile.algn, Some(RectAlignment::Tl));
        assert_eq!(to_fragment(&fill, "a:blipFill").unwrap(), xml);
    }
}
