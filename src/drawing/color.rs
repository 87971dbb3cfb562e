//! Colours (`EG_ColorChoice`) and colour transforms.

use crate::drawing::ext::ExtensionList;
use crate::error::{OoxmlError, Result};
use crate::xml::value::check_hex;
use crate::xml::{
    ElementStart, Validate, XmlChoice, XmlRead, XmlReader, XmlValue, XmlWrite, XmlWriter,
    child_path, validate_choice, validate_choices, validate_opt, validate_opt_value, validate_value,
};
use std::io::{BufRead, Write};

crate::st_range! {
    /// `ST_PositiveFixedPercentage`: 0 to 100% in thousandths of a percent.
    PositiveFixedPercentage(i32) = "ST_PositiveFixedPercentage", 0, 100_000, default 0
}

crate::st_range! {
    /// `ST_PositivePercentage`: a non-negative percentage in thousandths.
    PositivePercentage(i32) = "ST_PositivePercentage", 0, i32::MAX, default 0
}

/// `ST_HexColorRGB`: six hex digits, `RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(pub String);

impl HexColor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("000000".to_string())
    }
}

impl XmlValue for HexColor {
    #[inline]
    fn parse_xml(value: &str) -> Result<Self> {
        Ok(Self(value.trim().to_string()))
    }

    #[inline]
    fn write_value(&self, out: &mut String) {
        out.push_str(&self.0);
    }

    fn validate_value(&self, path: &str) -> Result<()> {
        check_hex(path, &self.0, 3)
    }
}

crate::st_enum! {
    /// `ST_SchemeColorVal`: a colour slot of the theme.
    SchemeColorVal = "ST_SchemeColorVal", default Tx1 {
        Bg1 => "bg1",
        Tx1 => "tx1",
        Bg2 => "bg2",
        Tx2 => "tx2",
        Accent1 => "accent1",
        Accent2 => "accent2",
        Accent3 => "accent3",
        Accent4 => "accent4",
        Accent5 => "accent5",
        Accent6 => "accent6",
        Hlink => "hlink",
        FolHlink => "folHlink",
        PhClr => "phClr",
        Dk1 => "dk1",
        Lt1 => "lt1",
        Dk2 => "dk2",
        Lt2 => "lt2",
    }
}

crate::st_open_enum! {
    /// `ST_PresetColorVal`: named colours.
    PresetColorVal = "ST_PresetColorVal", default Black {
        Black => "black",
        White => "white",
        Red => "red",
        Green => "green",
        Blue => "blue",
        Yellow => "yellow",
        Cyan => "cyan",
        Magenta => "magenta",
        Gray => "gray",
        Silver => "silver",
        Maroon => "maroon",
        Navy => "navy",
        Olive => "olive",
        Orange => "orange",
        Purple => "purple",
        Teal => "teal",
        Lime => "lime",
        DkGray => "dkGray",
        LtGray => "ltGray",
    }
}

crate::st_enum! {
    /// `ST_SystemColorVal`: colours of the operating system UI.
    SystemColorVal = "ST_SystemColorVal", default WindowText {
        ScrollBar => "scrollBar",
        Background => "background",
        ActiveCaption => "activeCaption",
        InactiveCaption => "inactiveCaption",
        Menu => "menu",
        Window => "window",
        WindowFrame => "windowFrame",
        MenuText => "menuText",
        WindowText => "windowText",
        CaptionText => "captionText",
        ActiveBorder => "activeBorder",
        InactiveBorder => "inactiveBorder",
        AppWorkspace => "appWorkspace",
        Highlight => "highlight",
        HighlightText => "highlightText",
        BtnFace => "btnFace",
        BtnShadow => "btnShadow",
        GrayText => "grayText",
        BtnText => "btnText",
        InactiveCaptionText => "inactiveCaptionText",
        BtnHighlight => "btnHighlight",
        DkShadow3d => "3dDkShadow",
        Light3d => "3dLight",
        InfoText => "infoText",
        InfoBk => "infoBk",
        HotLight => "hotLight",
        GradientActiveCaption => "gradientActiveCaption",
        GradientInactiveCaption => "gradientInactiveCaption",
        MenuHighlight => "menuHighlight",
        MenuBar => "menuBar",
    }
}

/// A colour transform (`EG_ColorTransform`), values in thousandths of a
/// percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTransform {
    Tint(i32),
    Shade(i32),
    Alpha(i32),
    LumMod(i32),
    LumOff(i32),
    SatMod(i32),
    SatOff(i32),
    HueMod(i32),
}

impl ColorTransform {
    fn from_name(local_name: &str, val: i32) -> Option<Self> {
        Some(match local_name {
            "tint" => Self::Tint(val),
            "shade" => Self::Shade(val),
            "alpha" => Self::Alpha(val),
            "lumMod" => Self::LumMod(val),
            "lumOff" => Self::LumOff(val),
            "satMod" => Self::SatMod(val),
            "satOff" => Self::SatOff(val),
            "hueMod" => Self::HueMod(val),
            _ => return None,
        })
    }

    /// The transform's value.
    pub fn value(&self) -> i32 {
        match *self {
            Self::Tint(v)
            | Self::Shade(v)
            | Self::Alpha(v)
            | Self::LumMod(v)
            | Self::LumOff(v)
            | Self::SatMod(v)
            | Self::SatOff(v)
            | Self::HueMod(v) => v,
        }
    }
}

impl XmlChoice for ColorTransform {
    fn is_choice(local_name: &str) -> bool {
        Self::from_name(local_name, 0).is_some()
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let val: i32 = element.required_attr("val")?;
        reader.read_empty(element)?;
        Self::from_name(element.local_name(), val).ok_or_else(|| OoxmlError::UnexpectedElement {
            expected: "a colour transform".to_string(),
            found: element.name().to_string(),
        })
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        let name = format!("a:{}", self.choice_name());
        writer.element(&name).attr("val", &self.value()).empty()
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Tint(_) => "tint",
            Self::Shade(_) => "shade",
            Self::Alpha(_) => "alpha",
            Self::LumMod(_) => "lumMod",
            Self::LumOff(_) => "lumOff",
            Self::SatMod(_) => "satMod",
            Self::SatOff(_) => "satOff",
            Self::HueMod(_) => "hueMod",
        }
    }
}

impl Validate for ColorTransform {
    const TYPE_NAME: &'static str = "EG_ColorTransform";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        let path = child_path(path, "@val");
        match *self {
            Self::Tint(v) | Self::Shade(v) | Self::Alpha(v) => {
                PositiveFixedPercentage(v).validate_value(&path)
            },
            Self::LumMod(v) | Self::SatMod(v) | Self::HueMod(v) => {
                PositivePercentage(v).validate_value(&path)
            },
            Self::LumOff(_) | Self::SatOff(_) => Ok(()),
        }
    }
}

fn read_transforms<R: BufRead>(
    reader: &mut XmlReader<R>,
    element: &ElementStart,
) -> Result<Vec<ColorTransform>> {
    let mut transforms = Vec::new();
    reader.read_children(element, |reader, child| {
        if !ColorTransform::is_choice(child.local_name()) {
            return Ok(false);
        }
        transforms.push(ColorTransform::read_choice(reader, child)?);
        Ok(true)
    })?;
    Ok(transforms)
}

/// Colour value plus transforms; the shape shared by all colour models.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorModel<T> {
    pub val: T,
    pub transforms: Vec<ColorTransform>,
}

impl<T> ColorModel<T> {
    pub fn new(val: T) -> Self {
        Self {
            val,
            transforms: Vec::new(),
        }
    }

    /// Add a transform.
    pub fn with_transform(mut self, transform: ColorTransform) -> Self {
        self.transforms.push(transform);
        self
    }
}

impl<T: XmlValue + Default> XmlRead for ColorModel<T> {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let val = element.required_attr("val")?;
        let transforms = read_transforms(reader, element)?;
        Ok(Self { val, transforms })
    }
}

impl<T: XmlValue> XmlWrite for ColorModel<T> {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer.element(name).attr("val", &self.val);
        if self.transforms.is_empty() {
            return tag.empty();
        }
        tag.open()?;
        writer.choices(&self.transforms)?;
        writer.end(name)
    }
}

impl<T: XmlValue> Validate for ColorModel<T> {
    const TYPE_NAME: &'static str = "EG_ColorChoice";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_value(path, "@val", &self.val)?;
        validate_choices(path, &self.transforms)
    }
}

/// `CT_SRgbColor`
pub type RgbColor = ColorModel<HexColor>;
/// `CT_SchemeColor`
pub type SchemeColor = ColorModel<SchemeColorVal>;
/// `CT_PresetColor`
pub type PresetColor = ColorModel<PresetColorVal>;

/// `CT_SystemColor`: system colour with the last computed value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemColor {
    pub val: SystemColorVal,
    pub last_clr: Option<HexColor>,
    pub transforms: Vec<ColorTransform>,
}

impl XmlRead for SystemColor {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let val = element.required_attr("val")?;
        let last_clr = element.parse_attr("lastClr")?;
        let transforms = read_transforms(reader, element)?;
        Ok(Self {
            val,
            last_clr,
            transforms,
        })
    }
}

impl XmlWrite for SystemColor {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .attr("val", &self.val)
            .opt_attr("lastClr", self.last_clr.as_ref());
        if self.transforms.is_empty() {
            return tag.empty();
        }
        tag.open()?;
        writer.choices(&self.transforms)?;
        writer.end(name)
    }
}

impl Validate for SystemColor {
    const TYPE_NAME: &'static str = "CT_SystemColor";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_value(path, "@lastClr", &self.last_clr)?;
        validate_choices(path, &self.transforms)
    }
}

/// `EG_ColorChoice`
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// `a:srgbClr`
    Rgb(RgbColor),
    /// `a:schemeClr`
    Scheme(SchemeColor),
    /// `a:prstClr`
    Preset(PresetColor),
    /// `a:sysClr`
    System(SystemColor),
}

impl Color {
    /// An sRGB colour from `RRGGBB`.
    pub fn rgb(hex: impl Into<String>) -> Self {
        Self::Rgb(RgbColor::new(HexColor::new(hex)))
    }

    /// A theme colour.
    pub fn scheme(val: SchemeColorVal) -> Self {
        Self::Scheme(SchemeColor::new(val))
    }

    /// The transforms applied to this colour.
    pub fn transforms(&self) -> &[ColorTransform] {
        match self {
            Self::Rgb(c) => &c.transforms,
            Self::Scheme(c) => &c.transforms,
            Self::Preset(c) => &c.transforms,
            Self::System(c) => &c.transforms,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::Rgb(RgbColor::default())
    }
}

impl XmlChoice for Color {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "srgbClr" | "schemeClr" | "prstClr" | "sysClr")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        Ok(match element.local_name() {
            "srgbClr" => Self::Rgb(reader.read(element)?),
            "schemeClr" => Self::Scheme(reader.read(element)?),
            "prstClr" => Self::Preset(reader.read(element)?),
            "sysClr" => Self::System(reader.read(element)?),
            _ => {
                return Err(OoxmlError::UnexpectedElement {
                    expected: "a colour".to_string(),
                    found: element.name().to_string(),
                });
            },
        })
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Rgb(c) => writer.child("a:srgbClr", c),
            Self::Scheme(c) => writer.child("a:schemeClr", c),
            Self::Preset(c) => writer.child("a:prstClr", c),
            Self::System(c) => writer.child("a:sysClr", c),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Rgb(_) => "srgbClr",
            Self::Scheme(_) => "schemeClr",
            Self::Preset(_) => "prstClr",
            Self::System(_) => "sysClr",
        }
    }
}

impl Validate for Color {
    const TYPE_NAME: &'static str = "EG_ColorChoice";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Rgb(c) => c.validate_with_path(path),
            Self::Scheme(c) => c.validate_with_path(path),
            Self::Preset(c) => c.validate_with_path(path),
            Self::System(c) => c.validate_with_path(path),
        }
    }
}

/// `CT_Color`: an element holding exactly one colour (`a:fgClr`, `a:bgClr`,
/// `a:buClr`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorElement {
    pub color: Color,
}

impl ColorElement {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl XmlRead for ColorElement {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut color = None;
        reader.read_children(element, |reader, child| {
            if !Color::is_choice(child.local_name()) {
                return Ok(false);
            }
            color = Some(Color::read_choice(reader, child)?);
            Ok(true)
        })?;
        let color = color.ok_or_else(|| OoxmlError::UnexpectedElement {
            expected: "a colour".to_string(),
            found: format!("empty <{}>", element.name()),
        })?;
        Ok(Self { color })
    }
}

impl XmlWrite for ColorElement {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.choice(&self.color)?;
        writer.end(name)
    }
}

impl Validate for ColorElement {
    const TYPE_NAME: &'static str = "CT_Color";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_choice(path, &self.color)
    }
}

crate::st_enum! {
    /// `ST_ColorSchemeIndex`: a theme colour slot.
    ColorSchemeIndex = "ST_ColorSchemeIndex" {
        Dk1 => "dk1",
        Lt1 => "lt1",
        Dk2 => "dk2",
        Lt2 => "lt2",
        Accent1 => "accent1",
        Accent2 => "accent2",
        Accent3 => "accent3",
        Accent4 => "accent4",
        Accent5 => "accent5",
        Accent6 => "accent6",
        Hlink => "hlink",
        FolHlink => "folHlink",
    }
}

/// `CT_ColorMapping`: maps the logical scheme colours onto theme slots.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMapping {
    pub bg1: ColorSchemeIndex,
    pub tx1: ColorSchemeIndex,
    pub bg2: ColorSchemeIndex,
    pub tx2: ColorSchemeIndex,
    pub accent1: ColorSchemeIndex,
    pub accent2: ColorSchemeIndex,
    pub accent3: ColorSchemeIndex,
    pub accent4: ColorSchemeIndex,
    pub accent5: ColorSchemeIndex,
    pub accent6: ColorSchemeIndex,
    pub hlink: ColorSchemeIndex,
    pub fol_hlink: ColorSchemeIndex,
    pub ext_lst: Option<ExtensionList>,
}

impl Default for ColorMapping {
    /// The mapping of the default Office master: light background, dark text.
    fn default() -> Self {
        use ColorSchemeIndex::*;
        Self {
            bg1: Lt1,
            tx1: Dk1,
            bg2: Lt2,
            tx2: Dk2,
            accent1: Accent1,
            accent2: Accent2,
            accent3: Accent3,
            accent4: Accent4,
            accent5: Accent5,
            accent6: Accent6,
            hlink: Hlink,
            fol_hlink: FolHlink,
            ext_lst: None,
        }
    }
}

impl ColorMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a scheme colour name (`bg1`, `tx2`, `accent3`, ...) to its
    /// theme slot. Names that are not remapped resolve to themselves.
    pub fn resolve(&self, scheme: SchemeColorVal) -> Option<ColorSchemeIndex> {
        Some(match scheme {
            SchemeColorVal::Bg1 => self.bg1,
            SchemeColorVal::Tx1 => self.tx1,
            SchemeColorVal::Bg2 => self.bg2,
            SchemeColorVal::Tx2 => self.tx2,
            SchemeColorVal::Accent1 => self.accent1,
            SchemeColorVal::Accent2 => self.accent2,
            SchemeColorVal::Accent3 => self.accent3,
            SchemeColorVal::Accent4 => self.accent4,
            SchemeColorVal::Accent5 => self.accent5,
            SchemeColorVal::Accent6 => self.accent6,
            SchemeColorVal::Hlink => self.hlink,
            SchemeColorVal::FolHlink => self.fol_hlink,
            SchemeColorVal::Dk1 => ColorSchemeIndex::Dk1,
            SchemeColorVal::Lt1 => ColorSchemeIndex::Lt1,
            SchemeColorVal::Dk2 => ColorSchemeIndex::Dk2,
            SchemeColorVal::Lt2 => ColorSchemeIndex::Lt2,
            _ => return None,
        })
    }
}

impl XmlRead for ColorMapping {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let defaults = Self::default();
        let attr = |name: &str, default: ColorSchemeIndex| -> Result<ColorSchemeIndex> {
            Ok(element.parse_attr(name)?.unwrap_or_else(|| {
                log::debug!("{} missing on <{}>, using default", name, element.name());
                default
            }))
        };
        let mut map = Self {
            bg1: attr("bg1", defaults.bg1)?,
            tx1: attr("tx1", defaults.tx1)?,
            bg2: attr("bg2", defaults.bg2)?,
            tx2: attr("tx2", defaults.tx2)?,
            accent1: attr("accent1", defaults.accent1)?,
            accent2: attr("accent2", defaults.accent2)?,
            accent3: attr("accent3", defaults.accent3)?,
            accent4: attr("accent4", defaults.accent4)?,
            accent5: attr("accent5", defaults.accent5)?,
            accent6: attr("accent6", defaults.accent6)?,
            hlink: attr("hlink", defaults.hlink)?,
            fol_hlink: attr("folHlink", defaults.fol_hlink)?,
            ext_lst: None,
        };
        reader.read_children(element, |reader, child| {
            if child.local_name() != "extLst" {
                return Ok(false);
            }
            map.ext_lst = Some(reader.read(child)?);
            Ok(true)
        })?;
        Ok(map)
    }
}

impl XmlWrite for ColorMapping {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .attr("bg1", &self.bg1)
            .attr("tx1", &self.tx1)
            .attr("bg2", &self.bg2)
            .attr("tx2", &self.tx2)
            .attr("accent1", &self.accent1)
            .attr("accent2", &self.accent2)
            .attr("accent3", &self.accent3)
            .attr("accent4", &self.accent4)
            .attr("accent5", &self.accent5)
            .attr("accent6", &self.accent6)
            .attr("hlink", &self.hlink)
            .attr("folHlink", &self.fol_hlink);
        match &self.ext_lst {
            None => tag.empty(),
            Some(ext_lst) => {
                tag.open()?;
                writer.child("a:extLst", ext_lst)?;
                writer.end(name)
            },
        }
    }
}

impl Validate for ColorMapping {
    const TYPE_NAME: &'static str = "CT_ColorMapping";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_ColorMappingOverride`: keep the master's mapping or replace it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ColorMappingOverride {
    /// `a:masterClrMapping`
    #[default]
    Master,
    /// `a:overrideClrMapping`
    Override(ColorMapping),
}

impl XmlChoice for ColorMappingOverride {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "masterClrMapping" | "overrideClrMapping")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "masterClrMapping" => {
                reader.skip(element)?;
                Ok(Self::Master)
            },
            "overrideClrMapping" => Ok(Self::Override(reader.read(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "a:masterClrMapping or a:overrideClrMapping".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Master => writer.element("a:masterClrMapping").empty(),
            Self::Override(map) => writer.child("a:overrideClrMapping", map),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Master => "masterClrMapping",
            Self::Override(_) => "overrideClrMapping",
        }
    }
}

impl XmlRead for ColorMappingOverride {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        reader.read_wrapped_choice(element)
    }
}

impl XmlWrite for ColorMappingOverride {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.wrapped_choice(name, self)
    }
}

impl Validate for ColorMappingOverride {
    const TYPE_NAME: &'static str = "CT_ColorMappingOverride";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Master => Ok(()),
            Self::Override(map) => map.validate_with_path(&child_path(path, "overrideClrMapping")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_scheme_color_with_transforms() {
        let xml = r#"<a:fgClr><a:schemeClr val="accent1"><a:lumMod val="75000"/><a:alpha val="50000"/></a:schemeClr></a:fgClr>"#;
        let element: ColorElement = from_fragment(xml).unwrap();
        let Color::Scheme(scheme) = &element.color else {
            panic!("expected a scheme colour");
        };
        assert_eq!(scheme.val, SchemeColorVal::Accent1);
        assert_eq!(
            scheme.transforms,
            vec![ColorTransform::LumMod(75_000), ColorTransform::Alpha(50_000)]
        );
        assert_eq!(to_fragment(&element, "a:fgClr").unwrap(), xml);
    }

    #[test]
    fn test_unknown_transform_is_skipped() {
        let xml = r#"<a:srgbClr val="4472C4"><a:gamma/><a:shade val="10000"/></a:srgbClr>"#;
        let color: RgbColor = from_fragment(xml).unwrap();
        assert_eq!(color.transforms, vec![ColorTransform::Shade(10_000)]);
    }

    #[test]
    fn test_hex_color_validation() {
        assert!(Color::rgb("4472C4").validate().is_ok());
        let err = Color::rgb("44GG").validate().unwrap_err();
        assert_eq!(err.to_string(), "EG_ColorChoice/@val: '44GG' is not 3 hex-encoded bytes");
    }

    #[test]
    fn test_alpha_range() {
        let color = Color::scheme(SchemeColorVal::Tx1).transforms().to_vec();
        assert!(color.is_empty());
        let over = Color::Scheme(
            SchemeColor::new(SchemeColorVal::Tx1).with_transform(ColorTransform::Alpha(150_000)),
        );
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_system_color_keeps_last_value() {
        let xml = r#"<a:sysClr val="windowText" lastClr="000000"/>"#;
        let color: SystemColor = from_fragment(xml).unwrap();
        assert_eq!(color.val, SystemColorVal::WindowText);
        assert_eq!(to_fragment(&color, "a:sysClr").unwrap(), xml);
    }

    #[test]
    fn test_empty_color_element_is_an_error() {
        assert!(from_fragment::<ColorElement>("<a:bgClr/>").is_err());
    }

    #[test]
    fn test_color_mapping_override() {
        let xml = r#"<p:clrMapOvr><a:overrideClrMapping bg1="dk1" tx1="lt1" bg2="dk2" tx2="lt2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/></p:clrMapOvr>"#;
        let ovr: ColorMappingOverride = from_fragment(xml).unwrap();
        let ColorMappingOverride::Override(map) = &ovr else {
            panic!("expected an override");
        };
        assert_eq!(map.resolve(SchemeColorVal::Bg1), Some(ColorSchemeIndex::Dk1));
        assert_eq!(map.resolve(SchemeColorVal::Accent2), Some(ColorSchemeIndex::Accent2));
        assert_eq!(to_fragment(&ovr, "p:clrMapOvr").unwrap(), xml);

        let master: ColorMappingOverride =
            from_fragment("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>").unwrap();
        assert_eq!(master, ColorMappingOverride::Master);
    }

    #[test]
    fn test_missing_mapping_attribute_uses_default() {
        let map: ColorMapping = from_fragment(r#"<c:clrMapOvr bg1="dk1"/>"#).unwrap();
        assert_eq!(map.bg1, ColorSchemeIndex::Dk1);
        assert_eq!(map.tx1, ColorSchemeIndex::Dk1);
    }
}
