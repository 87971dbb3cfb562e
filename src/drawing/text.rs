//! Text bodies: paragraphs, runs and their properties.

use crate::drawing::color::ColorElement;
use crate::drawing::ext::ExtensionList;
use crate::drawing::fill::Fill;
use crate::drawing::geometry::{Angle, Coordinate32};
use crate::drawing::line::LineProperties;
use crate::error::{OoxmlError, Result};
use crate::xml::value::is_guid;
use crate::xml::{
    ElementStart, RawElement, Validate, XmlChoice, XmlRead, XmlReader, XmlValue, XmlWrite,
    XmlWriter, check_occurs, child_path, validate_all, validate_choices, validate_opt,
    validate_opt_choice, validate_opt_value, validate_value,
};
use std::io::{BufRead, Write};

crate::st_range! {
    /// `ST_TextFontSize`: font size in hundredths of a point.
    TextFontSize(i32) = "ST_TextFontSize", 100, 400_000, default 1800
}

crate::st_range! {
    /// `ST_TextIndentLevelType`
    TextIndentLevel(i32) = "ST_TextIndentLevelType", 0, 8, default 0
}

crate::st_range! {
    /// `ST_TextColumnCount`
    TextColumnCount(i32) = "ST_TextColumnCount", 1, 16, default 1
}

/// Parse an integer in thousandths of a percent, or a percent string.
fn parse_thousandths(type_name: &str, value: &str) -> Result<i32> {
    let trimmed = value.trim();
    let Some(percent) = trimmed.strip_suffix('%') else {
        return i32::parse_xml(trimmed);
    };
    f64::parse_xml(percent)
        .ok()
        .map(|percent| (percent * 1000.0).round())
        .filter(|scaled| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(scaled))
        .map(|scaled| scaled as i32)
        .ok_or_else(|| OoxmlError::invalid_value(type_name, value, "not a percentage"))
}

/// A text spacing percentage in thousandths of a percent
/// (`ST_TextSpacingPercentOrPercentString`).
///
/// Decoding accepts both the integer form (`62500`) and the percent string
/// (`62.5%`); encoding always writes the integer form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextPercentage(pub i32);

impl TextPercentage {
    /// The value as a percentage (`62500` is `62.5`).
    pub fn percent(&self) -> f64 {
        f64::from(self.0) / 1000.0
    }
}

impl XmlValue for TextPercentage {
    fn parse_xml(value: &str) -> Result<Self> {
        parse_thousandths("ST_TextSpacingPercentOrPercentString", value).map(Self)
    }

    fn write_value(&self, out: &mut String) {
        self.0.write_value(out);
    }

    fn validate_value(&self, path: &str) -> Result<()> {
        crate::xml::value::check_range(path, self.0, 0, 13_200_000)
    }
}

/// A font scale in thousandths of a percent
/// (`ST_TextFontScalePercentOrPercentString`), between 1% and 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextFontScale(pub i32);

impl Default for TextFontScale {
    fn default() -> Self {
        Self(100_000)
    }
}

impl TextFontScale {
    /// The value as a percentage (`62500` is `62.5`).
    pub fn percent(&self) -> f64 {
        f64::from(self.0) / 1000.0
    }
}

impl XmlValue for TextFontScale {
    fn parse_xml(value: &str) -> Result<Self> {
        parse_thousandths("ST_TextFontScalePercentOrPercentString", value).map(Self)
    }

    fn write_value(&self, out: &mut String) {
        self.0.write_value(out);
    }

    fn validate_value(&self, path: &str) -> Result<()> {
        crate::xml::value::check_range(path, self.0, 1000, 100_000)
    }
}

crate::st_enum! {
    /// `ST_TextUnderlineType`
    TextUnderline = "ST_TextUnderlineType" {
        None => "none",
        Words => "words",
        Single => "sng",
        Double => "dbl",
        Heavy => "heavy",
        Dotted => "dotted",
        DottedHeavy => "dottedHeavy",
        Dash => "dash",
        DashHeavy => "dashHeavy",
        DashLong => "dashLong",
        DashLongHeavy => "dashLongHeavy",
        DotDash => "dotDash",
        DotDashHeavy => "dotDashHeavy",
        DotDotDash => "dotDotDash",
        DotDotDashHeavy => "dotDotDashHeavy",
        Wavy => "wavy",
        WavyHeavy => "wavyHeavy",
        WavyDouble => "wavyDbl",
    }
}

crate::st_enum! {
    /// `ST_TextStrikeType`
    TextStrike = "ST_TextStrikeType" {
        NoStrike => "noStrike",
        Single => "sngStrike",
        Double => "dblStrike",
    }
}

crate::st_enum! {
    /// `ST_TextCapsType`
    TextCaps = "ST_TextCapsType" {
        None => "none",
        Small => "small",
        All => "all",
    }
}

crate::st_enum! {
    /// `ST_TextAlignType`
    TextAlign = "ST_TextAlignType" {
        Left => "l",
        Center => "ctr",
        Right => "r",
        Justified => "just",
        JustifiedLow => "justLow",
        Distributed => "dist",
        ThaiDistributed => "thaiDist",
    }
}

crate::st_enum! {
    /// `ST_TextFontAlignType`
    TextFontAlign = "ST_TextFontAlignType" {
        Auto => "auto",
        Top => "t",
        Center => "ctr",
        Baseline => "base",
        Bottom => "b",
    }
}

crate::st_enum! {
    /// `ST_TextAnchoringType`
    TextAnchoring = "ST_TextAnchoringType" {
        Top => "t",
        Center => "ctr",
        Bottom => "b",
        Justified => "just",
        Distributed => "dist",
    }
}

crate::st_enum! {
    /// `ST_TextVerticalType`
    TextVertical = "ST_TextVerticalType" {
        Horizontal => "horz",
        Vertical => "vert",
        Vertical270 => "vert270",
        WordArtVertical => "wordArtVert",
        EastAsianVertical => "eaVert",
        MongolianVertical => "mongolianVert",
        WordArtVerticalRtl => "wordArtVertRtl",
    }
}

crate::st_enum! {
    /// `ST_TextWrappingType`
    TextWrapping = "ST_TextWrappingType" {
        None => "none",
        Square => "square",
    }
}

crate::st_enum! {
    /// `ST_TextVertOverflowType`
    TextVertOverflow = "ST_TextVertOverflowType" {
        Overflow => "overflow",
        Ellipsis => "ellipsis",
        Clip => "clip",
    }
}

crate::st_enum! {
    /// `ST_TextHorzOverflowType`
    TextHorzOverflow = "ST_TextHorzOverflowType" {
        Overflow => "overflow",
        Clip => "clip",
    }
}

crate::st_open_enum! {
    /// `ST_TextAutonumberScheme`
    TextAutonumberScheme = "ST_TextAutonumberScheme", default ArabicPeriod {
        AlphaLcParenBoth => "alphaLcParenBoth",
        AlphaUcParenBoth => "alphaUcParenBoth",
        AlphaLcParenR => "alphaLcParenR",
        AlphaUcParenR => "alphaUcParenR",
        AlphaLcPeriod => "alphaLcPeriod",
        AlphaUcPeriod => "alphaUcPeriod",
        ArabicParenBoth => "arabicParenBoth",
        ArabicParenR => "arabicParenR",
        ArabicPeriod => "arabicPeriod",
        ArabicPlain => "arabicPlain",
        RomanLcParenBoth => "romanLcParenBoth",
        RomanUcParenBoth => "romanUcParenBoth",
        RomanLcParenR => "romanLcParenR",
        RomanUcParenR => "romanUcParenR",
        RomanLcPeriod => "romanLcPeriod",
        RomanUcPeriod => "romanUcPeriod",
    }
}

/// `CT_TextFont`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFont {
    pub typeface: String,
    pub panose: Option<String>,
    pub pitch_family: Option<i8>,
    pub charset: Option<i8>,
}

impl TextFont {
    pub fn new(typeface: impl Into<String>) -> Self {
        Self {
            typeface: typeface.into(),
            ..Self::default()
        }
    }
}

impl XmlRead for TextFont {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let font = Self {
            typeface: element.required_attr("typeface")?,
            panose: element.parse_attr("panose")?,
            pitch_family: element.parse_attr("pitchFamily")?,
            charset: element.parse_attr("charset")?,
        };
        reader.read_empty(element)?;
        Ok(font)
    }
}

impl XmlWrite for TextFont {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .attr("typeface", &self.typeface)
            .opt_attr("panose", self.panose.as_ref())
            .opt_attr("pitchFamily", self.pitch_family.as_ref())
            .opt_attr("charset", self.charset.as_ref())
            .empty()
    }
}

impl Validate for TextFont {
    const TYPE_NAME: &'static str = "CT_TextFont";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        if let Some(panose) = &self.panose {
            crate::xml::value::check_hex(&child_path(path, "@panose"), panose, 10)?;
        }
        Ok(())
    }
}

/// `CT_TextCharacterProperties`: run formatting (`a:rPr`, `a:defRPr`,
/// `a:endParaRPr`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextCharacterProperties {
    pub lang: Option<String>,
    pub alt_lang: Option<String>,
    pub sz: Option<TextFontSize>,
    pub b: Option<bool>,
    pub i: Option<bool>,
    pub u: Option<TextUnderline>,
    pub strike: Option<TextStrike>,
    pub kern: Option<i32>,
    pub cap: Option<TextCaps>,
    /// Character spacing in hundredths of a point
    pub spc: Option<i32>,
    /// Baseline shift in thousandths of a percent
    pub baseline: Option<i32>,
    pub dirty: Option<bool>,
    pub err: Option<bool>,
    pub no_proof: Option<bool>,
    pub smt_clean: Option<bool>,
    pub ln: Option<Box<LineProperties>>,
    pub fill: Option<Fill>,
    pub effects: Option<RawElement>,
    pub highlight: Option<ColorElement>,
    pub latin: Option<TextFont>,
    pub ea: Option<TextFont>,
    pub cs: Option<TextFont>,
    pub sym: Option<TextFont>,
    pub hlink_click: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl TextCharacterProperties {
    pub fn new() -> Self {
        Self::default()
    }

    fn has_children(&self) -> bool {
        self.ln.is_some()
            || self.fill.is_some()
            || self.effects.is_some()
            || self.highlight.is_some()
            || self.latin.is_some()
            || self.ea.is_some()
            || self.cs.is_some()
            || self.sym.is_some()
            || self.hlink_click.is_some()
            || self.ext_lst.is_some()
    }
}

impl XmlRead for TextCharacterProperties {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut r_pr = Self {
            lang: element.parse_attr("lang")?,
            alt_lang: element.parse_attr("altLang")?,
            sz: element.parse_attr("sz")?,
            b: element.parse_attr("b")?,
            i: element.parse_attr("i")?,
            u: element.parse_attr("u")?,
            strike: element.parse_attr("strike")?,
            kern: element.parse_attr("kern")?,
            cap: element.parse_attr("cap")?,
            spc: element.parse_attr("spc")?,
            baseline: element.parse_attr("baseline")?,
            dirty: element.parse_attr("dirty")?,
            err: element.parse_attr("err")?,
            no_proof: element.parse_attr("noProof")?,
            smt_clean: element.parse_attr("smtClean")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "ln" => r_pr.ln = Some(reader.read(child)?),
                "effectLst" | "effectDag" => r_pr.effects = Some(reader.read_raw(child)?),
                "highlight" => r_pr.highlight = Some(reader.read(child)?),
                "latin" => r_pr.latin = Some(reader.read(child)?),
                "ea" => r_pr.ea = Some(reader.read(child)?),
                "cs" => r_pr.cs = Some(reader.read(child)?),
                "sym" => r_pr.sym = Some(reader.read(child)?),
                "hlinkClick" => r_pr.hlink_click = Some(reader.read_raw(child)?),
                "extLst" => r_pr.ext_lst = Some(reader.read(child)?),
                name if Fill::is_choice(name) => r_pr.fill = Some(Fill::read_choice(reader, child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(r_pr)
    }
}

impl XmlWrite for TextCharacterProperties {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("lang", self.lang.as_ref())
            .opt_attr("altLang", self.alt_lang.as_ref())
            .opt_attr("sz", self.sz.as_ref())
            .opt_attr("b", self.b.as_ref())
            .opt_attr("i", self.i.as_ref())
            .opt_attr("u", self.u.as_ref())
            .opt_attr("strike", self.strike.as_ref())
            .opt_attr("kern", self.kern.as_ref())
            .opt_attr("cap", self.cap.as_ref())
            .opt_attr("spc", self.spc.as_ref())
            .opt_attr("baseline", self.baseline.as_ref())
            .opt_attr("dirty", self.dirty.as_ref())
            .opt_attr("err", self.err.as_ref())
            .opt_attr("noProof", self.no_proof.as_ref())
            .opt_attr("smtClean", self.smt_clean.as_ref());
        if !self.has_children() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:ln", &self.ln)?;
        writer.opt_choice(&self.fill)?;
        if let Some(effects) = &self.effects {
            writer.child(&effects.name, effects)?;
        }
        writer.opt_child("a:highlight", &self.highlight)?;
        writer.opt_child("a:latin", &self.latin)?;
        writer.opt_child("a:ea", &self.ea)?;
        writer.opt_child("a:cs", &self.cs)?;
        writer.opt_child("a:sym", &self.sym)?;
        writer.opt_child("a:hlinkClick", &self.hlink_click)?;
        writer.opt_child("a:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for TextCharacterProperties {
    const TYPE_NAME: &'static str = "CT_TextCharacterProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_value(path, "@sz", &self.sz)?;
        validate_opt(path, "ln", &self.ln)?;
        validate_opt_choice(path, &self.fill)?;
        validate_opt(path, "highlight", &self.highlight)?;
        validate_opt(path, "latin", &self.latin)?;
        validate_opt(path, "ea", &self.ea)?;
        validate_opt(path, "cs", &self.cs)?;
        validate_opt(path, "sym", &self.sym)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_TextSpacing`: line or paragraph spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSpacing {
    /// `a:spcPct`, thousandths of a percent of the line
    Percent(TextPercentage),
    /// `a:spcPts`, hundredths of a point
    Points(i32),
}

impl Default for TextSpacing {
    fn default() -> Self {
        Self::Percent(TextPercentage(100_000))
    }
}

impl XmlRead for TextSpacing {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut spacing = None;
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "spcPct" => spacing = Some(Self::Percent(child.required_attr("val")?)),
                "spcPts" => spacing = Some(Self::Points(child.required_attr("val")?)),
                _ => return Ok(false),
            }
            reader.read_empty(child)?;
            Ok(true)
        })?;
        spacing.ok_or_else(|| OoxmlError::UnexpectedElement {
            expected: "a:spcPct or a:spcPts".to_string(),
            found: format!("empty <{}>", element.name()),
        })
    }
}

impl XmlWrite for TextSpacing {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        match self {
            Self::Percent(pct) => writer.element("a:spcPct").attr("val", pct).empty()?,
            Self::Points(pts) => writer.element("a:spcPts").attr("val", pts).empty()?,
        }
        writer.end(name)
    }
}

impl Validate for TextSpacing {
    const TYPE_NAME: &'static str = "CT_TextSpacing";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Percent(pct) => validate_value(path, "spcPct/@val", pct),
            Self::Points(pts) => {
                crate::xml::value::check_range(&child_path(path, "spcPts/@val"), *pts, 0, 158_400)
            },
        }
    }
}

/// `EG_TextBullet`
#[derive(Debug, Clone, PartialEq)]
pub enum Bullet {
    /// `a:buNone`
    None,
    /// `a:buAutoNum`
    AutoNumber {
        scheme: TextAutonumberScheme,
        start_at: Option<i32>,
    },
    /// `a:buChar`
    Char(String),
}

impl XmlChoice for Bullet {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "buNone" | "buAutoNum" | "buChar")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let bullet = match element.local_name() {
            "buNone" => Self::None,
            "buAutoNum" => Self::AutoNumber {
                scheme: element.required_attr("type")?,
                start_at: element.parse_attr("startAt")?,
            },
            "buChar" => Self::Char(element.required_attr("char")?),
            _ => {
                return Err(OoxmlError::UnexpectedElement {
                    expected: "a bullet".to_string(),
                    found: element.name().to_string(),
                });
            },
        };
        reader.read_empty(element)?;
        Ok(bullet)
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::None => writer.element("a:buNone").empty(),
            Self::AutoNumber { scheme, start_at } => writer
                .element("a:buAutoNum")
                .attr("type", scheme)
                .opt_attr("startAt", start_at.as_ref())
                .empty(),
            Self::Char(ch) => writer.element("a:buChar").attr("char", ch).empty(),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::None => "buNone",
            Self::AutoNumber { .. } => "buAutoNum",
            Self::Char(_) => "buChar",
        }
    }
}

impl Validate for Bullet {
    const TYPE_NAME: &'static str = "EG_TextBullet";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::AutoNumber {
                start_at: Some(start),
                ..
            } => crate::xml::value::check_range(&child_path(path, "@startAt"), *start, 1, 32767),
            Self::Char(ch) if ch.is_empty() => {
                Err(OoxmlError::validation(path, "bullet character is empty"))
            },
            _ => Ok(()),
        }
    }
}

/// `CT_TextParagraphProperties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextParagraphProperties {
    pub mar_l: Option<Coordinate32>,
    pub mar_r: Option<Coordinate32>,
    pub lvl: Option<TextIndentLevel>,
    pub indent: Option<Coordinate32>,
    pub algn: Option<TextAlign>,
    pub def_tab_sz: Option<Coordinate32>,
    pub rtl: Option<bool>,
    pub ea_ln_brk: Option<bool>,
    pub font_algn: Option<TextFontAlign>,
    pub latin_ln_brk: Option<bool>,
    pub hanging_punct: Option<bool>,
    pub ln_spc: Option<TextSpacing>,
    pub spc_bef: Option<TextSpacing>,
    pub spc_aft: Option<TextSpacing>,
    pub bullet: Option<Bullet>,
    pub def_r_pr: Option<Box<TextCharacterProperties>>,
    pub ext_lst: Option<ExtensionList>,
}

impl TextParagraphProperties {
    pub fn new() -> Self {
        Self::default()
    }

    fn has_children(&self) -> bool {
        self.ln_spc.is_some()
            || self.spc_bef.is_some()
            || self.spc_aft.is_some()
            || self.bullet.is_some()
            || self.def_r_pr.is_some()
            || self.ext_lst.is_some()
    }
}

impl XmlRead for TextParagraphProperties {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut p_pr = Self {
            mar_l: element.parse_attr("marL")?,
            mar_r: element.parse_attr("marR")?,
            lvl: element.parse_attr("lvl")?,
            indent: element.parse_attr("indent")?,
            algn: element.parse_attr("algn")?,
            def_tab_sz: element.parse_attr("defTabSz")?,
            rtl: element.parse_attr("rtl")?,
            ea_ln_brk: element.parse_attr("eaLnBrk")?,
            font_algn: element.parse_attr("fontAlgn")?,
            latin_ln_brk: element.parse_attr("latinLnBrk")?,
            hanging_punct: element.parse_attr("hangingPunct")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "lnSpc" => p_pr.ln_spc = Some(reader.read(child)?),
                "spcBef" => p_pr.spc_bef = Some(reader.read(child)?),
                "spcAft" => p_pr.spc_aft = Some(reader.read(child)?),
                "defRPr" => p_pr.def_r_pr = Some(reader.read(child)?),
                "extLst" => p_pr.ext_lst = Some(reader.read(child)?),
                name if Bullet::is_choice(name) => {
                    p_pr.bullet = Some(Bullet::read_choice(reader, child)?)
                },
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(p_pr)
    }
}

impl XmlWrite for TextParagraphProperties {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("marL", self.mar_l.as_ref())
            .opt_attr("marR", self.mar_r.as_ref())
            .opt_attr("lvl", self.lvl.as_ref())
            .opt_attr("indent", self.indent.as_ref())
            .opt_attr("algn", self.algn.as_ref())
            .opt_attr("defTabSz", self.def_tab_sz.as_ref())
            .opt_attr("rtl", self.rtl.as_ref())
            .opt_attr("eaLnBrk", self.ea_ln_brk.as_ref())
            .opt_attr("fontAlgn", self.font_algn.as_ref())
            .opt_attr("latinLnBrk", self.latin_ln_brk.as_ref())
            .opt_attr("hangingPunct", self.hanging_punct.as_ref());
        if !self.has_children() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:lnSpc", &self.ln_spc)?;
        writer.opt_child("a:spcBef", &self.spc_bef)?;
        writer.opt_child("a:spcAft", &self.spc_aft)?;
        writer.opt_choice(&self.bullet)?;
        writer.opt_child("a:defRPr", &self.def_r_pr)?;
        writer.opt_child("a:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for TextParagraphProperties {
    const TYPE_NAME: &'static str = "CT_TextParagraphProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_value(path, "@lvl", &self.lvl)?;
        validate_opt(path, "lnSpc", &self.ln_spc)?;
        validate_opt(path, "spcBef", &self.spc_bef)?;
        validate_opt(path, "spcAft", &self.spc_aft)?;
        validate_opt_choice(path, &self.bullet)?;
        validate_opt(path, "defRPr", &self.def_r_pr)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_TextListStyle`: default paragraph properties and nine outline levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextListStyle {
    pub def_p_pr: Option<Box<TextParagraphProperties>>,
    /// `a:lvl1pPr` through `a:lvl9pPr`
    pub levels: [Option<Box<TextParagraphProperties>>; 9],
    pub ext_lst: Option<ExtensionList>,
}

const LEVEL_NAMES: [&str; 9] = [
    "lvl1pPr", "lvl2pPr", "lvl3pPr", "lvl4pPr", "lvl5pPr", "lvl6pPr", "lvl7pPr", "lvl8pPr",
    "lvl9pPr",
];

impl TextListStyle {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.def_p_pr.is_none() && self.levels.iter().all(Option::is_none) && self.ext_lst.is_none()
    }
}

impl XmlRead for TextListStyle {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut style = Self::new();
        reader.read_children(element, |reader, child| {
            let local = child.local_name();
            if let Some(level) = LEVEL_NAMES.iter().position(|name| *name == local) {
                style.levels[level] = Some(reader.read(child)?);
                return Ok(true);
            }
            match local {
                "defPPr" => style.def_p_pr = Some(reader.read(child)?),
                "extLst" => style.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(style)
    }
}

impl XmlWrite for TextListStyle {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.is_empty() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("a:defPPr", &self.def_p_pr)?;
        for (level, name) in self.levels.iter().zip(LEVEL_NAMES) {
            writer.opt_child(&format!("a:{}", name), level)?;
        }
        writer.opt_child("a:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for TextListStyle {
    const TYPE_NAME: &'static str = "CT_TextListStyle";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "defPPr", &self.def_p_pr)?;
        for (level, name) in self.levels.iter().zip(LEVEL_NAMES) {
            validate_opt(path, name, level)?;
        }
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `EG_TextAutofit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAutofit {
    /// `a:noAutofit`
    None,
    /// `a:normAutofit`: shrink text on overflow
    Normal {
        font_scale: Option<TextFontScale>,
        ln_spc_reduction: Option<TextPercentage>,
    },
    /// `a:spAutoFit`: resize the shape to fit the text
    Shape,
}

impl XmlChoice for TextAutofit {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "noAutofit" | "normAutofit" | "spAutoFit")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let autofit = match element.local_name() {
            "noAutofit" => Self::None,
            "normAutofit" => Self::Normal {
                font_scale: element.parse_attr("fontScale")?,
                ln_spc_reduction: element.parse_attr("lnSpcReduction")?,
            },
            "spAutoFit" => Self::Shape,
            _ => {
                return Err(OoxmlError::UnexpectedElement {
                    expected: "an autofit type".to_string(),
                    found: element.name().to_string(),
                });
            },
        };
        reader.read_empty(element)?;
        Ok(autofit)
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::None => writer.element("a:noAutofit").empty(),
            Self::Normal {
                font_scale,
                ln_spc_reduction,
            } => writer
                .element("a:normAutofit")
                .opt_attr("fontScale", font_scale.as_ref())
                .opt_attr("lnSpcReduction", ln_spc_reduction.as_ref())
                .empty(),
            Self::Shape => writer.element("a:spAutoFit").empty(),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::None => "noAutofit",
            Self::Normal { .. } => "normAutofit",
            Self::Shape => "spAutoFit",
        }
    }
}

impl Validate for TextAutofit {
    const TYPE_NAME: &'static str = "EG_TextAutofit";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Normal {
                font_scale,
                ln_spc_reduction,
            } => {
                validate_opt_value(path, "@fontScale", font_scale)?;
                validate_opt_value(path, "@lnSpcReduction", ln_spc_reduction)
            },
            _ => Ok(()),
        }
    }
}

/// `CT_TextBodyProperties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBodyProperties {
    pub rot: Option<Angle>,
    pub spc_first_last_para: Option<bool>,
    pub vert_overflow: Option<TextVertOverflow>,
    pub horz_overflow: Option<TextHorzOverflow>,
    pub vert: Option<TextVertical>,
    pub wrap: Option<TextWrapping>,
    pub l_ins: Option<Coordinate32>,
    pub t_ins: Option<Coordinate32>,
    pub r_ins: Option<Coordinate32>,
    pub b_ins: Option<Coordinate32>,
    pub num_col: Option<TextColumnCount>,
    pub spc_col: Option<i32>,
    pub rtl_col: Option<bool>,
    pub from_word_art: Option<bool>,
    pub anchor: Option<TextAnchoring>,
    pub anchor_ctr: Option<bool>,
    pub force_aa: Option<bool>,
    pub upright: Option<bool>,
    pub compat_ln_spc: Option<bool>,
    pub prst_tx_warp: Option<RawElement>,
    pub autofit: Option<TextAutofit>,
    pub scene3d: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl TextBodyProperties {
    pub fn new() -> Self {
        Self::default()
    }
}

impl XmlRead for TextBodyProperties {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut body_pr = Self {
            rot: element.parse_attr("rot")?,
            spc_first_last_para: element.parse_attr("spcFirstLastPara")?,
            vert_overflow: element.parse_attr("vertOverflow")?,
            horz_overflow: element.parse_attr("horzOverflow")?,
            vert: element.parse_attr("vert")?,
            wrap: element.parse_attr("wrap")?,
            l_ins: element.parse_attr("lIns")?,
            t_ins: element.parse_attr("tIns")?,
            r_ins: element.parse_attr("rIns")?,
            b_ins: element.parse_attr("bIns")?,
            num_col: element.parse_attr("numCol")?,
            spc_col: element.parse_attr("spcCol")?,
            rtl_col: element.parse_attr("rtlCol")?,
            from_word_art: element.parse_attr("fromWordArt")?,
            anchor: element.parse_attr("anchor")?,
            anchor_ctr: element.parse_attr("anchorCtr")?,
            force_aa: element.parse_attr("forceAA")?,
            upright: element.parse_attr("upright")?,
            compat_ln_spc: element.parse_attr("compatLnSpc")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "prstTxWarp" => body_pr.prst_tx_warp = Some(reader.read_raw(child)?),
                "scene3d" => body_pr.scene3d = Some(reader.read_raw(child)?),
                "extLst" => body_pr.ext_lst = Some(reader.read(child)?),
                name if TextAutofit::is_choice(name) => {
                    body_pr.autofit = Some(TextAutofit::read_choice(reader, child)?)
                },
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(body_pr)
    }
}

impl XmlWrite for TextBodyProperties {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("rot", self.rot.as_ref())
            .opt_attr("spcFirstLastPara", self.spc_first_last_para.as_ref())
            .opt_attr("vertOverflow", self.vert_overflow.as_ref())
            .opt_attr("horzOverflow", self.horz_overflow.as_ref())
            .opt_attr("vert", self.vert.as_ref())
            .opt_attr("wrap", self.wrap.as_ref())
            .opt_attr("lIns", self.l_ins.as_ref())
            .opt_attr("tIns", self.t_ins.as_ref())
            .opt_attr("rIns", self.r_ins.as_ref())
            .opt_attr("bIns", self.b_ins.as_ref())
            .opt_attr("numCol", self.num_col.as_ref())
            .opt_attr("spcCol", self.spc_col.as_ref())
            .opt_attr("rtlCol", self.rtl_col.as_ref())
            .opt_attr("fromWordArt", self.from_word_art.as_ref())
            .opt_attr("anchor", self.anchor.as_ref())
            .opt_attr("anchorCtr", self.anchor_ctr.as_ref())
            .opt_attr("forceAA", self.force_aa.as_ref())
            .opt_attr("upright", self.upright.as_ref())
            .opt_attr("compatLnSpc", self.compat_ln_spc.as_ref());
        if self.prst_tx_warp.is_none()
            && self.autofit.is_none()
            && self.scene3d.is_none()
            && self.ext_lst.is_none()
        {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:prstTxWarp", &self.prst_tx_warp)?;
        writer.opt_choice(&self.autofit)?;
        writer.opt_child("a:scene3d", &self.scene3d)?;
        writer.opt_child("a:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for TextBodyProperties {
    const TYPE_NAME: &'static str = "CT_TextBodyProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_value(path, "@numCol", &self.num_col)?;
        validate_opt_choice(path, &self.autofit)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_RegularTextRun`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegularTextRun {
    pub r_pr: Option<Box<TextCharacterProperties>>,
    pub t: String,
}

impl RegularTextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            r_pr: None,
            t: text.into(),
        }
    }
}

impl XmlRead for RegularTextRun {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut run = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "rPr" => run.r_pr = Some(reader.read(child)?),
                "t" => run.t = reader.read_text(child)?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(run)
    }
}

impl XmlWrite for RegularTextRun {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.opt_child("a:rPr", &self.r_pr)?;
        writer.value_element("a:t", &self.t)?;
        writer.end(name)
    }
}

impl Validate for RegularTextRun {
    const TYPE_NAME: &'static str = "CT_RegularTextRun";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "rPr", &self.r_pr)
    }
}

/// `CT_TextLineBreak`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLineBreak {
    pub r_pr: Option<Box<TextCharacterProperties>>,
}

impl XmlRead for TextLineBreak {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut br = Self::default();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "rPr" {
                return Ok(false);
            }
            br.r_pr = Some(reader.read(child)?);
            Ok(true)
        })?;
        Ok(br)
    }
}

impl XmlWrite for TextLineBreak {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        match &self.r_pr {
            None => writer.element(name).empty(),
            Some(r_pr) => {
                writer.element(name).open()?;
                writer.child("a:rPr", r_pr)?;
                writer.end(name)
            },
        }
    }
}

impl Validate for TextLineBreak {
    const TYPE_NAME: &'static str = "CT_TextLineBreak";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "rPr", &self.r_pr)
    }
}

/// `CT_TextField`: a run whose text is computed (slide number, date, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    /// GUID of the field
    pub id: String,
    /// Field type such as `slidenum` or `datetime1`
    pub kind: Option<String>,
    pub r_pr: Option<Box<TextCharacterProperties>>,
    pub p_pr: Option<Box<TextParagraphProperties>>,
    pub t: Option<String>,
}

impl XmlRead for TextField {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut fld = Self {
            id: element.required_attr("id")?,
            kind: element.parse_attr("type")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "rPr" => fld.r_pr = Some(reader.read(child)?),
                "pPr" => fld.p_pr = Some(reader.read(child)?),
                "t" => fld.t = Some(reader.read_text(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(fld)
    }
}

impl XmlWrite for TextField {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .attr("id", &self.id)
            .opt_attr("type", self.kind.as_ref());
        if self.r_pr.is_none() && self.p_pr.is_none() && self.t.is_none() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:rPr", &self.r_pr)?;
        writer.opt_child("a:pPr", &self.p_pr)?;
        writer.opt_value_element("a:t", &self.t)?;
        writer.end(name)
    }
}

impl Validate for TextField {
    const TYPE_NAME: &'static str = "CT_TextField";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        if !is_guid(&self.id) {
            return Err(OoxmlError::validation(
                child_path(path, "@id"),
                format!("'{}' is not a GUID", self.id),
            ));
        }
        validate_opt(path, "rPr", &self.r_pr)?;
        validate_opt(path, "pPr", &self.p_pr)
    }
}

/// `EG_TextRun`
#[derive(Debug, Clone, PartialEq)]
pub enum TextRun {
    /// `a:r`
    Run(RegularTextRun),
    /// `a:br`
    Break(TextLineBreak),
    /// `a:fld`
    Field(TextField),
}

impl TextRun {
    /// Text contributed by this run; a line break is `\n`.
    pub fn text(&self) -> &str {
        match self {
            Self::Run(run) => &run.t,
            Self::Break(_) => "\n",
            Self::Field(fld) => fld.t.as_deref().unwrap_or(""),
        }
    }
}

impl XmlChoice for TextRun {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "r" | "br" | "fld")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "r" => Ok(Self::Run(reader.read(element)?)),
            "br" => Ok(Self::Break(reader.read(element)?)),
            "fld" => Ok(Self::Field(reader.read(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "a text run".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Run(run) => writer.child("a:r", run),
            Self::Break(br) => writer.child("a:br", br),
            Self::Field(fld) => writer.child("a:fld", fld),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Run(_) => "r",
            Self::Break(_) => "br",
            Self::Field(_) => "fld",
        }
    }
}

impl Validate for TextRun {
    const TYPE_NAME: &'static str = "EG_TextRun";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Run(run) => run.validate_with_path(path),
            Self::Break(br) => br.validate_with_path(path),
            Self::Field(fld) => fld.validate_with_path(path),
        }
    }
}

/// `CT_TextParagraph`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextParagraph {
    pub p_pr: Option<Box<TextParagraphProperties>>,
    pub runs: Vec<TextRun>,
    pub end_para_r_pr: Option<Box<TextCharacterProperties>>,
}

impl TextParagraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph holding one plain run.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::Run(RegularTextRun::new(text))],
            ..Self::default()
        }
    }

    /// Concatenated text of the paragraph.
    pub fn text(&self) -> String {
        self.runs.iter().map(TextRun::text).collect()
    }
}

impl XmlRead for TextParagraph {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut p = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "pPr" => p.p_pr = Some(reader.read(child)?),
                "endParaRPr" => p.end_para_r_pr = Some(reader.read(child)?),
                name if TextRun::is_choice(name) => p.runs.push(TextRun::read_choice(reader, child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(p)
    }
}

impl XmlWrite for TextParagraph {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.p_pr.is_none() && self.runs.is_empty() && self.end_para_r_pr.is_none() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("a:pPr", &self.p_pr)?;
        writer.choices(&self.runs)?;
        writer.opt_child("a:endParaRPr", &self.end_para_r_pr)?;
        writer.end(name)
    }
}

impl Validate for TextParagraph {
    const TYPE_NAME: &'static str = "CT_TextParagraph";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "pPr", &self.p_pr)?;
        validate_choices(path, &self.runs)?;
        validate_opt(path, "endParaRPr", &self.end_para_r_pr)
    }
}

/// `CT_TextBody`: body properties, list styles and at least one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBody {
    pub body_pr: TextBodyProperties,
    pub lst_style: Option<Box<TextListStyle>>,
    pub p: Vec<TextParagraph>,
}

impl Default for TextBody {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBody {
    /// An empty body: default body properties and one empty paragraph.
    pub fn new() -> Self {
        Self {
            body_pr: TextBodyProperties::new(),
            lst_style: None,
            p: vec![TextParagraph::new()],
        }
    }

    /// A body with one paragraph per line of `text`.
    pub fn from_text(text: &str) -> Self {
        let p = text.split('\n').map(TextParagraph::from_text).collect();
        Self {
            body_pr: TextBodyProperties::new(),
            lst_style: None,
            p,
        }
    }

    /// Text of all paragraphs, separated by newlines.
    pub fn text(&self) -> String {
        self.p
            .iter()
            .map(TextParagraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl XmlRead for TextBody {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut body = Self {
            body_pr: TextBodyProperties::new(),
            lst_style: None,
            p: Vec::new(),
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "bodyPr" => body.body_pr = reader.read(child)?,
                "lstStyle" => body.lst_style = Some(reader.read(child)?),
                "p" => body.p.push(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(body)
    }
}

impl XmlWrite for TextBody {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("a:bodyPr", &self.body_pr)?;
        writer.opt_child("a:lstStyle", &self.lst_style)?;
        writer.children("a:p", &self.p)?;
        writer.end(name)
    }
}

impl Validate for TextBody {
    const TYPE_NAME: &'static str = "CT_TextBody";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.body_pr.validate_with_path(&child_path(path, "bodyPr"))?;
        validate_opt(path, "lstStyle", &self.lst_style)?;
        check_occurs(path, "p", self.p.len(), 1, None)?;
        validate_all(path, "p", &self.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::color::Color;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_chart_rich_text() {
        let xml = r#"<c:rich><a:bodyPr rot="-5400000" vert="horz"/><a:lstStyle/><a:p><a:pPr><a:defRPr sz="1400" b="1"><a:solidFill><a:srgbClr val="595959"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:pPr><a:r><a:rPr lang="en-US"/><a:t>Revenue (USD)</a:t></a:r></a:p></c:rich>"#;
        let body: TextBody = from_fragment(xml).unwrap();
        assert_eq!(body.body_pr.rot, Some(Angle(-5_400_000)));
        assert_eq!(body.text(), "Revenue (USD)");
        let def_r_pr = body.p[0].p_pr.as_ref().unwrap().def_r_pr.as_ref().unwrap();
        assert_eq!(def_r_pr.sz, Some(TextFontSize(1400)));
        assert_eq!(def_r_pr.fill, Some(Fill::solid(Color::rgb("595959"))));
        assert!(body.validate().is_ok());
        assert_eq!(to_fragment(&body, "c:rich").unwrap(), xml);
    }

    #[test]
    fn test_text_preserves_whitespace_and_entities() {
        let xml = "<a:p><a:r><a:t>  a &amp; b </a:t></a:r><a:br/><a:r><a:t>&lt;c&gt;</a:t></a:r></a:p>";
        let p: TextParagraph = from_fragment(xml).unwrap();
        assert_eq!(p.text(), "  a & b \n<c>");
        assert_eq!(to_fragment(&p, "a:p").unwrap(), xml);
    }

    #[test]
    fn test_body_requires_a_paragraph() {
        let mut body = TextBody::from_text("Title");
        assert!(body.validate().is_ok());
        body.p.clear();
        let err = body.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_TextBody/p: must occur at least 1 time(s) (have 0)");
    }

    #[test]
    fn test_text_percentage_forms() {
        assert_eq!(TextPercentage::parse_xml("62500").unwrap(), TextPercentage(62_500));
        assert_eq!(TextPercentage::parse_xml("62.5%").unwrap(), TextPercentage(62_500));
        assert_eq!(TextPercentage(90_000).to_xml_string(), "90000");
        assert!(TextPercentage::parse_xml("abc%").is_err());
    }

    #[test]
    fn test_non_finite_percent_is_rejected() {
        for text in ["NaN%", "INF%", "-INF%", "1e300%"] {
            let err = TextPercentage::parse_xml(text).unwrap_err();
            assert!(matches!(err, OoxmlError::InvalidValue { .. }), "{}", text);
            assert!(TextFontScale::parse_xml(text).is_err());
        }
    }

    #[test]
    fn test_font_scale_and_spacing_ranges() {
        let autofit = |font_scale, ln_spc_reduction| TextAutofit::Normal {
            font_scale: Some(TextFontScale(font_scale)),
            ln_spc_reduction: Some(TextPercentage(ln_spc_reduction)),
        };
        assert!(autofit(62_500, 20_000).validate().is_ok());
        assert!(autofit(1000, 13_200_000).validate().is_ok());

        let err = autofit(500, 0).validate().unwrap_err();
        assert!(err.to_string().starts_with("EG_TextAutofit/@fontScale:"));
        let err = autofit(150_000, 0).validate().unwrap_err();
        assert!(err.to_string().starts_with("EG_TextAutofit/@fontScale:"));
        assert!(autofit(100_000, 13_200_001).validate().is_err());

        let spacing = TextSpacing::Percent(TextPercentage(150_000));
        assert!(spacing.validate().is_ok());
        assert_eq!(TextFontScale::parse_xml("92.5%").unwrap(), TextFontScale(92_500));
    }

    #[test]
    fn test_autofit_and_spacing() {
        let xml = r#"<p:txBody><a:bodyPr><a:normAutofit fontScale="92500" lnSpcReduction="10000"/></a:bodyPr><a:p><a:pPr lvl="1"><a:lnSpc><a:spcPct val="90000"/></a:lnSpc><a:spcBef><a:spcPts val="1000"/></a:spcBef><a:buChar char="•"/></a:pPr><a:endParaRPr lang="en-US" dirty="0"/></a:p></p:txBody>"#;
        let body: TextBody = from_fragment(xml).unwrap();
        assert_eq!(
            body.body_pr.autofit,
            Some(TextAutofit::Normal {
                font_scale: Some(TextFontScale(92_500)),
                ln_spc_reduction: Some(TextPercentage(10_000)),
            })
        );
        let p_pr = body.p[0].p_pr.as_ref().unwrap();
        assert_eq!(p_pr.ln_spc, Some(TextSpacing::Percent(TextPercentage(90_000))));
        assert_eq!(p_pr.spc_bef, Some(TextSpacing::Points(1000)));
        assert_eq!(p_pr.bullet, Some(Bullet::Char("•".to_string())));
        assert_eq!(to_fragment(&body, "p:txBody").unwrap(), xml);
    }

    #[test]
    fn test_field_needs_guid() {
        let fld = TextField {
            id: "not-a-guid".to_string(),
            kind: Some("slidenum".to_string()),
            ..TextField::default()
        };
        let run = TextRun::Field(fld);
        let err = run.validate().unwrap_err();
        assert_eq!(err.to_string(), "EG_TextRun/@id: 'not-a-guid' is not a GUID");
    }

    #[test]
    fn test_list_style_levels() {
        let xml = r#"<a:lstStyle><a:lvl1pPr marL="0" algn="ctr"/><a:lvl3pPr indent="-228600"/></a:lstStyle>"#;
        let style: TextListStyle = from_fragment(xml).unwrap();
        assert_eq!(style.levels[0].as_ref().unwrap().algn, Some(TextAlign::Center));
        assert!(style.levels[1].is_none());
        assert_eq!(style.levels[2].as_ref().unwrap().indent, Some(Coordinate32(-228_600)));
        assert_eq!(to_fragment(&style, "a:lstStyle").unwrap(), xml);
    }
}
