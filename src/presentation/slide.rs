//! Slides and slide layouts.

use crate::drawing::color::ColorMappingOverride;
use crate::drawing::ext::ExtensionList;
use crate::drawing::fill::Fill;
use crate::drawing::shape::BlackWhiteMode;
use crate::drawing::style::StyleMatrixReference;
use crate::error::{OoxmlError, Result};
use crate::presentation::shapes::{CustomerDataList, GroupShape, Shape, ShapeTreeItem};
use crate::presentation::types::{
    CornerDirection, Direction, EightDirection, InOutDirection, PlaceholderType, SideDirection,
    SlideLayoutType, TransitionSpeed,
};
use crate::xml::namespace::{DRAWINGML, PRESENTATIONML, RELATIONSHIPS};
use crate::xml::raw::read_alternate_content;
use crate::xml::{
    ElementStart, RawElement, Validate, XmlChoice, XmlRead, XmlReader, XmlRoot, XmlWrite,
    XmlWriter, child_path, validate_opt, validate_opt_choice,
};
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// `CT_BackgroundProperties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackgroundProperties {
    pub shade_to_title: Option<bool>,
    /// Required; `None` only while building.
    pub fill: Option<Fill>,
    /// `a:effectLst` or `a:effectDag`, kept verbatim
    pub effects: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl BackgroundProperties {
    pub fn new(fill: Fill) -> Self {
        Self {
            fill: Some(fill),
            ..Self::default()
        }
    }
}

impl XmlRead for BackgroundProperties {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut bg_pr = Self {
            shade_to_title: element.parse_attr("shadeToTitle")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                name if Fill::is_choice(name) => bg_pr.fill = Some(Fill::read_choice(reader, child)?),
                "effectLst" | "effectDag" => bg_pr.effects = Some(reader.read_raw(child)?),
                "extLst" => bg_pr.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(bg_pr)
    }
}

impl XmlWrite for BackgroundProperties {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .opt_attr("shadeToTitle", self.shade_to_title.as_ref())
            .open()?;
        writer.opt_choice(&self.fill)?;
        if let Some(effects) = &self.effects {
            writer.child(&effects.name, effects)?;
        }
        writer.opt_child("p:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for BackgroundProperties {
    const TYPE_NAME: &'static str = "CT_BackgroundProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        if self.fill.is_none() {
            return Err(OoxmlError::validation(path, "a fill is required"));
        }
        validate_opt_choice(path, &self.fill)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// The two ways a background is given.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundStyle {
    /// `p:bgPr`: explicit fill
    Properties(BackgroundProperties),
    /// `p:bgRef`: background fill style of the theme
    Reference(StyleMatrixReference),
}

impl XmlChoice for BackgroundStyle {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "bgPr" | "bgRef")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "bgPr" => Ok(Self::Properties(reader.read(element)?)),
            "bgRef" => Ok(Self::Reference(reader.read(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "p:bgPr or p:bgRef".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Properties(bg_pr) => writer.child("p:bgPr", bg_pr),
            Self::Reference(bg_ref) => writer.child("p:bgRef", bg_ref),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Properties(_) => "bgPr",
            Self::Reference(_) => "bgRef",
        }
    }
}

impl Validate for BackgroundStyle {
    const TYPE_NAME: &'static str = "EG_Background";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Properties(bg_pr) => bg_pr.validate_with_path(path),
            Self::Reference(bg_ref) => bg_ref.validate_with_path(path),
        }
    }
}

/// `CT_Background` (`p:bg`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Background {
    pub bw_mode: Option<BlackWhiteMode>,
    /// Required; `None` only while building.
    pub style: Option<BackgroundStyle>,
}

impl Background {
    pub fn fill(fill: Fill) -> Self {
        Self {
            bw_mode: None,
            style: Some(BackgroundStyle::Properties(BackgroundProperties::new(fill))),
        }
    }

    pub fn theme(bg_ref: StyleMatrixReference) -> Self {
        Self {
            bw_mode: None,
            style: Some(BackgroundStyle::Reference(bg_ref)),
        }
    }
}

impl XmlRead for Background {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut bg = Self {
            bw_mode: element.parse_attr("bwMode")?,
            style: None,
        };
        reader.read_children(element, |reader, child| {
            if !BackgroundStyle::is_choice(child.local_name()) {
                return Ok(false);
            }
            bg.style = Some(BackgroundStyle::read_choice(reader, child)?);
            Ok(true)
        })?;
        Ok(bg)
    }
}

impl XmlWrite for Background {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer.element(name).opt_attr("bwMode", self.bw_mode.as_ref());
        match &self.style {
            None => tag.empty(),
            Some(style) => {
                tag.open()?;
                writer.choice(style)?;
                writer.end(name)
            },
        }
    }
}

impl Validate for Background {
    const TYPE_NAME: &'static str = "CT_Background";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        if self.style.is_none() {
            return Err(OoxmlError::validation(path, "p:bgPr or p:bgRef is required"));
        }
        validate_opt_choice(path, &self.style)
    }
}

/// `CT_CommonSlideData` (`p:cSld`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonSlideData {
    pub name: Option<String>,
    pub bg: Option<Background>,
    pub sp_tree: GroupShape,
    pub cust_data_lst: Option<CustomerDataList>,
    /// `p:controls` (embedded ActiveX controls), kept verbatim
    pub controls: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl CommonSlideData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every shape on the slide in document order, skipping shapes
    /// without text.
    pub fn texts(&self) -> Vec<String> {
        self.sp_tree
            .shapes()
            .into_iter()
            .filter_map(Shape::text)
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl XmlRead for CommonSlideData {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut c_sld = Self {
            name: element.parse_attr("name")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "bg" => c_sld.bg = Some(reader.read(child)?),
                "spTree" => c_sld.sp_tree = reader.read(child)?,
                "custDataLst" => c_sld.cust_data_lst = Some(reader.read(child)?),
                "controls" => c_sld.controls = Some(reader.read_raw(child)?),
                "extLst" => c_sld.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(c_sld)
    }
}

impl XmlWrite for CommonSlideData {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .opt_attr("name", self.name.as_ref())
            .open()?;
        writer.opt_child("p:bg", &self.bg)?;
        writer.child("p:spTree", &self.sp_tree)?;
        writer.opt_child("p:custDataLst", &self.cust_data_lst)?;
        writer.opt_child("p:controls", &self.controls)?;
        writer.opt_child("p:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for CommonSlideData {
    const TYPE_NAME: &'static str = "CT_CommonSlideData";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "bg", &self.bg)?;
        let tree_path = child_path(path, "spTree");
        self.sp_tree.validate_with_path(&tree_path)?;
        self.sp_tree
            .check_unique_ids(&tree_path, &mut HashSet::new())?;
        validate_opt(path, "custDataLst", &self.cust_data_lst)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_HeaderFooter` (`p:hf`): which header and footer placeholders a layout
/// shows. Every flag defaults to on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderFooter {
    pub sld_num: Option<bool>,
    pub hdr: Option<bool>,
    pub ftr: Option<bool>,
    pub dt: Option<bool>,
    pub ext_lst: Option<ExtensionList>,
}

impl HeaderFooter {
    pub fn shows_slide_number(&self) -> bool {
        self.sld_num.unwrap_or(true)
    }

    pub fn shows_header(&self) -> bool {
        self.hdr.unwrap_or(true)
    }

    pub fn shows_footer(&self) -> bool {
        self.ftr.unwrap_or(true)
    }

    pub fn shows_date(&self) -> bool {
        self.dt.unwrap_or(true)
    }
}

impl XmlRead for HeaderFooter {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut hf = Self {
            sld_num: element.parse_attr("sldNum")?,
            hdr: element.parse_attr("hdr")?,
            ftr: element.parse_attr("ftr")?,
            dt: element.parse_attr("dt")?,
            ext_lst: None,
        };
        reader.read_children(element, |reader, child| {
            if child.local_name() != "extLst" {
                return Ok(false);
            }
            hf.ext_lst = Some(reader.read(child)?);
            Ok(true)
        })?;
        Ok(hf)
    }
}

impl XmlWrite for HeaderFooter {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("sldNum", self.sld_num.as_ref())
            .opt_attr("hdr", self.hdr.as_ref())
            .opt_attr("ftr", self.ftr.as_ref())
            .opt_attr("dt", self.dt.as_ref());
        match &self.ext_lst {
            None => tag.empty(),
            Some(ext_lst) => {
                tag.open()?;
                writer.child("p:extLst", ext_lst)?;
                writer.end(name)
            },
        }
    }
}

impl Validate for HeaderFooter {
    const TYPE_NAME: &'static str = "CT_HeaderFooter";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// The transition effect played when a slide appears.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionEffect {
    /// `p:fade`
    Fade { thru_blk: Option<bool> },
    /// `p:cut`
    Cut { thru_blk: Option<bool> },
    /// `p:push`
    Push { dir: Option<SideDirection> },
    /// `p:wipe`
    Wipe { dir: Option<SideDirection> },
    /// `p:cover`
    Cover { dir: Option<EightDirection> },
    /// `p:pull`
    Pull { dir: Option<EightDirection> },
    /// `p:zoom`
    Zoom { dir: Option<InOutDirection> },
    /// `p:split`
    Split {
        orient: Option<Direction>,
        dir: Option<InOutDirection>,
    },
    /// `p:blinds`
    Blinds { dir: Option<Direction> },
    /// `p:checker`
    Checker { dir: Option<Direction> },
    /// `p:comb`
    Comb { dir: Option<Direction> },
    /// `p:randomBar`
    RandomBar { dir: Option<Direction> },
    /// `p:strips`
    Strips { dir: Option<CornerDirection> },
    /// `p:wheel`
    Wheel { spokes: Option<u32> },
    Random,
    Dissolve,
    Circle,
    Diamond,
    Plus,
    Wedge,
    Newsflash,
}

impl TransitionEffect {
    pub fn fade() -> Self {
        Self::Fade { thru_blk: None }
    }
}

impl XmlChoice for TransitionEffect {
    fn is_choice(local_name: &str) -> bool {
        matches!(
            local_name,
            "fade"
                | "cut"
                | "push"
                | "wipe"
                | "cover"
                | "pull"
                | "zoom"
                | "split"
                | "blinds"
                | "checker"
                | "comb"
                | "randomBar"
                | "strips"
                | "wheel"
                | "random"
                | "dissolve"
                | "circle"
                | "diamond"
                | "plus"
                | "wedge"
                | "newsflash"
        )
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let effect = match element.local_name() {
            "fade" => Self::Fade {
                thru_blk: element.parse_attr("thruBlk")?,
            },
            "cut" => Self::Cut {
                thru_blk: element.parse_attr("thruBlk")?,
            },
            "push" => Self::Push {
                dir: element.parse_attr("dir")?,
            },
            "wipe" => Self::Wipe {
                dir: element.parse_attr("dir")?,
            },
            "cover" => Self::Cover {
                dir: element.parse_attr("dir")?,
            },
            "pull" => Self::Pull {
                dir: element.parse_attr("dir")?,
            },
            "zoom" => Self::Zoom {
                dir: element.parse_attr("dir")?,
            },
            "split" => Self::Split {
                orient: element.parse_attr("orient")?,
                dir: element.parse_attr("dir")?,
            },
            "blinds" => Self::Blinds {
                dir: element.parse_attr("dir")?,
            },
            "checker" => Self::Checker {
                dir: element.parse_attr("dir")?,
            },
            "comb" => Self::Comb {
                dir: element.parse_attr("dir")?,
            },
            "randomBar" => Self::RandomBar {
                dir: element.parse_attr("dir")?,
            },
            "strips" => Self::Strips {
                dir: element.parse_attr("dir")?,
            },
            "wheel" => Self::Wheel {
                spokes: element.parse_attr("spokes")?,
            },
            "random" => Self::Random,
            "dissolve" => Self::Dissolve,
            "circle" => Self::Circle,
            "diamond" => Self::Diamond,
            "plus" => Self::Plus,
            "wedge" => Self::Wedge,
            "newsflash" => Self::Newsflash,
            _ => {
                return Err(OoxmlError::UnexpectedElement {
                    expected: "a transition effect".to_string(),
                    found: element.name().to_string(),
                });
            },
        };
        reader.read_empty(element)?;
        Ok(effect)
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        let name = format!("p:{}", self.choice_name());
        let tag = writer.element(&name);
        let tag = match self {
            Self::Fade { thru_blk } | Self::Cut { thru_blk } => {
                tag.opt_attr("thruBlk", thru_blk.as_ref())
            },
            Self::Push { dir } | Self::Wipe { dir } => tag.opt_attr("dir", dir.as_ref()),
            Self::Cover { dir } | Self::Pull { dir } => tag.opt_attr("dir", dir.as_ref()),
            Self::Zoom { dir } => tag.opt_attr("dir", dir.as_ref()),
            Self::Split { orient, dir } => tag
                .opt_attr("orient", orient.as_ref())
                .opt_attr("dir", dir.as_ref()),
            Self::Blinds { dir }
            | Self::Checker { dir }
            | Self::Comb { dir }
            | Self::RandomBar { dir } => tag.opt_attr("dir", dir.as_ref()),
            Self::Strips { dir } => tag.opt_attr("dir", dir.as_ref()),
            Self::Wheel { spokes } => tag.opt_attr("spokes", spokes.as_ref()),
            _ => tag,
        };
        tag.empty()
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Fade { .. } => "fade",
            Self::Cut { .. } => "cut",
            Self::Push { .. } => "push",
            Self::Wipe { .. } => "wipe",
            Self::Cover { .. } => "cover",
            Self::Pull { .. } => "pull",
            Self::Zoom { .. } => "zoom",
            Self::Split { .. } => "split",
            Self::Blinds { .. } => "blinds",
            Self::Checker { .. } => "checker",
            Self::Comb { .. } => "comb",
            Self::RandomBar { .. } => "randomBar",
            Self::Strips { .. } => "strips",
            Self::Wheel { .. } => "wheel",
            Self::Random => "random",
            Self::Dissolve => "dissolve",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Plus => "plus",
            Self::Wedge => "wedge",
            Self::Newsflash => "newsflash",
        }
    }
}

impl Validate for TransitionEffect {
    const TYPE_NAME: &'static str = "EG_TransitionEffect";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `CT_SlideTransition` (`p:transition`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideTransition {
    pub spd: Option<TransitionSpeed>,
    pub adv_click: Option<bool>,
    /// Auto-advance time in milliseconds
    pub adv_tm: Option<u32>,
    pub effect: Option<TransitionEffect>,
    /// `p:sndAc` (transition sound), kept verbatim
    pub snd_ac: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl SlideTransition {
    pub fn new(effect: TransitionEffect) -> Self {
        Self {
            effect: Some(effect),
            ..Self::default()
        }
    }

    pub fn with_speed(mut self, spd: TransitionSpeed) -> Self {
        self.spd = Some(spd);
        self
    }

    /// Advance automatically after `ms` milliseconds.
    pub fn with_advance_after(mut self, ms: u32) -> Self {
        self.adv_tm = Some(ms);
        self
    }

    pub fn speed(&self) -> TransitionSpeed {
        self.spd.unwrap_or_default()
    }

    /// Whether a mouse click advances the slide (on unless disabled).
    pub fn advances_on_click(&self) -> bool {
        self.adv_click.unwrap_or(true)
    }
}

impl XmlRead for SlideTransition {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut transition = Self {
            spd: element.parse_attr("spd")?,
            adv_click: element.parse_attr("advClick")?,
            adv_tm: element.parse_attr("advTm")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                name if TransitionEffect::is_choice(name) => {
                    transition.effect = Some(TransitionEffect::read_choice(reader, child)?)
                },
                "sndAc" => transition.snd_ac = Some(reader.read_raw(child)?),
                "extLst" => transition.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(transition)
    }
}

impl XmlWrite for SlideTransition {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("spd", self.spd.as_ref())
            .opt_attr("advClick", self.adv_click.as_ref())
            .opt_attr("advTm", self.adv_tm.as_ref());
        if self.effect.is_none() && self.snd_ac.is_none() && self.ext_lst.is_none() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_choice(&self.effect)?;
        writer.opt_child("p:sndAc", &self.snd_ac)?;
        writer.opt_child("p:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for SlideTransition {
    const TYPE_NAME: &'static str = "CT_SlideTransition";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_choice(path, &self.effect)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// A slide part (`p:sld`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub show_master_sp: Option<bool>,
    pub show_master_ph_anim: Option<bool>,
    pub show: Option<bool>,
    pub c_sld: CommonSlideData,
    pub clr_map_ovr: Option<ColorMappingOverride>,
    /// `mc:AlternateContent` (usually a transition with a 2010 fallback),
    /// kept verbatim
    pub alternate_content: Option<RawElement>,
    pub transition: Option<SlideTransition>,
    /// `p:timing` (animations), kept verbatim
    pub timing: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl Slide {
    /// An empty slide following its layout's colour mapping.
    pub fn new() -> Self {
        Self {
            clr_map_ovr: Some(ColorMappingOverride::Master),
            ..Self::default()
        }
    }

    /// Append a shape tree member.
    pub fn push(&mut self, item: ShapeTreeItem) {
        self.c_sld.sp_tree.items.push(item);
    }

    /// Next unused drawing id on this slide.
    pub fn next_id(&self) -> u32 {
        self.c_sld.sp_tree.max_id() + 1
    }

    /// Text of the title placeholder, if the slide has one.
    pub fn title(&self) -> Option<String> {
        self.c_sld
            .sp_tree
            .shapes()
            .into_iter()
            .find(|sp| sp.placeholder_info().is_some_and(|ph| ph.kind().is_title()))
            .and_then(Shape::text)
    }

    pub fn placeholder(&self, ph_type: PlaceholderType) -> Option<&Shape> {
        self.c_sld.sp_tree.placeholder(ph_type)
    }

    pub fn texts(&self) -> Vec<String> {
        self.c_sld.texts()
    }

    /// Hidden slides are skipped in slide shows.
    pub fn is_hidden(&self) -> bool {
        self.show == Some(false)
    }
}

impl XmlRead for Slide {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut slide = Self {
            show_master_sp: element.parse_attr("showMasterSp")?,
            show_master_ph_anim: element.parse_attr("showMasterPhAnim")?,
            show: element.parse_attr("show")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "cSld" => slide.c_sld = reader.read(child)?,
                "clrMapOvr" => slide.clr_map_ovr = Some(reader.read(child)?),
                "AlternateContent" => slide.alternate_content = Some(read_alternate_content(reader, child)?),
                "transition" => slide.transition = Some(reader.read(child)?),
                "timing" => slide.timing = Some(reader.read_raw(child)?),
                "extLst" => slide.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(slide)
    }
}

impl XmlWrite for Slide {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .opt_attr("showMasterSp", self.show_master_sp.as_ref())
            .opt_attr("showMasterPhAnim", self.show_master_ph_anim.as_ref())
            .opt_attr("show", self.show.as_ref())
            .open()?;
        writer.child("p:cSld", &self.c_sld)?;
        writer.opt_child("p:clrMapOvr", &self.clr_map_ovr)?;
        writer.opt_child("mc:AlternateContent", &self.alternate_content)?;
        writer.opt_child("p:transition", &self.transition)?;
        writer.opt_child("p:timing", &self.timing)?;
        writer.opt_child("p:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Slide {
    const TYPE_NAME: &'static str = "CT_Slide";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.c_sld.validate_with_path(&child_path(path, "cSld"))?;
        validate_opt(path, "clrMapOvr", &self.clr_map_ovr)?;
        validate_opt(path, "transition", &self.transition)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

impl XmlRoot for Slide {
    const ROOT: &'static str = "p:sld";
    const NAMESPACES: &'static [(&'static str, &'static str)] =
        &[("a", DRAWINGML), ("r", RELATIONSHIPS), ("p", PRESENTATIONML)];
}

/// A slide layout part (`p:sldLayout`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideLayout {
    pub show_master_sp: Option<bool>,
    pub show_master_ph_anim: Option<bool>,
    pub matching_name: Option<String>,
    pub layout_type: Option<SlideLayoutType>,
    pub preserve: Option<bool>,
    pub user_drawn: Option<bool>,
    pub c_sld: CommonSlideData,
    pub clr_map_ovr: Option<ColorMappingOverride>,
    pub alternate_content: Option<RawElement>,
    pub transition: Option<SlideTransition>,
    pub timing: Option<RawElement>,
    pub hf: Option<HeaderFooter>,
    pub ext_lst: Option<ExtensionList>,
}

impl SlideLayout {
    pub fn new(layout_type: SlideLayoutType, name: impl Into<String>) -> Self {
        Self {
            layout_type: Some(layout_type),
            preserve: Some(true),
            c_sld: CommonSlideData {
                name: Some(name.into()),
                ..CommonSlideData::default()
            },
            clr_map_ovr: Some(ColorMappingOverride::Master),
            ..Self::default()
        }
    }

    /// Layout type, falling back to the schema default (`cust`).
    pub fn kind(&self) -> SlideLayoutType {
        self.layout_type.unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        self.c_sld.name.as_deref()
    }

    pub fn placeholder(&self, ph_type: PlaceholderType) -> Option<&Shape> {
        self.c_sld.sp_tree.placeholder(ph_type)
    }
}

impl XmlRead for SlideLayout {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut layout = Self {
            show_master_sp: element.parse_attr("showMasterSp")?,
            show_master_ph_anim: element.parse_attr("showMasterPhAnim")?,
            matching_name: element.parse_attr("matchingName")?,
            layout_type: element.parse_attr("type")?,
            preserve: element.parse_attr("preserve")?,
            user_drawn: element.parse_attr("userDrawn")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "cSld" => layout.c_sld = reader.read(child)?,
                "clrMapOvr" => layout.clr_map_ovr = Some(reader.read(child)?),
                "AlternateContent" => {
                    layout.alternate_content = Some(read_alternate_content(reader, child)?)
                },
                "transition" => layout.transition = Some(reader.read(child)?),
                "timing" => layout.timing = Some(reader.read_raw(child)?),
                "hf" => layout.hf = Some(reader.read(child)?),
                "extLst" => layout.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(layout)
    }
}

impl XmlWrite for SlideLayout {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .opt_attr("showMasterSp", self.show_master_sp.as_ref())
            .opt_attr("showMasterPhAnim", self.show_master_ph_anim.as_ref())
            .opt_attr("matchingName", self.matching_name.as_ref())
            .opt_attr("type", self.layout_type.as_ref())
            .opt_attr("preserve", self.preserve.as_ref())
            .opt_attr("userDrawn", self.user_drawn.as_ref())
            .open()?;
        writer.child("p:cSld", &self.c_sld)?;
        writer.opt_child("p:clrMapOvr", &self.clr_map_ovr)?;
        writer.opt_child("mc:AlternateContent", &self.alternate_content)?;
        writer.opt_child("p:transition", &self.transition)?;
        writer.opt_child("p:timing", &self.timing)?;
        writer.opt_child("p:hf", &self.hf)?;
        writer.opt_child("p:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for SlideLayout {
    const TYPE_NAME: &'static str = "CT_SlideLayout";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.c_sld.validate_with_path(&child_path(path, "cSld"))?;
        validate_opt(path, "clrMapOvr", &self.clr_map_ovr)?;
        validate_opt(path, "transition", &self.transition)?;
        validate_opt(path, "hf", &self.hf)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

impl XmlRoot for SlideLayout {
    const ROOT: &'static str = "p:sldLayout";
    const NAMESPACES: &'static [(&'static str, &'static str)] =
        &[("a", DRAWINGML), ("r", RELATIONSHIPS), ("p", PRESENTATIONML)];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::color::Color;
    use crate::drawing::geometry::Transform2D;
    use crate::presentation::shapes::{GraphicFrame, Placeholder};
    use crate::xml::{
        ReadOptions, WriteOptions, choice_from_fragment, choice_to_fragment, from_fragment,
        from_reader, from_str, to_string, to_string_with, to_writer,
    };
    use std::io::BufReader;

    const SLIDE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>Sales by region</a:t></a:r></a:p></p:txBody></p:sp><p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="4" name="Chart 3"/><p:cNvGraphicFramePr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvGraphicFramePr><p:xfrm><a:off x="838200" y="1825625"/><a:ext cx="10515600" cy="4351338"/></p:xfrm><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="rId2"/></a:graphicData></a:graphic></p:graphicFrame></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr><p:transition spd="slow" advTm="3000"><p:push dir="u"/></p:transition></p:sld>"#;

    #[test]
    fn test_decode_slide() {
        let slide: Slide = from_str(SLIDE).unwrap();
        assert_eq!(slide.title().as_deref(), Some("Sales by region"));
        assert_eq!(slide.texts(), vec!["Sales by region".to_string()]);
        assert_eq!(slide.clr_map_ovr, Some(ColorMappingOverride::Master));
        assert_eq!(slide.next_id(), 5);
        assert!(!slide.is_hidden());

        let frame = match &slide.c_sld.sp_tree.items[1] {
            ShapeTreeItem::GraphicFrame(frame) => frame,
            other => panic!("expected a graphic frame, got {:?}", other),
        };
        assert_eq!(frame.chart_rel_id(), Some("rId2"));

        let transition = slide.transition.as_ref().unwrap();
        assert_eq!(transition.speed(), TransitionSpeed::Slow);
        assert_eq!(transition.adv_tm, Some(3000));
        assert!(transition.advances_on_click());
        assert_eq!(
            transition.effect,
            Some(TransitionEffect::Push {
                dir: Some(SideDirection::Up)
            })
        );
        assert!(slide.validate().is_ok());
    }

    #[test]
    fn test_reencode_is_stable() {
        let slide: Slide = from_str(SLIDE).unwrap();
        let written = to_string(&slide).unwrap();
        let again: Slide = from_str(&written).unwrap();
        assert_eq!(again, slide);
        assert_eq!(to_string(&again).unwrap(), written);
    }

    #[test]
    fn test_new_slide() {
        let slide = Slide::new();
        assert!(slide.validate().is_ok());
        let xml = to_string(&slide).unwrap();
        assert!(xml.contains("<p:spTree>"));
        assert!(xml.contains(r#"<p:cNvPr id="1" name=""/>"#));
        assert!(xml.contains("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"));
        let back: Slide = from_str(&xml).unwrap();
        assert_eq!(back, slide);
    }

    #[test]
    fn test_build_slide() {
        let mut slide = Slide::new();
        let id = slide.next_id();
        slide.push(ShapeTreeItem::Shape(Box::new(Shape::placeholder(
            id,
            "Title 1",
            Placeholder::new(PlaceholderType::Title),
            "Agenda",
        ))));
        let id = slide.next_id();
        slide.push(ShapeTreeItem::GraphicFrame(Box::new(GraphicFrame::chart(
            id,
            "Chart 2",
            "rId2",
            Transform2D::from_rect(838200, 1825625, 10515600, 4351338),
        ))));
        slide.transition = Some(SlideTransition::new(TransitionEffect::fade()).with_advance_after(5000));
        slide.c_sld.bg = Some(Background::fill(Fill::solid(Color::rgb("1F4E79"))));

        assert_eq!(id, 3);
        assert!(slide.validate().is_ok());
        assert_eq!(slide.title().as_deref(), Some("Agenda"));

        let xml = to_string(&slide).unwrap();
        assert!(xml.contains(r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="1F4E79"/></a:solidFill></p:bgPr></p:bg>"#));
        assert!(xml.contains(r#"<p:transition advTm="5000"><p:fade/></p:transition>"#));
        let back: Slide = from_str(&xml).unwrap();
        assert_eq!(back, slide);
    }

    #[test]
    fn test_duplicate_drawing_id() {
        let mut slide = Slide::new();
        slide.push(ShapeTreeItem::Shape(Box::new(Shape::new(2, "A"))));
        slide.push(ShapeTreeItem::Shape(Box::new(Shape::new(2, "B"))));
        let err = slide.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_Slide/cSld/spTree/sp[1]: duplicate drawing id 2");
        assert!(to_string_with(&slide, WriteOptions::new().with_validate(true)).is_err());
    }

    #[test]
    fn test_background_needs_fill() {
        let mut slide = Slide::new();
        slide.c_sld.bg = Some(Background::default());
        let err = slide.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_Slide/cSld/bg: p:bgPr or p:bgRef is required");

        slide.c_sld.bg = Some(Background::theme(StyleMatrixReference::new(1001, None)));
        assert!(slide.validate().is_ok());
    }

    #[test]
    fn test_transition_effects() {
        let split: TransitionEffect = choice_from_fragment(r#"<p:split orient="vert" dir="in"/>"#).unwrap();
        assert_eq!(
            split,
            TransitionEffect::Split {
                orient: Some(Direction::Vert),
                dir: Some(InOutDirection::In)
            }
        );
        assert_eq!(choice_to_fragment(&split).unwrap(), r#"<p:split orient="vert" dir="in"/>"#);

        let cover: TransitionEffect = choice_from_fragment(r#"<p:cover dir="rd"/>"#).unwrap();
        assert_eq!(
            cover,
            TransitionEffect::Cover {
                dir: Some(EightDirection::RightDown)
            }
        );
        assert!(choice_from_fragment::<TransitionEffect>(r#"<p:push dir="rd"/>"#).is_err());
        assert_eq!(
            choice_to_fragment(&TransitionEffect::Dissolve).unwrap(),
            "<p:dissolve/>"
        );
    }

    #[test]
    fn test_slide_layout() {
        let xml = r#"<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="titleOnly" preserve="1"><p:cSld name="Title Only"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master title style</a:t></a:r><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr><p:hf sldNum="0" hdr="0"/></p:sldLayout>"#;
        let layout: SlideLayout = from_str(xml).unwrap();
        assert_eq!(layout.kind(), SlideLayoutType::TitleOnly);
        assert_eq!(layout.name(), Some("Title Only"));
        assert!(layout.placeholder(PlaceholderType::Title).is_some());
        let hf = layout.hf.as_ref().unwrap();
        assert!(!hf.shows_slide_number());
        assert!(!hf.shows_header());
        assert!(hf.shows_footer());
        assert!(hf.shows_date());
        assert!(layout.validate().is_ok());

        let built = SlideLayout::new(SlideLayoutType::Blank, "Blank");
        assert!(built.validate().is_ok());
        let written = to_string(&built).unwrap();
        assert!(written.contains(r#"type="blank" preserve="1""#));
        assert_eq!(from_str::<SlideLayout>(&written).unwrap(), built);
    }

    #[test]
    fn test_alternate_content_is_preserved() {
        let xml = r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr><mc:AlternateContent><mc:Choice xmlns:p14="http://schemas.microsoft.com/office/powerpoint/2010/main" Requires="p14"><p:transition spd="slow" p14:dur="2000"><p14:vortex dir="r"/></p:transition></mc:Choice><mc:Fallback><p:transition spd="slow"><p:fade/></p:transition></mc:Fallback></mc:AlternateContent><p:timing><p:tnLst><p:par><p:cTn id="1" dur="indefinite" restart="never" nodeType="tmRoot"/></p:par></p:tnLst></p:timing></p:sld>"#;
        let slide: Slide = from_str(xml).unwrap();
        assert_eq!(slide.alternate_content.as_ref().unwrap().local_name(), "AlternateContent");
        assert_eq!(slide.timing.as_ref().unwrap().children.len(), 1);
        let written = to_string(&slide).unwrap();
        assert!(written.contains(r#"<mc:AlternateContent xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">"#));
        assert!(written.contains(r#"<p14:vortex dir="r"/>"#));
        assert_eq!(from_str::<Slide>(&written).unwrap(), slide);
    }

    #[test]
    fn test_file_round_trip() {
        let slide: Slide = from_str(SLIDE).unwrap();
        let mut file = tempfile::tempfile().unwrap();
        to_writer(&slide, &mut file, WriteOptions::new()).unwrap();
        use std::io::{Seek, SeekFrom};
        file.seek(SeekFrom::Start(0)).unwrap();
        let back: Slide = from_reader(BufReader::new(file), ReadOptions::new().with_validate(true)).unwrap();
        assert_eq!(back, slide);
    }

    #[test]
    fn test_background_reference() {
        let bg: Background = from_fragment(r#"<p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#).unwrap();
        match bg.style {
            Some(BackgroundStyle::Reference(ref bg_ref)) => {
                assert_eq!(bg_ref.idx, 1001);
                assert!(bg_ref.color.is_some());
            },
            ref other => panic!("expected a theme reference, got {:?}", other),
        }
    }
}
