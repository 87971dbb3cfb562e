//! Chart axes: category, value, date and series axes.
//!
//! The members every axis shares (`EG_AxShared`) live in [`AxisShared`];
//! each concrete axis decodes and encodes them in schema order before its
//! own members.

use crate::chart::data::{Layout, NumFmt, Tx};
use crate::chart::labels::ChartLines;
use crate::chart::title::Title;
use crate::chart::types::{
    AxPos, AxisUnit, BuiltInUnit, CrossBetween, Crosses, LblAlgn, LblOffset, LogBase,
    Orientation, Skip, TickLblPos, TickMark, TimeUnit,
};
use crate::chart::values::{Boolean, Double, OptVal, UnsignedInt, Val};
use crate::drawing::ext::ExtensionList;
use crate::drawing::shape::ShapeProperties;
use crate::drawing::text::TextBody;
use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, Validate, XmlChoice, XmlRead, XmlReader, XmlWrite, XmlWriter, child_path,
    validate_opt, validate_opt_choice,
};
use std::io::{BufRead, Write};

/// `CT_Scaling`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scaling {
    pub log_base: Option<Val<LogBase>>,
    pub orientation: Option<OptVal<Orientation>>,
    pub max: Option<Double>,
    pub min: Option<Double>,
    pub ext_lst: Option<ExtensionList>,
}

impl Scaling {
    /// `<c:scaling><c:orientation val="minMax"/></c:scaling>`
    pub fn new() -> Self {
        Self {
            orientation: Some(OptVal::new(Orientation::MinMax)),
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(Double::new(min));
        self.max = Some(Double::new(max));
        self
    }
}

impl XmlRead for Scaling {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut scaling = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "logBase" => scaling.log_base = Some(reader.read(child)?),
                "orientation" => scaling.orientation = Some(reader.read(child)?),
                "max" => scaling.max = Some(reader.read(child)?),
                "min" => scaling.min = Some(reader.read(child)?),
                "extLst" => scaling.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(scaling)
    }
}

impl XmlWrite for Scaling {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:logBase", &self.log_base)?;
        writer.opt_child("c:orientation", &self.orientation)?;
        writer.opt_child("c:max", &self.max)?;
        writer.opt_child("c:min", &self.min)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Scaling {
    const TYPE_NAME: &'static str = "CT_Scaling";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "logBase", &self.log_base)?;
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min.val > max.val {
                return Err(OoxmlError::validation(
                    child_path(path, "min"),
                    format!("minimum {} exceeds maximum {}", min.val, max.val),
                ));
            }
        }
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// Where the perpendicular axis crosses this one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing {
    /// `c:crosses`
    Crosses(Val<Crosses>),
    /// `c:crossesAt`: a value on this axis.
    CrossesAt(Double),
}

impl XmlChoice for Crossing {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "crosses" | "crossesAt")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "crosses" => Ok(Self::Crosses(reader.read(element)?)),
            "crossesAt" => Ok(Self::CrossesAt(reader.read(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "c:crosses or c:crossesAt".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Crosses(crosses) => writer.child("c:crosses", crosses),
            Self::CrossesAt(at) => writer.child("c:crossesAt", at),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Crosses(_) => "crosses",
            Self::CrossesAt(_) => "crossesAt",
        }
    }
}

impl Validate for Crossing {
    const TYPE_NAME: &'static str = "EG_AxShared/crosses";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `EG_AxShared`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisShared {
    pub ax_id: UnsignedInt,
    pub scaling: Scaling,
    pub delete: Option<Boolean>,
    pub ax_pos: Val<AxPos>,
    pub major_gridlines: Option<ChartLines>,
    pub minor_gridlines: Option<ChartLines>,
    pub title: Option<Box<Title>>,
    pub num_fmt: Option<NumFmt>,
    pub major_tick_mark: Option<OptVal<TickMark>>,
    pub minor_tick_mark: Option<OptVal<TickMark>>,
    pub tick_lbl_pos: Option<OptVal<TickLblPos>>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub tx_pr: Option<Box<TextBody>>,
    /// Id of the axis this one crosses.
    pub cross_ax: UnsignedInt,
    pub crossing: Option<Crossing>,
}

impl AxisShared {
    pub fn new(ax_id: u32, ax_pos: AxPos, cross_ax: u32) -> Self {
        Self {
            ax_id: UnsignedInt::new(ax_id),
            scaling: Scaling::new(),
            delete: Some(Boolean::new(false)),
            ax_pos: Val::new(ax_pos),
            cross_ax: UnsignedInt::new(cross_ax),
            crossing: Some(Crossing::Crosses(Val::new(Crosses::AutoZero))),
            ..Self::default()
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.delete.is_some_and(|delete| delete.is_true())
    }

    fn read_member<R: BufRead>(
        &mut self,
        reader: &mut XmlReader<R>,
        child: &ElementStart,
    ) -> Result<bool> {
        match child.local_name() {
            "axId" => self.ax_id = reader.read(child)?,
            "scaling" => self.scaling = reader.read(child)?,
            "delete" => self.delete = Some(reader.read(child)?),
            "axPos" => self.ax_pos = reader.read(child)?,
            "majorGridlines" => self.major_gridlines = Some(reader.read(child)?),
            "minorGridlines" => self.minor_gridlines = Some(reader.read(child)?),
            "title" => self.title = Some(reader.read(child)?),
            "numFmt" => self.num_fmt = Some(reader.read(child)?),
            "majorTickMark" => self.major_tick_mark = Some(reader.read(child)?),
            "minorTickMark" => self.minor_tick_mark = Some(reader.read(child)?),
            "tickLblPos" => self.tick_lbl_pos = Some(reader.read(child)?),
            "spPr" => self.sp_pr = Some(reader.read(child)?),
            "txPr" => self.tx_pr = Some(reader.read(child)?),
            "crossAx" => self.cross_ax = reader.read(child)?,
            name if Crossing::is_choice(name) => {
                self.crossing = Some(Crossing::read_choice(reader, child)?)
            },
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_members<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.child("c:axId", &self.ax_id)?;
        writer.child("c:scaling", &self.scaling)?;
        writer.opt_child("c:delete", &self.delete)?;
        writer.child("c:axPos", &self.ax_pos)?;
        writer.opt_child("c:majorGridlines", &self.major_gridlines)?;
        writer.opt_child("c:minorGridlines", &self.minor_gridlines)?;
        writer.opt_child("c:title", &self.title)?;
        writer.opt_child("c:numFmt", &self.num_fmt)?;
        writer.opt_child("c:majorTickMark", &self.major_tick_mark)?;
        writer.opt_child("c:minorTickMark", &self.minor_tick_mark)?;
        writer.opt_child("c:tickLblPos", &self.tick_lbl_pos)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:txPr", &self.tx_pr)?;
        writer.child("c:crossAx", &self.cross_ax)?;
        writer.opt_choice(&self.crossing)
    }

    fn validate_members(&self, path: &str) -> Result<()> {
        if self.ax_id.val == self.cross_ax.val {
            return Err(OoxmlError::validation(
                child_path(path, "crossAx"),
                format!("axis {} cannot cross itself", self.ax_id.val),
            ));
        }
        self.scaling.validate_with_path(&child_path(path, "scaling"))?;
        validate_opt(path, "majorGridlines", &self.major_gridlines)?;
        validate_opt(path, "minorGridlines", &self.minor_gridlines)?;
        validate_opt(path, "title", &self.title)?;
        validate_opt(path, "numFmt", &self.num_fmt)?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "txPr", &self.tx_pr)?;
        validate_opt_choice(path, &self.crossing)
    }
}

/// `c:custUnit` / `c:builtInUnit`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayUnit {
    Custom(Double),
    BuiltIn(OptVal<BuiltInUnit>),
}

impl XmlChoice for DisplayUnit {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "custUnit" | "builtInUnit")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "custUnit" => Ok(Self::Custom(reader.read(element)?)),
            "builtInUnit" => Ok(Self::BuiltIn(reader.read(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "c:custUnit or c:builtInUnit".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Custom(unit) => writer.child("c:custUnit", unit),
            Self::BuiltIn(unit) => writer.child("c:builtInUnit", unit),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Custom(_) => "custUnit",
            Self::BuiltIn(_) => "builtInUnit",
        }
    }
}

impl Validate for DisplayUnit {
    const TYPE_NAME: &'static str = "CT_DispUnits/unit";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Custom(unit) if unit.val <= 0.0 => Err(OoxmlError::validation(
                format!("{}/@val", path),
                format!("unit must be positive (have {})", unit.val),
            )),
            _ => Ok(()),
        }
    }
}

/// `CT_DispUnitsLbl`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayUnitsLabel {
    pub layout: Option<Layout>,
    pub tx: Option<Tx>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub tx_pr: Option<Box<TextBody>>,
}

impl XmlRead for DisplayUnitsLabel {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut lbl = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "layout" => lbl.layout = Some(reader.read(child)?),
                "tx" => lbl.tx = Some(reader.read(child)?),
                "spPr" => lbl.sp_pr = Some(reader.read(child)?),
                "txPr" => lbl.tx_pr = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(lbl)
    }
}

impl XmlWrite for DisplayUnitsLabel {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:layout", &self.layout)?;
        writer.opt_child("c:tx", &self.tx)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:txPr", &self.tx_pr)?;
        writer.end(name)
    }
}

impl Validate for DisplayUnitsLabel {
    const TYPE_NAME: &'static str = "CT_DispUnitsLbl";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "layout", &self.layout)?;
        validate_opt(path, "tx", &self.tx)?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "txPr", &self.tx_pr)
    }
}

/// `CT_DispUnits`: value axis labels shown in thousands, millions, ...
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayUnits {
    pub unit: Option<DisplayUnit>,
    pub disp_units_lbl: Option<DisplayUnitsLabel>,
    pub ext_lst: Option<ExtensionList>,
}

impl DisplayUnits {
    pub fn built_in(unit: BuiltInUnit) -> Self {
        Self {
            unit: Some(DisplayUnit::BuiltIn(OptVal::new(unit))),
            ..Self::default()
        }
    }

    /// Divisor applied to the axis values, if it is known.
    pub fn divisor(&self) -> Option<f64> {
        match self.unit? {
            DisplayUnit::Custom(unit) => Some(unit.val),
            DisplayUnit::BuiltIn(unit) => Some(match unit.value() {
                BuiltInUnit::Hundreds => 1e2,
                BuiltInUnit::Thousands => 1e3,
                BuiltInUnit::TenThousands => 1e4,
                BuiltInUnit::HundredThousands => 1e5,
                BuiltInUnit::Millions => 1e6,
                BuiltInUnit::TenMillions => 1e7,
                BuiltInUnit::HundredMillions => 1e8,
                BuiltInUnit::Billions => 1e9,
                BuiltInUnit::Trillions => 1e12,
            }),
        }
    }
}

impl XmlRead for DisplayUnits {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut units = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                name if DisplayUnit::is_choice(name) => {
                    units.unit = Some(DisplayUnit::read_choice(reader, child)?)
                },
                "dispUnitsLbl" => units.disp_units_lbl = Some(reader.read(child)?),
                "extLst" => units.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(units)
    }
}

impl XmlWrite for DisplayUnits {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_choice(&self.unit)?;
        writer.opt_child("c:dispUnitsLbl", &self.disp_units_lbl)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for DisplayUnits {
    const TYPE_NAME: &'static str = "CT_DispUnits";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_choice(path, &self.unit)?;
        validate_opt(path, "dispUnitsLbl", &self.disp_units_lbl)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_CatAx`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryAxis {
    pub shared: AxisShared,
    pub auto: Option<Boolean>,
    pub lbl_algn: Option<Val<LblAlgn>>,
    pub lbl_offset: Option<OptVal<LblOffset>>,
    pub tick_lbl_skip: Option<Val<Skip>>,
    pub tick_mark_skip: Option<Val<Skip>>,
    pub no_multi_lvl_lbl: Option<Boolean>,
    pub ext_lst: Option<ExtensionList>,
}

impl CategoryAxis {
    /// A bottom category axis with Office's default settings.
    pub fn new(ax_id: u32, cross_ax: u32) -> Self {
        Self {
            shared: AxisShared {
                major_tick_mark: Some(OptVal::new(TickMark::None)),
                minor_tick_mark: Some(OptVal::new(TickMark::None)),
                tick_lbl_pos: Some(OptVal::new(TickLblPos::NextTo)),
                ..AxisShared::new(ax_id, AxPos::Bottom, cross_ax)
            },
            auto: Some(Boolean::new(true)),
            lbl_algn: Some(Val::new(LblAlgn::Center)),
            lbl_offset: Some(OptVal::new(LblOffset::Value(100))),
            no_multi_lvl_lbl: Some(Boolean::new(false)),
            ..Self::default()
        }
    }
}

impl XmlRead for CategoryAxis {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut ax = Self::default();
        reader.read_children(element, |reader, child| {
            if ax.shared.read_member(reader, child)? {
                return Ok(true);
            }
            match child.local_name() {
                "auto" => ax.auto = Some(reader.read(child)?),
                "lblAlgn" => ax.lbl_algn = Some(reader.read(child)?),
                "lblOffset" => ax.lbl_offset = Some(reader.read(child)?),
                "tickLblSkip" => ax.tick_lbl_skip = Some(reader.read(child)?),
                "tickMarkSkip" => ax.tick_mark_skip = Some(reader.read(child)?),
                "noMultiLvlLbl" => ax.no_multi_lvl_lbl = Some(reader.read(child)?),
                "extLst" => ax.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(ax)
    }
}

impl XmlWrite for CategoryAxis {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        self.shared.write_members(writer)?;
        writer.opt_child("c:auto", &self.auto)?;
        writer.opt_child("c:lblAlgn", &self.lbl_algn)?;
        writer.opt_child("c:lblOffset", &self.lbl_offset)?;
        writer.opt_child("c:tickLblSkip", &self.tick_lbl_skip)?;
        writer.opt_child("c:tickMarkSkip", &self.tick_mark_skip)?;
        writer.opt_child("c:noMultiLvlLbl", &self.no_multi_lvl_lbl)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for CategoryAxis {
    const TYPE_NAME: &'static str = "CT_CatAx";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.shared.validate_members(path)?;
        validate_opt(path, "lblOffset", &self.lbl_offset)?;
        validate_opt(path, "tickLblSkip", &self.tick_lbl_skip)?;
        validate_opt(path, "tickMarkSkip", &self.tick_mark_skip)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_ValAx`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueAxis {
    pub shared: AxisShared,
    pub cross_between: Option<Val<CrossBetween>>,
    pub major_unit: Option<Val<AxisUnit>>,
    pub minor_unit: Option<Val<AxisUnit>>,
    pub disp_units: Option<DisplayUnits>,
    pub ext_lst: Option<ExtensionList>,
}

impl ValueAxis {
    /// A left value axis with major gridlines, the way Office creates one.
    pub fn new(ax_id: u32, cross_ax: u32) -> Self {
        Self {
            shared: AxisShared {
                major_gridlines: Some(ChartLines::default()),
                num_fmt: Some(NumFmt {
                    format_code: "General".to_string(),
                    source_linked: Some(true),
                }),
                major_tick_mark: Some(OptVal::new(TickMark::None)),
                minor_tick_mark: Some(OptVal::new(TickMark::None)),
                tick_lbl_pos: Some(OptVal::new(TickLblPos::NextTo)),
                ..AxisShared::new(ax_id, AxPos::Left, cross_ax)
            },
            cross_between: Some(Val::new(CrossBetween::Between)),
            ..Self::default()
        }
    }
}

impl XmlRead for ValueAxis {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut ax = Self::default();
        reader.read_children(element, |reader, child| {
            if ax.shared.read_member(reader, child)? {
                return Ok(true);
            }
            match child.local_name() {
                "crossBetween" => ax.cross_between = Some(reader.read(child)?),
                "majorUnit" => ax.major_unit = Some(reader.read(child)?),
                "minorUnit" => ax.minor_unit = Some(reader.read(child)?),
                "dispUnits" => ax.disp_units = Some(reader.read(child)?),
                "extLst" => ax.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(ax)
    }
}

impl XmlWrite for ValueAxis {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        self.shared.write_members(writer)?;
        writer.opt_child("c:crossBetween", &self.cross_between)?;
        writer.opt_child("c:majorUnit", &self.major_unit)?;
        writer.opt_child("c:minorUnit", &self.minor_unit)?;
        writer.opt_child("c:dispUnits", &self.disp_units)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for ValueAxis {
    const TYPE_NAME: &'static str = "CT_ValAx";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.shared.validate_members(path)?;
        validate_opt(path, "majorUnit", &self.major_unit)?;
        validate_opt(path, "minorUnit", &self.minor_unit)?;
        validate_opt(path, "dispUnits", &self.disp_units)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_DateAx`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateAxis {
    pub shared: AxisShared,
    pub auto: Option<Boolean>,
    pub lbl_offset: Option<OptVal<LblOffset>>,
    pub base_time_unit: Option<OptVal<TimeUnit>>,
    pub major_unit: Option<Val<AxisUnit>>,
    pub major_time_unit: Option<OptVal<TimeUnit>>,
    pub minor_unit: Option<Val<AxisUnit>>,
    pub minor_time_unit: Option<OptVal<TimeUnit>>,
    pub ext_lst: Option<ExtensionList>,
}

impl DateAxis {
    pub fn new(ax_id: u32, cross_ax: u32) -> Self {
        Self {
            shared: AxisShared {
                num_fmt: Some(NumFmt {
                    format_code: "m/d/yyyy".to_string(),
                    source_linked: Some(true),
                }),
                ..AxisShared::new(ax_id, AxPos::Bottom, cross_ax)
            },
            auto: Some(Boolean::new(true)),
            lbl_offset: Some(OptVal::new(LblOffset::Value(100))),
            base_time_unit: Some(OptVal::new(TimeUnit::Days)),
            ..Self::default()
        }
    }
}

impl XmlRead for DateAxis {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut ax = Self::default();
        reader.read_children(element, |reader, child| {
            if ax.shared.read_member(reader, child)? {
                return Ok(true);
            }
            match child.local_name() {
                "auto" => ax.auto = Some(reader.read(child)?),
                "lblOffset" => ax.lbl_offset = Some(reader.read(child)?),
                "baseTimeUnit" => ax.base_time_unit = Some(reader.read(child)?),
                "majorUnit" => ax.major_unit = Some(reader.read(child)?),
                "majorTimeUnit" => ax.major_time_unit = Some(reader.read(child)?),
                "minorUnit" => ax.minor_unit = Some(reader.read(child)?),
                "minorTimeUnit" => ax.minor_time_unit = Some(reader.read(child)?),
                "extLst" => ax.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(ax)
    }
}

impl XmlWrite for DateAxis {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        self.shared.write_members(writer)?;
        writer.opt_child("c:auto", &self.auto)?;
        writer.opt_child("c:lblOffset", &self.lbl_offset)?;
        writer.opt_child("c:baseTimeUnit", &self.base_time_unit)?;
        writer.opt_child("c:majorUnit", &self.major_unit)?;
        writer.opt_child("c:majorTimeUnit", &self.major_time_unit)?;
        writer.opt_child("c:minorUnit", &self.minor_unit)?;
        writer.opt_child("c:minorTimeUnit", &self.minor_time_unit)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for DateAxis {
    const TYPE_NAME: &'static str = "CT_DateAx";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.shared.validate_members(path)?;
        validate_opt(path, "lblOffset", &self.lbl_offset)?;
        validate_opt(path, "majorUnit", &self.major_unit)?;
        validate_opt(path, "minorUnit", &self.minor_unit)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_SerAx`: depth axis of 3-D charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesAxis {
    pub shared: AxisShared,
    pub tick_lbl_skip: Option<Val<Skip>>,
    pub tick_mark_skip: Option<Val<Skip>>,
    pub ext_lst: Option<ExtensionList>,
}

impl SeriesAxis {
    pub fn new(ax_id: u32, cross_ax: u32) -> Self {
        Self {
            shared: AxisShared::new(ax_id, AxPos::Bottom, cross_ax),
            ..Self::default()
        }
    }
}

impl XmlRead for SeriesAxis {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut ax = Self::default();
        reader.read_children(element, |reader, child| {
            if ax.shared.read_member(reader, child)? {
                return Ok(true);
            }
            match child.local_name() {
                "tickLblSkip" => ax.tick_lbl_skip = Some(reader.read(child)?),
                "tickMarkSkip" => ax.tick_mark_skip = Some(reader.read(child)?),
                "extLst" => ax.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(ax)
    }
}

impl XmlWrite for SeriesAxis {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        self.shared.write_members(writer)?;
        writer.opt_child("c:tickLblSkip", &self.tick_lbl_skip)?;
        writer.opt_child("c:tickMarkSkip", &self.tick_mark_skip)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for SeriesAxis {
    const TYPE_NAME: &'static str = "CT_SerAx";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.shared.validate_members(path)?;
        validate_opt(path, "tickLblSkip", &self.tick_lbl_skip)?;
        validate_opt(path, "tickMarkSkip", &self.tick_mark_skip)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// Axis alternatives of the plot area.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotAreaAxis {
    Category(CategoryAxis),
    Value(ValueAxis),
    Date(DateAxis),
    Series(SeriesAxis),
}

impl PlotAreaAxis {
    pub fn shared(&self) -> &AxisShared {
        match self {
            Self::Category(ax) => &ax.shared,
            Self::Value(ax) => &ax.shared,
            Self::Date(ax) => &ax.shared,
            Self::Series(ax) => &ax.shared,
        }
    }

    pub fn ax_id(&self) -> u32 {
        self.shared().ax_id.val
    }
}

impl XmlChoice for PlotAreaAxis {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "catAx" | "valAx" | "dateAx" | "serAx")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "catAx" => Ok(Self::Category(reader.read(element)?)),
            "valAx" => Ok(Self::Value(reader.read(element)?)),
            "dateAx" => Ok(Self::Date(reader.read(element)?)),
            "serAx" => Ok(Self::Series(reader.read(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "an axis".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Category(ax) => writer.child("c:catAx", ax),
            Self::Value(ax) => writer.child("c:valAx", ax),
            Self::Date(ax) => writer.child("c:dateAx", ax),
            Self::Series(ax) => writer.child("c:serAx", ax),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Category(_) => "catAx",
            Self::Value(_) => "valAx",
            Self::Date(_) => "dateAx",
            Self::Series(_) => "serAx",
        }
    }
}

impl Validate for PlotAreaAxis {
    const TYPE_NAME: &'static str = "CT_PlotArea/axis";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Category(ax) => ax.validate_with_path(path),
            Self::Value(ax) => ax.validate_with_path(path),
            Self::Date(ax) => ax.validate_with_path(path),
            Self::Series(ax) => ax.validate_with_path(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{choice_from_fragment, choice_to_fragment, from_fragment, to_fragment};

    const VAL_AX: &str = r#"<c:valAx><c:axId val="2094734552"/><c:scaling><c:orientation val="minMax"/><c:max val="100"/><c:min val="0"/></c:scaling><c:delete val="0"/><c:axPos val="l"/><c:majorGridlines><c:spPr><a:ln w="9525" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="tx1"><a:lumMod val="15000"/><a:lumOff val="85000"/></a:schemeClr></a:solidFill><a:round/></a:ln></c:spPr></c:majorGridlines><c:numFmt formatCode="General" sourceLinked="1"/><c:majorTickMark val="none"/><c:minorTickMark val="none"/><c:tickLblPos val="nextTo"/><c:crossAx val="2094734551"/><c:crosses val="autoZero"/><c:crossBetween val="between"/><c:majorUnit val="20"/><c:dispUnits><c:builtInUnit val="thousands"/></c:dispUnits></c:valAx>"#;

    #[test]
    fn test_value_axis() {
        let ax: ValueAxis = from_fragment(VAL_AX).unwrap();
        assert_eq!(ax.shared.ax_id.val, 2094734552);
        assert_eq!(ax.shared.ax_pos.val, AxPos::Left);
        assert_eq!(ax.shared.scaling.max.unwrap().val, 100.0);
        assert_eq!(ax.major_unit.unwrap().val, AxisUnit(20.0));
        assert_eq!(ax.disp_units.as_ref().unwrap().divisor(), Some(1000.0));
        assert!(ax.validate().is_ok());
        assert_eq!(to_fragment(&ax, "c:valAx").unwrap(), VAL_AX);
    }

    #[test]
    fn test_category_axis_defaults() {
        let ax = CategoryAxis::new(1, 2);
        assert!(ax.validate().is_ok());
        let xml = to_fragment(&ax, "c:catAx").unwrap();
        assert!(xml.starts_with(r#"<c:catAx><c:axId val="1"/><c:scaling><c:orientation val="minMax"/></c:scaling><c:delete val="0"/><c:axPos val="b"/>"#));
        assert!(xml.contains(r#"<c:crossAx val="2"/><c:crosses val="autoZero"/><c:auto val="1"/><c:lblAlgn val="ctr"/><c:lblOffset val="100"/>"#));
        let back: CategoryAxis = from_fragment(&xml).unwrap();
        assert_eq!(back, ax);
    }

    #[test]
    fn test_axis_cannot_cross_itself() {
        let err = ValueAxis::new(7, 7).validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_ValAx/crossAx: axis 7 cannot cross itself");
    }

    #[test]
    fn test_inverted_bounds() {
        let scaling = Scaling::new().with_bounds(10.0, 5.0);
        let err = scaling.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_Scaling/min: minimum 10 exceeds maximum 5");
    }

    #[test]
    fn test_log_scale_range() {
        let mut ax = ValueAxis::new(1, 2);
        ax.shared.scaling.log_base = Some(Val::new(LogBase(1.5)));
        let err = ax.validate().unwrap_err();
        assert!(err.to_string().starts_with("CT_ValAx/scaling/logBase/@val:"));
    }

    #[test]
    fn test_crosses_at_value() {
        let xml = r#"<c:dateAx><c:axId val="5"/><c:scaling><c:orientation val="minMax"/></c:scaling><c:delete val="0"/><c:axPos val="b"/><c:numFmt formatCode="m/d/yyyy" sourceLinked="1"/><c:crossAx val="6"/><c:crossesAt val="2.5"/><c:auto val="1"/><c:lblOffset val="100"/><c:baseTimeUnit val="months"/><c:majorUnit val="1"/><c:majorTimeUnit val="months"/></c:dateAx>"#;
        let ax: DateAxis = from_fragment(xml).unwrap();
        assert!(matches!(ax.shared.crossing, Some(Crossing::CrossesAt(at)) if at.val == 2.5));
        assert_eq!(ax.base_time_unit.unwrap().value(), TimeUnit::Months);
        assert_eq!(to_fragment(&ax, "c:dateAx").unwrap(), xml);
    }

    #[test]
    fn test_axis_choice() {
        let xml = to_fragment(&SeriesAxis::new(3, 1), "c:serAx").unwrap();
        let axis: PlotAreaAxis = choice_from_fragment(&xml).unwrap();
        assert_eq!(axis.ax_id(), 3);
        assert_eq!(axis.choice_name(), "serAx");
        assert_eq!(choice_to_fragment(&axis).unwrap(), xml);
    }
}
