//! Plot area: chart groups, their axes and the data table.

use crate::chart::axis::PlotAreaAxis;
use crate::chart::data::Layout;
use crate::chart::labels::{ChartLines, DataLabels};
use crate::chart::series::{
    AreaSeries, BarSeries, BubbleSeries, LineSeries, PieSeries, RadarSeries, ScatterSeries,
    Series, SurfaceSeries,
};
use crate::chart::types::{
    BarDir, BarGrouping, BarShape, BubbleScale, FirstSliceAng, GapAmount, Grouping, HoleSize,
    OfPieType, Overlap, RadarStyle, ScatterStyle, SecondPieSize, SizeRepresents, SplitType,
};
use crate::chart::values::{Boolean, Double, OptVal, UnsignedInt, Val};
use crate::drawing::ext::ExtensionList;
use crate::drawing::shape::ShapeProperties;
use crate::drawing::text::TextBody;
use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, Validate, XmlChoice, XmlRead, XmlReader, XmlWrite, XmlWriter, check_occurs,
    child_path, validate_all, validate_choices, validate_opt,
};
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// `CT_UpDownBar`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpDownBar {
    pub sp_pr: Option<Box<ShapeProperties>>,
}

impl XmlRead for UpDownBar {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut bar = Self::default();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "spPr" {
                return Ok(false);
            }
            bar.sp_pr = Some(reader.read(child)?);
            Ok(true)
        })?;
        Ok(bar)
    }
}

impl XmlWrite for UpDownBar {
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

impl Validate for UpDownBar {
    const TYPE_NAME: &'static str = "CT_UpDownBar";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "spPr", &self.sp_pr)
    }
}

/// `CT_UpDownBars`: bars between the first and last line series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpDownBars {
    pub gap_width: Option<OptVal<GapAmount>>,
    pub up_bars: Option<UpDownBar>,
    pub down_bars: Option<UpDownBar>,
    pub ext_lst: Option<ExtensionList>,
}

impl XmlRead for UpDownBars {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut bars = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "gapWidth" => bars.gap_width = Some(reader.read(child)?),
                "upBars" => bars.up_bars = Some(reader.read(child)?),
                "downBars" => bars.down_bars = Some(reader.read(child)?),
                "extLst" => bars.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(bars)
    }
}

impl XmlWrite for UpDownBars {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:gapWidth", &self.gap_width)?;
        writer.opt_child("c:upBars", &self.up_bars)?;
        writer.opt_child("c:downBars", &self.down_bars)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for UpDownBars {
    const TYPE_NAME: &'static str = "CT_UpDownBars";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "gapWidth", &self.gap_width)?;
        validate_opt(path, "upBars", &self.up_bars)?;
        validate_opt(path, "downBars", &self.down_bars)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_BandFmt`: formatting of one surface chart band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandFormat {
    pub idx: UnsignedInt,
    pub sp_pr: Option<Box<ShapeProperties>>,
}

impl XmlRead for BandFormat {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut band = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "idx" => band.idx = reader.read(child)?,
                "spPr" => band.sp_pr = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(band)
    }
}

impl XmlWrite for BandFormat {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("c:idx", &self.idx)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.end(name)
    }
}

impl Validate for BandFormat {
    const TYPE_NAME: &'static str = "CT_BandFmt";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "spPr", &self.sp_pr)
    }
}

/// `CT_BandFmts`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandFormats {
    pub band_fmt: Vec<BandFormat>,
}

impl XmlRead for BandFormats {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut fmts = Self::default();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "bandFmt" {
                return Ok(false);
            }
            fmts.band_fmt.push(reader.read(child)?);
            Ok(true)
        })?;
        Ok(fmts)
    }
}

impl XmlWrite for BandFormats {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.band_fmt.is_empty() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.children("c:bandFmt", &self.band_fmt)?;
        writer.end(name)
    }
}

impl Validate for BandFormats {
    const TYPE_NAME: &'static str = "CT_BandFmts";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_all(path, "bandFmt", &self.band_fmt)
    }
}

/// `CT_CustSplit`: points moved to the secondary pie or bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomSplit {
    pub second_pie_pt: Vec<UnsignedInt>,
}

impl XmlRead for CustomSplit {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut split = Self::default();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "secondPiePt" {
                return Ok(false);
            }
            split.second_pie_pt.push(reader.read(child)?);
            Ok(true)
        })?;
        Ok(split)
    }
}

impl XmlWrite for CustomSplit {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.second_pie_pt.is_empty() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.children("c:secondPiePt", &self.second_pie_pt)?;
        writer.end(name)
    }
}

impl Validate for CustomSplit {
    const TYPE_NAME: &'static str = "CT_CustSplit";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// Members common to every chart group.
pub trait ChartGroup {
    /// The group's series.
    fn series(&self) -> Vec<&dyn Series>;

    /// Ids of the axes the group is plotted on; empty for pie charts.
    fn ax_ids(&self) -> Vec<u32>;
}

/// Defines a chart group struct from its children in schema order, with
/// occurrence limits on the listed repeated children.
macro_rules! chart_group {
    (
        $(#[$meta:meta])*
        $name:ident = $schema:literal {
            $( $field:ident : $kind:ident $ty:ty => $xml:literal ),* $(,)?
        }
        $(occurs { $( $ofield:ident => $oxml:literal : $omin:literal ..= $omax:literal ),* $(,)? })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( pub $field: chart_group!(@ty $kind $ty), )*
            pub ext_lst: Option<ExtensionList>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl XmlRead for $name {
            fn read_xml<R: BufRead>(
                reader: &mut XmlReader<R>,
                element: &ElementStart,
            ) -> Result<Self> {
                let mut group = Self::default();
                reader.read_children(element, |reader, child| {
                    match child.local_name() {
                        $( $xml => chart_group!(@read $kind group.$field, reader, child), )*
                        "extLst" => group.ext_lst = Some(reader.read(child)?),
                        _ => return Ok(false),
                    }
                    Ok(true)
                })?;
                Ok(group)
            }
        }

        impl XmlWrite for $name {
            fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
                writer.element(name).open()?;
                $( chart_group!(@write $kind writer, concat!("c:", $xml), &self.$field); )*
                writer.opt_child("c:extLst", &self.ext_lst)?;
                writer.end(name)
            }
        }

        impl Validate for $name {
            const TYPE_NAME: &'static str = $schema;

            fn validate_with_path(&self, path: &str) -> Result<()> {
                $($( check_occurs(path, $oxml, self.$ofield.len(), $omin, Some($omax))?; )*)?
                $( chart_group!(@validate $kind self, path, $field, $xml); )*
                validate_opt(path, "extLst", &self.ext_lst)
            }
        }
    };

    (@ty req $ty:ty) => { $ty };
    (@ty opt $ty:ty) => { Option<$ty> };
    (@ty many $ty:ty) => { Vec<$ty> };

    (@read req $slot:expr, $reader:ident, $child:ident) => {
        $slot = $reader.read($child)?
    };
    (@read opt $slot:expr, $reader:ident, $child:ident) => {
        $slot = Some($reader.read($child)?)
    };
    (@read many $slot:expr, $reader:ident, $child:ident) => {
        $slot.push($reader.read($child)?)
    };

    (@write req $writer:ident, $name:expr, $value:expr) => {
        $writer.child($name, $value)?
    };
    (@write opt $writer:ident, $name:expr, $value:expr) => {
        $writer.opt_child($name, $value)?
    };
    (@write many $writer:ident, $name:expr, $value:expr) => {
        $writer.children($name, $value)?
    };

    (@validate req $self:ident, $path:ident, $field:ident, $xml:literal) => {
        $self.$field.validate_with_path(&child_path($path, $xml))?
    };
    (@validate opt $self:ident, $path:ident, $field:ident, $xml:literal) => {
        validate_opt($path, $xml, &$self.$field)?
    };
    (@validate many $self:ident, $path:ident, $field:ident, $xml:literal) => {
        validate_all($path, $xml, &$self.$field)?
    };
}

chart_group! {
    /// `CT_BarChart`
    BarChart = "CT_BarChart" {
        bar_dir: req Val<BarDir> => "barDir",
        grouping: opt OptVal<BarGrouping> => "grouping",
        vary_colors: opt Boolean => "varyColors",
        ser: many BarSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        gap_width: opt OptVal<GapAmount> => "gapWidth",
        overlap: opt OptVal<Overlap> => "overlap",
        ser_lines: many ChartLines => "serLines",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ax_id => "axId": 2..=2 }
}

chart_group! {
    /// `CT_Bar3DChart`
    Bar3DChart = "CT_Bar3DChart" {
        bar_dir: req Val<BarDir> => "barDir",
        grouping: opt OptVal<BarGrouping> => "grouping",
        vary_colors: opt Boolean => "varyColors",
        ser: many BarSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        gap_width: opt OptVal<GapAmount> => "gapWidth",
        gap_depth: opt OptVal<GapAmount> => "gapDepth",
        shape: opt OptVal<BarShape> => "shape",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ax_id => "axId": 2..=3 }
}

chart_group! {
    /// `CT_LineChart`
    LineChart = "CT_LineChart" {
        grouping: req Val<Grouping> => "grouping",
        vary_colors: opt Boolean => "varyColors",
        ser: many LineSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        drop_lines: opt ChartLines => "dropLines",
        hi_low_lines: opt ChartLines => "hiLowLines",
        up_down_bars: opt UpDownBars => "upDownBars",
        marker: opt Boolean => "marker",
        smooth: opt Boolean => "smooth",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ax_id => "axId": 2..=2 }
}

chart_group! {
    /// `CT_Line3DChart`
    Line3DChart = "CT_Line3DChart" {
        grouping: req Val<Grouping> => "grouping",
        vary_colors: opt Boolean => "varyColors",
        ser: many LineSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        drop_lines: opt ChartLines => "dropLines",
        gap_depth: opt OptVal<GapAmount> => "gapDepth",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ax_id => "axId": 3..=3 }
}

chart_group! {
    /// `CT_StockChart`: open-high-low-close from three or four line series.
    StockChart = "CT_StockChart" {
        ser: many LineSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        drop_lines: opt ChartLines => "dropLines",
        hi_low_lines: opt ChartLines => "hiLowLines",
        up_down_bars: opt UpDownBars => "upDownBars",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ser => "ser": 3..=4, ax_id => "axId": 2..=2 }
}

chart_group! {
    /// `CT_RadarChart`
    RadarChart = "CT_RadarChart" {
        radar_style: req Val<RadarStyle> => "radarStyle",
        vary_colors: opt Boolean => "varyColors",
        ser: many RadarSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ax_id => "axId": 2..=2 }
}

chart_group! {
    /// `CT_ScatterChart`
    ScatterChart = "CT_ScatterChart" {
        scatter_style: req Val<ScatterStyle> => "scatterStyle",
        vary_colors: opt Boolean => "varyColors",
        ser: many ScatterSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ax_id => "axId": 2..=2 }
}

chart_group! {
    /// `CT_PieChart`
    PieChart = "CT_PieChart" {
        vary_colors: opt Boolean => "varyColors",
        ser: many PieSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        first_slice_ang: opt OptVal<FirstSliceAng> => "firstSliceAng",
    }
}

chart_group! {
    /// `CT_Pie3DChart`
    Pie3DChart = "CT_Pie3DChart" {
        vary_colors: opt Boolean => "varyColors",
        ser: many PieSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
    }
}

chart_group! {
    /// `CT_DoughnutChart`
    DoughnutChart = "CT_DoughnutChart" {
        vary_colors: opt Boolean => "varyColors",
        ser: many PieSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        first_slice_ang: opt OptVal<FirstSliceAng> => "firstSliceAng",
        hole_size: opt OptVal<HoleSize> => "holeSize",
    }
}

chart_group! {
    /// `CT_OfPieChart`: pie of pie and bar of pie.
    OfPieChart = "CT_OfPieChart" {
        of_pie_type: req Val<OfPieType> => "ofPieType",
        vary_colors: opt Boolean => "varyColors",
        ser: many PieSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        gap_width: opt OptVal<GapAmount> => "gapWidth",
        split_type: opt OptVal<SplitType> => "splitType",
        split_pos: opt Double => "splitPos",
        cust_split: opt CustomSplit => "custSplit",
        second_pie_size: opt OptVal<SecondPieSize> => "secondPieSize",
        ser_lines: many ChartLines => "serLines",
    }
}

chart_group! {
    /// `CT_AreaChart`
    AreaChart = "CT_AreaChart" {
        grouping: opt OptVal<Grouping> => "grouping",
        vary_colors: opt Boolean => "varyColors",
        ser: many AreaSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        drop_lines: opt ChartLines => "dropLines",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ax_id => "axId": 2..=2 }
}

chart_group! {
    /// `CT_Area3DChart`
    Area3DChart = "CT_Area3DChart" {
        grouping: opt OptVal<Grouping> => "grouping",
        vary_colors: opt Boolean => "varyColors",
        ser: many AreaSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        drop_lines: opt ChartLines => "dropLines",
        gap_depth: opt OptVal<GapAmount> => "gapDepth",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ax_id => "axId": 2..=3 }
}

chart_group! {
    /// `CT_BubbleChart`
    BubbleChart = "CT_BubbleChart" {
        vary_colors: opt Boolean => "varyColors",
        ser: many BubbleSeries => "ser",
        d_lbls: opt Box<DataLabels> => "dLbls",
        bubble_3d: opt Boolean => "bubble3D",
        bubble_scale: opt OptVal<BubbleScale> => "bubbleScale",
        show_neg_bubbles: opt Boolean => "showNegBubbles",
        size_represents: opt OptVal<SizeRepresents> => "sizeRepresents",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ax_id => "axId": 2..=2 }
}

chart_group! {
    /// `CT_SurfaceChart`
    SurfaceChart = "CT_SurfaceChart" {
        wireframe: opt Boolean => "wireframe",
        ser: many SurfaceSeries => "ser",
        band_fmts: opt BandFormats => "bandFmts",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ax_id => "axId": 2..=3 }
}

chart_group! {
    /// `CT_Surface3DChart`
    Surface3DChart = "CT_Surface3DChart" {
        wireframe: opt Boolean => "wireframe",
        ser: many SurfaceSeries => "ser",
        band_fmts: opt BandFormats => "bandFmts",
        ax_id: many UnsignedInt => "axId",
    }
    occurs { ax_id => "axId": 3..=3 }
}

impl BarChart {
    /// Clustered columns plotted on the given category and value axes.
    pub fn columns(cat_ax: u32, val_ax: u32) -> Self {
        Self {
            bar_dir: Val::new(BarDir::Col),
            grouping: Some(OptVal::new(BarGrouping::Clustered)),
            vary_colors: Some(Boolean::new(false)),
            gap_width: Some(OptVal::new(GapAmount::Value(219))),
            overlap: Some(OptVal::new(Overlap::Value(-27))),
            ax_id: vec![UnsignedInt::new(cat_ax), UnsignedInt::new(val_ax)],
            ..Self::default()
        }
    }
}

impl LineChart {
    pub fn standard(cat_ax: u32, val_ax: u32) -> Self {
        Self {
            grouping: Val::new(Grouping::Standard),
            vary_colors: Some(Boolean::new(false)),
            marker: Some(Boolean::new(true)),
            ax_id: vec![UnsignedInt::new(cat_ax), UnsignedInt::new(val_ax)],
            ..Self::default()
        }
    }
}

impl PieChart {
    pub fn vary_colors() -> Self {
        Self {
            vary_colors: Some(Boolean::new(true)),
            first_slice_ang: Some(OptVal::new(FirstSliceAng(0))),
            ..Self::default()
        }
    }
}

/// Defines [`PlotAreaChart`] over the chart groups, split into the groups
/// plotted on axes and the pie family which has none.
macro_rules! plot_area_charts {
    (
        axes { $( $avariant:ident($aty:ty) => $axml:literal ),* $(,)? }
        no_axes { $( $nvariant:ident($nty:ty) => $nxml:literal ),* $(,)? }
    ) => {
        /// Chart group alternatives of the plot area.
        #[derive(Debug, Clone, PartialEq)]
        pub enum PlotAreaChart {
            $( $avariant($aty), )*
            $( $nvariant($nty), )*
        }

        impl XmlChoice for PlotAreaChart {
            fn is_choice(local_name: &str) -> bool {
                matches!(local_name, $( $axml )|* | $( $nxml )|*)
            }

            fn read_choice<R: BufRead>(
                reader: &mut XmlReader<R>,
                element: &ElementStart,
            ) -> Result<Self> {
                match element.local_name() {
                    $( $axml => Ok(Self::$avariant(reader.read(element)?)), )*
                    $( $nxml => Ok(Self::$nvariant(reader.read(element)?)), )*
                    _ => Err(OoxmlError::UnexpectedElement {
                        expected: "a chart group".to_string(),
                        found: element.name().to_string(),
                    }),
                }
            }

            fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
                match self {
                    $( Self::$avariant(group) => writer.child(concat!("c:", $axml), group), )*
                    $( Self::$nvariant(group) => writer.child(concat!("c:", $nxml), group), )*
                }
            }

            fn choice_name(&self) -> &'static str {
                match self {
                    $( Self::$avariant(_) => $axml, )*
                    $( Self::$nvariant(_) => $nxml, )*
                }
            }
        }

        impl Validate for PlotAreaChart {
            const TYPE_NAME: &'static str = "CT_PlotArea/chart";

            fn validate_with_path(&self, path: &str) -> Result<()> {
                match self {
                    $( Self::$avariant(group) => group.validate_with_path(path), )*
                    $( Self::$nvariant(group) => group.validate_with_path(path), )*
                }
            }
        }

        impl ChartGroup for PlotAreaChart {
            fn series(&self) -> Vec<&dyn Series> {
                match self {
                    $( Self::$avariant(group) => group.ser.iter().map(|s| s as &dyn Series).collect(), )*
                    $( Self::$nvariant(group) => group.ser.iter().map(|s| s as &dyn Series).collect(), )*
                }
            }

            fn ax_ids(&self) -> Vec<u32> {
                match self {
                    $( Self::$avariant(group) => group.ax_id.iter().map(|id| id.val).collect(), )*
                    $( Self::$nvariant(_) => Vec::new(), )*
                }
            }
        }
    };
}

plot_area_charts! {
    axes {
        Area(AreaChart) => "areaChart",
        Area3D(Area3DChart) => "area3DChart",
        Line(LineChart) => "lineChart",
        Line3D(Line3DChart) => "line3DChart",
        Stock(StockChart) => "stockChart",
        Radar(RadarChart) => "radarChart",
        Scatter(ScatterChart) => "scatterChart",
        Bar(BarChart) => "barChart",
        Bar3D(Bar3DChart) => "bar3DChart",
        Surface(SurfaceChart) => "surfaceChart",
        Surface3D(Surface3DChart) => "surface3DChart",
        Bubble(BubbleChart) => "bubbleChart",
    }
    no_axes {
        Pie(PieChart) => "pieChart",
        Pie3D(Pie3DChart) => "pie3DChart",
        Doughnut(DoughnutChart) => "doughnutChart",
        OfPie(OfPieChart) => "ofPieChart",
    }
}

/// `CT_DTable`: the data table under the plot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub show_horz_border: Option<Boolean>,
    pub show_vert_border: Option<Boolean>,
    pub show_outline: Option<Boolean>,
    pub show_keys: Option<Boolean>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub tx_pr: Option<Box<TextBody>>,
    pub ext_lst: Option<ExtensionList>,
}

impl XmlRead for DataTable {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut table = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "showHorzBorder" => table.show_horz_border = Some(reader.read(child)?),
                "showVertBorder" => table.show_vert_border = Some(reader.read(child)?),
                "showOutline" => table.show_outline = Some(reader.read(child)?),
                "showKeys" => table.show_keys = Some(reader.read(child)?),
                "spPr" => table.sp_pr = Some(reader.read(child)?),
                "txPr" => table.tx_pr = Some(reader.read(child)?),
                "extLst" => table.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(table)
    }
}

impl XmlWrite for DataTable {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:showHorzBorder", &self.show_horz_border)?;
        writer.opt_child("c:showVertBorder", &self.show_vert_border)?;
        writer.opt_child("c:showOutline", &self.show_outline)?;
        writer.opt_child("c:showKeys", &self.show_keys)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:txPr", &self.tx_pr)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for DataTable {
    const TYPE_NAME: &'static str = "CT_DTable";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "txPr", &self.tx_pr)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_PlotArea`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotArea {
    pub layout: Option<Layout>,
    /// One or more chart groups sharing the plot.
    pub charts: Vec<PlotAreaChart>,
    pub axes: Vec<PlotAreaAxis>,
    pub d_table: Option<DataTable>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub ext_lst: Option<ExtensionList>,
}

impl PlotArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chart(mut self, chart: PlotAreaChart) -> Self {
        self.charts.push(chart);
        self
    }

    pub fn with_axis(mut self, axis: PlotAreaAxis) -> Self {
        self.axes.push(axis);
        self
    }

    pub fn axis(&self, ax_id: u32) -> Option<&PlotAreaAxis> {
        self.axes.iter().find(|axis| axis.ax_id() == ax_id)
    }

    /// All series of all chart groups, in group order.
    pub fn series(&self) -> Vec<&dyn Series> {
        self.charts.iter().flat_map(ChartGroup::series).collect()
    }

    /// Axis ids must be unique and every id a group or axis refers to must
    /// name an axis of this plot area.
    fn check_axis_references(&self, path: &str) -> Result<()> {
        let mut ids = HashSet::new();
        for (i, axis) in self.axes.iter().enumerate() {
            if !ids.insert(axis.ax_id()) {
                return Err(OoxmlError::validation(
                    format!("{}/{}[{}]/axId", path, axis.choice_name(), i),
                    format!("duplicate axis id {}", axis.ax_id()),
                ));
            }
        }
        for (i, axis) in self.axes.iter().enumerate() {
            let cross_ax = axis.shared().cross_ax.val;
            if !ids.contains(&cross_ax) {
                return Err(OoxmlError::validation(
                    format!("{}/{}[{}]/crossAx", path, axis.choice_name(), i),
                    format!("axis {} is not defined in the plot area", cross_ax),
                ));
            }
        }
        for (i, chart) in self.charts.iter().enumerate() {
            if let Some(missing) = chart.ax_ids().into_iter().find(|id| !ids.contains(id)) {
                return Err(OoxmlError::validation(
                    format!("{}/{}[{}]/axId", path, chart.choice_name(), i),
                    format!("axis {} is not defined in the plot area", missing),
                ));
            }
        }
        Ok(())
    }
}

impl XmlRead for PlotArea {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut plot_area = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "layout" => plot_area.layout = Some(reader.read(child)?),
                name if PlotAreaChart::is_choice(name) => {
                    plot_area.charts.push(PlotAreaChart::read_choice(reader, child)?)
                },
                name if PlotAreaAxis::is_choice(name) => {
                    plot_area.axes.push(PlotAreaAxis::read_choice(reader, child)?)
                },
                "dTable" => plot_area.d_table = Some(reader.read(child)?),
                "spPr" => plot_area.sp_pr = Some(reader.read(child)?),
                "extLst" => plot_area.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(plot_area)
    }
}

impl XmlWrite for PlotArea {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.opt_child("c:layout", &self.layout)?;
        writer.choices(&self.charts)?;
        writer.choices(&self.axes)?;
        writer.opt_child("c:dTable", &self.d_table)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for PlotArea {
    const TYPE_NAME: &'static str = "CT_PlotArea";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        if self.charts.is_empty() {
            return Err(OoxmlError::validation(path, "at least one chart group is required"));
        }
        validate_opt(path, "layout", &self.layout)?;
        validate_choices(path, &self.charts)?;
        validate_choices(path, &self.axes)?;
        self.check_axis_references(path)?;
        validate_opt(path, "dTable", &self.d_table)?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::axis::{CategoryAxis, ValueAxis};
    use crate::chart::data::{NumData, NumDataSource};
    use crate::xml::{from_fragment, to_fragment};

    fn bar_plot_area() -> PlotArea {
        let mut bar = BarChart::columns(10, 20);
        let mut ser = BarSeries::new(0, 0);
        ser.val = Some(NumDataSource::NumLit(NumData::from_values([3.0, 4.0])));
        bar.ser.push(ser);
        PlotArea::new()
            .with_chart(PlotAreaChart::Bar(bar))
            .with_axis(PlotAreaAxis::Category(CategoryAxis::new(10, 20)))
            .with_axis(PlotAreaAxis::Value(ValueAxis::new(20, 10)))
    }

    #[test]
    fn test_bar_plot_area() {
        let plot_area = bar_plot_area();
        assert!(plot_area.validate().is_ok());
        assert_eq!(plot_area.series().len(), 1);
        assert!(matches!(plot_area.axis(20), Some(PlotAreaAxis::Value(_))));

        let xml = to_fragment(&plot_area, "c:plotArea").unwrap();
        assert!(xml.starts_with(r#"<c:plotArea><c:barChart><c:barDir val="col"/><c:grouping val="clustered"/><c:varyColors val="0"/><c:ser>"#));
        assert!(xml.contains(r#"<c:gapWidth val="219"/><c:overlap val="-27"/><c:axId val="10"/><c:axId val="20"/></c:barChart><c:catAx>"#));
        let back: PlotArea = from_fragment(&xml).unwrap();
        assert_eq!(back, plot_area);
    }

    #[test]
    fn test_group_must_reference_existing_axes() {
        let mut plot_area = bar_plot_area();
        if let PlotAreaChart::Bar(bar) = &mut plot_area.charts[0] {
            bar.ax_id[1] = UnsignedInt::new(99);
        }
        let err = plot_area.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "CT_PlotArea/barChart[0]/axId: axis 99 is not defined in the plot area"
        );
    }

    #[test]
    fn test_axis_count_per_group() {
        let mut bar = BarChart::columns(1, 2);
        bar.ax_id.pop();
        let err = bar.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "CT_BarChart/axId: must occur at least 2 time(s) (have 1)"
        );

        let mut line = Line3DChart::new();
        line.ax_id = vec![UnsignedInt::new(1), UnsignedInt::new(2)];
        assert!(line.validate().is_err());
        line.ax_id.push(UnsignedInt::new(3));
        assert!(line.validate().is_ok());
    }

    #[test]
    fn test_stock_chart_needs_three_series() {
        let mut stock = StockChart::new();
        stock.ax_id = vec![UnsignedInt::new(1), UnsignedInt::new(2)];
        stock.ser = (0..2).map(|i| LineSeries::new(i, i)).collect();
        let err = stock.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_StockChart/ser: must occur at least 3 time(s) (have 2)");
        stock.ser.push(LineSeries::new(2, 2));
        assert!(stock.validate().is_ok());
    }

    #[test]
    fn test_empty_plot_area() {
        let err = PlotArea::new().validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_PlotArea: at least one chart group is required");
    }

    #[test]
    fn test_doughnut_without_axes() {
        let xml = r#"<c:plotArea><c:layout/><c:doughnutChart><c:varyColors val="1"/><c:ser><c:idx val="0"/><c:order val="0"/><c:explosion val="5"/><c:val><c:numLit><c:ptCount val="1"/><c:pt idx="0"><c:v>7</c:v></c:pt></c:numLit></c:val></c:ser><c:firstSliceAng val="90"/><c:holeSize val="50"/></c:doughnutChart></c:plotArea>"#;
        let plot_area: PlotArea = from_fragment(xml).unwrap();
        let PlotAreaChart::Doughnut(doughnut) = &plot_area.charts[0] else {
            panic!("expected a doughnut chart");
        };
        assert_eq!(doughnut.hole_size.unwrap().value(), HoleSize::Value(50));
        assert!(plot_area.charts[0].ax_ids().is_empty());
        assert!(plot_area.validate().is_ok());
        assert_eq!(to_fragment(&plot_area, "c:plotArea").unwrap(), xml);
    }

    #[test]
    fn test_of_pie_split() {
        let xml = r#"<c:ofPieChart><c:ofPieType val="bar"/><c:varyColors val="1"/><c:gapWidth val="100"/><c:splitType val="cust"/><c:custSplit><c:secondPiePt val="3"/><c:secondPiePt val="4"/></c:custSplit><c:secondPieSize val="75"/><c:serLines/></c:ofPieChart>"#;
        let of_pie: OfPieChart = from_fragment(xml).unwrap();
        assert_eq!(of_pie.of_pie_type.val, OfPieType::Bar);
        assert_eq!(of_pie.cust_split.as_ref().unwrap().second_pie_pt.len(), 2);
        assert_eq!(to_fragment(&of_pie, "c:ofPieChart").unwrap(), xml);
    }

    #[test]
    fn test_up_down_bars() {
        let xml = r#"<c:upDownBars><c:gapWidth val="150"/><c:upBars/><c:downBars/></c:upDownBars>"#;
        let bars: UpDownBars = from_fragment(xml).unwrap();
        assert!(bars.up_bars.is_some());
        assert_eq!(to_fragment(&bars, "c:upDownBars").unwrap(), xml);
    }
}
