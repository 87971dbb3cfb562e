//! Chart series and their decorations: markers, data points, trendlines
//! and error bars.

use crate::chart::data::{AxDataSource, Layout, NumDataSource, NumFmt, SerTx, Tx};
use crate::chart::labels::DataLabels;
use crate::chart::types::{
    BarShape, ErrBarType, ErrDir, ErrValType, MarkerSize, MarkerStyle, Order, Period,
    TrendlineType,
};
use crate::chart::values::{Boolean, Double, OptVal, UnsignedInt, Val};
use crate::drawing::ext::ExtensionList;
use crate::drawing::shape::ShapeProperties;
use crate::drawing::text::TextBody;
use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, RawElement, Validate, XmlRead, XmlReader, XmlWrite, XmlWriter, check_occurs,
    child_path, validate_all, validate_opt,
};
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// `CT_Marker`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Marker {
    pub symbol: Option<Val<MarkerStyle>>,
    pub size: Option<OptVal<MarkerSize>>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub ext_lst: Option<ExtensionList>,
}

impl Marker {
    pub fn new(symbol: MarkerStyle) -> Self {
        Self {
            symbol: Some(Val::new(symbol)),
            ..Self::default()
        }
    }

    /// `<c:marker><c:symbol val="none"/></c:marker>`
    pub fn none() -> Self {
        Self::new(MarkerStyle::None)
    }
}

impl XmlRead for Marker {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut marker = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "symbol" => marker.symbol = Some(reader.read(child)?),
                "size" => marker.size = Some(reader.read(child)?),
                "spPr" => marker.sp_pr = Some(reader.read(child)?),
                "extLst" => marker.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(marker)
    }
}

impl XmlWrite for Marker {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:symbol", &self.symbol)?;
        writer.opt_child("c:size", &self.size)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Marker {
    const TYPE_NAME: &'static str = "CT_Marker";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "size", &self.size)?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_DPt`: formatting override for one data point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataPoint {
    pub idx: UnsignedInt,
    pub invert_if_negative: Option<Boolean>,
    pub marker: Option<Marker>,
    pub bubble_3d: Option<Boolean>,
    /// Pie slice offset, percent of the radius.
    pub explosion: Option<UnsignedInt>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub picture_options: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl DataPoint {
    pub fn new(idx: u32) -> Self {
        Self {
            idx: UnsignedInt::new(idx),
            ..Self::default()
        }
    }

    pub fn with_sp_pr(mut self, sp_pr: ShapeProperties) -> Self {
        self.sp_pr = Some(Box::new(sp_pr));
        self
    }
}

impl XmlRead for DataPoint {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut d_pt = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "idx" => d_pt.idx = reader.read(child)?,
                "invertIfNegative" => d_pt.invert_if_negative = Some(reader.read(child)?),
                "marker" => d_pt.marker = Some(reader.read(child)?),
                "bubble3D" => d_pt.bubble_3d = Some(reader.read(child)?),
                "explosion" => d_pt.explosion = Some(reader.read(child)?),
                "spPr" => d_pt.sp_pr = Some(reader.read(child)?),
                "pictureOptions" => d_pt.picture_options = Some(reader.read_raw(child)?),
                "extLst" => d_pt.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(d_pt)
    }
}

impl XmlWrite for DataPoint {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("c:idx", &self.idx)?;
        writer.opt_child("c:invertIfNegative", &self.invert_if_negative)?;
        writer.opt_child("c:marker", &self.marker)?;
        writer.opt_child("c:bubble3D", &self.bubble_3d)?;
        writer.opt_child("c:explosion", &self.explosion)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:pictureOptions", &self.picture_options)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for DataPoint {
    const TYPE_NAME: &'static str = "CT_DPt";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "marker", &self.marker)?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_TrendlineLbl`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendlineLabel {
    pub layout: Option<Layout>,
    pub tx: Option<Tx>,
    pub num_fmt: Option<NumFmt>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub tx_pr: Option<Box<TextBody>>,
    pub ext_lst: Option<ExtensionList>,
}

impl XmlRead for TrendlineLabel {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut lbl = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "layout" => lbl.layout = Some(reader.read(child)?),
                "tx" => lbl.tx = Some(reader.read(child)?),
                "numFmt" => lbl.num_fmt = Some(reader.read(child)?),
                "spPr" => lbl.sp_pr = Some(reader.read(child)?),
                "txPr" => lbl.tx_pr = Some(reader.read(child)?),
                "extLst" => lbl.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(lbl)
    }
}

impl XmlWrite for TrendlineLabel {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:layout", &self.layout)?;
        writer.opt_child("c:tx", &self.tx)?;
        writer.opt_child("c:numFmt", &self.num_fmt)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:txPr", &self.tx_pr)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for TrendlineLabel {
    const TYPE_NAME: &'static str = "CT_TrendlineLbl";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "layout", &self.layout)?;
        validate_opt(path, "tx", &self.tx)?;
        validate_opt(path, "numFmt", &self.num_fmt)?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "txPr", &self.tx_pr)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_Trendline`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trendline {
    pub name: Option<String>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub trendline_type: OptVal<TrendlineType>,
    /// Polynomial order, only with `poly`.
    pub order: Option<OptVal<Order>>,
    /// Moving average period, only with `movingAvg`.
    pub period: Option<OptVal<Period>>,
    pub forward: Option<Double>,
    pub backward: Option<Double>,
    pub intercept: Option<Double>,
    pub disp_r_sqr: Option<Boolean>,
    pub disp_eq: Option<Boolean>,
    pub trendline_lbl: Option<TrendlineLabel>,
    pub ext_lst: Option<ExtensionList>,
}

impl Trendline {
    pub fn new(trendline_type: TrendlineType) -> Self {
        Self {
            trendline_type: OptVal::new(trendline_type),
            ..Self::default()
        }
    }

    pub fn polynomial(order: u8) -> Self {
        Self {
            order: Some(OptVal::new(Order(order))),
            ..Self::new(TrendlineType::Poly)
        }
    }

    pub fn moving_average(period: u32) -> Self {
        Self {
            period: Some(OptVal::new(Period(period))),
            ..Self::new(TrendlineType::MovingAvg)
        }
    }
}

impl XmlRead for Trendline {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut trendline = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "name" => trendline.name = Some(reader.read_text(child)?),
                "spPr" => trendline.sp_pr = Some(reader.read(child)?),
                "trendlineType" => trendline.trendline_type = reader.read(child)?,
                "order" => trendline.order = Some(reader.read(child)?),
                "period" => trendline.period = Some(reader.read(child)?),
                "forward" => trendline.forward = Some(reader.read(child)?),
                "backward" => trendline.backward = Some(reader.read(child)?),
                "intercept" => trendline.intercept = Some(reader.read(child)?),
                "dispRSqr" => trendline.disp_r_sqr = Some(reader.read(child)?),
                "dispEq" => trendline.disp_eq = Some(reader.read(child)?),
                "trendlineLbl" => trendline.trendline_lbl = Some(reader.read(child)?),
                "extLst" => trendline.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(trendline)
    }
}

impl XmlWrite for Trendline {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.opt_value_element("c:name", &self.name)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.child("c:trendlineType", &self.trendline_type)?;
        writer.opt_child("c:order", &self.order)?;
        writer.opt_child("c:period", &self.period)?;
        writer.opt_child("c:forward", &self.forward)?;
        writer.opt_child("c:backward", &self.backward)?;
        writer.opt_child("c:intercept", &self.intercept)?;
        writer.opt_child("c:dispRSqr", &self.disp_r_sqr)?;
        writer.opt_child("c:dispEq", &self.disp_eq)?;
        writer.opt_child("c:trendlineLbl", &self.trendline_lbl)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Trendline {
    const TYPE_NAME: &'static str = "CT_Trendline";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        let kind = self.trendline_type.value();
        if self.order.is_some() && kind != TrendlineType::Poly {
            return Err(OoxmlError::validation(
                child_path(path, "order"),
                "only applies to polynomial trendlines",
            ));
        }
        if self.period.is_some() && kind != TrendlineType::MovingAvg {
            return Err(OoxmlError::validation(
                child_path(path, "period"),
                "only applies to moving average trendlines",
            ));
        }
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "order", &self.order)?;
        validate_opt(path, "period", &self.period)?;
        validate_opt(path, "trendlineLbl", &self.trendline_lbl)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_ErrBars`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBars {
    pub err_dir: Option<Val<ErrDir>>,
    pub err_bar_type: OptVal<ErrBarType>,
    pub err_val_type: OptVal<ErrValType>,
    pub no_end_cap: Option<Boolean>,
    /// Custom plus values, only with `cust`.
    pub plus: Option<NumDataSource>,
    /// Custom minus values, only with `cust`.
    pub minus: Option<NumDataSource>,
    pub val: Option<Double>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub ext_lst: Option<ExtensionList>,
}

impl ErrorBars {
    /// Error bars of a fixed kind, e.g. `fixedVal` 5 or `percentage` 10.
    pub fn new(err_val_type: ErrValType, val: f64) -> Self {
        Self {
            err_bar_type: OptVal::new(ErrBarType::Both),
            err_val_type: OptVal::new(err_val_type),
            val: Some(Double::new(val)),
            ..Self::default()
        }
    }
}

impl XmlRead for ErrorBars {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut bars = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "errDir" => bars.err_dir = Some(reader.read(child)?),
                "errBarType" => bars.err_bar_type = reader.read(child)?,
                "errValType" => bars.err_val_type = reader.read(child)?,
                "noEndCap" => bars.no_end_cap = Some(reader.read(child)?),
                "plus" => bars.plus = Some(reader.read(child)?),
                "minus" => bars.minus = Some(reader.read(child)?),
                "val" => bars.val = Some(reader.read(child)?),
                "spPr" => bars.sp_pr = Some(reader.read(child)?),
                "extLst" => bars.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(bars)
    }
}

impl XmlWrite for ErrorBars {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.opt_child("c:errDir", &self.err_dir)?;
        writer.child("c:errBarType", &self.err_bar_type)?;
        writer.child("c:errValType", &self.err_val_type)?;
        writer.opt_child("c:noEndCap", &self.no_end_cap)?;
        writer.opt_child("c:plus", &self.plus)?;
        writer.opt_child("c:minus", &self.minus)?;
        writer.opt_child("c:val", &self.val)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for ErrorBars {
    const TYPE_NAME: &'static str = "CT_ErrBars";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        if self.err_val_type.value() != ErrValType::Custom {
            for (name, present) in [("plus", self.plus.is_some()), ("minus", self.minus.is_some())] {
                if present {
                    return Err(OoxmlError::validation(
                        child_path(path, name),
                        "custom values require errValType 'cust'",
                    ));
                }
            }
        }
        validate_opt(path, "plus", &self.plus)?;
        validate_opt(path, "minus", &self.minus)?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `EG_SerShared`: index, plot order, name and formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesShared {
    pub idx: UnsignedInt,
    pub order: UnsignedInt,
    pub tx: Option<SerTx>,
    pub sp_pr: Option<Box<ShapeProperties>>,
}

impl SeriesShared {
    pub fn new(idx: u32, order: u32) -> Self {
        Self {
            idx: UnsignedInt::new(idx),
            order: UnsignedInt::new(order),
            tx: None,
            sp_pr: None,
        }
    }

    fn read_member<R: BufRead>(
        &mut self,
        reader: &mut XmlReader<R>,
        child: &ElementStart,
    ) -> Result<bool> {
        match child.local_name() {
            "idx" => self.idx = reader.read(child)?,
            "order" => self.order = reader.read(child)?,
            "tx" => self.tx = Some(reader.read(child)?),
            "spPr" => self.sp_pr = Some(reader.read(child)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_members<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.child("c:idx", &self.idx)?;
        writer.child("c:order", &self.order)?;
        writer.opt_child("c:tx", &self.tx)?;
        writer.opt_child("c:spPr", &self.sp_pr)
    }

    fn validate_members(&self, path: &str) -> Result<()> {
        validate_opt(path, "tx", &self.tx)?;
        validate_opt(path, "spPr", &self.sp_pr)
    }
}

/// Access to the members every series type carries.
pub trait Series {
    fn shared(&self) -> &SeriesShared;

    fn shared_mut(&mut self) -> &mut SeriesShared;

    /// Series name, if it has a literal or cached one.
    fn name(&self) -> Option<&str> {
        self.shared().tx.as_ref().and_then(SerTx::text)
    }
}

/// Point overrides must target distinct points.
fn check_data_points(path: &str, d_pt: &[DataPoint]) -> Result<()> {
    let mut seen = HashSet::new();
    for (i, pt) in d_pt.iter().enumerate() {
        let pt_path = format!("{}/dPt[{}]", path, i);
        if !seen.insert(pt.idx.val) {
            return Err(OoxmlError::validation(
                child_path(&pt_path, "idx"),
                format!("duplicate override for point {}", pt.idx.val),
            ));
        }
        pt.validate_with_path(&pt_path)?;
    }
    Ok(())
}

/// Defines a series struct: the shared members, the listed optional and
/// repeated children in schema order, and its XML binding.
macro_rules! series {
    (
        $(#[$meta:meta])*
        $name:ident = $schema:literal {
            $( $field:ident : $kind:ident $ty:ty => $xml:literal ),* $(,)?
        }
        $(max_err_bars = $max_err_bars:literal)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub shared: SeriesShared,
            $( pub $field: series!(@ty $kind $ty), )*
            pub ext_lst: Option<ExtensionList>,
        }

        impl $name {
            pub fn new(idx: u32, order: u32) -> Self {
                Self {
                    shared: SeriesShared::new(idx, order),
                    ..Self::default()
                }
            }

            pub fn with_tx(mut self, tx: SerTx) -> Self {
                self.shared.tx = Some(tx);
                self
            }
        }

        impl Series for $name {
            fn shared(&self) -> &SeriesShared {
                &self.shared
            }

            fn shared_mut(&mut self) -> &mut SeriesShared {
                &mut self.shared
            }
        }

        impl XmlRead for $name {
            fn read_xml<R: BufRead>(
                reader: &mut XmlReader<R>,
                element: &ElementStart,
            ) -> Result<Self> {
                let mut ser = Self::default();
                reader.read_children(element, |reader, child| {
                    if ser.shared.read_member(reader, child)? {
                        return Ok(true);
                    }
                    match child.local_name() {
                        $( $xml => series!(@read $kind ser.$field, reader, child), )*
                        "extLst" => ser.ext_lst = Some(reader.read(child)?),
                        _ => return Ok(false),
                    }
                    Ok(true)
                })?;
                Ok(ser)
            }
        }

        impl XmlWrite for $name {
            fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
                writer.element(name).open()?;
                self.shared.write_members(writer)?;
                $( series!(@write $kind writer, concat!("c:", $xml), &self.$field); )*
                writer.opt_child("c:extLst", &self.ext_lst)?;
                writer.end(name)
            }
        }

        impl Validate for $name {
            const TYPE_NAME: &'static str = $schema;

            fn validate_with_path(&self, path: &str) -> Result<()> {
                self.shared.validate_members(path)?;
                $( series!(@validate $kind self, path, $field, $xml); )*
                $( check_occurs(path, "errBars", self.err_bars.len(), 0, Some($max_err_bars))?; )?
                validate_opt(path, "extLst", &self.ext_lst)
            }
        }
    };

    (@ty opt $ty:ty) => { Option<$ty> };
    (@ty raw $ty:ty) => { Option<$ty> };
    (@ty many $ty:ty) => { Vec<$ty> };
    (@ty points $ty:ty) => { Vec<$ty> };

    (@read opt $slot:expr, $reader:ident, $child:ident) => {
        $slot = Some($reader.read($child)?)
    };
    (@read raw $slot:expr, $reader:ident, $child:ident) => {
        $slot = Some($reader.read_raw($child)?)
    };
    (@read many $slot:expr, $reader:ident, $child:ident) => {
        $slot.push($reader.read($child)?)
    };
    (@read points $slot:expr, $reader:ident, $child:ident) => {
        $slot.push($reader.read($child)?)
    };

    (@write opt $writer:ident, $name:expr, $value:expr) => {
        $writer.opt_child($name, $value)?
    };
    (@write raw $writer:ident, $name:expr, $value:expr) => {
        $writer.opt_child($name, $value)?
    };
    (@write many $writer:ident, $name:expr, $value:expr) => {
        $writer.children($name, $value)?
    };
    (@write points $writer:ident, $name:expr, $value:expr) => {
        $writer.children($name, $value)?
    };

    (@validate opt $self:ident, $path:ident, $field:ident, $xml:literal) => {
        validate_opt($path, $xml, &$self.$field)?
    };
    (@validate raw $self:ident, $path:ident, $field:ident, $xml:literal) => {};
    (@validate many $self:ident, $path:ident, $field:ident, $xml:literal) => {
        validate_all($path, $xml, &$self.$field)?
    };
    (@validate points $self:ident, $path:ident, $field:ident, $xml:literal) => {
        check_data_points($path, &$self.$field)?
    };
}

series! {
    /// `CT_BarSer`
    BarSeries = "CT_BarSer" {
        invert_if_negative: opt Boolean => "invertIfNegative",
        picture_options: raw RawElement => "pictureOptions",
        d_pt: points DataPoint => "dPt",
        d_lbls: opt Box<DataLabels> => "dLbls",
        trendline: many Trendline => "trendline",
        err_bars: opt ErrorBars => "errBars",
        cat: opt AxDataSource => "cat",
        val: opt NumDataSource => "val",
        shape: opt OptVal<BarShape> => "shape",
    }
}

series! {
    /// `CT_LineSer`
    LineSeries = "CT_LineSer" {
        marker: opt Marker => "marker",
        d_pt: points DataPoint => "dPt",
        d_lbls: opt Box<DataLabels> => "dLbls",
        trendline: many Trendline => "trendline",
        err_bars: opt ErrorBars => "errBars",
        cat: opt AxDataSource => "cat",
        val: opt NumDataSource => "val",
        smooth: opt Boolean => "smooth",
    }
}

series! {
    /// `CT_PieSer`
    PieSeries = "CT_PieSer" {
        explosion: opt UnsignedInt => "explosion",
        d_pt: points DataPoint => "dPt",
        d_lbls: opt Box<DataLabels> => "dLbls",
        cat: opt AxDataSource => "cat",
        val: opt NumDataSource => "val",
    }
}

series! {
    /// `CT_AreaSer`
    AreaSeries = "CT_AreaSer" {
        picture_options: raw RawElement => "pictureOptions",
        d_pt: points DataPoint => "dPt",
        d_lbls: opt Box<DataLabels> => "dLbls",
        trendline: many Trendline => "trendline",
        err_bars: many ErrorBars => "errBars",
        cat: opt AxDataSource => "cat",
        val: opt NumDataSource => "val",
    }
    max_err_bars = 2
}

series! {
    /// `CT_ScatterSer`
    ScatterSeries = "CT_ScatterSer" {
        marker: opt Marker => "marker",
        d_pt: points DataPoint => "dPt",
        d_lbls: opt Box<DataLabels> => "dLbls",
        trendline: many Trendline => "trendline",
        err_bars: many ErrorBars => "errBars",
        x_val: opt AxDataSource => "xVal",
        y_val: opt NumDataSource => "yVal",
        smooth: opt Boolean => "smooth",
    }
    max_err_bars = 2
}

series! {
    /// `CT_RadarSer`
    RadarSeries = "CT_RadarSer" {
        marker: opt Marker => "marker",
        d_pt: points DataPoint => "dPt",
        d_lbls: opt Box<DataLabels> => "dLbls",
        cat: opt AxDataSource => "cat",
        val: opt NumDataSource => "val",
    }
}

series! {
    /// `CT_BubbleSer`
    BubbleSeries = "CT_BubbleSer" {
        invert_if_negative: opt Boolean => "invertIfNegative",
        d_pt: points DataPoint => "dPt",
        d_lbls: opt Box<DataLabels> => "dLbls",
        trendline: many Trendline => "trendline",
        err_bars: many ErrorBars => "errBars",
        x_val: opt AxDataSource => "xVal",
        y_val: opt NumDataSource => "yVal",
        bubble_size: opt NumDataSource => "bubbleSize",
        bubble_3d: opt Boolean => "bubble3D",
    }
    max_err_bars = 2
}

series! {
    /// `CT_SurfaceSer`
    SurfaceSeries = "CT_SurfaceSer" {
        cat: opt AxDataSource => "cat",
        val: opt NumDataSource => "val",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::data::{NumData, NumRef, StrData, StrRef};
    use crate::chart::types::DLblPos;
    use crate::drawing::color::Color;
    use crate::drawing::fill::Fill;
    use crate::xml::{from_fragment, to_fragment};

    const BAR_SER: &str = r#"<c:ser><c:idx val="0"/><c:order val="0"/><c:tx><c:strRef><c:f>Sheet1!$B$1</c:f><c:strCache><c:ptCount val="1"/><c:pt idx="0"><c:v>Sales</c:v></c:pt></c:strCache></c:strRef></c:tx><c:spPr><a:solidFill><a:schemeClr val="accent1"/></a:solidFill></c:spPr><c:invertIfNegative val="0"/><c:dPt><c:idx val="1"/><c:invertIfNegative val="0"/><c:bubble3D val="0"/><c:spPr><a:solidFill><a:srgbClr val="FF0000"/></a:solidFill></c:spPr></c:dPt><c:cat><c:strRef><c:f>Sheet1!$A$2:$A$3</c:f><c:strCache><c:ptCount val="2"/><c:pt idx="0"><c:v>Q1</c:v></c:pt><c:pt idx="1"><c:v>Q2</c:v></c:pt></c:strCache></c:strRef></c:cat><c:val><c:numRef><c:f>Sheet1!$B$2:$B$3</c:f><c:numCache><c:formatCode>General</c:formatCode><c:ptCount val="2"/><c:pt idx="0"><c:v>10</c:v></c:pt><c:pt idx="1"><c:v>12.5</c:v></c:pt></c:numCache></c:numRef></c:val></c:ser>"#;

    #[test]
    fn test_bar_series() {
        let ser: BarSeries = from_fragment(BAR_SER).unwrap();
        assert_eq!(ser.name(), Some("Sales"));
        assert_eq!(ser.d_pt.len(), 1);
        assert_eq!(
            ser.val.as_ref().and_then(NumDataSource::data).unwrap().values(),
            vec![Some(10.0), Some(12.5)]
        );
        assert!(ser.validate().is_ok());
        assert_eq!(to_fragment(&ser, "c:ser").unwrap(), BAR_SER);
    }

    #[test]
    fn test_line_series_builder() {
        let mut ser = LineSeries::new(1, 1).with_tx(SerTx::Value("Trend".to_string()));
        ser.marker = Some(Marker::none());
        ser.val = Some(NumDataSource::NumLit(NumData::from_values([1.0, 2.0])));
        ser.smooth = Some(Boolean::new(false));
        assert_eq!(
            to_fragment(&ser, "c:ser").unwrap(),
            r#"<c:ser><c:idx val="1"/><c:order val="1"/><c:tx><c:v>Trend</c:v></c:tx><c:marker><c:symbol val="none"/></c:marker><c:val><c:numLit><c:ptCount val="2"/><c:pt idx="0"><c:v>1</c:v></c:pt><c:pt idx="1"><c:v>2</c:v></c:pt></c:numLit></c:val><c:smooth val="0"/></c:ser>"#
        );
    }

    #[test]
    fn test_duplicate_point_override() {
        let mut ser = PieSeries::new(0, 0);
        let red = ShapeProperties::new().with_fill(Fill::solid(Color::rgb("FF0000")));
        ser.d_pt = vec![DataPoint::new(2), DataPoint::new(2).with_sp_pr(red)];
        let err = ser.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_PieSer/dPt[1]/idx: duplicate override for point 2");
    }

    #[test]
    fn test_scatter_error_bars_limit() {
        let mut ser = ScatterSeries::new(0, 0);
        ser.x_val = Some(AxDataSource::StrLit(StrData::from_values(["a"])));
        ser.y_val = Some(NumDataSource::NumRef(NumRef::new("Sheet1!$B$2")));
        ser.err_bars = vec![
            ErrorBars::new(ErrValType::FixedVal, 1.0),
            ErrorBars::new(ErrValType::Percentage, 5.0),
        ];
        assert!(ser.validate().is_ok());
        ser.err_bars.push(ErrorBars::new(ErrValType::StdDev, 1.0));
        let err = ser.validate().unwrap_err();
        assert!(err.to_string().starts_with("CT_ScatterSer/errBars:"));
    }

    #[test]
    fn test_trendline_order_requires_polynomial() {
        assert!(Trendline::polynomial(3).validate().is_ok());
        let mut trendline = Trendline::new(TrendlineType::Linear);
        trendline.order = Some(OptVal::new(Order(3)));
        let err = trendline.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_Trendline/order: only applies to polynomial trendlines");
        assert!(Trendline::polynomial(7).validate().is_err());
    }

    #[test]
    fn test_trendline_decoding() {
        let xml = r#"<c:trendline><c:name>Average</c:name><c:trendlineType val="movingAvg"/><c:period val="3"/><c:dispRSqr val="0"/><c:dispEq val="0"/></c:trendline>"#;
        let trendline: Trendline = from_fragment(xml).unwrap();
        assert_eq!(trendline.period.unwrap().value(), Period(3));
        assert!(trendline.validate().is_ok());
        assert_eq!(to_fragment(&trendline, "c:trendline").unwrap(), xml);
    }

    #[test]
    fn test_custom_error_values() {
        let xml = r#"<c:errBars><c:errDir val="y"/><c:errBarType val="plus"/><c:errValType val="cust"/><c:noEndCap val="0"/><c:plus><c:numRef><c:f>Sheet1!$C$2:$C$3</c:f></c:numRef></c:plus></c:errBars>"#;
        let mut bars: ErrorBars = from_fragment(xml).unwrap();
        assert_eq!(bars.err_dir.unwrap().val, ErrDir::Y);
        assert!(bars.validate().is_ok());
        assert_eq!(to_fragment(&bars, "c:errBars").unwrap(), xml);

        bars.err_val_type = OptVal::new(ErrValType::FixedVal);
        let err = bars.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_ErrBars/plus: custom values require errValType 'cust'");
    }

    #[test]
    fn test_series_labels_and_bubbles() {
        let xml = r#"<c:ser><c:idx val="0"/><c:order val="0"/><c:dLbls><c:dLblPos val="ctr"/><c:showLegendKey val="0"/><c:showVal val="0"/><c:showCatName val="0"/><c:showSerName val="0"/><c:showPercent val="0"/><c:showBubbleSize val="1"/></c:dLbls><c:xVal><c:numLit><c:ptCount val="1"/><c:pt idx="0"><c:v>3</c:v></c:pt></c:numLit></c:xVal><c:yVal><c:numLit><c:ptCount val="1"/><c:pt idx="0"><c:v>4</c:v></c:pt></c:numLit></c:yVal><c:bubbleSize><c:numLit><c:ptCount val="1"/><c:pt idx="0"><c:v>25</c:v></c:pt></c:numLit></c:bubbleSize><c:bubble3D val="0"/></c:ser>"#;
        let ser: BubbleSeries = from_fragment(xml).unwrap();
        let Some(crate::chart::labels::DataLabelContent::Settings(settings)) =
            ser.d_lbls.as_ref().and_then(|d| d.content.as_ref())
        else {
            panic!("expected label settings");
        };
        assert_eq!(settings.d_lbl_pos.unwrap().val, DLblPos::Center);
        assert!(ser.validate().is_ok());
        assert_eq!(to_fragment(&ser, "c:ser").unwrap(), xml);
    }

    #[test]
    fn test_series_name_from_reference_without_cache() {
        let ser = SurfaceSeries::new(0, 0).with_tx(SerTx::StrRef(StrRef::new("Sheet1!$B$1")));
        assert_eq!(ser.name(), None);
        assert!(ser.validate().is_ok());
    }
}
