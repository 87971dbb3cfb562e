//! The chart part: `c:chartSpace` and `c:chart`, with 3-D view, walls,
//! protection and print settings.

use crate::chart::legend::Legend;
use crate::chart::plot_area::PlotArea;
use crate::chart::title::Title;
use crate::chart::types::{
    ChartStyle, DepthPercent, DispBlanksAs, HPercent, PageSetupOrientation, Perspective, RotX,
    RotY, Thickness,
};
use crate::chart::values::{Boolean, OptVal, Val};
use crate::drawing::color::ColorMapping;
use crate::drawing::ext::ExtensionList;
use crate::drawing::shape::ShapeProperties;
use crate::drawing::text::TextBody;
use crate::error::{OoxmlError, Result};
use crate::xml::namespace::{CHART, DRAWINGML, RELATIONSHIPS};
use crate::xml::raw::read_alternate_content;
use crate::xml::{
    ElementStart, RawElement, Validate, XmlRead, XmlReader, XmlRoot, XmlWrite, XmlWriter,
    child_path, validate_opt,
};
use std::io::{BufRead, Write};

/// `CT_View3D`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View3D {
    pub rot_x: Option<OptVal<RotX>>,
    pub h_percent: Option<OptVal<HPercent>>,
    pub rot_y: Option<OptVal<RotY>>,
    pub depth_percent: Option<OptVal<DepthPercent>>,
    pub r_ang_ax: Option<Boolean>,
    pub perspective: Option<OptVal<Perspective>>,
    pub ext_lst: Option<ExtensionList>,
}

impl XmlRead for View3D {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut view = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "rotX" => view.rot_x = Some(reader.read(child)?),
                "hPercent" => view.h_percent = Some(reader.read(child)?),
                "rotY" => view.rot_y = Some(reader.read(child)?),
                "depthPercent" => view.depth_percent = Some(reader.read(child)?),
                "rAngAx" => view.r_ang_ax = Some(reader.read(child)?),
                "perspective" => view.perspective = Some(reader.read(child)?),
                "extLst" => view.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(view)
    }
}

impl XmlWrite for View3D {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:rotX", &self.rot_x)?;
        writer.opt_child("c:hPercent", &self.h_percent)?;
        writer.opt_child("c:rotY", &self.rot_y)?;
        writer.opt_child("c:depthPercent", &self.depth_percent)?;
        writer.opt_child("c:rAngAx", &self.r_ang_ax)?;
        writer.opt_child("c:perspective", &self.perspective)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for View3D {
    const TYPE_NAME: &'static str = "CT_View3D";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "rotX", &self.rot_x)?;
        validate_opt(path, "hPercent", &self.h_percent)?;
        validate_opt(path, "rotY", &self.rot_y)?;
        validate_opt(path, "depthPercent", &self.depth_percent)?;
        validate_opt(path, "perspective", &self.perspective)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_Surface`: floor, side wall or back wall of a 3-D chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Surface {
    pub thickness: Option<Val<Thickness>>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub picture_options: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl XmlRead for Surface {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut surface = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "thickness" => surface.thickness = Some(reader.read(child)?),
                "spPr" => surface.sp_pr = Some(reader.read(child)?),
                "pictureOptions" => surface.picture_options = Some(reader.read_raw(child)?),
                "extLst" => surface.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(surface)
    }
}

impl XmlWrite for Surface {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:thickness", &self.thickness)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:pictureOptions", &self.picture_options)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Surface {
    const TYPE_NAME: &'static str = "CT_Surface";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "thickness", &self.thickness)?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_Chart`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    pub title: Option<Box<Title>>,
    pub auto_title_deleted: Option<Boolean>,
    pub pivot_fmts: Option<RawElement>,
    pub view_3d: Option<View3D>,
    pub floor: Option<Surface>,
    pub side_wall: Option<Surface>,
    pub back_wall: Option<Surface>,
    pub plot_area: Box<PlotArea>,
    pub legend: Option<Box<Legend>>,
    pub plot_vis_only: Option<Boolean>,
    pub disp_blanks_as: Option<OptVal<DispBlanksAs>>,
    pub show_d_lbls_over_max: Option<Boolean>,
    pub ext_lst: Option<ExtensionList>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chart around `plot_area` with the flags Office writes by default.
    pub fn with_plot_area(plot_area: PlotArea) -> Self {
        Self {
            auto_title_deleted: Some(Boolean::new(false)),
            plot_area: Box::new(plot_area),
            plot_vis_only: Some(Boolean::new(true)),
            disp_blanks_as: Some(OptVal::new(DispBlanksAs::Gap)),
            ..Self::default()
        }
    }
}

impl XmlRead for Chart {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut chart = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "title" => chart.title = Some(reader.read(child)?),
                "autoTitleDeleted" => chart.auto_title_deleted = Some(reader.read(child)?),
                "pivotFmts" => chart.pivot_fmts = Some(reader.read_raw(child)?),
                "view3D" => chart.view_3d = Some(reader.read(child)?),
                "floor" => chart.floor = Some(reader.read(child)?),
                "sideWall" => chart.side_wall = Some(reader.read(child)?),
                "backWall" => chart.back_wall = Some(reader.read(child)?),
                "plotArea" => chart.plot_area = reader.read(child)?,
                "legend" => chart.legend = Some(reader.read(child)?),
                "plotVisOnly" => chart.plot_vis_only = Some(reader.read(child)?),
                "dispBlanksAs" => chart.disp_blanks_as = Some(reader.read(child)?),
                "showDLblsOverMax" => chart.show_d_lbls_over_max = Some(reader.read(child)?),
                "extLst" => chart.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(chart)
    }
}

impl XmlWrite for Chart {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.opt_child("c:title", &self.title)?;
        writer.opt_child("c:autoTitleDeleted", &self.auto_title_deleted)?;
        writer.opt_child("c:pivotFmts", &self.pivot_fmts)?;
        writer.opt_child("c:view3D", &self.view_3d)?;
        writer.opt_child("c:floor", &self.floor)?;
        writer.opt_child("c:sideWall", &self.side_wall)?;
        writer.opt_child("c:backWall", &self.back_wall)?;
        writer.child("c:plotArea", &self.plot_area)?;
        writer.opt_child("c:legend", &self.legend)?;
        writer.opt_child("c:plotVisOnly", &self.plot_vis_only)?;
        writer.opt_child("c:dispBlanksAs", &self.disp_blanks_as)?;
        writer.opt_child("c:showDLblsOverMax", &self.show_d_lbls_over_max)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Chart {
    const TYPE_NAME: &'static str = "CT_Chart";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "title", &self.title)?;
        validate_opt(path, "view3D", &self.view_3d)?;
        validate_opt(path, "floor", &self.floor)?;
        validate_opt(path, "sideWall", &self.side_wall)?;
        validate_opt(path, "backWall", &self.back_wall)?;
        self.plot_area.validate_with_path(&child_path(path, "plotArea"))?;
        validate_opt(path, "legend", &self.legend)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_Protection`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Protection {
    pub chart_object: Option<Boolean>,
    pub data: Option<Boolean>,
    pub formatting: Option<Boolean>,
    pub selection: Option<Boolean>,
    pub user_interface: Option<Boolean>,
}

impl XmlRead for Protection {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut protection = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "chartObject" => protection.chart_object = Some(reader.read(child)?),
                "data" => protection.data = Some(reader.read(child)?),
                "formatting" => protection.formatting = Some(reader.read(child)?),
                "selection" => protection.selection = Some(reader.read(child)?),
                "userInterface" => protection.user_interface = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(protection)
    }
}

impl XmlWrite for Protection {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:chartObject", &self.chart_object)?;
        writer.opt_child("c:data", &self.data)?;
        writer.opt_child("c:formatting", &self.formatting)?;
        writer.opt_child("c:selection", &self.selection)?;
        writer.opt_child("c:userInterface", &self.user_interface)?;
        writer.end(name)
    }
}

impl Validate for Protection {
    const TYPE_NAME: &'static str = "CT_Protection";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `CT_RelId`: a relationship reference (`r:id`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelId {
    pub id: String,
}

impl RelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Relationship ids are non-empty.
fn check_rel_id(path: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(OoxmlError::validation(
            format!("{}/@r:id", path),
            "relationship id is required",
        ));
    }
    Ok(())
}

impl XmlRead for RelId {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let rel = Self {
            id: element.required_attr("id")?,
        };
        reader.read_empty(element)?;
        Ok(rel)
    }
}

impl XmlWrite for RelId {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).attr("r:id", &self.id).empty()
    }
}

impl Validate for RelId {
    const TYPE_NAME: &'static str = "CT_RelId";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        check_rel_id(path, &self.id)
    }
}

/// `CT_ExternalData`: the embedded workbook holding the chart data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalData {
    pub id: String,
    pub auto_update: Option<Boolean>,
}

impl ExternalData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            auto_update: Some(Boolean::new(false)),
        }
    }
}

impl XmlRead for ExternalData {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut data = Self {
            id: element.required_attr("id")?,
            auto_update: None,
        };
        reader.read_children(element, |reader, child| {
            if child.local_name() != "autoUpdate" {
                return Ok(false);
            }
            data.auto_update = Some(reader.read(child)?);
            Ok(true)
        })?;
        Ok(data)
    }
}

impl XmlWrite for ExternalData {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer.element(name).attr("r:id", &self.id);
        match &self.auto_update {
            None => tag.empty(),
            Some(auto_update) => {
                tag.open()?;
                writer.child("c:autoUpdate", auto_update)?;
                writer.end(name)
            },
        }
    }
}

impl Validate for ExternalData {
    const TYPE_NAME: &'static str = "CT_ExternalData";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        check_rel_id(path, &self.id)
    }
}

/// `CT_HeaderFooter` (chart print settings)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderFooter {
    pub align_with_margins: Option<bool>,
    pub different_odd_even: Option<bool>,
    pub different_first: Option<bool>,
    pub odd_header: Option<String>,
    pub odd_footer: Option<String>,
    pub even_header: Option<String>,
    pub even_footer: Option<String>,
    pub first_header: Option<String>,
    pub first_footer: Option<String>,
}

impl XmlRead for HeaderFooter {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut hf = Self {
            align_with_margins: element.parse_attr("alignWithMargins")?,
            different_odd_even: element.parse_attr("differentOddEven")?,
            different_first: element.parse_attr("differentFirst")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            let slot = match child.local_name() {
                "oddHeader" => &mut hf.odd_header,
                "oddFooter" => &mut hf.odd_footer,
                "evenHeader" => &mut hf.even_header,
                "evenFooter" => &mut hf.even_footer,
                "firstHeader" => &mut hf.first_header,
                "firstFooter" => &mut hf.first_footer,
                _ => return Ok(false),
            };
            *slot = Some(reader.read_text(child)?);
            Ok(true)
        })?;
        Ok(hf)
    }
}

impl XmlWrite for HeaderFooter {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("alignWithMargins", self.align_with_margins.as_ref())
            .opt_attr("differentOddEven", self.different_odd_even.as_ref())
            .opt_attr("differentFirst", self.different_first.as_ref());
        let texts = [
            ("c:oddHeader", &self.odd_header),
            ("c:oddFooter", &self.odd_footer),
            ("c:evenHeader", &self.even_header),
            ("c:evenFooter", &self.even_footer),
            ("c:firstHeader", &self.first_header),
            ("c:firstFooter", &self.first_footer),
        ];
        if texts.iter().all(|(_, text)| text.is_none()) {
            return tag.empty();
        }
        tag.open()?;
        for (child, text) in texts {
            writer.opt_value_element(child, text)?;
        }
        writer.end(name)
    }
}

impl Validate for HeaderFooter {
    const TYPE_NAME: &'static str = "CT_HeaderFooter";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `CT_PageMargins`: inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub l: f64,
    pub r: f64,
    pub t: f64,
    pub b: f64,
    pub header: f64,
    pub footer: f64,
}

impl Default for PageMargins {
    /// Office's normal margins.
    fn default() -> Self {
        Self {
            l: 0.7,
            r: 0.7,
            t: 0.75,
            b: 0.75,
            header: 0.3,
            footer: 0.3,
        }
    }
}

impl XmlRead for PageMargins {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let margins = Self {
            l: element.required_attr("l")?,
            r: element.required_attr("r")?,
            t: element.required_attr("t")?,
            b: element.required_attr("b")?,
            header: element.required_attr("header")?,
            footer: element.required_attr("footer")?,
        };
        reader.read_empty(element)?;
        Ok(margins)
    }
}

impl XmlWrite for PageMargins {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .attr("b", &self.b)
            .attr("l", &self.l)
            .attr("r", &self.r)
            .attr("t", &self.t)
            .attr("header", &self.header)
            .attr("footer", &self.footer)
            .empty()
    }
}

impl Validate for PageMargins {
    const TYPE_NAME: &'static str = "CT_PageMargins";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        let margins = [
            ("l", self.l),
            ("r", self.r),
            ("t", self.t),
            ("b", self.b),
            ("header", self.header),
            ("footer", self.footer),
        ];
        for (name, value) in margins {
            if value < 0.0 {
                return Err(OoxmlError::validation(
                    format!("{}/@{}", path, name),
                    format!("margin must not be negative (have {})", value),
                ));
            }
        }
        Ok(())
    }
}

/// `CT_PageSetup`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSetup {
    pub paper_size: Option<u32>,
    /// `ST_PositiveUniversalMeasure`, e.g. `297mm`
    pub paper_height: Option<String>,
    pub paper_width: Option<String>,
    pub first_page_number: Option<u32>,
    pub orientation: Option<PageSetupOrientation>,
    pub black_and_white: Option<bool>,
    pub draft: Option<bool>,
    pub use_first_page_number: Option<bool>,
    pub horizontal_dpi: Option<i32>,
    pub vertical_dpi: Option<i32>,
    pub copies: Option<u32>,
}

impl XmlRead for PageSetup {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let setup = Self {
            paper_size: element.parse_attr("paperSize")?,
            paper_height: element.parse_attr("paperHeight")?,
            paper_width: element.parse_attr("paperWidth")?,
            first_page_number: element.parse_attr("firstPageNumber")?,
            orientation: element.parse_attr("orientation")?,
            black_and_white: element.parse_attr("blackAndWhite")?,
            draft: element.parse_attr("draft")?,
            use_first_page_number: element.parse_attr("useFirstPageNumber")?,
            horizontal_dpi: element.parse_attr("horizontalDpi")?,
            vertical_dpi: element.parse_attr("verticalDpi")?,
            copies: element.parse_attr("copies")?,
        };
        reader.read_empty(element)?;
        Ok(setup)
    }
}

impl XmlWrite for PageSetup {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .opt_attr("paperSize", self.paper_size.as_ref())
            .opt_attr("paperHeight", self.paper_height.as_ref())
            .opt_attr("paperWidth", self.paper_width.as_ref())
            .opt_attr("firstPageNumber", self.first_page_number.as_ref())
            .opt_attr("orientation", self.orientation.as_ref())
            .opt_attr("blackAndWhite", self.black_and_white.as_ref())
            .opt_attr("draft", self.draft.as_ref())
            .opt_attr("useFirstPageNumber", self.use_first_page_number.as_ref())
            .opt_attr("horizontalDpi", self.horizontal_dpi.as_ref())
            .opt_attr("verticalDpi", self.vertical_dpi.as_ref())
            .opt_attr("copies", self.copies.as_ref())
            .empty()
    }
}

/// `ST_PositiveUniversalMeasure`: a positive number followed by a unit.
fn is_positive_measure(value: &str) -> bool {
    const UNITS: [&str; 6] = ["mm", "cm", "in", "pt", "pc", "pi"];
    let Some(unit) = UNITS.iter().find(|unit| value.ends_with(*unit)) else {
        return false;
    };
    let number = &value[..value.len() - unit.len()];
    fast_float2::parse::<f64, _>(number).is_ok_and(|n| n > 0.0)
}

impl Validate for PageSetup {
    const TYPE_NAME: &'static str = "CT_PageSetup";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        for (name, measure) in [("paperHeight", &self.paper_height), ("paperWidth", &self.paper_width)] {
            if let Some(measure) = measure {
                if !is_positive_measure(measure) {
                    return Err(OoxmlError::validation(
                        format!("{}/@{}", path, name),
                        format!("'{}' is not a positive universal measure", measure),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// `CT_PrintSettings`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrintSettings {
    pub header_footer: Option<HeaderFooter>,
    pub page_margins: Option<PageMargins>,
    pub page_setup: Option<PageSetup>,
    pub legacy_drawing_hf: Option<RelId>,
}

impl XmlRead for PrintSettings {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut settings = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "headerFooter" => settings.header_footer = Some(reader.read(child)?),
                "pageMargins" => settings.page_margins = Some(reader.read(child)?),
                "pageSetup" => settings.page_setup = Some(reader.read(child)?),
                "legacyDrawingHF" => settings.legacy_drawing_hf = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(settings)
    }
}

impl XmlWrite for PrintSettings {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:headerFooter", &self.header_footer)?;
        writer.opt_child("c:pageMargins", &self.page_margins)?;
        writer.opt_child("c:pageSetup", &self.page_setup)?;
        writer.opt_child("c:legacyDrawingHF", &self.legacy_drawing_hf)?;
        writer.end(name)
    }
}

impl Validate for PrintSettings {
    const TYPE_NAME: &'static str = "CT_PrintSettings";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "headerFooter", &self.header_footer)?;
        validate_opt(path, "pageMargins", &self.page_margins)?;
        validate_opt(path, "pageSetup", &self.page_setup)?;
        validate_opt(path, "legacyDrawingHF", &self.legacy_drawing_hf)
    }
}

/// `CT_ChartSpace`: root of a chart part (`/xl/charts/chart1.xml`,
/// `/ppt/charts/chart1.xml`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSpace {
    pub date1904: Option<Boolean>,
    /// `c:lang`, e.g. `en-US`
    pub lang: Option<Val<String>>,
    pub rounded_corners: Option<Boolean>,
    /// Markup-compatibility block Office writes after `roundedCorners`
    /// (the 2010 chart style), kept verbatim.
    pub alternate_content: Option<RawElement>,
    pub style: Option<Val<ChartStyle>>,
    pub clr_map_ovr: Option<ColorMapping>,
    pub pivot_source: Option<RawElement>,
    pub protection: Option<Protection>,
    pub chart: Chart,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub tx_pr: Option<Box<TextBody>>,
    pub external_data: Option<ExternalData>,
    pub print_settings: Option<PrintSettings>,
    pub user_shapes: Option<RelId>,
    pub ext_lst: Option<ExtensionList>,
}

impl ChartSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chart part around `plot_area`, with the settings Office writes for
    /// a new chart.
    pub fn with_plot_area(plot_area: PlotArea) -> Self {
        Self {
            date1904: Some(Boolean::new(false)),
            lang: Some(Val::new("en-US".to_string())),
            rounded_corners: Some(Boolean::new(false)),
            chart: Chart::with_plot_area(plot_area),
            ..Self::default()
        }
    }
}

impl XmlRead for ChartSpace {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut space = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "date1904" => space.date1904 = Some(reader.read(child)?),
                "lang" => space.lang = Some(reader.read(child)?),
                "roundedCorners" => space.rounded_corners = Some(reader.read(child)?),
                "AlternateContent" => {
                    space.alternate_content = Some(read_alternate_content(reader, child)?)
                },
                "style" => space.style = Some(reader.read(child)?),
                "clrMapOvr" => space.clr_map_ovr = Some(reader.read(child)?),
                "pivotSource" => space.pivot_source = Some(reader.read_raw(child)?),
                "protection" => space.protection = Some(reader.read(child)?),
                "chart" => space.chart = reader.read(child)?,
                "spPr" => space.sp_pr = Some(reader.read(child)?),
                "txPr" => space.tx_pr = Some(reader.read(child)?),
                "externalData" => space.external_data = Some(reader.read(child)?),
                "printSettings" => space.print_settings = Some(reader.read(child)?),
                "userShapes" => space.user_shapes = Some(reader.read(child)?),
                "extLst" => space.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(space)
    }
}

impl XmlWrite for ChartSpace {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.opt_child("c:date1904", &self.date1904)?;
        writer.opt_child("c:lang", &self.lang)?;
        writer.opt_child("c:roundedCorners", &self.rounded_corners)?;
        writer.opt_child("mc:AlternateContent", &self.alternate_content)?;
        writer.opt_child("c:style", &self.style)?;
        writer.opt_child("c:clrMapOvr", &self.clr_map_ovr)?;
        writer.opt_child("c:pivotSource", &self.pivot_source)?;
        writer.opt_child("c:protection", &self.protection)?;
        writer.child("c:chart", &self.chart)?;
        writer.opt_child("c:spPr", &self.sp_pr)?;
        writer.opt_child("c:txPr", &self.tx_pr)?;
        writer.opt_child("c:externalData", &self.external_data)?;
        writer.opt_child("c:printSettings", &self.print_settings)?;
        writer.opt_child("c:userShapes", &self.user_shapes)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for ChartSpace {
    const TYPE_NAME: &'static str = "CT_ChartSpace";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "style", &self.style)?;
        validate_opt(path, "clrMapOvr", &self.clr_map_ovr)?;
        self.chart.validate_with_path(&child_path(path, "chart"))?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "txPr", &self.tx_pr)?;
        validate_opt(path, "externalData", &self.external_data)?;
        validate_opt(path, "printSettings", &self.print_settings)?;
        validate_opt(path, "userShapes", &self.user_shapes)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

impl XmlRoot for ChartSpace {
    const ROOT: &'static str = "c:chartSpace";
    const NAMESPACES: &'static [(&'static str, &'static str)] =
        &[("c", CHART), ("a", DRAWINGML), ("r", RELATIONSHIPS)];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::axis::{CategoryAxis, PlotAreaAxis, ValueAxis};
    use crate::chart::data::{AxDataSource, NumDataSource, NumRef, SerTx, StrRef};
    use crate::chart::plot_area::{BarChart, LineChart, PlotAreaChart};
    use crate::chart::series::{BarSeries, LineSeries, Series};
    use crate::chart::types::LegendPos;
    use crate::xml::{ReadOptions, WriteOptions, from_fragment, from_reader, from_str, to_fragment, to_string, to_string_with};
    use std::io::BufReader;

    const CHART_PART: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <c:date1904 val="0"/>
  <c:lang val="en-US"/>
  <c:roundedCorners val="0"/>
  <mc:AlternateContent xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">
    <mc:Choice Requires="c14" xmlns:c14="http://schemas.microsoft.com/office/drawing/2007/8/2/chart"><c14:style val="102"/></mc:Choice>
    <mc:Fallback><c:style val="2"/></mc:Fallback>
  </mc:AlternateContent>
  <c:chart>
    <c:title><c:overlay val="0"/></c:title>
    <c:autoTitleDeleted val="0"/>
    <c:plotArea>
      <c:layout/>
      <c:lineChart>
        <c:grouping val="standard"/>
        <c:varyColors val="0"/>
        <c:ser>
          <c:idx val="0"/>
          <c:order val="0"/>
          <c:tx><c:strRef><c:f>Sheet1!$B$1</c:f><c:strCache><c:ptCount val="1"/><c:pt idx="0"><c:v>Visitors</c:v></c:pt></c:strCache></c:strRef></c:tx>
          <c:marker><c:symbol val="none"/></c:marker>
          <c:cat><c:numRef><c:f>Sheet1!$A$2:$A$4</c:f><c:numCache><c:formatCode>m/d/yyyy</c:formatCode><c:ptCount val="3"/><c:pt idx="0"><c:v>45292</c:v></c:pt><c:pt idx="1"><c:v>45293</c:v></c:pt><c:pt idx="2"><c:v>45294</c:v></c:pt></c:numCache></c:numRef></c:cat>
          <c:val><c:numRef><c:f>Sheet1!$B$2:$B$4</c:f><c:numCache><c:formatCode>General</c:formatCode><c:ptCount val="3"/><c:pt idx="0"><c:v>120</c:v></c:pt><c:pt idx="1"><c:v>98</c:v></c:pt><c:pt idx="2"><c:v>143</c:v></c:pt></c:numCache></c:numRef></c:val>
          <c:smooth val="0"/>
        </c:ser>
        <c:marker val="1"/>
        <c:axId val="500"/>
        <c:axId val="501"/>
      </c:lineChart>
      <c:dateAx>
        <c:axId val="500"/>
        <c:scaling><c:orientation val="minMax"/></c:scaling>
        <c:delete val="0"/>
        <c:axPos val="b"/>
        <c:numFmt formatCode="m/d/yyyy" sourceLinked="1"/>
        <c:majorTickMark val="out"/>
        <c:minorTickMark val="none"/>
        <c:tickLblPos val="nextTo"/>
        <c:crossAx val="501"/>
        <c:crosses val="autoZero"/>
        <c:auto val="1"/>
        <c:lblOffset val="100"/>
        <c:baseTimeUnit val="days"/>
      </c:dateAx>
      <c:valAx>
        <c:axId val="501"/>
        <c:scaling><c:orientation val="minMax"/></c:scaling>
        <c:delete val="0"/>
        <c:axPos val="l"/>
        <c:majorGridlines/>
        <c:numFmt formatCode="General" sourceLinked="1"/>
        <c:majorTickMark val="out"/>
        <c:minorTickMark val="none"/>
        <c:tickLblPos val="nextTo"/>
        <c:crossAx val="500"/>
        <c:crosses val="autoZero"/>
        <c:crossBetween val="between"/>
      </c:valAx>
    </c:plotArea>
    <c:legend><c:legendPos val="r"/><c:overlay val="0"/></c:legend>
    <c:plotVisOnly val="1"/>
    <c:dispBlanksAs val="gap"/>
  </c:chart>
  <c:externalData r:id="rId1"><c:autoUpdate val="0"/></c:externalData>
  <c:printSettings>
    <c:headerFooter/>
    <c:pageMargins b="0.75" l="0.7" r="0.7" t="0.75" header="0.3" footer="0.3"/>
    <c:pageSetup/>
  </c:printSettings>
</c:chartSpace>"#;

    #[test]
    fn test_decode_chart_part() {
        let space: ChartSpace = from_str(CHART_PART).unwrap();
        assert_eq!(space.lang.as_ref().unwrap().val, "en-US");
        assert!(space.alternate_content.is_some());

        let plot_area = &space.chart.plot_area;
        assert_eq!(plot_area.axes.len(), 2);
        let PlotAreaChart::Line(line) = &plot_area.charts[0] else {
            panic!("expected a line chart");
        };
        assert_eq!(line.ser[0].name(), Some("Visitors"));
        let values = line.ser[0].val.as_ref().and_then(NumDataSource::data).unwrap().values();
        assert_eq!(values, vec![Some(120.0), Some(98.0), Some(143.0)]);

        assert_eq!(space.external_data.as_ref().unwrap().id, "rId1");
        assert_eq!(space.print_settings.as_ref().unwrap().page_margins, Some(PageMargins::default()));
        assert!(space.validate().is_ok());
    }

    #[test]
    fn test_encode_decode_is_stable() {
        let space: ChartSpace = from_str(CHART_PART).unwrap();
        let text = to_string(&space).unwrap();
        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(text.contains(r#"<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart""#));
        assert!(text.contains(r#"<mc:AlternateContent xmlns:mc="#));
        let again: ChartSpace = from_str(&text).unwrap();
        assert_eq!(again, space);
        assert_eq!(to_string(&again).unwrap(), text);
    }

    #[test]
    fn test_decode_on_small_stack() {
        let space = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(|| {
                let space: ChartSpace = from_str(CHART_PART).unwrap();
                space.validate().unwrap();
                to_string(&space).unwrap();
                space
            })
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(space.chart.plot_area.charts.len(), 1);
    }

    #[test]
    fn test_alternate_content_declared_on_root() {
        let xml = CHART_PART
            .replacen(
                r#"<mc:AlternateContent xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">"#,
                "<mc:AlternateContent>",
                1,
            )
            .replacen(
                r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
                r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">"#,
                1,
            );
        let space: ChartSpace = from_str(&xml).unwrap();
        let text = to_string(&space).unwrap();
        assert!(text.contains(r#"<mc:AlternateContent xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">"#));
        let again: ChartSpace = from_str(&text).unwrap();
        assert_eq!(again, space);
    }

    #[test]
    fn test_wrong_root_is_rejected() {
        let err = from_str::<ChartSpace>("<p:sld/>").unwrap_err();
        assert!(matches!(
            err,
            OoxmlError::UnexpectedElement { ref expected, ref found }
                if expected == "c:chartSpace" && found == "p:sld"
        ));
    }

    #[test]
    fn test_truncated_part_is_rejected() {
        let end = CHART_PART.find("<c:chart>").unwrap();
        let err = from_str::<ChartSpace>(&CHART_PART[..end]).unwrap_err();
        assert!(matches!(err, OoxmlError::UnexpectedEof(_)));
    }

    fn sample_space() -> ChartSpace {
        let mut bar = BarChart::columns(1, 2);
        let mut ser = BarSeries::new(0, 0).with_tx(SerTx::Value("Units".to_string()));
        ser.cat = Some(AxDataSource::StrRef(StrRef::new("Sheet1!$A$2:$A$5")));
        ser.val = Some(NumDataSource::NumRef(NumRef::new("Sheet1!$B$2:$B$5")));
        bar.ser.push(ser);
        let plot_area = PlotArea::new()
            .with_chart(PlotAreaChart::Bar(bar))
            .with_axis(PlotAreaAxis::Category(CategoryAxis::new(1, 2)))
            .with_axis(PlotAreaAxis::Value(ValueAxis::new(2, 1)));
        let mut space = ChartSpace::with_plot_area(plot_area);
        space.chart.title = Some(Box::new(Title::from_text("Units sold")));
        space.chart.legend = Some(Box::new(Legend::new(LegendPos::Bottom)));
        space.external_data = Some(ExternalData::new("rId2"));
        space
    }

    #[test]
    fn test_build_and_validate() {
        let space = sample_space();
        assert!(space.validate().is_ok());
        let text = to_string_with(&space, WriteOptions::new().with_validate(true)).unwrap();
        let back: ChartSpace = from_str(&text).unwrap();
        assert_eq!(back, space);
    }

    #[test]
    fn test_invalid_part_is_not_written() {
        let mut space = sample_space();
        if let PlotAreaChart::Bar(bar) = &mut space.chart.plot_area.charts[0] {
            bar.ax_id.clear();
        }
        let err = to_string_with(&space, WriteOptions::new().with_validate(true)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "CT_ChartSpace/chart/plotArea/barChart[0]/axId: must occur at least 2 time(s) (have 0)"
        );
    }

    #[test]
    fn test_file_round_trip() {
        let space = sample_space();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        crate::xml::to_writer(&space, &mut file, WriteOptions::new()).unwrap();
        let reopened = std::fs::File::open(file.path()).unwrap();
        let back: ChartSpace =
            from_reader(BufReader::new(reopened), ReadOptions::new().with_validate(true)).unwrap();
        assert_eq!(back, space);
    }

    #[test]
    fn test_combined_groups_share_axes() {
        let mut space = sample_space();
        let mut line = LineChart::standard(1, 2);
        line.ser.push(LineSeries::new(1, 1));
        space.chart.plot_area.charts.push(PlotAreaChart::Line(line));
        assert!(space.validate().is_ok());
        assert_eq!(space.chart.plot_area.series().len(), 2);
    }

    #[test]
    fn test_view_3d_ranges() {
        let xml = r#"<c:view3D><c:rotX val="15"/><c:rotY val="20"/><c:depthPercent val="100"/><c:rAngAx val="1"/></c:view3D>"#;
        let view: View3D = from_fragment(xml).unwrap();
        assert!(view.validate().is_ok());
        assert_eq!(to_fragment(&view, "c:view3D").unwrap(), xml);

        let tilted = View3D {
            rot_x: Some(OptVal::new(RotX(95))),
            ..View3D::default()
        };
        let err = tilted.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_View3D/rotX/@val: value must be <= 90 (have 95)");
    }

    #[test]
    fn test_page_setup_measures() {
        let setup: PageSetup =
            from_fragment(r#"<c:pageSetup paperHeight="297mm" paperWidth="210mm" orientation="landscape"/>"#)
                .unwrap();
        assert_eq!(setup.orientation, Some(PageSetupOrientation::Landscape));
        assert!(setup.validate().is_ok());
        let bad = PageSetup {
            paper_width: Some("wide".to_string()),
            ..PageSetup::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_external_data_needs_id() {
        let err = ExternalData::new("").validate().unwrap_err();
        assert!(err.to_string().ends_with("CT_ExternalData/@r:id: relationship id is required"));
    }
}
