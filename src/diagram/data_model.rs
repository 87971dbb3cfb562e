//! The diagram data model (`dgm:dataModel`): the points (nodes, transitions
//! and presentation points) of a diagram and the connections between them.

use crate::diagram::types::{CxnType, ModelId, PtType};
use crate::drawing::ext::ExtensionList;
use crate::drawing::fill::Fill;
use crate::drawing::line::LineProperties;
use crate::drawing::shape::ShapeProperties;
use crate::drawing::style::ShapeStyle;
use crate::drawing::text::TextBody;
use crate::error::{OoxmlError, Result};
use crate::xml::namespace::{DIAGRAM, DRAWINGML, RELATIONSHIPS};
use crate::xml::{
    ElementStart, RawElement, Validate, XmlChoice, XmlRead, XmlReader, XmlRoot, XmlWrite,
    XmlWriter, child_path, validate_opt, validate_opt_choice, validate_opt_value, validate_value,
};
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, Write};

/// `CT_ElemPropSet`: presentation settings of a point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPropertySet {
    pub pres_assoc_id: Option<ModelId>,
    pub pres_name: Option<String>,
    pub pres_style_lbl: Option<String>,
    pub pres_style_idx: Option<i32>,
    pub pres_style_cnt: Option<i32>,
    pub lo_type_id: Option<String>,
    pub lo_cat_id: Option<String>,
    pub qs_type_id: Option<String>,
    pub qs_cat_id: Option<String>,
    pub cs_type_id: Option<String>,
    pub cs_cat_id: Option<String>,
    pub coherent_3d_off: Option<bool>,
    pub phldr_t: Option<String>,
    pub phldr: Option<bool>,
    pub cust_ang: Option<i32>,
    pub cust_flip_vert: Option<bool>,
    pub cust_flip_hor: Option<bool>,
    pub cust_sz_x: Option<i32>,
    pub cust_sz_y: Option<i32>,
    pub cust_scale_x: Option<i32>,
    pub cust_scale_y: Option<i32>,
    pub cust_t: Option<bool>,
    pub cust_lin_fact_x: Option<i32>,
    pub cust_lin_fact_y: Option<i32>,
    pub cust_lin_fact_neighbor_x: Option<i32>,
    pub cust_lin_fact_neighbor_y: Option<i32>,
    pub cust_rad_scale_rad: Option<i32>,
    pub cust_rad_scale_inc: Option<i32>,
    /// `dgm:presLayoutVars`, kept verbatim
    pub pres_layout_vars: Option<RawElement>,
    pub style: Option<ShapeStyle>,
}

impl ElementPropertySet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl XmlRead for ElementPropertySet {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut pr_set = Self {
            pres_assoc_id: element.parse_attr("presAssocID")?,
            pres_name: element.parse_attr("presName")?,
            pres_style_lbl: element.parse_attr("presStyleLbl")?,
            pres_style_idx: element.parse_attr("presStyleIdx")?,
            pres_style_cnt: element.parse_attr("presStyleCnt")?,
            lo_type_id: element.parse_attr("loTypeId")?,
            lo_cat_id: element.parse_attr("loCatId")?,
            qs_type_id: element.parse_attr("qsTypeId")?,
            qs_cat_id: element.parse_attr("qsCatId")?,
            cs_type_id: element.parse_attr("csTypeId")?,
            cs_cat_id: element.parse_attr("csCatId")?,
            coherent_3d_off: element.parse_attr("coherent3DOff")?,
            phldr_t: element.parse_attr("phldrT")?,
            phldr: element.parse_attr("phldr")?,
            cust_ang: element.parse_attr("custAng")?,
            cust_flip_vert: element.parse_attr("custFlipVert")?,
            cust_flip_hor: element.parse_attr("custFlipHor")?,
            cust_sz_x: element.parse_attr("custSzX")?,
            cust_sz_y: element.parse_attr("custSzY")?,
            cust_scale_x: element.parse_attr("custScaleX")?,
            cust_scale_y: element.parse_attr("custScaleY")?,
            cust_t: element.parse_attr("custT")?,
            cust_lin_fact_x: element.parse_attr("custLinFactX")?,
            cust_lin_fact_y: element.parse_attr("custLinFactY")?,
            cust_lin_fact_neighbor_x: element.parse_attr("custLinFactNeighborX")?,
            cust_lin_fact_neighbor_y: element.parse_attr("custLinFactNeighborY")?,
            cust_rad_scale_rad: element.parse_attr("custRadScaleRad")?,
            cust_rad_scale_inc: element.parse_attr("custRadScaleInc")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "presLayoutVars" => pr_set.pres_layout_vars = Some(reader.read_raw(child)?),
                "style" => pr_set.style = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(pr_set)
    }
}

impl XmlWrite for ElementPropertySet {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("presAssocID", self.pres_assoc_id.as_ref())
            .opt_attr("presName", self.pres_name.as_ref())
            .opt_attr("presStyleLbl", self.pres_style_lbl.as_ref())
            .opt_attr("presStyleIdx", self.pres_style_idx.as_ref())
            .opt_attr("presStyleCnt", self.pres_style_cnt.as_ref())
            .opt_attr("loTypeId", self.lo_type_id.as_ref())
            .opt_attr("loCatId", self.lo_cat_id.as_ref())
            .opt_attr("qsTypeId", self.qs_type_id.as_ref())
            .opt_attr("qsCatId", self.qs_cat_id.as_ref())
            .opt_attr("csTypeId", self.cs_type_id.as_ref())
            .opt_attr("csCatId", self.cs_cat_id.as_ref())
            .opt_attr("coherent3DOff", self.coherent_3d_off.as_ref())
            .opt_attr("phldrT", self.phldr_t.as_ref())
            .opt_attr("phldr", self.phldr.as_ref())
            .opt_attr("custAng", self.cust_ang.as_ref())
            .opt_attr("custFlipVert", self.cust_flip_vert.as_ref())
            .opt_attr("custFlipHor", self.cust_flip_hor.as_ref())
            .opt_attr("custSzX", self.cust_sz_x.as_ref())
            .opt_attr("custSzY", self.cust_sz_y.as_ref())
            .opt_attr("custScaleX", self.cust_scale_x.as_ref())
            .opt_attr("custScaleY", self.cust_scale_y.as_ref())
            .opt_attr("custT", self.cust_t.as_ref())
            .opt_attr("custLinFactX", self.cust_lin_fact_x.as_ref())
            .opt_attr("custLinFactY", self.cust_lin_fact_y.as_ref())
            .opt_attr("custLinFactNeighborX", self.cust_lin_fact_neighbor_x.as_ref())
            .opt_attr("custLinFactNeighborY", self.cust_lin_fact_neighbor_y.as_ref())
            .opt_attr("custRadScaleRad", self.cust_rad_scale_rad.as_ref())
            .opt_attr("custRadScaleInc", self.cust_rad_scale_inc.as_ref());
        if self.pres_layout_vars.is_none() && self.style.is_none() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("dgm:presLayoutVars", &self.pres_layout_vars)?;
        writer.opt_child("dgm:style", &self.style)?;
        writer.end(name)
    }
}

impl Validate for ElementPropertySet {
    const TYPE_NAME: &'static str = "CT_ElemPropSet";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_value(path, "@presAssocID", &self.pres_assoc_id)?;
        validate_opt(path, "style", &self.style)
    }
}

/// `CT_Pt`: a point of the data model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
    pub model_id: ModelId,
    pub pt_type: Option<PtType>,
    /// Connection a transition point belongs to
    pub cxn_id: Option<ModelId>,
    pub pr_set: Option<ElementPropertySet>,
    pub sp_pr: Option<Box<ShapeProperties>>,
    pub t: Option<Box<TextBody>>,
    pub ext_lst: Option<ExtensionList>,
}

impl Point {
    pub fn new(model_id: impl Into<ModelId>, pt_type: PtType) -> Self {
        Self {
            model_id: model_id.into(),
            pt_type: (pt_type != PtType::Node).then_some(pt_type),
            ..Self::default()
        }
    }

    /// A content node carrying `text`.
    pub fn node(model_id: impl Into<ModelId>, text: &str) -> Self {
        Self {
            pr_set: Some(ElementPropertySet::new()),
            sp_pr: Some(Box::new(ShapeProperties::new())),
            t: Some(Box::new(TextBody::from_text(text))),
            ..Self::new(model_id, PtType::Node)
        }
    }

    /// Point type, falling back to the schema default (`node`).
    pub fn kind(&self) -> PtType {
        self.pt_type.unwrap_or_default()
    }

    pub fn text(&self) -> Option<String> {
        self.t.as_deref().map(TextBody::text)
    }
}

impl XmlRead for Point {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut pt = Self {
            model_id: element.required_attr("modelId")?,
            pt_type: element.parse_attr("type")?,
            cxn_id: element.parse_attr("cxnId")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "prSet" => pt.pr_set = Some(reader.read(child)?),
                "spPr" => pt.sp_pr = Some(reader.read(child)?),
                "t" => pt.t = Some(reader.read(child)?),
                "extLst" => pt.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(pt)
    }
}

impl XmlWrite for Point {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .attr("modelId", &self.model_id)
            .opt_attr("type", self.pt_type.as_ref())
            .opt_attr("cxnId", self.cxn_id.as_ref());
        if self.pr_set.is_none() && self.sp_pr.is_none() && self.t.is_none() && self.ext_lst.is_none() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("dgm:prSet", &self.pr_set)?;
        writer.opt_child("dgm:spPr", &self.sp_pr)?;
        writer.opt_child("dgm:t", &self.t)?;
        writer.opt_child("dgm:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Point {
    const TYPE_NAME: &'static str = "CT_Pt";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_value(path, "@modelId", &self.model_id)?;
        validate_opt_value(path, "@cxnId", &self.cxn_id)?;
        validate_opt(path, "prSet", &self.pr_set)?;
        validate_opt(path, "spPr", &self.sp_pr)?;
        validate_opt(path, "t", &self.t)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_Cxn`: a directed relationship between two points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connection {
    pub model_id: ModelId,
    pub cxn_type: Option<CxnType>,
    pub src_id: ModelId,
    pub dest_id: ModelId,
    pub src_ord: u32,
    pub dest_ord: u32,
    pub par_trans_id: Option<ModelId>,
    pub sib_trans_id: Option<ModelId>,
    pub pres_id: Option<String>,
    pub ext_lst: Option<ExtensionList>,
}

impl Connection {
    /// A `parOf` connection making `dest_id` the `src_ord`-th child of
    /// `src_id`.
    pub fn parent_of(
        model_id: impl Into<ModelId>,
        src_id: impl Into<ModelId>,
        dest_id: impl Into<ModelId>,
        src_ord: u32,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            src_id: src_id.into(),
            dest_id: dest_id.into(),
            src_ord,
            ..Self::default()
        }
    }

    /// Connection type, falling back to the schema default (`parOf`).
    pub fn kind(&self) -> CxnType {
        self.cxn_type.unwrap_or_default()
    }
}

impl XmlRead for Connection {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut cxn = Self {
            model_id: element.required_attr("modelId")?,
            cxn_type: element.parse_attr("type")?,
            src_id: element.required_attr("srcId")?,
            dest_id: element.required_attr("destId")?,
            src_ord: element.required_attr("srcOrd")?,
            dest_ord: element.required_attr("destOrd")?,
            par_trans_id: element.parse_attr("parTransId")?,
            sib_trans_id: element.parse_attr("sibTransId")?,
            pres_id: element.parse_attr("presId")?,
            ext_lst: None,
        };
        reader.read_children(element, |reader, child| {
            if child.local_name() != "extLst" {
                return Ok(false);
            }
            cxn.ext_lst = Some(reader.read(child)?);
            Ok(true)
        })?;
        Ok(cxn)
    }
}

impl XmlWrite for Connection {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .attr("modelId", &self.model_id)
            .opt_attr("type", self.cxn_type.as_ref())
            .attr("srcId", &self.src_id)
            .attr("destId", &self.dest_id)
            .attr("srcOrd", &self.src_ord)
            .attr("destOrd", &self.dest_ord)
            .opt_attr("parTransId", self.par_trans_id.as_ref())
            .opt_attr("sibTransId", self.sib_trans_id.as_ref())
            .opt_attr("presId", self.pres_id.as_ref());
        match &self.ext_lst {
            None => tag.empty(),
            Some(ext_lst) => {
                tag.open()?;
                writer.child("dgm:extLst", ext_lst)?;
                writer.end(name)
            },
        }
    }
}

impl Validate for Connection {
    const TYPE_NAME: &'static str = "CT_Cxn";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_value(path, "@modelId", &self.model_id)?;
        validate_value(path, "@srcId", &self.src_id)?;
        validate_value(path, "@destId", &self.dest_id)?;
        validate_opt_value(path, "@parTransId", &self.par_trans_id)?;
        validate_opt_value(path, "@sibTransId", &self.sib_trans_id)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_PtList`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointList {
    pub pt: Vec<Point>,
}

impl XmlRead for PointList {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut list = Self::default();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "pt" {
                return Ok(false);
            }
            list.pt.push(reader.read(child)?);
            Ok(true)
        })?;
        Ok(list)
    }
}

impl XmlWrite for PointList {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.pt.is_empty() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.children("dgm:pt", &self.pt)?;
        writer.end(name)
    }
}

impl Validate for PointList {
    const TYPE_NAME: &'static str = "CT_PtList";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for (i, pt) in self.pt.iter().enumerate() {
            let pt_path = format!("{}/pt[{}]", path, i);
            if !seen.insert(&pt.model_id) {
                return Err(OoxmlError::validation(
                    format!("{}/@modelId", pt_path),
                    format!("duplicate point {}", pt.model_id),
                ));
            }
            pt.validate_with_path(&pt_path)?;
        }
        Ok(())
    }
}

/// `CT_CxnList`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionList {
    pub cxn: Vec<Connection>,
}

impl XmlRead for ConnectionList {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut list = Self::default();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "cxn" {
                return Ok(false);
            }
            list.cxn.push(reader.read(child)?);
            Ok(true)
        })?;
        Ok(list)
    }
}

impl XmlWrite for ConnectionList {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.cxn.is_empty() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.children("dgm:cxn", &self.cxn)?;
        writer.end(name)
    }
}

impl Validate for ConnectionList {
    const TYPE_NAME: &'static str = "CT_CxnList";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for (i, cxn) in self.cxn.iter().enumerate() {
            let cxn_path = format!("{}/cxn[{}]", path, i);
            if !seen.insert(&cxn.model_id) {
                return Err(OoxmlError::validation(
                    format!("{}/@modelId", cxn_path),
                    format!("duplicate connection {}", cxn.model_id),
                ));
            }
            cxn.validate_with_path(&cxn_path)?;
        }
        Ok(())
    }
}

/// `CT_BackgroundFormatting`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackgroundFormatting {
    pub fill: Option<Fill>,
    /// `a:effectLst` or `a:effectDag`, kept verbatim
    pub effects: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl XmlRead for BackgroundFormatting {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut bg = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                name if Fill::is_choice(name) => bg.fill = Some(Fill::read_choice(reader, child)?),
                "effectLst" | "effectDag" => bg.effects = Some(reader.read_raw(child)?),
                "extLst" => bg.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(bg)
    }
}

impl XmlWrite for BackgroundFormatting {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_choice(&self.fill)?;
        if let Some(effects) = &self.effects {
            writer.child(&effects.name, effects)?;
        }
        writer.opt_child("dgm:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for BackgroundFormatting {
    const TYPE_NAME: &'static str = "CT_BackgroundFormatting";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_choice(path, &self.fill)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_WholeE2oFormatting`: outline and effects of the whole diagram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WholeE2oFormatting {
    pub ln: Option<Box<LineProperties>>,
    pub effects: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl XmlRead for WholeE2oFormatting {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut whole = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "ln" => whole.ln = Some(reader.read(child)?),
                "effectLst" | "effectDag" => whole.effects = Some(reader.read_raw(child)?),
                "extLst" => whole.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(whole)
    }
}

impl XmlWrite for WholeE2oFormatting {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("a:ln", &self.ln)?;
        if let Some(effects) = &self.effects {
            writer.child(&effects.name, effects)?;
        }
        writer.opt_child("dgm:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for WholeE2oFormatting {
    const TYPE_NAME: &'static str = "CT_WholeE2oFormatting";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "ln", &self.ln)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_DataModel`: root of a diagram data part (`/ppt/diagrams/data1.xml`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataModel {
    pub pt_lst: PointList,
    pub cxn_lst: Option<ConnectionList>,
    pub bg: Option<BackgroundFormatting>,
    pub whole: Option<WholeE2oFormatting>,
    pub ext_lst: Option<ExtensionList>,
}

impl DataModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A flat list diagram: a document point with one child node per item,
    /// each linked by a `parOf` connection and its two transition points.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut model = Self::new();
        model.pt_lst.pt.push(Point::new(0, PtType::Doc));
        let mut cxn_lst = ConnectionList::default();
        let mut next_id = 1;
        for (ord, item) in items.into_iter().enumerate() {
            let (node_id, cxn_id, par_id, sib_id) = (next_id, next_id + 1, next_id + 2, next_id + 3);
            next_id += 4;
            model.pt_lst.pt.push(Point::node(node_id, item.as_ref()));
            for (id, kind) in [(par_id, PtType::ParTrans), (sib_id, PtType::SibTrans)] {
                model.pt_lst.pt.push(Point {
                    cxn_id: Some(ModelId::Int(cxn_id)),
                    ..Point::new(id, kind)
                });
            }
            cxn_lst.cxn.push(Connection {
                par_trans_id: Some(ModelId::Int(par_id)),
                sib_trans_id: Some(ModelId::Int(sib_id)),
                ..Connection::parent_of(cxn_id, 0, node_id, ord as u32)
            });
        }
        model.cxn_lst = Some(cxn_lst);
        model.bg = Some(BackgroundFormatting::default());
        model.whole = Some(WholeE2oFormatting::default());
        model
    }

    pub fn point(&self, model_id: &ModelId) -> Option<&Point> {
        self.pt_lst.pt.iter().find(|pt| &pt.model_id == model_id)
    }

    pub fn connections(&self) -> &[Connection] {
        self.cxn_lst.as_ref().map_or(&[], |list| list.cxn.as_slice())
    }

    /// Connections whose source or destination is not a point of the model.
    ///
    /// Office tolerates these (they show up after editing a diagram in
    /// older versions), so they are reported here rather than by
    /// validation.
    pub fn dangling_connections(&self) -> Vec<&Connection> {
        let ids: HashSet<&ModelId> = self.pt_lst.pt.iter().map(|pt| &pt.model_id).collect();
        self.connections()
            .iter()
            .filter(|cxn| !ids.contains(&cxn.src_id) || !ids.contains(&cxn.dest_id))
            .collect()
    }

    /// Children of `parent` through `parOf` connections, in `srcOrd` order.
    pub fn children_of(&self, parent: &ModelId) -> Vec<&Point> {
        let points: HashMap<&ModelId, &Point> =
            self.pt_lst.pt.iter().map(|pt| (&pt.model_id, pt)).collect();
        let mut links: Vec<&Connection> = self
            .connections()
            .iter()
            .filter(|cxn| cxn.kind() == CxnType::ParOf && &cxn.src_id == parent)
            .collect();
        links.sort_by_key(|cxn| cxn.src_ord);
        links
            .into_iter()
            .filter_map(|cxn| points.get(&cxn.dest_id).copied())
            .collect()
    }

    /// Text of the content nodes (`node` and `asst` points), in point order.
    pub fn texts(&self) -> Vec<String> {
        self.pt_lst
            .pt
            .iter()
            .filter(|pt| matches!(pt.kind(), PtType::Node | PtType::Asst))
            .filter_map(Point::text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl XmlRead for DataModel {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut model = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "ptLst" => model.pt_lst = reader.read(child)?,
                "cxnLst" => model.cxn_lst = Some(reader.read(child)?),
                "bg" => model.bg = Some(reader.read(child)?),
                "whole" => model.whole = Some(reader.read(child)?),
                "extLst" => model.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(model)
    }
}

impl XmlWrite for DataModel {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("dgm:ptLst", &self.pt_lst)?;
        writer.opt_child("dgm:cxnLst", &self.cxn_lst)?;
        writer.opt_child("dgm:bg", &self.bg)?;
        writer.opt_child("dgm:whole", &self.whole)?;
        writer.opt_child("dgm:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for DataModel {
    const TYPE_NAME: &'static str = "CT_DataModel";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.pt_lst.validate_with_path(&child_path(path, "ptLst"))?;
        validate_opt(path, "cxnLst", &self.cxn_lst)?;
        validate_opt(path, "bg", &self.bg)?;
        validate_opt(path, "whole", &self.whole)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

impl XmlRoot for DataModel {
    const ROOT: &'static str = "dgm:dataModel";
    const NAMESPACES: &'static [(&'static str, &'static str)] =
        &[("dgm", DIAGRAM), ("a", DRAWINGML), ("r", RELATIONSHIPS)];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_fragment, from_str, to_fragment, to_string};

    const DATA_PART: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<dgm:dataModel xmlns:dgm="http://schemas.openxmlformats.org/drawingml/2006/diagram" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <dgm:ptLst>
    <dgm:pt modelId="{0F5B7A3C-1D2E-4F60-8A9B-C0D1E2F30415}" type="doc">
      <dgm:prSet loTypeId="urn:microsoft.com/office/officeart/2005/8/layout/process1" loCatId="process" qsTypeId="urn:microsoft.com/office/officeart/2005/8/quickstyle/simple1" qsCatId="simple" csTypeId="urn:microsoft.com/office/officeart/2005/8/colors/accent1_2" csCatId="accent1" phldr="1"/>
      <dgm:spPr/>
      <dgm:t><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></dgm:t>
    </dgm:pt>
    <dgm:pt modelId="{A1B2C3D4-E5F6-4789-9ABC-DEF012345678}">
      <dgm:prSet phldrT="[Text]"/>
      <dgm:spPr/>
      <dgm:t><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>Plan</a:t></a:r></a:p></dgm:t>
    </dgm:pt>
    <dgm:pt modelId="{11111111-2222-4333-8444-555555555555}" type="parTrans" cxnId="{99999999-8888-4777-8666-555555555555}">
      <dgm:prSet/>
      <dgm:spPr/>
      <dgm:t><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></dgm:t>
    </dgm:pt>
    <dgm:pt modelId="{22222222-3333-4444-8555-666666666666}" type="pres">
      <dgm:prSet presAssocID="{A1B2C3D4-E5F6-4789-9ABC-DEF012345678}" presName="node" presStyleLbl="node1" presStyleIdx="0" presStyleCnt="1">
        <dgm:presLayoutVars><dgm:bulletEnabled val="1"/></dgm:presLayoutVars>
      </dgm:prSet>
      <dgm:spPr/>
    </dgm:pt>
  </dgm:ptLst>
  <dgm:cxnLst>
    <dgm:cxn modelId="{99999999-8888-4777-8666-555555555555}" srcId="{0F5B7A3C-1D2E-4F60-8A9B-C0D1E2F30415}" destId="{A1B2C3D4-E5F6-4789-9ABC-DEF012345678}" srcOrd="0" destOrd="0" parTransId="{11111111-2222-4333-8444-555555555555}" sibTransId="{33333333-4444-4555-8666-777777777777}"/>
    <dgm:cxn modelId="{44444444-5555-4666-8777-888888888888}" type="presOf" srcId="{A1B2C3D4-E5F6-4789-9ABC-DEF012345678}" destId="{22222222-3333-4444-8555-666666666666}" srcOrd="0" destOrd="0" presId="urn:microsoft.com/office/officeart/2005/8/layout/process1"/>
    <dgm:cxn modelId="{55555555-6666-4777-8888-999999999999}" type="presParOf" srcId="{22222222-3333-4444-8555-666666666666}" destId="{66666666-7777-4888-8999-AAAAAAAAAAAA}" srcOrd="0" destOrd="0" presId="urn:microsoft.com/office/officeart/2005/8/layout/process1"/>
  </dgm:cxnLst>
  <dgm:bg/>
  <dgm:whole/>
</dgm:dataModel>"#;

    #[test]
    fn test_decode_data_part() {
        let model: DataModel = from_str(DATA_PART).unwrap();
        assert_eq!(model.pt_lst.pt.len(), 4);
        assert_eq!(model.pt_lst.pt[0].kind(), PtType::Doc);
        assert_eq!(model.texts(), vec!["Plan".to_string()]);

        let doc = ModelId::guid("{0F5B7A3C-1D2E-4F60-8A9B-C0D1E2F30415}");
        let children = model.children_of(&doc);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].text().as_deref(), Some("Plan"));

        let pres = model
            .point(&ModelId::guid("{22222222-3333-4444-8555-666666666666}"))
            .unwrap();
        let pr_set = pres.pr_set.as_ref().unwrap();
        assert_eq!(pr_set.pres_name.as_deref(), Some("node"));
        assert!(pr_set.pres_layout_vars.is_some());
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_dangling_connections() {
        let model: DataModel = from_str(DATA_PART).unwrap();
        let dangling = model.dangling_connections();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].kind(), CxnType::PresParOf);
        assert_eq!(
            dangling[0].dest_id,
            ModelId::guid("{66666666-7777-4888-8999-AAAAAAAAAAAA}")
        );
    }

    #[test]
    fn test_connections_match_guids_in_any_case() {
        let xml = DATA_PART
            .replace(
                r#"srcId="{0F5B7A3C-1D2E-4F60-8A9B-C0D1E2F30415}""#,
                r#"srcId="{0f5b7a3c-1d2e-4f60-8a9b-c0d1e2f30415}""#,
            )
            .replace(
                r#"destId="{A1B2C3D4-E5F6-4789-9ABC-DEF012345678}""#,
                r#"destId="{a1b2c3d4-e5f6-4789-9abc-def012345678}""#,
            );
        let model: DataModel = from_str(&xml).unwrap();
        assert_eq!(model.dangling_connections().len(), 1);

        let doc = ModelId::guid("{0F5B7A3C-1D2E-4F60-8A9B-C0D1E2F30415}");
        let children = model.children_of(&doc);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].text().as_deref(), Some("Plan"));
        assert!(to_string(&model).unwrap().contains(r#"srcId="{0f5b7a3c-1d2e-4f60-8a9b-c0d1e2f30415}""#));
    }

    #[test]
    fn test_data_part_round_trip() {
        let model: DataModel = from_str(DATA_PART).unwrap();
        let text = to_string(&model).unwrap();
        let again: DataModel = from_str(&text).unwrap();
        assert_eq!(again, model);
    }

    #[test]
    fn test_list_model() {
        let model = DataModel::list(["Plan", "Build", "Ship"]);
        assert!(model.validate().is_ok());
        assert!(model.dangling_connections().is_empty());
        assert_eq!(model.texts(), vec!["Plan", "Build", "Ship"]);
        let children: Vec<String> = model
            .children_of(&ModelId::Int(0))
            .into_iter()
            .filter_map(Point::text)
            .collect();
        assert_eq!(children, vec!["Plan", "Build", "Ship"]);
    }

    #[test]
    fn test_connection_defaults() {
        let xml = r#"<dgm:cxn modelId="5" srcId="0" destId="1" srcOrd="2" destOrd="0"/>"#;
        let cxn: Connection = from_fragment(xml).unwrap();
        assert_eq!(cxn.kind(), CxnType::ParOf);
        assert_eq!(cxn.src_ord, 2);
        assert_eq!(to_fragment(&cxn, "dgm:cxn").unwrap(), xml);
    }

    #[test]
    fn test_duplicate_points() {
        let mut model = DataModel::list(["A"]);
        model.pt_lst.pt.push(Point::node(1, "B"));
        let err = model.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_DataModel/ptLst/pt[4]/@modelId: duplicate point 1");
    }
}
