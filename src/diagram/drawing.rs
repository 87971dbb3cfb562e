//! Diagram drawing parts (`dsp:drawing`): the shapes Office renders for a
//! diagram, cached next to the data model so readers without a layout
//! engine can display it.

use crate::diagram::types::ModelId;
use crate::drawing::ext::ExtensionList;
use crate::drawing::geometry::Transform2D;
use crate::drawing::nv::{
    NonVisualDrawingProps, NonVisualDrawingShapeProps, NonVisualGroupDrawingShapeProps,
};
use crate::drawing::shape::{GroupShapeProperties, ShapeProperties};
use crate::drawing::style::ShapeStyle;
use crate::drawing::text::TextBody;
use crate::error::{OoxmlError, Result};
use crate::xml::namespace::{DIAGRAM, DIAGRAM_DRAWING, DRAWINGML};
use crate::xml::{
    ElementStart, Validate, XmlChoice, XmlRead, XmlReader, XmlRoot, XmlWrite, XmlWriter,
    child_path, validate_choices, validate_opt, validate_value,
};
use std::io::{BufRead, Write};

/// `CT_ShapeNonVisual`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeNonVisual {
    pub c_nv_pr: NonVisualDrawingProps,
    pub c_nv_sp_pr: NonVisualDrawingShapeProps,
}

impl XmlRead for ShapeNonVisual {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut nv = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "cNvPr" => nv.c_nv_pr = reader.read(child)?,
                "cNvSpPr" => nv.c_nv_sp_pr = reader.read(child)?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(nv)
    }
}

impl XmlWrite for ShapeNonVisual {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("dsp:cNvPr", &self.c_nv_pr)?;
        writer.child("dsp:cNvSpPr", &self.c_nv_sp_pr)?;
        writer.end(name)
    }
}

impl Validate for ShapeNonVisual {
    const TYPE_NAME: &'static str = "CT_ShapeNonVisual";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.c_nv_pr.validate_with_path(&child_path(path, "cNvPr"))?;
        self.c_nv_sp_pr.validate_with_path(&child_path(path, "cNvSpPr"))
    }
}

/// `CT_GroupShapeNonVisual`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupShapeNonVisual {
    pub c_nv_pr: NonVisualDrawingProps,
    pub c_nv_grp_sp_pr: NonVisualGroupDrawingShapeProps,
}

impl XmlRead for GroupShapeNonVisual {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut nv = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "cNvPr" => nv.c_nv_pr = reader.read(child)?,
                "cNvGrpSpPr" => nv.c_nv_grp_sp_pr = reader.read(child)?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(nv)
    }
}

impl XmlWrite for GroupShapeNonVisual {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("dsp:cNvPr", &self.c_nv_pr)?;
        writer.child("dsp:cNvGrpSpPr", &self.c_nv_grp_sp_pr)?;
        writer.end(name)
    }
}

impl Validate for GroupShapeNonVisual {
    const TYPE_NAME: &'static str = "CT_GroupShapeNonVisual";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.c_nv_pr.validate_with_path(&child_path(path, "cNvPr"))?;
        self.c_nv_grp_sp_pr
            .validate_with_path(&child_path(path, "cNvGrpSpPr"))
    }
}

/// `CT_Shape` (diagram drawing): one rendered diagram shape, tied to the
/// data-model point it presents through `modelId`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub model_id: ModelId,
    pub nv_sp_pr: ShapeNonVisual,
    pub sp_pr: ShapeProperties,
    pub style: Option<ShapeStyle>,
    pub tx_body: Option<Box<TextBody>>,
    /// Text rectangle, when it differs from the shape bounds
    pub tx_xfrm: Option<Transform2D>,
    pub ext_lst: Option<ExtensionList>,
}

impl Shape {
    pub fn new(model_id: ModelId) -> Self {
        Self {
            model_id,
            ..Self::default()
        }
    }

    pub fn text(&self) -> Option<String> {
        self.tx_body.as_deref().map(TextBody::text)
    }
}

impl XmlRead for Shape {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut sp = Self::new(element.required_attr("modelId")?);
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "nvSpPr" => sp.nv_sp_pr = reader.read(child)?,
                "spPr" => sp.sp_pr = reader.read(child)?,
                "style" => sp.style = Some(reader.read(child)?),
                "txBody" => sp.tx_body = Some(reader.read(child)?),
                "txXfrm" => sp.tx_xfrm = Some(reader.read(child)?),
                "extLst" => sp.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(sp)
    }
}

impl XmlWrite for Shape {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).attr("modelId", &self.model_id).open()?;
        writer.child("dsp:nvSpPr", &self.nv_sp_pr)?;
        writer.child("dsp:spPr", &self.sp_pr)?;
        writer.opt_child("dsp:style", &self.style)?;
        writer.opt_child("dsp:txBody", &self.tx_body)?;
        writer.opt_child("dsp:txXfrm", &self.tx_xfrm)?;
        writer.opt_child("dsp:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Shape {
    const TYPE_NAME: &'static str = "CT_Shape";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_value(path, "@modelId", &self.model_id)?;
        self.nv_sp_pr.validate_with_path(&child_path(path, "nvSpPr"))?;
        self.sp_pr.validate_with_path(&child_path(path, "spPr"))?;
        validate_opt(path, "style", &self.style)?;
        validate_opt(path, "txBody", &self.tx_body)?;
        validate_opt(path, "txXfrm", &self.tx_xfrm)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// Member of a diagram group shape.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupChild {
    /// `dsp:sp`
    Shape(Box<Shape>),
    /// `dsp:grpSp`
    Group(Box<GroupShape>),
}

impl XmlChoice for GroupChild {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "sp" | "grpSp")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "sp" => Ok(Self::Shape(reader.read(element)?)),
            "grpSp" => Ok(Self::Group(reader.read(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "dsp:sp or dsp:grpSp".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Shape(sp) => writer.child("dsp:sp", sp.as_ref()),
            Self::Group(grp) => writer.child("dsp:grpSp", grp.as_ref()),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Shape(_) => "sp",
            Self::Group(_) => "grpSp",
        }
    }
}

impl Validate for GroupChild {
    const TYPE_NAME: &'static str = "EG_DiagramGroupChild";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Shape(sp) => sp.validate_with_path(path),
            Self::Group(grp) => grp.validate_with_path(path),
        }
    }
}

/// `CT_GroupShape` (diagram drawing), also the `dsp:spTree` root group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupShape {
    pub nv_grp_sp_pr: GroupShapeNonVisual,
    pub grp_sp_pr: GroupShapeProperties,
    pub children: Vec<GroupChild>,
    pub ext_lst: Option<ExtensionList>,
}

impl GroupShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// All shapes of the group and its nested groups, in document order.
    pub fn shapes(&self) -> Vec<&Shape> {
        let mut shapes = Vec::new();
        self.collect_shapes(&mut shapes);
        shapes
    }

    fn collect_shapes<'a>(&'a self, shapes: &mut Vec<&'a Shape>) {
        for child in &self.children {
            match child {
                GroupChild::Shape(sp) => shapes.push(sp),
                GroupChild::Group(grp) => grp.collect_shapes(shapes),
            }
        }
    }
}

impl XmlRead for GroupShape {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut grp = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "nvGrpSpPr" => grp.nv_grp_sp_pr = reader.read(child)?,
                "grpSpPr" => grp.grp_sp_pr = reader.read(child)?,
                name if GroupChild::is_choice(name) => {
                    grp.children.push(GroupChild::read_choice(reader, child)?)
                },
                "extLst" => grp.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(grp)
    }
}

impl XmlWrite for GroupShape {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("dsp:nvGrpSpPr", &self.nv_grp_sp_pr)?;
        writer.child("dsp:grpSpPr", &self.grp_sp_pr)?;
        writer.choices(&self.children)?;
        writer.opt_child("dsp:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for GroupShape {
    const TYPE_NAME: &'static str = "CT_GroupShape";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.nv_grp_sp_pr
            .validate_with_path(&child_path(path, "nvGrpSpPr"))?;
        self.grp_sp_pr.validate_with_path(&child_path(path, "grpSpPr"))?;
        validate_choices(path, &self.children)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_Drawing`: root of a diagram drawing part
/// (`/ppt/diagrams/drawing1.xml`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    pub sp_tree: GroupShape,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered shape presenting data-model point `model_id`.
    pub fn shape_for(&self, model_id: &ModelId) -> Option<&Shape> {
        self.sp_tree
            .shapes()
            .into_iter()
            .find(|sp| &sp.model_id == model_id)
    }

    /// Text of every shape that has any, in document order.
    pub fn texts(&self) -> Vec<String> {
        self.sp_tree
            .shapes()
            .into_iter()
            .filter_map(Shape::text)
            .filter(|text| !text.trim().is_empty())
            .collect()
    }
}

impl XmlRead for Drawing {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut drawing = Self::new();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "spTree" {
                return Ok(false);
            }
            drawing.sp_tree = reader.read(child)?;
            Ok(true)
        })?;
        Ok(drawing)
    }
}

impl XmlWrite for Drawing {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("dsp:spTree", &self.sp_tree)?;
        writer.end(name)
    }
}

impl Validate for Drawing {
    const TYPE_NAME: &'static str = "CT_Drawing";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.sp_tree.validate_with_path(&child_path(path, "spTree"))
    }
}

impl XmlRoot for Drawing {
    const ROOT: &'static str = "dsp:drawing";
    const NAMESPACES: &'static [(&'static str, &'static str)] = &[
        ("dgm", DIAGRAM),
        ("dsp", DIAGRAM_DRAWING),
        ("a", DRAWINGML),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::geometry::{PresetGeometry2D, ShapeType};
    use crate::drawing::shape::Geometry;
    use crate::xml::{ReadOptions, WriteOptions, from_fragment, from_reader, from_str, to_string, to_vec};

    const DRAWING_PART: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<dsp:drawing xmlns:dgm="http://schemas.openxmlformats.org/drawingml/2006/diagram" xmlns:dsp="http://schemas.microsoft.com/office/drawing/2008/diagram" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <dsp:spTree>
    <dsp:nvGrpSpPr><dsp:cNvPr id="0" name=""/><dsp:cNvGrpSpPr/></dsp:nvGrpSpPr>
    <dsp:grpSpPr/>
    <dsp:sp modelId="{9B1C2D3E-4F50-4A6B-8C7D-0E1F2A3B4C5D}">
      <dsp:nvSpPr><dsp:cNvPr id="0" name=""/><dsp:cNvSpPr/></dsp:nvSpPr>
      <dsp:spPr>
        <a:xfrm><a:off x="0" y="365760"/><a:ext cx="2286000" cy="1371600"/></a:xfrm>
        <a:prstGeom prst="roundRect"><a:avLst/></a:prstGeom>
        <a:solidFill><a:schemeClr val="accent1"/></a:solidFill>
      </dsp:spPr>
      <dsp:style>
        <a:lnRef idx="2"><a:scrgbClr r="0" g="0" b="0"/></a:lnRef>
        <a:fillRef idx="1"><a:scrgbClr r="0" g="0" b="0"/></a:fillRef>
        <a:effectRef idx="0"><a:scrgbClr r="0" g="0" b="0"/></a:effectRef>
        <a:fontRef idx="minor"><a:schemeClr val="lt1"/></a:fontRef>
      </dsp:style>
      <dsp:txBody>
        <a:bodyPr anchor="ctr"/>
        <a:lstStyle/>
        <a:p><a:r><a:rPr lang="en-US"/><a:t>Plan</a:t></a:r></a:p>
      </dsp:txBody>
      <dsp:txXfrm><a:off x="40173" y="405933"/><a:ext cx="2205654" cy="1291254"/></dsp:txXfrm>
    </dsp:sp>
    <dsp:grpSp>
      <dsp:nvGrpSpPr><dsp:cNvPr id="0" name=""/><dsp:cNvGrpSpPr/></dsp:nvGrpSpPr>
      <dsp:grpSpPr/>
      <dsp:sp modelId="4">
        <dsp:nvSpPr><dsp:cNvPr id="0" name=""/><dsp:cNvSpPr/></dsp:nvSpPr>
        <dsp:spPr><a:prstGeom prst="rightArrow"><a:avLst/></a:prstGeom></dsp:spPr>
      </dsp:sp>
    </dsp:grpSp>
  </dsp:spTree>
</dsp:drawing>"#;

    #[test]
    fn test_decode_drawing_part() {
        let drawing: Drawing = from_str(DRAWING_PART).unwrap();
        let shapes = drawing.sp_tree.shapes();
        assert_eq!(shapes.len(), 2);

        let plan = drawing
            .shape_for(&ModelId::guid("{9B1C2D3E-4F50-4A6B-8C7D-0E1F2A3B4C5D}"))
            .unwrap();
        assert_eq!(plan.text().as_deref(), Some("Plan"));
        assert!(plan.tx_xfrm.is_some());
        assert!(matches!(
            &plan.sp_pr.geometry,
            Some(Geometry::Preset(PresetGeometry2D { prst: ShapeType::RoundRect, .. }))
        ));

        let arrow = drawing.shape_for(&ModelId::Int(4)).unwrap();
        assert!(arrow.tx_body.is_none());
        assert_eq!(drawing.texts(), vec!["Plan".to_string()]);
        assert!(drawing.validate().is_ok());
    }

    #[test]
    fn test_drawing_round_trip() {
        let drawing: Drawing = from_str(DRAWING_PART).unwrap();
        let bytes = to_vec(&drawing, WriteOptions::new()).unwrap();
        let again: Drawing = from_reader(bytes.as_slice(), ReadOptions::new()).unwrap();
        assert_eq!(again, drawing);
        assert!(to_string(&again).unwrap().contains(r#"<dsp:sp modelId="4">"#));
    }

    #[test]
    fn test_empty_drawing() {
        let text = to_string(&Drawing::new()).unwrap();
        assert!(text.contains(
            r#"<dsp:spTree><dsp:nvGrpSpPr><dsp:cNvPr id="0" name=""/><dsp:cNvGrpSpPr/></dsp:nvGrpSpPr><dsp:grpSpPr/></dsp:spTree>"#
        ));
    }

    #[test]
    fn test_invalid_model_id_path() {
        let mut group = GroupShape::new();
        group
            .children
            .push(GroupChild::Shape(Box::new(Shape::new(ModelId::guid("not-a-guid")))));
        let drawing = Drawing {
            sp_tree: GroupShape {
                children: vec![GroupChild::Group(Box::new(group))],
                ..GroupShape::new()
            },
        };
        let err = drawing.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "CT_Drawing/spTree/grpSp[0]/sp[0]/@modelId: 'not-a-guid' is neither an integer nor a GUID"
        );
    }

    #[test]
    fn test_unknown_children_are_skipped() {
        let xml = r#"<dsp:sp modelId="1"><dsp:nvSpPr><dsp:cNvPr id="0" name=""/><dsp:cNvSpPr/></dsp:nvSpPr><dsp:spPr/><dsp:future/></dsp:sp>"#;
        let sp: Shape = from_fragment(xml).unwrap();
        assert_eq!(sp.model_id, ModelId::Int(1));
    }
}
