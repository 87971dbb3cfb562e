//! The slide shape tree (`p:spTree`) and its members.

use crate::drawing::blip::BlipFillProperties;
use crate::drawing::ext::ExtensionList;
use crate::drawing::geometry::Transform2D;
use crate::drawing::graphic::{GraphicalObject, GraphicalObjectData};
use crate::drawing::nv::{
    NonVisualConnectorProperties, NonVisualDrawingProps, NonVisualDrawingShapeProps,
    NonVisualGraphicFrameProperties, NonVisualGroupDrawingShapeProps, NonVisualPictureProperties,
};
use crate::drawing::shape::{BlackWhiteMode, GroupShapeProperties, ShapeProperties};
use crate::drawing::style::ShapeStyle;
use crate::drawing::text::TextBody;
use crate::error::{OoxmlError, Result};
use crate::presentation::types::{Direction, PlaceholderSize, PlaceholderType};
use crate::xml::{
    ElementStart, RawElement, Validate, XmlChoice, XmlRead, XmlReader, XmlWrite, XmlWriter,
    child_path, validate_all, validate_choices, validate_opt,
};
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// `CT_CustomerData`: a relationship to a custom XML part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerData {
    pub id: String,
}

impl XmlRead for CustomerData {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let data = Self {
            id: element.required_attr("id")?,
        };
        reader.read_empty(element)?;
        Ok(data)
    }
}

impl XmlWrite for CustomerData {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).attr("r:id", &self.id).empty()
    }
}

impl Validate for CustomerData {
    const TYPE_NAME: &'static str = "CT_CustomerData";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        if self.id.is_empty() {
            return Err(OoxmlError::validation(
                format!("{}/@r:id", path),
                "relationship id is required",
            ));
        }
        Ok(())
    }
}

/// `CT_CustomerDataList`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDataList {
    pub cust_data: Vec<CustomerData>,
    /// `p:tags` (`CT_TagsData`, same shape as a customer data reference)
    pub tags: Option<CustomerData>,
}

impl XmlRead for CustomerDataList {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut list = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "custData" => list.cust_data.push(reader.read(child)?),
                "tags" => list.tags = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(list)
    }
}

impl XmlWrite for CustomerDataList {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.children("p:custData", &self.cust_data)?;
        writer.opt_child("p:tags", &self.tags)?;
        writer.end(name)
    }
}

impl Validate for CustomerDataList {
    const TYPE_NAME: &'static str = "CT_CustomerDataList";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_all(path, "custData", &self.cust_data)?;
        validate_opt(path, "tags", &self.tags)
    }
}

/// `CT_Placeholder`: links a shape to the matching placeholder of its layout
/// and master.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placeholder {
    pub ph_type: Option<PlaceholderType>,
    pub orient: Option<Direction>,
    pub sz: Option<PlaceholderSize>,
    pub idx: Option<u32>,
    pub has_custom_prompt: Option<bool>,
    pub ext_lst: Option<ExtensionList>,
}

impl Placeholder {
    pub fn new(ph_type: PlaceholderType) -> Self {
        Self {
            ph_type: Some(ph_type),
            ..Self::default()
        }
    }

    /// A body-type placeholder matched by index (`<p:ph idx="1"/>`).
    pub fn indexed(idx: u32) -> Self {
        Self {
            idx: Some(idx),
            ..Self::default()
        }
    }

    /// Placeholder type, falling back to the schema default (`obj`).
    pub fn kind(&self) -> PlaceholderType {
        self.ph_type.unwrap_or_default()
    }
}

impl XmlRead for Placeholder {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut ph = Self {
            ph_type: element.parse_attr("type")?,
            orient: element.parse_attr("orient")?,
            sz: element.parse_attr("sz")?,
            idx: element.parse_attr("idx")?,
            has_custom_prompt: element.parse_attr("hasCustomPrompt")?,
            ext_lst: None,
        };
        reader.read_children(element, |reader, child| {
            if child.local_name() != "extLst" {
                return Ok(false);
            }
            ph.ext_lst = Some(reader.read(child)?);
            Ok(true)
        })?;
        Ok(ph)
    }
}

impl XmlWrite for Placeholder {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("type", self.ph_type.as_ref())
            .opt_attr("orient", self.orient.as_ref())
            .opt_attr("sz", self.sz.as_ref())
            .opt_attr("idx", self.idx.as_ref())
            .opt_attr("hasCustomPrompt", self.has_custom_prompt.as_ref());
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

impl Validate for Placeholder {
    const TYPE_NAME: &'static str = "CT_Placeholder";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_ApplicationNonVisualDrawingProps` (`p:nvPr`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationNonVisualDrawingProps {
    pub is_photo: Option<bool>,
    pub user_drawn: Option<bool>,
    pub ph: Option<Placeholder>,
    /// One of the `EG_Media` elements (`a:videoFile`, `a:audioFile`, ...),
    /// kept verbatim
    pub media: Option<RawElement>,
    pub cust_data_lst: Option<CustomerDataList>,
    pub ext_lst: Option<ExtensionList>,
}

impl ApplicationNonVisualDrawingProps {
    pub fn new() -> Self {
        Self::default()
    }
}

impl XmlRead for ApplicationNonVisualDrawingProps {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut nv_pr = Self {
            is_photo: element.parse_attr("isPhoto")?,
            user_drawn: element.parse_attr("userDrawn")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "ph" => nv_pr.ph = Some(reader.read(child)?),
                "audioCd" | "wavAudioFile" | "audioFile" | "videoFile" | "quickTimeFile" => {
                    nv_pr.media = Some(reader.read_raw(child)?)
                },
                "custDataLst" => nv_pr.cust_data_lst = Some(reader.read(child)?),
                "extLst" => nv_pr.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(nv_pr)
    }
}

impl XmlWrite for ApplicationNonVisualDrawingProps {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .opt_attr("isPhoto", self.is_photo.as_ref())
            .opt_attr("userDrawn", self.user_drawn.as_ref());
        if self.ph.is_none()
            && self.media.is_none()
            && self.cust_data_lst.is_none()
            && self.ext_lst.is_none()
        {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("p:ph", &self.ph)?;
        if let Some(media) = &self.media {
            writer.child(&media.name, media)?;
        }
        writer.opt_child("p:custDataLst", &self.cust_data_lst)?;
        writer.opt_child("p:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for ApplicationNonVisualDrawingProps {
    const TYPE_NAME: &'static str = "CT_ApplicationNonVisualDrawingProps";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "ph", &self.ph)?;
        validate_opt(path, "custDataLst", &self.cust_data_lst)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// The non-visual property groups of the shape tree members all pair
/// `cNvPr` with a type-specific element and `nvPr`.
macro_rules! non_visual_group {
    (
        $(#[$meta:meta])*
        $name:ident = $schema:literal {
            $field:ident: $ty:ty => $local:literal
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub c_nv_pr: NonVisualDrawingProps,
            pub $field: $ty,
            pub nv_pr: ApplicationNonVisualDrawingProps,
        }

        impl $name {
            pub fn new(id: u32, name: impl Into<String>) -> Self {
                Self {
                    c_nv_pr: NonVisualDrawingProps::new(id, name),
                    ..Self::default()
                }
            }
        }

        impl XmlRead for $name {
            fn read_xml<R: BufRead>(
                reader: &mut XmlReader<R>,
                element: &ElementStart,
            ) -> Result<Self> {
                let mut nv = Self::default();
                reader.read_children(element, |reader, child| {
                    match child.local_name() {
                        "cNvPr" => nv.c_nv_pr = reader.read(child)?,
                        $local => nv.$field = reader.read(child)?,
                        "nvPr" => nv.nv_pr = reader.read(child)?,
                        _ => return Ok(false),
                    }
                    Ok(true)
                })?;
                Ok(nv)
            }
        }

        impl XmlWrite for $name {
            fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
                writer.element(name).open()?;
                writer.child("p:cNvPr", &self.c_nv_pr)?;
                writer.child(concat!("p:", $local), &self.$field)?;
                writer.child("p:nvPr", &self.nv_pr)?;
                writer.end(name)
            }
        }

        impl Validate for $name {
            const TYPE_NAME: &'static str = $schema;

            fn validate_with_path(&self, path: &str) -> Result<()> {
                self.c_nv_pr.validate_with_path(&child_path(path, "cNvPr"))?;
                self.$field.validate_with_path(&child_path(path, $local))?;
                self.nv_pr.validate_with_path(&child_path(path, "nvPr"))
            }
        }
    };
}

non_visual_group! {
    /// `p:nvSpPr`
    ShapeNonVisual = "CT_ShapeNonVisual" {
        c_nv_sp_pr: NonVisualDrawingShapeProps => "cNvSpPr"
    }
}

non_visual_group! {
    /// `p:nvCxnSpPr`
    ConnectorNonVisual = "CT_ConnectorNonVisual" {
        c_nv_cxn_sp_pr: NonVisualConnectorProperties => "cNvCxnSpPr"
    }
}

non_visual_group! {
    /// `p:nvPicPr`
    PictureNonVisual = "CT_PictureNonVisual" {
        c_nv_pic_pr: NonVisualPictureProperties => "cNvPicPr"
    }
}

non_visual_group! {
    /// `p:nvGraphicFramePr`
    GraphicFrameNonVisual = "CT_GraphicalObjectFrameNonVisual" {
        c_nv_graphic_frame_pr: NonVisualGraphicFrameProperties => "cNvGraphicFramePr"
    }
}

non_visual_group! {
    /// `p:nvGrpSpPr`
    GroupShapeNonVisual = "CT_GroupShapeNonVisual" {
        c_nv_grp_sp_pr: NonVisualGroupDrawingShapeProps => "cNvGrpSpPr"
    }
}

/// `CT_Shape` (`p:sp`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub use_bg_fill: Option<bool>,
    pub nv_sp_pr: ShapeNonVisual,
    pub sp_pr: ShapeProperties,
    pub style: Option<ShapeStyle>,
    pub tx_body: Option<Box<TextBody>>,
    pub ext_lst: Option<ExtensionList>,
}

impl Shape {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            nv_sp_pr: ShapeNonVisual::new(id, name),
            ..Self::default()
        }
    }

    /// A shape that inherits position and formatting from placeholder `ph`.
    pub fn placeholder(id: u32, name: impl Into<String>, ph: Placeholder, text: &str) -> Self {
        let mut sp = Self::new(id, name);
        sp.nv_sp_pr.nv_pr.ph = Some(ph);
        sp.tx_body = Some(Box::new(TextBody::from_text(text)));
        sp
    }

    /// A text box at `xfrm`.
    pub fn text_box(id: u32, name: impl Into<String>, xfrm: Transform2D, text: &str) -> Self {
        let mut sp = Self::new(id, name);
        sp.nv_sp_pr.c_nv_sp_pr.tx_box = Some(true);
        sp.sp_pr.xfrm = Some(xfrm);
        sp.tx_body = Some(Box::new(TextBody::from_text(text)));
        sp
    }

    pub fn placeholder_info(&self) -> Option<&Placeholder> {
        self.nv_sp_pr.nv_pr.ph.as_ref()
    }

    pub fn text(&self) -> Option<String> {
        self.tx_body.as_deref().map(TextBody::text)
    }
}

impl XmlRead for Shape {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut sp = Self {
            use_bg_fill: element.parse_attr("useBgFill")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "nvSpPr" => sp.nv_sp_pr = reader.read(child)?,
                "spPr" => sp.sp_pr = reader.read(child)?,
                "style" => sp.style = Some(reader.read(child)?),
                "txBody" => sp.tx_body = Some(reader.read(child)?),
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
        writer
            .element(name)
            .opt_attr("useBgFill", self.use_bg_fill.as_ref())
            .open()?;
        writer.child("p:nvSpPr", &self.nv_sp_pr)?;
        writer.child("p:spPr", &self.sp_pr)?;
        writer.opt_child("p:style", &self.style)?;
        writer.opt_child("p:txBody", &self.tx_body)?;
        writer.opt_child("p:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Shape {
    const TYPE_NAME: &'static str = "CT_Shape";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.nv_sp_pr.validate_with_path(&child_path(path, "nvSpPr"))?;
        self.sp_pr.validate_with_path(&child_path(path, "spPr"))?;
        validate_opt(path, "style", &self.style)?;
        validate_opt(path, "txBody", &self.tx_body)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_Connector` (`p:cxnSp`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connector {
    pub nv_cxn_sp_pr: ConnectorNonVisual,
    pub sp_pr: ShapeProperties,
    pub style: Option<ShapeStyle>,
    pub ext_lst: Option<ExtensionList>,
}

impl Connector {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            nv_cxn_sp_pr: ConnectorNonVisual::new(id, name),
            ..Self::default()
        }
    }
}

impl XmlRead for Connector {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut cxn = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "nvCxnSpPr" => cxn.nv_cxn_sp_pr = reader.read(child)?,
                "spPr" => cxn.sp_pr = reader.read(child)?,
                "style" => cxn.style = Some(reader.read(child)?),
                "extLst" => cxn.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(cxn)
    }
}

impl XmlWrite for Connector {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("p:nvCxnSpPr", &self.nv_cxn_sp_pr)?;
        writer.child("p:spPr", &self.sp_pr)?;
        writer.opt_child("p:style", &self.style)?;
        writer.opt_child("p:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Connector {
    const TYPE_NAME: &'static str = "CT_Connector";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.nv_cxn_sp_pr
            .validate_with_path(&child_path(path, "nvCxnSpPr"))?;
        self.sp_pr.validate_with_path(&child_path(path, "spPr"))?;
        validate_opt(path, "style", &self.style)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_Picture` (`p:pic`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Picture {
    pub nv_pic_pr: PictureNonVisual,
    pub blip_fill: BlipFillProperties,
    pub sp_pr: ShapeProperties,
    pub style: Option<ShapeStyle>,
    pub ext_lst: Option<ExtensionList>,
}

impl Picture {
    /// A picture showing the image of relationship `rel_id`, stretched to
    /// `xfrm`.
    pub fn new(id: u32, name: impl Into<String>, rel_id: &str, xfrm: Transform2D) -> Self {
        let mut pic = Self {
            nv_pic_pr: PictureNonVisual::new(id, name),
            blip_fill: BlipFillProperties::stretched(rel_id),
            ..Self::default()
        };
        pic.sp_pr.xfrm = Some(xfrm);
        pic
    }

    pub fn embed(&self) -> Option<&str> {
        self.blip_fill.blip.as_ref()?.embed.as_deref()
    }
}

impl XmlRead for Picture {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut pic = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "nvPicPr" => pic.nv_pic_pr = reader.read(child)?,
                "blipFill" => pic.blip_fill = reader.read(child)?,
                "spPr" => pic.sp_pr = reader.read(child)?,
                "style" => pic.style = Some(reader.read(child)?),
                "extLst" => pic.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(pic)
    }
}

impl XmlWrite for Picture {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("p:nvPicPr", &self.nv_pic_pr)?;
        writer.child("p:blipFill", &self.blip_fill)?;
        writer.child("p:spPr", &self.sp_pr)?;
        writer.opt_child("p:style", &self.style)?;
        writer.opt_child("p:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Picture {
    const TYPE_NAME: &'static str = "CT_Picture";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.nv_pic_pr.validate_with_path(&child_path(path, "nvPicPr"))?;
        self.blip_fill.validate_with_path(&child_path(path, "blipFill"))?;
        self.sp_pr.validate_with_path(&child_path(path, "spPr"))?;
        validate_opt(path, "style", &self.style)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_GraphicalObjectFrame` (`p:graphicFrame`): hosts charts, tables,
/// diagrams and OLE objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicFrame {
    pub bw_mode: Option<BlackWhiteMode>,
    pub nv_graphic_frame_pr: GraphicFrameNonVisual,
    pub xfrm: Transform2D,
    pub graphic: GraphicalObject,
    pub ext_lst: Option<ExtensionList>,
}

impl GraphicFrame {
    /// A frame showing the chart part of relationship `rel_id`.
    pub fn chart(id: u32, name: impl Into<String>, rel_id: &str, xfrm: Transform2D) -> Self {
        Self {
            nv_graphic_frame_pr: GraphicFrameNonVisual::new(id, name),
            xfrm,
            graphic: GraphicalObject::new(GraphicalObjectData::chart(rel_id)),
            ..Self::default()
        }
    }

    pub fn chart_rel_id(&self) -> Option<&str> {
        self.graphic.graphic_data.chart_rel_id()
    }
}

impl XmlRead for GraphicFrame {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut frame = Self {
            bw_mode: element.parse_attr("bwMode")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "nvGraphicFramePr" => frame.nv_graphic_frame_pr = reader.read(child)?,
                "xfrm" => frame.xfrm = reader.read(child)?,
                "graphic" => frame.graphic = reader.read(child)?,
                "extLst" => frame.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(frame)
    }
}

impl XmlWrite for GraphicFrame {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .opt_attr("bwMode", self.bw_mode.as_ref())
            .open()?;
        writer.child("p:nvGraphicFramePr", &self.nv_graphic_frame_pr)?;
        writer.child("p:xfrm", &self.xfrm)?;
        writer.child("a:graphic", &self.graphic)?;
        writer.opt_child("p:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for GraphicFrame {
    const TYPE_NAME: &'static str = "CT_GraphicalObjectFrame";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.nv_graphic_frame_pr
            .validate_with_path(&child_path(path, "nvGraphicFramePr"))?;
        self.xfrm.validate_with_path(&child_path(path, "xfrm"))?;
        self.graphic.validate_with_path(&child_path(path, "graphic"))?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// A member of a shape tree or group shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeTreeItem {
    /// `p:sp`
    Shape(Box<Shape>),
    /// `p:grpSp`
    Group(Box<GroupShape>),
    /// `p:graphicFrame`
    GraphicFrame(Box<GraphicFrame>),
    /// `p:cxnSp`
    Connector(Box<Connector>),
    /// `p:pic`
    Picture(Box<Picture>),
}

impl ShapeTreeItem {
    /// Non-visual drawing properties (id and name) of the member.
    pub fn c_nv_pr(&self) -> &NonVisualDrawingProps {
        match self {
            Self::Shape(sp) => &sp.nv_sp_pr.c_nv_pr,
            Self::Group(grp) => &grp.nv_grp_sp_pr.c_nv_pr,
            Self::GraphicFrame(frame) => &frame.nv_graphic_frame_pr.c_nv_pr,
            Self::Connector(cxn) => &cxn.nv_cxn_sp_pr.c_nv_pr,
            Self::Picture(pic) => &pic.nv_pic_pr.c_nv_pr,
        }
    }
}

impl XmlChoice for ShapeTreeItem {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "sp" | "grpSp" | "graphicFrame" | "cxnSp" | "pic")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        Ok(match element.local_name() {
            "sp" => Self::Shape(reader.read(element)?),
            "grpSp" => Self::Group(reader.read(element)?),
            "graphicFrame" => Self::GraphicFrame(reader.read(element)?),
            "cxnSp" => Self::Connector(reader.read(element)?),
            "pic" => Self::Picture(reader.read(element)?),
            _ => {
                return Err(OoxmlError::UnexpectedElement {
                    expected: "a shape tree member".to_string(),
                    found: element.name().to_string(),
                });
            },
        })
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::Shape(sp) => writer.child("p:sp", sp.as_ref()),
            Self::Group(grp) => writer.child("p:grpSp", grp.as_ref()),
            Self::GraphicFrame(frame) => writer.child("p:graphicFrame", frame.as_ref()),
            Self::Connector(cxn) => writer.child("p:cxnSp", cxn.as_ref()),
            Self::Picture(pic) => writer.child("p:pic", pic.as_ref()),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::Shape(_) => "sp",
            Self::Group(_) => "grpSp",
            Self::GraphicFrame(_) => "graphicFrame",
            Self::Connector(_) => "cxnSp",
            Self::Picture(_) => "pic",
        }
    }
}

impl Validate for ShapeTreeItem {
    const TYPE_NAME: &'static str = "EG_ShapeTreeItem";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::Shape(sp) => sp.validate_with_path(path),
            Self::Group(grp) => grp.validate_with_path(path),
            Self::GraphicFrame(frame) => frame.validate_with_path(path),
            Self::Connector(cxn) => cxn.validate_with_path(path),
            Self::Picture(pic) => pic.validate_with_path(path),
        }
    }
}

/// `CT_GroupShape`: `p:grpSp`, and the `p:spTree` of every slide.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupShape {
    pub nv_grp_sp_pr: GroupShapeNonVisual,
    pub grp_sp_pr: GroupShapeProperties,
    pub items: Vec<ShapeTreeItem>,
    pub ext_lst: Option<ExtensionList>,
}

impl Default for GroupShape {
    /// An empty shape tree the way PowerPoint writes it: id 1, no name.
    fn default() -> Self {
        Self {
            nv_grp_sp_pr: GroupShapeNonVisual::new(1, ""),
            grp_sp_pr: GroupShapeProperties::new(),
            items: Vec::new(),
            ext_lst: None,
        }
    }
}

impl GroupShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: ShapeTreeItem) -> Self {
        self.items.push(item);
        self
    }

    /// All `p:sp` members of the tree, nested groups included, in document
    /// order.
    pub fn shapes(&self) -> Vec<&Shape> {
        let mut shapes = Vec::new();
        self.collect_shapes(&mut shapes);
        shapes
    }

    fn collect_shapes<'a>(&'a self, shapes: &mut Vec<&'a Shape>) {
        for item in &self.items {
            match item {
                ShapeTreeItem::Shape(sp) => shapes.push(sp),
                ShapeTreeItem::Group(grp) => grp.collect_shapes(shapes),
                _ => {},
            }
        }
    }

    /// The first shape bound to a placeholder of type `ph_type`.
    pub fn placeholder(&self, ph_type: PlaceholderType) -> Option<&Shape> {
        self.shapes()
            .into_iter()
            .find(|sp| sp.placeholder_info().is_some_and(|ph| ph.kind() == ph_type))
    }

    /// Largest drawing id in use, for allocating the next one.
    pub fn max_id(&self) -> u32 {
        self.items
            .iter()
            .map(|item| match item {
                ShapeTreeItem::Group(grp) => grp.max_id(),
                other => other.c_nv_pr().id,
            })
            .fold(self.nv_grp_sp_pr.c_nv_pr.id, u32::max)
    }

    /// Drawing ids must be unique across a slide, nested groups included.
    pub(crate) fn check_unique_ids(&self, path: &str, seen: &mut HashSet<u32>) -> Result<()> {
        let id = self.nv_grp_sp_pr.c_nv_pr.id;
        if !seen.insert(id) {
            return Err(OoxmlError::validation(
                format!("{}/nvGrpSpPr/cNvPr/@id", path),
                format!("duplicate drawing id {}", id),
            ));
        }
        for (i, item) in self.items.iter().enumerate() {
            let item_path = format!("{}/{}[{}]", path, item.choice_name(), i);
            match item {
                ShapeTreeItem::Group(grp) => grp.check_unique_ids(&item_path, seen)?,
                other => {
                    let id = other.c_nv_pr().id;
                    if !seen.insert(id) {
                        return Err(OoxmlError::validation(
                            item_path,
                            format!("duplicate drawing id {}", id),
                        ));
                    }
                },
            }
        }
        Ok(())
    }
}

impl XmlRead for GroupShape {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut grp = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "nvGrpSpPr" => grp.nv_grp_sp_pr = reader.read(child)?,
                "grpSpPr" => grp.grp_sp_pr = reader.read(child)?,
                name if ShapeTreeItem::is_choice(name) => {
                    grp.items.push(ShapeTreeItem::read_choice(reader, child)?)
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
        writer.child("p:nvGrpSpPr", &self.nv_grp_sp_pr)?;
        writer.child("p:grpSpPr", &self.grp_sp_pr)?;
        writer.choices(&self.items)?;
        writer.opt_child("p:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for GroupShape {
    const TYPE_NAME: &'static str = "CT_GroupShape";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.nv_grp_sp_pr
            .validate_with_path(&child_path(path, "nvGrpSpPr"))?;
        self.grp_sp_pr.validate_with_path(&child_path(path, "grpSpPr"))?;
        validate_choices(path, &self.items)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::options::DEFAULT_MAX_DEPTH;
    use crate::xml::{ReadOptions, from_fragment, from_fragment_with, to_fragment};

    #[test]
    fn test_title_placeholder_shape() {
        let xml = r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>Quarterly review</a:t></a:r></a:p></p:txBody></p:sp>"#;
        let sp: Shape = from_fragment(xml).unwrap();
        assert_eq!(sp.placeholder_info().unwrap().kind(), PlaceholderType::Title);
        assert_eq!(sp.text().as_deref(), Some("Quarterly review"));
        assert!(sp.nv_sp_pr.c_nv_sp_pr.locks.is_some());
        assert!(sp.validate().is_ok());
        assert_eq!(to_fragment(&sp, "p:sp").unwrap(), xml);
    }

    #[test]
    fn test_placeholder_defaults() {
        let ph: Placeholder = from_fragment(r#"<p:ph idx="1"/>"#).unwrap();
        assert_eq!(ph.kind(), PlaceholderType::Obj);
        assert_eq!(ph.idx, Some(1));
        assert_eq!(ph, Placeholder::indexed(1));
        let ph: Placeholder =
            from_fragment(r#"<p:ph type="body" sz="quarter" idx="13" hasCustomPrompt="1"/>"#).unwrap();
        assert_eq!(ph.sz, Some(PlaceholderSize::Quarter));
        assert_eq!(ph.has_custom_prompt, Some(true));
    }

    #[test]
    fn test_chart_frame() {
        let xml = r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="4" name="Chart 3"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm><a:off x="838200" y="1825625"/><a:ext cx="10515600" cy="4351338"/></p:xfrm><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" r:id="rId2"/></a:graphicData></a:graphic></p:graphicFrame>"#;
        let frame: GraphicFrame = from_fragment(xml).unwrap();
        assert_eq!(frame.chart_rel_id(), Some("rId2"));
        assert_eq!(to_fragment(&frame, "p:graphicFrame").unwrap(), xml);

        let built = GraphicFrame::chart(4, "Chart 3", "rId2", Transform2D::from_rect(838200, 1825625, 10515600, 4351338));
        assert_eq!(built, frame);
    }

    #[test]
    fn test_picture() {
        let pic = Picture::new(5, "Picture 4", "rId3", Transform2D::from_rect(0, 0, 914400, 914400));
        assert_eq!(pic.embed(), Some("rId3"));
        let xml = to_fragment(&pic, "p:pic").unwrap();
        assert!(xml.contains(r#"<p:blipFill><a:blip r:embed="rId3"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#));
        let back: Picture = from_fragment(&xml).unwrap();
        assert_eq!(back, pic);
    }

    #[test]
    fn test_nested_groups() {
        let inner = GroupShape {
            nv_grp_sp_pr: GroupShapeNonVisual::new(5, "Group 4"),
            ..GroupShape::new()
        }
        .with_item(ShapeTreeItem::Shape(Box::new(Shape::placeholder(
            6,
            "Subtitle 5",
            Placeholder::new(PlaceholderType::SubTitle),
            "Details",
        ))));
        let tree = GroupShape::new()
            .with_item(ShapeTreeItem::Shape(Box::new(Shape::new(2, "Rectangle 1"))))
            .with_item(ShapeTreeItem::Group(Box::new(inner)))
            .with_item(ShapeTreeItem::Connector(Box::new(Connector::new(7, "Connector 6"))));

        assert_eq!(tree.shapes().len(), 2);
        assert_eq!(tree.max_id(), 7);
        let subtitle = tree.placeholder(PlaceholderType::SubTitle).unwrap();
        assert_eq!(subtitle.text().as_deref(), Some("Details"));
        assert!(tree.placeholder(PlaceholderType::Title).is_none());

        let mut seen = HashSet::new();
        assert!(tree.check_unique_ids("spTree", &mut seen).is_ok());
        let mut seen = HashSet::new();
        let dup = tree.with_item(ShapeTreeItem::Shape(Box::new(Shape::new(6, "Copy"))));
        let err = dup.check_unique_ids("spTree", &mut seen).unwrap_err();
        assert_eq!(err.to_string(), "spTree/sp[3]: duplicate drawing id 6");
    }

    fn nested_groups(levels: u32) -> String {
        let mut xml = String::new();
        for id in 0..levels {
            xml.push_str(&format!(
                r#"<p:grpSp><p:nvGrpSpPr><p:cNvPr id="{}" name="Group"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
                id + 2
            ));
        }
        for _ in 0..levels {
            xml.push_str("</p:grpSp>");
        }
        xml
    }

    #[test]
    fn test_deep_groups_on_default_thread() {
        let levels = DEFAULT_MAX_DEPTH as u32 - 2;
        let result = std::thread::spawn(move || {
            from_fragment::<GroupShape>(&nested_groups(levels)).map(|group| group.max_id())
        })
        .join()
        .unwrap();
        assert!(matches!(result, Ok(_) | Err(OoxmlError::DepthExceeded(_))));
        if let Ok(max_id) = result {
            assert_eq!(max_id, levels + 1);
        }
    }

    #[test]
    fn test_groups_beyond_depth_limit() {
        let xml = nested_groups(DEFAULT_MAX_DEPTH as u32 + 8);
        let err = std::thread::spawn(move || from_fragment::<GroupShape>(&xml).unwrap_err())
            .join()
            .unwrap();
        assert!(matches!(err, OoxmlError::DepthExceeded(limit) if limit == DEFAULT_MAX_DEPTH));

        let shallow = nested_groups(4);
        let err = from_fragment_with::<GroupShape>(&shallow, ReadOptions::new().with_max_depth(3))
            .unwrap_err();
        assert!(matches!(err, OoxmlError::DepthExceeded(3)));
    }

    #[test]
    fn test_media_is_preserved() {
        let xml = r#"<p:nvPr><a:videoFile r:link="rId2"/><p:extLst><p:ext uri="{DAA4B4D4-6D71-4841-9C94-3DE7FCFB9230}"><p14:media xmlns:p14="http://schemas.microsoft.com/office/powerpoint/2010/main" r:embed="rId1"/></p:ext></p:extLst></p:nvPr>"#;
        let nv_pr: ApplicationNonVisualDrawingProps = from_fragment(xml).unwrap();
        assert_eq!(nv_pr.media.as_ref().unwrap().name, "a:videoFile");
        assert_eq!(to_fragment(&nv_pr, "p:nvPr").unwrap(), xml);
    }
}
