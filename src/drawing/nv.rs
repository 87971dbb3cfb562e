//! Non-visual properties (`cNvPr`, `cNvSpPr`, ...).
//!
//! Locking elements (`a:spLocks`, `a:picLocks`, ...) and hyperlinks are
//! carried as raw elements.

use crate::drawing::ext::ExtensionList;
use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, RawElement, Validate, XmlRead, XmlReader, XmlWrite, XmlWriter, validate_opt,
};
use std::io::{BufRead, Write};

/// `CT_NonVisualDrawingProps`: id and name of a drawing object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NonVisualDrawingProps {
    /// Unique id within the part
    pub id: u32,
    pub name: String,
    pub descr: Option<String>,
    pub hidden: Option<bool>,
    pub title: Option<String>,
    pub hlink_click: Option<RawElement>,
    pub hlink_hover: Option<RawElement>,
    pub ext_lst: Option<ExtensionList>,
}

impl NonVisualDrawingProps {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }
}

impl XmlRead for NonVisualDrawingProps {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut c_nv_pr = Self {
            id: element.required_attr("id")?,
            name: element.required_attr("name")?,
            descr: element.parse_attr("descr")?,
            hidden: element.parse_attr("hidden")?,
            title: element.parse_attr("title")?,
            ..Self::default()
        };
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "hlinkClick" => c_nv_pr.hlink_click = Some(reader.read_raw(child)?),
                "hlinkHover" => c_nv_pr.hlink_hover = Some(reader.read_raw(child)?),
                "extLst" => c_nv_pr.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(c_nv_pr)
    }
}

impl XmlWrite for NonVisualDrawingProps {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer
            .element(name)
            .attr("id", &self.id)
            .attr("name", &self.name)
            .opt_attr("descr", self.descr.as_ref())
            .opt_attr("hidden", self.hidden.as_ref())
            .opt_attr("title", self.title.as_ref());
        if self.hlink_click.is_none() && self.hlink_hover.is_none() && self.ext_lst.is_none() {
            return tag.empty();
        }
        tag.open()?;
        writer.opt_child("a:hlinkClick", &self.hlink_click)?;
        writer.opt_child("a:hlinkHover", &self.hlink_hover)?;
        writer.opt_child("a:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for NonVisualDrawingProps {
    const TYPE_NAME: &'static str = "CT_NonVisualDrawingProps";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// Shared shape of the `CT_NonVisual*Properties` types: an optional locking
/// element plus an extension list.
macro_rules! non_visual_locks {
    (
        $(#[$meta:meta])*
        $name:ident = $schema:literal, $locks:literal $(, $attr_field:ident: $attr_ty:ty => $attr:literal)*
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(pub $attr_field: Option<$attr_ty>,)*
            pub locks: Option<RawElement>,
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
                let mut props = Self {
                    $($attr_field: element.parse_attr($attr)?,)*
                    ..Self::default()
                };
                reader.read_children(element, |reader, child| {
                    match child.local_name() {
                        $locks => props.locks = Some(reader.read_raw(child)?),
                        "extLst" => props.ext_lst = Some(reader.read(child)?),
                        _ => return Ok(false),
                    }
                    Ok(true)
                })?;
                Ok(props)
            }
        }

        impl XmlWrite for $name {
            fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
                let tag = writer.element(name)
                    $(.opt_attr($attr, self.$attr_field.as_ref()))*;
                if self.locks.is_none() && self.ext_lst.is_none() {
                    return tag.empty();
                }
                tag.open()?;
                writer.opt_child(concat!("a:", $locks), &self.locks)?;
                writer.opt_child("a:extLst", &self.ext_lst)?;
                writer.end(name)
            }
        }

        impl Validate for $name {
            const TYPE_NAME: &'static str = $schema;

            fn validate_with_path(&self, path: &str) -> Result<()> {
                validate_opt(path, "extLst", &self.ext_lst)
            }
        }
    };
}

non_visual_locks! {
    /// `CT_NonVisualDrawingShapeProps`
    NonVisualDrawingShapeProps = "CT_NonVisualDrawingShapeProps", "spLocks",
        tx_box: bool => "txBox"
}

non_visual_locks! {
    /// `CT_NonVisualGroupDrawingShapeProps`
    NonVisualGroupDrawingShapeProps = "CT_NonVisualGroupDrawingShapeProps", "grpSpLocks"
}

non_visual_locks! {
    /// `CT_NonVisualPictureProperties`
    NonVisualPictureProperties = "CT_NonVisualPictureProperties", "picLocks",
        prefer_relative_resize: bool => "preferRelativeResize"
}

non_visual_locks! {
    /// `CT_NonVisualGraphicFrameProperties`
    NonVisualGraphicFrameProperties = "CT_NonVisualGraphicFrameProperties", "graphicFrameLocks"
}

/// `CT_Connection`: the end of a connector attached to a shape site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Connection {
    /// Id of the connected shape
    pub id: u32,
    /// Connection site index on that shape
    pub idx: u32,
}

impl XmlRead for Connection {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let cxn = Self {
            id: element.required_attr("id")?,
            idx: element.required_attr("idx")?,
        };
        reader.read_empty(element)?;
        Ok(cxn)
    }
}

impl XmlWrite for Connection {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .attr("id", &self.id)
            .attr("idx", &self.idx)
            .empty()
    }
}

impl Validate for Connection {
    const TYPE_NAME: &'static str = "CT_Connection";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `CT_NonVisualConnectorProperties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NonVisualConnectorProperties {
    pub locks: Option<RawElement>,
    pub st_cxn: Option<Connection>,
    pub end_cxn: Option<Connection>,
    pub ext_lst: Option<ExtensionList>,
}

impl XmlRead for NonVisualConnectorProperties {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut props = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "cxnSpLocks" => props.locks = Some(reader.read_raw(child)?),
                "stCxn" => props.st_cxn = Some(reader.read(child)?),
                "endCxn" => props.end_cxn = Some(reader.read(child)?),
                "extLst" => props.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(props)
    }
}

impl XmlWrite for NonVisualConnectorProperties {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.locks.is_none()
            && self.st_cxn.is_none()
            && self.end_cxn.is_none()
            && self.ext_lst.is_none()
        {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("a:cxnSpLocks", &self.locks)?;
        writer.opt_child("a:stCxn", &self.st_cxn)?;
        writer.opt_child("a:endCxn", &self.end_cxn)?;
        writer.opt_child("a:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for NonVisualConnectorProperties {
    const TYPE_NAME: &'static str = "CT_NonVisualConnectorProperties";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        if let (Some(st), Some(end)) = (&self.st_cxn, &self.end_cxn) {
            if st == end {
                return Err(OoxmlError::validation(
                    path,
                    format!("connector starts and ends at site {} of shape {}", st.idx, st.id),
                ));
            }
        }
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_drawing_props_round_trip() {
        let xml = r#"<p:cNvPr id="4" name="Title 3" descr="Quarterly &quot;results&quot;"><a:hlinkClick r:id="rId3"/></p:cNvPr>"#;
        let c_nv_pr: NonVisualDrawingProps = from_fragment(xml).unwrap();
        assert_eq!(c_nv_pr.id, 4);
        assert_eq!(c_nv_pr.descr.as_deref(), Some("Quarterly \"results\""));
        assert_eq!(c_nv_pr.hlink_click.as_ref().unwrap().attribute("id"), Some("rId3"));
        assert_eq!(to_fragment(&c_nv_pr, "p:cNvPr").unwrap(), xml);
    }

    #[test]
    fn test_shape_locks() {
        let xml = r#"<p:cNvSpPr txBox="1"><a:spLocks noGrp="1"/></p:cNvSpPr>"#;
        let props: NonVisualDrawingShapeProps = from_fragment(xml).unwrap();
        assert_eq!(props.tx_box, Some(true));
        assert_eq!(props.locks.as_ref().unwrap().attribute("noGrp"), Some("1"));
        assert_eq!(to_fragment(&props, "p:cNvSpPr").unwrap(), xml);
        assert_eq!(
            to_fragment(&NonVisualGroupDrawingShapeProps::new(), "p:cNvGrpSpPr").unwrap(),
            "<p:cNvGrpSpPr/>"
        );
    }

    #[test]
    fn test_connector_ends() {
        let xml = r#"<p:cNvCxnSpPr><a:stCxn id="2" idx="3"/><a:endCxn id="5" idx="1"/></p:cNvCxnSpPr>"#;
        let props: NonVisualConnectorProperties = from_fragment(xml).unwrap();
        assert_eq!(props.st_cxn, Some(Connection { id: 2, idx: 3 }));
        assert!(props.validate().is_ok());
        assert_eq!(to_fragment(&props, "p:cNvCxnSpPr").unwrap(), xml);

        let looped = NonVisualConnectorProperties {
            end_cxn: props.st_cxn,
            ..props
        };
        assert!(looped.validate().is_err());
    }
}
