//! Graphic frame payloads (`a:graphic`).

use crate::error::{OoxmlError, Result};
use crate::xml::namespace::{CHART, GRAPHIC_DATA_CHART, RELATIONSHIPS};
use crate::xml::{
    ElementStart, RawElement, Validate, XmlRead, XmlReader, XmlWrite, XmlWriter, child_path,
};
use std::io::{BufRead, Write};

/// `CT_GraphicalObjectData`: the payload of a graphic frame, identified by
/// `uri` (chart, table, diagram, OLE object, ...). The content is kept as
/// raw markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicalObjectData {
    pub uri: String,
    pub content: Vec<RawElement>,
}

impl GraphicalObjectData {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            content: Vec::new(),
        }
    }

    /// Payload referencing a chart part through relationship `rel_id`.
    pub fn chart(rel_id: impl Into<String>) -> Self {
        let chart = RawElement::new("c:chart")
            .with_attribute("xmlns:c", CHART)
            .with_attribute("xmlns:r", RELATIONSHIPS)
            .with_attribute("r:id", rel_id);
        Self {
            uri: GRAPHIC_DATA_CHART.to_string(),
            content: vec![chart],
        }
    }

    /// Relationship id of the embedded chart, if this payload is a chart.
    pub fn chart_rel_id(&self) -> Option<&str> {
        if self.uri != GRAPHIC_DATA_CHART {
            return None;
        }
        self.content
            .iter()
            .find(|element| element.local_name() == "chart")
            .and_then(|chart| chart.attribute("id"))
    }
}

impl XmlRead for GraphicalObjectData {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut data = Self::new(element.required_attr::<String>("uri")?);
        reader.read_children(element, |reader, child| {
            data.content.push(reader.read_raw(child)?);
            Ok(true)
        })?;
        Ok(data)
    }
}

impl XmlWrite for GraphicalObjectData {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer.element(name).attr("uri", &self.uri);
        if self.content.is_empty() {
            return tag.empty();
        }
        tag.open()?;
        for element in &self.content {
            writer.child(&element.name, element)?;
        }
        writer.end(name)
    }
}

impl Validate for GraphicalObjectData {
    const TYPE_NAME: &'static str = "CT_GraphicalObjectData";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        if self.uri.is_empty() {
            return Err(OoxmlError::validation(child_path(path, "@uri"), "uri is required"));
        }
        Ok(())
    }
}

/// `CT_GraphicalObject`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicalObject {
    pub graphic_data: GraphicalObjectData,
}

impl GraphicalObject {
    pub fn new(graphic_data: GraphicalObjectData) -> Self {
        Self { graphic_data }
    }
}

impl XmlRead for GraphicalObject {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut graphic = Self::default();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "graphicData" {
                return Ok(false);
            }
            graphic.graphic_data = reader.read(child)?;
            Ok(true)
        })?;
        Ok(graphic)
    }
}

impl XmlWrite for GraphicalObject {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("a:graphicData", &self.graphic_data)?;
        writer.end(name)
    }
}

impl Validate for GraphicalObject {
    const TYPE_NAME: &'static str = "CT_GraphicalObject";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.graphic_data
            .validate_with_path(&child_path(path, "graphicData"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_chart_frame_payload() {
        let xml = r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" r:id="rId2"/></a:graphicData></a:graphic>"#;
        let graphic: GraphicalObject = from_fragment(xml).unwrap();
        assert_eq!(graphic.graphic_data.chart_rel_id(), Some("rId2"));
        assert_eq!(graphic, GraphicalObject::new(GraphicalObjectData::chart("rId2")));
        assert_eq!(to_fragment(&graphic, "a:graphic").unwrap(), xml);
    }

    #[test]
    fn test_table_payload_is_not_a_chart() {
        let xml = r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblGrid><a:gridCol w="3048000"/></a:tblGrid></a:tbl></a:graphicData>"#;
        let data: GraphicalObjectData = from_fragment(xml).unwrap();
        assert_eq!(data.chart_rel_id(), None);
        assert!(data.content[0].find("gridCol").is_some());
        assert_eq!(to_fragment(&data, "a:graphicData").unwrap(), xml);
    }

    #[test]
    fn test_missing_uri() {
        let graphic = GraphicalObject::default();
        let err = graphic.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_GraphicalObject/graphicData/@uri: uri is required");
    }
}
