//! Theme style references (`CT_ShapeStyle`).

use crate::drawing::color::Color;
use crate::error::Result;
use crate::xml::{
    ElementStart, Validate, XmlChoice, XmlRead, XmlReader, XmlWrite, XmlWriter, validate_choice,
    validate_opt_choice,
};
use std::io::{BufRead, Write};

crate::st_enum! {
    /// `ST_FontCollectionIndex`
    FontCollectionIndex = "ST_FontCollectionIndex" {
        Major => "major",
        Minor => "minor",
        None => "none",
    }
}

fn read_color<R: BufRead>(
    reader: &mut XmlReader<R>,
    element: &ElementStart,
) -> Result<Option<Color>> {
    let mut color = None;
    reader.read_children(element, |reader, child| {
        if !Color::is_choice(child.local_name()) {
            return Ok(false);
        }
        color = Some(Color::read_choice(reader, child)?);
        Ok(true)
    })?;
    Ok(color)
}

/// `CT_StyleMatrixReference`: index into the theme's line, fill or effect
/// style list, with an optional colour override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMatrixReference {
    pub idx: u32,
    pub color: Option<Color>,
}

impl StyleMatrixReference {
    pub fn new(idx: u32, color: Option<Color>) -> Self {
        Self { idx, color }
    }
}

impl XmlRead for StyleMatrixReference {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let idx = element.required_attr("idx")?;
        let color = read_color(reader, element)?;
        Ok(Self { idx, color })
    }
}

impl XmlWrite for StyleMatrixReference {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer.element(name).attr("idx", &self.idx);
        match &self.color {
            None => tag.empty(),
            Some(color) => {
                tag.open()?;
                writer.choice(color)?;
                writer.end(name)
            },
        }
    }
}

impl Validate for StyleMatrixReference {
    const TYPE_NAME: &'static str = "CT_StyleMatrixReference";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_choice(path, &self.color)
    }
}

/// `CT_FontReference`
#[derive(Debug, Clone, PartialEq)]
pub struct FontReference {
    pub idx: FontCollectionIndex,
    pub color: Option<Color>,
}

impl Default for FontReference {
    fn default() -> Self {
        Self {
            idx: FontCollectionIndex::Minor,
            color: None,
        }
    }
}

impl XmlRead for FontReference {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let idx = element
            .parse_attr("idx")?
            .unwrap_or(FontCollectionIndex::Minor);
        let color = read_color(reader, element)?;
        Ok(Self { idx, color })
    }
}

impl XmlWrite for FontReference {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let tag = writer.element(name).attr("idx", &self.idx);
        match &self.color {
            None => tag.empty(),
            Some(color) => {
                tag.open()?;
                writer.choice(color)?;
                writer.end(name)
            },
        }
    }
}

impl Validate for FontReference {
    const TYPE_NAME: &'static str = "CT_FontReference";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_choice(path, &self.color)
    }
}

/// `CT_ShapeStyle`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStyle {
    pub ln_ref: StyleMatrixReference,
    pub fill_ref: StyleMatrixReference,
    pub effect_ref: StyleMatrixReference,
    pub font_ref: FontReference,
}

impl ShapeStyle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl XmlRead for ShapeStyle {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut style = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "lnRef" => style.ln_ref = reader.read(child)?,
                "fillRef" => style.fill_ref = reader.read(child)?,
                "effectRef" => style.effect_ref = reader.read(child)?,
                "fontRef" => style.font_ref = reader.read(child)?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(style)
    }
}

impl XmlWrite for ShapeStyle {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).open()?;
        writer.child("a:lnRef", &self.ln_ref)?;
        writer.child("a:fillRef", &self.fill_ref)?;
        writer.child("a:effectRef", &self.effect_ref)?;
        writer.child("a:fontRef", &self.font_ref)?;
        writer.end(name)
    }
}

impl Validate for ShapeStyle {
    const TYPE_NAME: &'static str = "CT_ShapeStyle";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        self.ln_ref.validate_with_path(&format!("{}/lnRef", path))?;
        self.fill_ref.validate_with_path(&format!("{}/fillRef", path))?;
        self.effect_ref.validate_with_path(&format!("{}/effectRef", path))?;
        if let Some(color) = &self.font_ref.color {
            validate_choice(&format!("{}/fontRef", path), color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::color::SchemeColorVal;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_shape_style_round_trip() {
        let xml = r#"<p:style><a:lnRef idx="2"><a:schemeClr val="accent1"><a:shade val="50000"/></a:schemeClr></a:lnRef><a:fillRef idx="1"><a:schemeClr val="accent1"/></a:fillRef><a:effectRef idx="0"><a:schemeClr val="accent1"/></a:effectRef><a:fontRef idx="minor"><a:schemeClr val="lt1"/></a:fontRef></p:style>"#;
        let style: ShapeStyle = from_fragment(xml).unwrap();
        assert_eq!(style.ln_ref.idx, 2);
        assert_eq!(style.font_ref.idx, FontCollectionIndex::Minor);
        assert_eq!(style.font_ref.color, Some(Color::scheme(SchemeColorVal::Lt1)));
        assert!(style.validate().is_ok());
        assert_eq!(to_fragment(&style, "p:style").unwrap(), xml);
    }
}
