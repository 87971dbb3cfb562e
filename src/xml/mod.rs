//! The XML data-binding core.
//!
//! Every schema complex type in this crate implements the same three-part
//! contract:
//!
//! - [`XmlRead`]: decode from an already-consumed start tag, dispatching
//!   children on their local name and skipping anything unknown.
//! - [`XmlWrite`]: encode attributes, then children in schema order.
//! - [`Validate`]: recurse through present children and check simple-type
//!   facets and occurrence counts.
//!
//! Document roots additionally implement [`XmlRoot`], which lets the generic
//! [`from_str`]/[`to_string`] family handle declarations and namespaces.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "chart")]
//! # fn main() -> ooxml_schema::Result<()> {
//! use ooxml_schema::chart::ChartSpace;
//! use ooxml_schema::xml;
//!
//! let space = ChartSpace::new();
//! let text = xml::to_string(&space)?;
//! let decoded: ChartSpace = xml::from_str(&text)?;
//! assert_eq!(decoded, space);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "chart"))]
//! # fn main() {}
//! ```

pub mod escape;
pub mod namespace;
pub mod options;
pub mod raw;
pub mod reader;
pub mod value;
pub mod writer;

pub use escape::{escape_xml, unescape_xml};
pub use options::{ReadOptions, WriteOptions};
pub use raw::{RawElement, RawNode};
pub use reader::{ElementStart, XmlReader};
pub use value::XmlValue;
pub use writer::{StartTag, XmlWriter};

use crate::error::{OoxmlError, Result};
use std::io::{BufRead, Write};

/// Decoding half of the binding contract.
pub trait XmlRead: Sized {
    /// Decode from `element`, whose start tag has already been consumed.
    ///
    /// Implementations consume everything up to and including the matching
    /// end tag.
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self>;
}

/// Encoding half of the binding contract.
pub trait XmlWrite {
    /// Encode as an element called `name`.
    ///
    /// The caller picks the name because the same complex type appears under
    /// several element names (`c:floor`, `c:sideWall` and `c:backWall` are all
    /// `CT_Surface`).
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()>;
}

/// Structural validation.
pub trait Validate {
    /// Schema name of the type, used as the root of validation paths.
    const TYPE_NAME: &'static str;

    /// Validate with the type name as path.
    fn validate(&self) -> Result<()> {
        self.validate_with_path(Self::TYPE_NAME)
    }

    /// Validate, reporting errors under `path`.
    fn validate_with_path(&self, path: &str) -> Result<()>;
}

/// A model-group choice (`EG_*`, or a choice inside a complex type) whose
/// alternative is selected by the element name.
///
/// The enum is read from, and written as, the element of whichever
/// alternative it holds, so it has no wrapper element of its own.
pub trait XmlChoice: Sized {
    /// Whether an element with this local name is one of the alternatives.
    fn is_choice(local_name: &str) -> bool;

    /// Decode the alternative named by `element`.
    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart)
    -> Result<Self>;

    /// Encode the present alternative under its own element name.
    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()>;

    /// Local element name of the present alternative.
    fn choice_name(&self) -> &'static str;
}

/// A type that can be the root of a part.
pub trait XmlRoot: XmlRead + XmlWrite + Validate {
    /// Qualified root element name.
    const ROOT: &'static str;
    /// Namespace declarations (prefix, URI) written on the root.
    const NAMESPACES: &'static [(&'static str, &'static str)];
}

// Large children are held in boxes so that each decoding level only keeps a
// pointer in its stack frame.
impl<T: XmlRead> XmlRead for Box<T> {
    #[inline(never)]
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        T::read_xml(reader, element).map(Box::new)
    }
}

impl<T: XmlWrite + ?Sized> XmlWrite for Box<T> {
    #[inline]
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        (**self).write_xml(writer, name)
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    #[inline]
    fn validate_with_path(&self, path: &str) -> Result<()> {
        (**self).validate_with_path(path)
    }
}

/// Path of a child element.
#[inline]
pub fn child_path(path: &str, name: &str) -> String {
    format!("{}/{}", path, name)
}

/// Validate an optional child.
pub fn validate_opt<T: Validate>(path: &str, name: &str, value: &Option<T>) -> Result<()> {
    match value {
        Some(value) => value.validate_with_path(&child_path(path, name)),
        None => Ok(()),
    }
}

/// Validate every element of a repeated child.
pub fn validate_all<T: Validate>(path: &str, name: &str, values: &[T]) -> Result<()> {
    for (i, value) in values.iter().enumerate() {
        value.validate_with_path(&format!("{}/{}[{}]", path, name, i))?;
    }
    Ok(())
}

/// Validate a choice under the element name of its present alternative.
pub fn validate_choice<T: XmlChoice + Validate>(path: &str, value: &T) -> Result<()> {
    value.validate_with_path(&child_path(path, value.choice_name()))
}

/// Validate an optional choice.
pub fn validate_opt_choice<T: XmlChoice + Validate>(path: &str, value: &Option<T>) -> Result<()> {
    match value {
        Some(value) => validate_choice(path, value),
        None => Ok(()),
    }
}

/// Validate a sequence of choices; each gets its position in the sequence.
pub fn validate_choices<T: XmlChoice + Validate>(path: &str, values: &[T]) -> Result<()> {
    for (i, value) in values.iter().enumerate() {
        value.validate_with_path(&format!("{}/{}[{}]", path, value.choice_name(), i))?;
    }
    Ok(())
}

/// Check the facets of a simple-type value.
#[inline]
pub fn validate_value<T: XmlValue>(path: &str, name: &str, value: &T) -> Result<()> {
    value.validate_value(&child_path(path, name))
}

/// Check the facets of an optional simple-type value.
pub fn validate_opt_value<T: XmlValue>(path: &str, name: &str, value: &Option<T>) -> Result<()> {
    match value {
        Some(value) => validate_value(path, name, value),
        None => Ok(()),
    }
}

/// Check minOccurs/maxOccurs of a repeated child.
pub fn check_occurs(
    path: &str,
    name: &str,
    len: usize,
    min: usize,
    max: Option<usize>,
) -> Result<()> {
    if len < min {
        return Err(OoxmlError::validation(
            child_path(path, name),
            format!("must occur at least {} time(s) (have {})", min, len),
        ));
    }
    if let Some(max) = max {
        if len > max {
            return Err(OoxmlError::validation(
                child_path(path, name),
                format!("must occur at most {} time(s) (have {})", max, len),
            ));
        }
    }
    Ok(())
}

/// Decode a root from a string.
pub fn from_str<T: XmlRoot>(xml: &str) -> Result<T> {
    from_slice(xml.as_bytes())
}

/// Decode a root from bytes.
pub fn from_slice<T: XmlRoot>(xml: &[u8]) -> Result<T> {
    from_reader(xml, ReadOptions::default())
}

/// Decode a root from any buffered reader.
pub fn from_reader<T: XmlRoot, R: BufRead>(reader: R, options: ReadOptions) -> Result<T> {
    XmlReader::with_options(reader, options).read_root()
}

/// Decode a single element that is not necessarily a part root.
pub fn from_fragment<T: XmlRead>(xml: &str) -> Result<T> {
    XmlReader::new(xml.as_bytes()).read_element()
}

/// Decode a single element with the given options.
pub fn from_fragment_with<T: XmlRead>(xml: &str, options: ReadOptions) -> Result<T> {
    XmlReader::with_options(xml.as_bytes(), options).read_element()
}

/// Encode a value as a single element named `name`, without declaration or
/// namespace declarations.
pub fn to_fragment<T: XmlWrite>(value: &T, name: &str) -> Result<String> {
    let mut writer = XmlWriter::with_options(
        Vec::new(),
        WriteOptions::new().with_xml_declaration(false),
    );
    value.write_xml(&mut writer, name)?;
    String::from_utf8(writer.into_inner()).map_err(|e| OoxmlError::Xml(e.to_string()))
}

/// Decode a single element as one alternative of a choice.
pub fn choice_from_fragment<T: XmlChoice>(xml: &str) -> Result<T> {
    XmlReader::new(xml.as_bytes()).read_choice_element()
}

/// Encode a choice under the element name of its alternative.
pub fn choice_to_fragment<T: XmlChoice>(value: &T) -> Result<String> {
    let mut writer = XmlWriter::with_options(
        Vec::new(),
        WriteOptions::new().with_xml_declaration(false),
    );
    value.write_choice(&mut writer)?;
    String::from_utf8(writer.into_inner()).map_err(|e| OoxmlError::Xml(e.to_string()))
}

/// Encode a root to a string with default options.
pub fn to_string<T: XmlRoot>(value: &T) -> Result<String> {
    to_string_with(value, WriteOptions::default())
}

/// Encode a root to a string.
pub fn to_string_with<T: XmlRoot>(value: &T, options: WriteOptions) -> Result<String> {
    let bytes = to_vec(value, options)?;
    String::from_utf8(bytes).map_err(|e| OoxmlError::Xml(e.to_string()))
}

/// Encode a root to bytes.
pub fn to_vec<T: XmlRoot>(value: &T, options: WriteOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    to_writer(value, &mut out, options)?;
    Ok(out)
}

/// Encode a root into `out`.
#[inline]
pub fn to_writer<T: XmlRoot, W: Write>(value: &T, out: W, options: WriteOptions) -> Result<()> {
    write_document(value, out, &options)
}

/// Write a complete part: declaration, root with its namespace declarations,
/// and content.
///
/// With [`WriteOptions::validate`] the value is validated first and nothing
/// is written when validation fails.
pub fn write_document<T: XmlRoot, W: Write>(
    value: &T,
    out: W,
    options: &WriteOptions,
) -> Result<()> {
    let options = *options;
    if options.validate {
        value.validate()?;
    }
    let mut writer = XmlWriter::with_options(out, options);
    if options.xml_declaration {
        writer.declaration()?;
    }
    writer.declare_namespaces(T::NAMESPACES);
    value.write_xml(&mut writer, T::ROOT)?;
    log::debug!("encoded {} as <{}>", T::TYPE_NAME, T::ROOT);
    writer.into_inner().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_occurs() {
        assert!(check_occurs("CT_BarChart", "axId", 2, 2, Some(2)).is_ok());
        let err = check_occurs("CT_BarChart", "axId", 1, 2, Some(2)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "CT_BarChart/axId: must occur at least 2 time(s) (have 1)"
        );
        assert!(check_occurs("CT_TextBody", "p", 3, 1, None).is_ok());
        assert!(check_occurs("CT_Bar3DChart", "axId", 4, 2, Some(3)).is_err());
    }
}
