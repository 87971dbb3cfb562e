//! Single-attribute wrapper elements (`<c:x val="..."/>`).
//!
//! Most chart settings are elements whose only content is a `val` attribute.
//! [`Val`] binds the ones where `val` is required, [`OptVal`] the ones where it
//! is optional and falls back to a schema default.

use crate::error::Result;
use crate::xml::{
    ElementStart, Validate, XmlRead, XmlReader, XmlValue, XmlWrite, XmlWriter,
    validate_opt_value, validate_value,
};
use std::io::{BufRead, Write};

/// An element with a required `val` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Val<T> {
    pub val: T,
}

impl<T> Val<T> {
    pub fn new(val: T) -> Self {
        Self { val }
    }
}

impl<T> From<T> for Val<T> {
    fn from(val: T) -> Self {
        Self { val }
    }
}

impl<T: XmlValue + Default> XmlRead for Val<T> {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let val = element.required_attr("val")?;
        reader.read_empty(element)?;
        Ok(Self { val })
    }
}

impl<T: XmlValue> XmlWrite for Val<T> {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).attr("val", &self.val).empty()
    }
}

impl<T: XmlValue> Validate for Val<T> {
    const TYPE_NAME: &'static str = "CT_Val";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_value(path, "@val", &self.val)
    }
}

/// An element with an optional `val` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptVal<T> {
    pub val: Option<T>,
}

impl<T> OptVal<T> {
    pub fn new(val: T) -> Self {
        Self { val: Some(val) }
    }

    /// The element without a `val` attribute.
    pub fn unset() -> Self {
        Self { val: None }
    }
}

impl<T: Clone + Default> OptVal<T> {
    /// The attribute value, or the schema default when it is absent.
    pub fn value(&self) -> T {
        self.val.clone().unwrap_or_default()
    }
}

impl<T> From<T> for OptVal<T> {
    fn from(val: T) -> Self {
        Self::new(val)
    }
}

impl<T: XmlValue> XmlRead for OptVal<T> {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let val = element.parse_attr("val")?;
        reader.read_empty(element)?;
        Ok(Self { val })
    }
}

impl<T: XmlValue> XmlWrite for OptVal<T> {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .opt_attr("val", self.val.as_ref())
            .empty()
    }
}

impl<T: XmlValue> Validate for OptVal<T> {
    const TYPE_NAME: &'static str = "CT_OptVal";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt_value(path, "@val", &self.val)
    }
}

/// `CT_Boolean`: `val` defaults to true, so `<c:delete/>` means deleted.
pub type Boolean = OptVal<bool>;

impl OptVal<bool> {
    /// Effective value, honouring the schema default of `true`.
    pub fn is_true(&self) -> bool {
        self.val.unwrap_or(true)
    }
}

/// `CT_UnsignedInt`
pub type UnsignedInt = Val<u32>;

/// `CT_Double`
pub type Double = Val<f64>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::types::{GapAmount, LegendPos, MarkerSize};
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_boolean_defaults_to_true() {
        let delete: Boolean = from_fragment("<c:delete/>").unwrap();
        assert!(delete.is_true());
        let delete: Boolean = from_fragment(r#"<c:delete val="0"/>"#).unwrap();
        assert!(!delete.is_true());
        assert_eq!(to_fragment(&delete, "c:delete").unwrap(), r#"<c:delete val="0"/>"#);
    }

    #[test]
    fn test_optional_value_falls_back_to_default() {
        let pos: OptVal<LegendPos> = from_fragment("<c:legendPos/>").unwrap();
        assert_eq!(pos.value(), LegendPos::Right);
        let gap: OptVal<GapAmount> = from_fragment(r#"<c:gapWidth val="219"/>"#).unwrap();
        assert_eq!(gap.value(), GapAmount::Value(219));
    }

    #[test]
    fn test_required_value() {
        let idx: UnsignedInt = from_fragment(r#"<c:idx val="3"/>"#).unwrap();
        assert_eq!(idx.val, 3);
        let x: Double = from_fragment(r#"<c:x val="0.25"/>"#).unwrap();
        assert_eq!(to_fragment(&x, "c:x").unwrap(), r#"<c:x val="0.25"/>"#);
    }

    #[test]
    fn test_value_facets_are_validated() {
        let size = OptVal::new(MarkerSize(80));
        let err = size.validate_with_path("CT_Marker/size").unwrap_err();
        assert_eq!(err.to_string(), "CT_Marker/size/@val: value must be <= 72 (have 80)");
    }
}
