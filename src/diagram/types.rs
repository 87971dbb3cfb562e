//! Diagram simple types.

use crate::error::{OoxmlError, Result};
use crate::xml::XmlValue;
use crate::xml::value::is_guid;
use std::fmt;
use std::hash::{Hash, Hasher};

/// `ST_ModelId`: union of `xsd:int` and `s:ST_Guid`.
///
/// Office writes GUIDs for points it created and small integers for the
/// points of a diagram built from a template.
///
/// GUIDs compare and hash without regard to ASCII case, and keep the case
/// they were written in.
#[derive(Debug, Clone)]
pub enum ModelId {
    Int(i32),
    Guid(String),
}

impl PartialEq for ModelId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Guid(a), Self::Guid(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }
}

impl Eq for ModelId {}

impl Hash for ModelId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Int(value) => value.hash(state),
            Self::Guid(value) => {
                for byte in value.bytes() {
                    state.write_u8(byte.to_ascii_lowercase());
                }
                state.write_u8(0xff);
            },
        }
    }
}

impl ModelId {
    pub fn guid(value: impl Into<String>) -> Self {
        Self::Guid(value.into())
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl From<i32> for ModelId {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Guid(value) => f.write_str(value),
        }
    }
}

impl XmlValue for ModelId {
    fn parse_xml(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(OoxmlError::invalid_value("ST_ModelId", value, "empty model id"));
        }
        match value.parse::<i32>() {
            Ok(int) => Ok(Self::Int(int)),
            Err(_) => Ok(Self::Guid(value.to_string())),
        }
    }

    fn write_value(&self, out: &mut String) {
        match self {
            Self::Int(value) => out.push_str(itoa::Buffer::new().format(*value)),
            Self::Guid(value) => out.push_str(value),
        }
    }

    fn validate_value(&self, path: &str) -> Result<()> {
        match self {
            Self::Int(_) => Ok(()),
            Self::Guid(value) if is_guid(value) => Ok(()),
            Self::Guid(value) => Err(OoxmlError::validation(
                path,
                format!("'{}' is neither an integer nor a GUID", value),
            )),
        }
    }
}

crate::st_enum! {
    /// `ST_PtType`: role of a point in the data model.
    PtType = "ST_PtType", default Node {
        Node => "node",
        Asst => "asst",
        Doc => "doc",
        Pres => "pres",
        ParTrans => "parTrans",
        SibTrans => "sibTrans",
    }
}

impl PtType {
    /// Whether the point is a transition (the connector between two nodes).
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::ParTrans | Self::SibTrans)
    }
}

crate::st_enum! {
    /// `ST_CxnType`
    CxnType = "ST_CxnType", default ParOf {
        ParOf => "parOf",
        PresOf => "presOf",
        PresParOf => "presParOf",
        UnknownRelationship => "unknownRelationship",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_model_id_forms() {
        assert_eq!(ModelId::parse_xml("7").unwrap(), ModelId::Int(7));
        let guid = "{5E3C2BF8-0A6E-4C1B-9D0B-3A1E2C7B9F10}";
        assert_eq!(ModelId::parse_xml(guid).unwrap(), ModelId::guid(guid));
        assert!(ModelId::guid(guid).validate_value("pt/@modelId").is_ok());

        let err = ModelId::guid("node-1").validate_value("pt/@modelId").unwrap_err();
        assert_eq!(err.to_string(), "pt/@modelId: 'node-1' is neither an integer nor a GUID");
        assert!(ModelId::parse_xml("").is_err());
    }

    #[test]
    fn test_guid_ignores_case() {
        let upper = ModelId::guid("{5E3C2BF8-0A6E-4C1B-9D0B-3A1E2C7B9F10}");
        let lower = ModelId::guid("{5e3c2bf8-0a6e-4c1b-9d0b-3a1e2c7b9f10}");
        assert_eq!(upper, lower);
        assert_ne!(upper, ModelId::guid("{5E3C2BF8-0A6E-4C1B-9D0B-3A1E2C7B9F11}"));
        assert_ne!(ModelId::Int(1), ModelId::guid("1"));

        let ids: std::collections::HashSet<ModelId> = [upper.clone()].into_iter().collect();
        assert!(ids.contains(&lower));
        assert_eq!(lower.to_xml_string(), "{5e3c2bf8-0a6e-4c1b-9d0b-3a1e2c7b9f10}");
    }

    #[test]
    fn test_transition_points() {
        assert!(PtType::SibTrans.is_transition());
        assert!(!PtType::default().is_transition());
        assert_eq!(CxnType::default().xml_value(), "parOf");
    }

    proptest! {
        #[test]
        fn prop_integer_ids_keep_their_text(value in any::<i32>()) {
            let id = ModelId::parse_xml(&value.to_string()).unwrap();
            prop_assert_eq!(id.to_xml_string(), value.to_string());
        }
    }
}
