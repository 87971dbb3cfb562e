//! Error types for schema binding operations.
use thiserror::Error;

/// Result type for schema binding operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for decoding, encoding and validating OOXML parts.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An attribute or element value could not be converted to its simple type
    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    /// The document root (or a required element) has the wrong name
    #[error("Unexpected element: expected <{expected}>, found <{found}>")]
    UnexpectedElement { expected: String, found: String },

    /// An element the schema type does not know about (strict mode only)
    #[error("Unknown element <{name}> in <{parent}>")]
    UnknownElement { parent: String, name: String },

    /// The document ended before an element was closed
    #[error("Unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// Element nesting exceeded the configured limit
    #[error("Element nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),

    /// Structural or facet validation failed
    #[error("{path}: {message}")]
    Validation { path: String, message: String },
}

impl OoxmlError {
    /// Build an [`OoxmlError::InvalidValue`].
    pub fn invalid_value(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        OoxmlError::InvalidValue {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`OoxmlError::Validation`].
    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        OoxmlError::Validation {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for OoxmlError {
    fn from(err: std::str::Utf8Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
