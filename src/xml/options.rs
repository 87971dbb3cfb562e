//! Configuration types for decoding and encoding parts.
//!
//! Both option sets follow the same builder style: start from `new()` (the
//! defaults) and chain `with_*` setters.
//!
//! # Examples
//!
//! ```rust
//! use ooxml_schema::xml::{ReadOptions, WriteOptions};
//!
//! let read = ReadOptions::new().with_strict(true).with_validate(true);
//! let write = WriteOptions::new().with_indent(Some(2)).with_xml_declaration(false);
//! assert!(read.strict);
//! assert_eq!(write.indent, Some(2));
//! ```

/// Default nesting limit for decoded documents.
///
/// Decoding recurses once per element level, so the limit also bounds stack
/// use: a document nested this deep decodes on a 2 MiB thread.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options controlling how documents are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Fail on elements a type does not know instead of skipping them
    pub strict: bool,
    /// Validate the decoded root before returning it
    pub validate: bool,
    /// Maximum element nesting depth
    pub max_depth: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            strict: false,
            validate: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ReadOptions {
    /// Create a new `ReadOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether unknown elements are an error.
    ///
    /// When disabled (the default), unknown elements are skipped and a warning
    /// is logged.
    #[inline]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set whether the decoded root is validated.
    #[inline]
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Set the maximum element nesting depth.
    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options controlling how documents are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit `<?xml version="1.0" encoding="UTF-8" ...?>`
    pub xml_declaration: bool,
    /// Add `standalone="yes"` to the declaration
    pub standalone: bool,
    /// Indent nested elements by this many spaces (`None` = compact output)
    pub indent: Option<usize>,
    /// Validate the value before writing anything
    pub validate: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            standalone: true,
            indent: None,
            validate: false,
        }
    }
}

impl WriteOptions {
    /// Create a new `WriteOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the XML declaration is written.
    #[inline]
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }

    /// Set whether the declaration carries `standalone="yes"`.
    #[inline]
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set pretty-print indentation.
    #[inline]
    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    /// Set whether the value is validated before it is written.
    #[inline]
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}
