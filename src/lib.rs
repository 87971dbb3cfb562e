//! ooxml-schema - Typed object model for Office Open XML chart, diagram and
//! slide markup
//!
//! Every schema complex type (`CT_*`) of the bound vocabularies is a Rust
//! struct that can decode itself from XML, encode itself back in schema order
//! and validate its structure and simple-type facets.
//!
//! # Features
//!
//! - **Charts** (`chart`): DrawingML charts, root `c:chartSpace`
//! - **Diagrams** (`diagram`): diagram drawings (`dsp:drawing`) and the
//!   diagram data model (`dgm:dataModel`)
//! - **Slides** (`presentation`): PresentationML `p:sld` and `p:sldLayout`
//! - **Tolerant decoding**: unknown elements are skipped (or rejected in strict
//!   mode), extension lists are preserved verbatim
//!
//! # Example - Reading a chart part
//!
//! ```rust
//! # #[cfg(feature = "chart")]
//! # fn main() -> ooxml_schema::Result<()> {
//! use ooxml_schema::chart::{ChartSpace, PlotAreaChart};
//! use ooxml_schema::xml;
//!
//! let part = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
//! <c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart">
//!   <c:chart>
//!     <c:plotArea>
//!       <c:pieChart><c:varyColors val="1"/></c:pieChart>
//!     </c:plotArea>
//!   </c:chart>
//! </c:chartSpace>"#;
//!
//! let space: ChartSpace = xml::from_str(part)?;
//! assert!(matches!(space.chart.plot_area.charts[0], PlotAreaChart::Pie(_)));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "chart"))]
//! # fn main() {}
//! ```
//!
//! # Example - Writing a slide
//!
//! ```rust
//! # #[cfg(feature = "presentation")]
//! # fn main() -> ooxml_schema::Result<()> {
//! use ooxml_schema::presentation::Slide;
//! use ooxml_schema::xml::{self, WriteOptions};
//!
//! let slide = Slide::new();
//! let text = xml::to_string_with(&slide, WriteOptions::new().with_validate(true))?;
//! assert!(text.contains("<p:spTree>"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "presentation"))]
//! # fn main() {}
//! ```

pub mod error;

/// XML data-binding core
///
/// Traits, reader, writer, simple-type conversion, raw pass-through and
/// validation helpers shared by every vocabulary.
pub mod xml;

/// Shared DrawingML (`a:`) types
pub mod drawing;

/// DrawingML charts (`c:`)
#[cfg(feature = "chart")]
pub mod chart;

/// Diagram drawings (`dsp:`) and the diagram data model (`dgm:`)
#[cfg(feature = "diagram")]
pub mod diagram;

/// PresentationML slides (`p:`)
#[cfg(feature = "presentation")]
pub mod presentation;

pub use error::{OoxmlError, Result};
pub use xml::{ReadOptions, Validate, WriteOptions, XmlRead, XmlRoot, XmlWrite};
