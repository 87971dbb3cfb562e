//! Diagrams (SmartArt).
//!
//! A diagram is stored in several parts. Two of them are bound here:
//!
//! - the data model ([`DataModel`], `dgm:dataModel`), the points and
//!   connections the user edits
//! - the drawing ([`Drawing`], `dsp:drawing`), the shapes Office last laid
//!   out for that model, linked back to its points by model id
//!
//! Layout, style and colour definitions are not bound.

pub mod data_model;
pub mod drawing;
pub mod types;

pub use data_model::{
    BackgroundFormatting, Connection, ConnectionList, DataModel, ElementPropertySet, Point,
    PointList, WholeE2oFormatting,
};
pub use drawing::{Drawing, GroupChild, GroupShape, GroupShapeNonVisual, Shape, ShapeNonVisual};
pub use types::{CxnType, ModelId, PtType};
