//! DrawingML main (`a:`) types shared by charts, diagrams and slides.
//!
//! - Geometry: transforms, offsets, extents and preset shapes
//! - Colour models with their transforms, and the fill union
//! - Outline, shape and group shape properties
//! - Non-visual properties of drawing objects
//! - Text bodies, paragraphs and runs
//! - Theme style references and graphic frame payloads
//!
//! Effects, 3-D scene properties, custom geometry and locking elements are
//! preserved as raw markup.

pub mod blip;
pub mod color;
pub mod ext;
pub mod fill;
pub mod geometry;
pub mod graphic;
pub mod line;
pub mod nv;
pub mod shape;
pub mod style;
pub mod text;

pub use blip::{Blip, BlipFillProperties, FillMode, RelativeRect, Tile};
pub use color::{
    Color, ColorElement, ColorMapping, ColorMappingOverride, ColorSchemeIndex, ColorTransform,
    HexColor, SchemeColorVal,
};
pub use ext::{Extension, ExtensionList};
pub use fill::{Fill, GradientFill, GradientStop, PatternFill, SolidColorFill};
pub use geometry::{
    Angle, Coordinate, GroupTransform2D, Point2D, PositiveCoordinate, PositiveSize2D,
    PresetGeometry2D, ShapeType, Transform2D,
};
pub use graphic::{GraphicalObject, GraphicalObjectData};
pub use line::{LineJoin, LineProperties};
pub use nv::{
    Connection, NonVisualConnectorProperties, NonVisualDrawingProps, NonVisualDrawingShapeProps,
    NonVisualGraphicFrameProperties, NonVisualGroupDrawingShapeProps, NonVisualPictureProperties,
};
pub use shape::{Geometry, GroupShapeProperties, ShapeProperties};
pub use style::{FontReference, ShapeStyle, StyleMatrixReference};
pub use text::{
    RegularTextRun, TextBody, TextBodyProperties, TextCharacterProperties, TextField, TextFont,
    TextLineBreak, TextListStyle, TextParagraph, TextParagraphProperties, TextRun,
};
