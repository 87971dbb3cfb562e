//! PresentationML slide markup.
//!
//! Two part roots are bound: slides (`p:sld`, [`Slide`]) and slide layouts
//! (`p:sldLayout`, [`SlideLayout`]). Both carry a [`CommonSlideData`] whose
//! shape tree holds shapes, pictures, connectors, groups and graphic frames.
//! Charts and diagrams appear on a slide as graphic frames pointing at their
//! own parts through relationship ids.
//!
//! Animation timing (`p:timing`) and markup-compatibility blocks are kept
//! verbatim.
//!
//! ```rust
//! use ooxml_schema::drawing::Transform2D;
//! use ooxml_schema::presentation::{
//!     GraphicFrame, Placeholder, PlaceholderType, Shape, ShapeTreeItem, Slide,
//! };
//! use ooxml_schema::Validate;
//!
//! let mut slide = Slide::new();
//! let title = Shape::placeholder(
//!     slide.next_id(),
//!     "Title 1",
//!     Placeholder::new(PlaceholderType::Title),
//!     "Revenue",
//! );
//! slide.push(ShapeTreeItem::Shape(Box::new(title)));
//! let frame = GraphicFrame::chart(
//!     slide.next_id(),
//!     "Chart 2",
//!     "rId2",
//!     Transform2D::from_rect(838200, 1825625, 10515600, 4351338),
//! );
//! slide.push(ShapeTreeItem::GraphicFrame(Box::new(frame)));
//!
//! assert!(slide.validate().is_ok());
//! assert_eq!(slide.title().as_deref(), Some("Revenue"));
//! ```

pub mod shapes;
pub mod slide;
pub mod types;

pub use shapes::{
    ApplicationNonVisualDrawingProps, Connector, ConnectorNonVisual, CustomerData,
    CustomerDataList, GraphicFrame, GraphicFrameNonVisual, GroupShape, GroupShapeNonVisual,
    Picture, PictureNonVisual, Placeholder, Shape, ShapeNonVisual, ShapeTreeItem,
};
pub use slide::{
    Background, BackgroundProperties, BackgroundStyle, CommonSlideData, HeaderFooter, Slide,
    SlideLayout, SlideTransition, TransitionEffect,
};
pub use types::{
    CornerDirection, Direction, EightDirection, InOutDirection, PlaceholderSize, PlaceholderType,
    SideDirection, SlideLayoutType, TransitionSpeed,
};
