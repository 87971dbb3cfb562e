//! Namespace URIs of the vocabularies bound by this crate.

/// DrawingML main (`a:`)
pub const DRAWINGML: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// DrawingML charts (`c:`)
pub const CHART: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";
/// Office document relationships (`r:`)
pub const RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// PresentationML (`p:`)
pub const PRESENTATIONML: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
/// Diagram data model (`dgm:`)
pub const DIAGRAM: &str = "http://schemas.openxmlformats.org/drawingml/2006/diagram";
/// Diagram drawing (`dsp:`)
pub const DIAGRAM_DRAWING: &str = "http://schemas.microsoft.com/office/drawing/2008/diagram";
/// Chart graphic frame payload URI (`a:graphicData/@uri`)
pub const GRAPHIC_DATA_CHART: &str = CHART;
/// Markup compatibility (`mc:`)
pub const MARKUP_COMPATIBILITY: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
