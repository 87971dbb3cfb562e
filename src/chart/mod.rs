//! DrawingML charts (`c:` namespace).
//!
//! A chart part is a [`ChartSpace`] holding one [`Chart`], whose
//! [`PlotArea`] combines any number of chart groups ([`PlotAreaChart`]) with
//! the axes they are drawn on ([`PlotAreaAxis`]).
//!
//! ```rust
//! use ooxml_schema::chart::{
//!     BarChart, BarSeries, CategoryAxis, ChartSpace, PlotArea, PlotAreaAxis, PlotAreaChart,
//!     ValueAxis,
//! };
//! use ooxml_schema::Validate;
//!
//! let mut bar = BarChart::columns(1, 2);
//! bar.ser.push(BarSeries::new(0, 0));
//! let plot_area = PlotArea::new()
//!     .with_chart(PlotAreaChart::Bar(bar))
//!     .with_axis(PlotAreaAxis::Category(CategoryAxis::new(1, 2)))
//!     .with_axis(PlotAreaAxis::Value(ValueAxis::new(2, 1)));
//! let space = ChartSpace::with_plot_area(plot_area);
//! assert!(space.validate().is_ok());
//! ```

pub mod axis;
pub mod chart;
pub mod data;
pub mod labels;
pub mod legend;
pub mod plot_area;
pub mod series;
pub mod title;
pub mod types;
pub mod values;

pub use axis::{
    AxisShared, CategoryAxis, Crossing, DateAxis, DisplayUnit, DisplayUnits, DisplayUnitsLabel,
    PlotAreaAxis, Scaling, SeriesAxis, ValueAxis,
};
pub use chart::{
    Chart, ChartSpace, ExternalData, HeaderFooter, PageMargins, PageSetup, PrintSettings,
    Protection, RelId, Surface, View3D,
};
pub use data::{
    AxDataSource, Layout, ManualLayout, MultiLvlStrRef, NumData, NumDataSource, NumFmt, NumRef,
    NumVal, SerTx, StrData, StrRef, StrVal, Tx,
};
pub use labels::{ChartLines, DataLabel, DataLabelContent, DataLabelSettings, DataLabels};
pub use legend::{Legend, LegendEntry, LegendEntryContent};
pub use plot_area::{
    Area3DChart, AreaChart, Bar3DChart, BarChart, BubbleChart, ChartGroup, DataTable,
    DoughnutChart, Line3DChart, LineChart, OfPieChart, Pie3DChart, PieChart, PlotArea,
    PlotAreaChart, RadarChart, ScatterChart, StockChart, Surface3DChart, SurfaceChart,
    UpDownBars,
};
pub use series::{
    AreaSeries, BarSeries, BubbleSeries, DataPoint, ErrorBars, LineSeries, Marker, PieSeries,
    RadarSeries, ScatterSeries, Series, SeriesShared, SurfaceSeries, Trendline,
};
pub use title::Title;
pub use values::{Boolean, Double, OptVal, UnsignedInt, Val};
