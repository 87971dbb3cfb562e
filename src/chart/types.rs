//! Chart simple types (`ST_*`).
//!
//! Enumerations default to the value the schema assumes when the `val`
//! attribute of their wrapper element is omitted.

crate::st_enum! {
    /// `ST_BarDir`
    BarDir = "ST_BarDir", default Col {
        Bar => "bar",
        Col => "col",
    }
}

crate::st_enum! {
    /// `ST_BarGrouping`
    BarGrouping = "ST_BarGrouping", default Clustered {
        PercentStacked => "percentStacked",
        Clustered => "clustered",
        Standard => "standard",
        Stacked => "stacked",
    }
}

crate::st_enum! {
    /// `ST_Grouping` (line and area charts)
    Grouping = "ST_Grouping", default Standard {
        PercentStacked => "percentStacked",
        Standard => "standard",
        Stacked => "stacked",
    }
}

crate::st_enum! {
    /// `ST_Shape`: 3-D bar shape.
    BarShape = "ST_Shape", default Box {
        Cone => "cone",
        ConeToMax => "coneToMax",
        Box => "box",
        Cylinder => "cylinder",
        Pyramid => "pyramid",
        PyramidToMax => "pyramidToMax",
    }
}

crate::st_enum! {
    /// `ST_ScatterStyle`
    ScatterStyle = "ST_ScatterStyle", default Marker {
        None => "none",
        Line => "line",
        LineMarker => "lineMarker",
        Marker => "marker",
        Smooth => "smooth",
        SmoothMarker => "smoothMarker",
    }
}

crate::st_enum! {
    /// `ST_RadarStyle`
    RadarStyle = "ST_RadarStyle", default Standard {
        Standard => "standard",
        Marker => "marker",
        Filled => "filled",
    }
}

crate::st_enum! {
    /// `ST_OfPieType`
    OfPieType = "ST_OfPieType", default Pie {
        Pie => "pie",
        Bar => "bar",
    }
}

crate::st_enum! {
    /// `ST_SplitType`
    SplitType = "ST_SplitType", default Auto {
        Auto => "auto",
        Custom => "cust",
        Percent => "percent",
        Position => "pos",
        Value => "val",
    }
}

crate::st_enum! {
    /// `ST_AxPos`
    AxPos = "ST_AxPos", default Bottom {
        Bottom => "b",
        Left => "l",
        Right => "r",
        Top => "t",
    }
}

crate::st_enum! {
    /// `ST_Crosses`
    Crosses = "ST_Crosses", default AutoZero {
        AutoZero => "autoZero",
        Max => "max",
        Min => "min",
    }
}

crate::st_enum! {
    /// `ST_CrossBetween`
    CrossBetween = "ST_CrossBetween", default Between {
        Between => "between",
        MidCat => "midCat",
    }
}

crate::st_enum! {
    /// `ST_TickMark`
    TickMark = "ST_TickMark", default Cross {
        Cross => "cross",
        In => "in",
        None => "none",
        Out => "out",
    }
}

crate::st_enum! {
    /// `ST_TickLblPos`
    TickLblPos = "ST_TickLblPos", default NextTo {
        High => "high",
        Low => "low",
        NextTo => "nextTo",
        None => "none",
    }
}

crate::st_enum! {
    /// `ST_Orientation`: axis direction.
    Orientation = "ST_Orientation", default MinMax {
        MaxMin => "maxMin",
        MinMax => "minMax",
    }
}

crate::st_enum! {
    /// `ST_TimeUnit`
    TimeUnit = "ST_TimeUnit", default Days {
        Days => "days",
        Months => "months",
        Years => "years",
    }
}

crate::st_enum! {
    /// `ST_BuiltInUnit`
    BuiltInUnit = "ST_BuiltInUnit", default Thousands {
        Hundreds => "hundreds",
        Thousands => "thousands",
        TenThousands => "tenThousands",
        HundredThousands => "hundredThousands",
        Millions => "millions",
        TenMillions => "tenMillions",
        HundredMillions => "hundredMillions",
        Billions => "billions",
        Trillions => "trillions",
    }
}

crate::st_enum! {
    /// `ST_LegendPos`
    LegendPos = "ST_LegendPos", default Right {
        Bottom => "b",
        TopRight => "tr",
        Left => "l",
        Right => "r",
        Top => "t",
    }
}

crate::st_enum! {
    /// `ST_LayoutTarget`
    LayoutTarget = "ST_LayoutTarget", default Outer {
        Inner => "inner",
        Outer => "outer",
    }
}

crate::st_enum! {
    /// `ST_LayoutMode`
    LayoutMode = "ST_LayoutMode", default Factor {
        Edge => "edge",
        Factor => "factor",
    }
}

crate::st_enum! {
    /// `ST_MarkerStyle`
    MarkerStyle = "ST_MarkerStyle", default None {
        Circle => "circle",
        Dash => "dash",
        Diamond => "diamond",
        Dot => "dot",
        None => "none",
        Picture => "picture",
        Plus => "plus",
        Square => "square",
        Star => "star",
        Triangle => "triangle",
        X => "x",
        Auto => "auto",
    }
}

crate::st_enum! {
    /// `ST_DLblPos`
    DLblPos = "ST_DLblPos", default BestFit {
        BestFit => "bestFit",
        Bottom => "b",
        Center => "ctr",
        InBase => "inBase",
        InEnd => "inEnd",
        Left => "l",
        OutEnd => "outEnd",
        Right => "r",
        Top => "t",
    }
}

crate::st_enum! {
    /// `ST_TrendlineType`
    TrendlineType = "ST_TrendlineType", default Linear {
        Exp => "exp",
        Linear => "linear",
        Log => "log",
        MovingAvg => "movingAvg",
        Poly => "poly",
        Power => "power",
    }
}

crate::st_enum! {
    /// `ST_ErrDir`
    ErrDir = "ST_ErrDir", default Y {
        X => "x",
        Y => "y",
    }
}

crate::st_enum! {
    /// `ST_ErrBarType`
    ErrBarType = "ST_ErrBarType", default Both {
        Both => "both",
        Minus => "minus",
        Plus => "plus",
    }
}

crate::st_enum! {
    /// `ST_ErrValType`
    ErrValType = "ST_ErrValType", default FixedVal {
        Custom => "cust",
        FixedVal => "fixedVal",
        Percentage => "percentage",
        StdDev => "stdDev",
        StdErr => "stdErr",
    }
}

crate::st_enum! {
    /// `ST_SizeRepresents`
    SizeRepresents = "ST_SizeRepresents", default Area {
        Area => "area",
        Width => "w",
    }
}

crate::st_enum! {
    /// `ST_LblAlgn`
    LblAlgn = "ST_LblAlgn", default Center {
        Center => "ctr",
        Left => "l",
        Right => "r",
    }
}

crate::st_enum! {
    /// `ST_DispBlanksAs`
    DispBlanksAs = "ST_DispBlanksAs", default Zero {
        Span => "span",
        Gap => "gap",
        Zero => "zero",
    }
}

crate::st_enum! {
    /// `ST_PageSetupOrientation`
    PageSetupOrientation = "ST_PageSetupOrientation", default Default {
        Default => "default",
        Portrait => "portrait",
        Landscape => "landscape",
    }
}

crate::st_percent_union! {
    /// `ST_GapAmount`: gap between bar clusters, percent of the bar width.
    GapAmount(u16) = "ST_GapAmount", 0, 500, default 150
}

crate::st_percent_union! {
    /// `ST_Overlap`
    Overlap(i8) = "ST_Overlap", -100, 100, default 0
}

crate::st_percent_union! {
    /// `ST_HoleSize`: doughnut hole, percent of the plot size.
    HoleSize(u8) = "ST_HoleSize", 1, 90, default 10
}

crate::st_percent_union! {
    /// `ST_HPercent`: 3-D height, percent of the chart width.
    HPercent(u16) = "ST_HPercent", 5, 500, default 100
}

crate::st_percent_union! {
    /// `ST_DepthPercent`
    DepthPercent(u16) = "ST_DepthPercent", 20, 2000, default 100
}

crate::st_percent_union! {
    /// `ST_BubbleScale`
    BubbleScale(u32) = "ST_BubbleScale", 0, 300, default 100
}

crate::st_percent_union! {
    /// `ST_SecondPieSize`
    SecondPieSize(u16) = "ST_SecondPieSize", 5, 200, default 75
}

crate::st_percent_union! {
    /// `ST_LblOffset`
    LblOffset(u16) = "ST_LblOffset", 0, 1000, default 100
}

crate::st_percent_union! {
    /// `ST_Thickness`
    Thickness(u32) = "ST_Thickness", 0, u32::MAX, default 0
}

crate::st_range! {
    /// `ST_FirstSliceAng`: degrees.
    FirstSliceAng(u16) = "ST_FirstSliceAng", 0, 360, default 0
}

crate::st_range! {
    /// `ST_MarkerSize`: points.
    MarkerSize(u8) = "ST_MarkerSize", 2, 72, default 5
}

crate::st_range! {
    /// `ST_RotX`
    RotX(i8) = "ST_RotX", -90, 90, default 0
}

crate::st_range! {
    /// `ST_RotY`
    RotY(u16) = "ST_RotY", 0, 360, default 0
}

crate::st_range! {
    /// `ST_Perspective`
    Perspective(u8) = "ST_Perspective", 0, 240, default 30
}

crate::st_range! {
    /// `ST_Style`: built-in chart style number.
    ChartStyle(u8) = "ST_Style", 1, 48, default 2
}

crate::st_range! {
    /// `ST_Skip`
    Skip(u32) = "ST_Skip", 1, u32::MAX, default 1
}

crate::st_range! {
    /// `ST_Order`: polynomial trendline order.
    Order(u8) = "ST_Order", 2, 6, default 2
}

crate::st_range! {
    /// `ST_Period`: moving average period.
    Period(u32) = "ST_Period", 2, u32::MAX, default 2
}

crate::st_range! {
    /// `ST_LogBase`
    LogBase(f64) = "ST_LogBase", 2.0, 1000.0, default 10.0
}

crate::st_range! {
    /// `ST_AxisUnit`: strictly positive.
    AxisUnit(f64) = "ST_AxisUnit", f64::MIN_POSITIVE, f64::MAX, default 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlValue;

    #[test]
    fn test_unknown_token_is_rejected() {
        assert_eq!(BarDir::parse_xml("col").unwrap(), BarDir::Col);
        let err = BarDir::parse_xml("column").unwrap_err();
        assert!(err.to_string().contains("ST_BarDir"));
    }

    #[test]
    fn test_schema_defaults() {
        assert_eq!(LegendPos::default(), LegendPos::Right);
        assert_eq!(GapAmount::default(), GapAmount::Percent(150));
        assert_eq!(MarkerSize::default(), MarkerSize(5));
        assert_eq!(DispBlanksAs::default().xml_value(), "zero");
    }

    #[test]
    fn test_ranges() {
        assert!(HoleSize::Percent(50).validate_value("holeSize").is_ok());
        assert!(HoleSize::Value(95).validate_value("holeSize").is_err());
        assert!(Overlap::parse_xml("-100%").unwrap().validate_value("overlap").is_ok());
        assert!(MarkerSize(1).validate_value("size").is_err());
        assert!(AxisUnit(0.0).validate_value("majorUnit").is_err());
        assert!(LogBase(10.0).validate_value("logBase").is_ok());
    }
}
