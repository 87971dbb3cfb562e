//! PresentationML simple types.

crate::st_enum! {
    /// `ST_PlaceholderType`
    PlaceholderType = "ST_PlaceholderType", default Obj {
        Title => "title",
        Body => "body",
        CtrTitle => "ctrTitle",
        SubTitle => "subTitle",
        Dt => "dt",
        SldNum => "sldNum",
        Ftr => "ftr",
        Hdr => "hdr",
        Obj => "obj",
        Chart => "chart",
        Tbl => "tbl",
        ClipArt => "clipArt",
        Dgm => "dgm",
        Media => "media",
        SldImg => "sldImg",
        Pic => "pic",
    }
}

impl PlaceholderType {
    /// Title and centered title placeholders.
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title | Self::CtrTitle)
    }
}

crate::st_enum! {
    /// `ST_PlaceholderSize`
    PlaceholderSize = "ST_PlaceholderSize", default Full {
        Full => "full",
        Half => "half",
        Quarter => "quarter",
    }
}

crate::st_enum! {
    /// `ST_Direction`
    Direction = "ST_Direction", default Horz {
        Horz => "horz",
        Vert => "vert",
    }
}

crate::st_enum! {
    /// `ST_SlideLayoutType`
    SlideLayoutType = "ST_SlideLayoutType", default Cust {
        Title => "title",
        Tx => "tx",
        TwoColTx => "twoColTx",
        Tbl => "tbl",
        TxAndChart => "txAndChart",
        ChartAndTx => "chartAndTx",
        Dgm => "dgm",
        Chart => "chart",
        TxAndClipArt => "txAndClipArt",
        ClipArtAndTx => "clipArtAndTx",
        TitleOnly => "titleOnly",
        Blank => "blank",
        TxAndObj => "txAndObj",
        ObjAndTx => "objAndTx",
        ObjOnly => "objOnly",
        Obj => "obj",
        TxAndMedia => "txAndMedia",
        MediaAndTx => "mediaAndTx",
        ObjOverTx => "objOverTx",
        TxOverObj => "txOverObj",
        TxAndTwoObj => "txAndTwoObj",
        TwoObjAndTx => "twoObjAndTx",
        TwoObjOverTx => "twoObjOverTx",
        FourObj => "fourObj",
        VertTx => "vertTx",
        ClipArtAndVertTx => "clipArtAndVertTx",
        VertTitleAndTx => "vertTitleAndTx",
        VertTitleAndTxOverChart => "vertTitleAndTxOverChart",
        TwoObj => "twoObj",
        ObjAndTwoObj => "objAndTwoObj",
        TwoObjAndObj => "twoObjAndObj",
        Cust => "cust",
        SecHead => "secHead",
        TwoTxTwoObj => "twoTxTwoObj",
        ObjTx => "objTx",
        PicTx => "picTx",
    }
}

crate::st_enum! {
    /// `ST_TransitionSpeed`
    TransitionSpeed = "ST_TransitionSpeed", default Fast {
        Slow => "slow",
        Med => "med",
        Fast => "fast",
    }
}

impl TransitionSpeed {
    /// Nominal duration PowerPoint plays the transition at.
    pub fn duration_ms(&self) -> u32 {
        match self {
            Self::Slow => 1500,
            Self::Med => 1000,
            Self::Fast => 500,
        }
    }
}

crate::st_enum! {
    /// `ST_TransitionSideDirectionType`
    SideDirection = "ST_TransitionSideDirectionType", default Left {
        Left => "l",
        Up => "u",
        Right => "r",
        Down => "d",
    }
}

crate::st_enum! {
    /// `ST_TransitionCornerDirectionType`
    CornerDirection = "ST_TransitionCornerDirectionType", default LeftUp {
        LeftUp => "lu",
        RightUp => "ru",
        LeftDown => "ld",
        RightDown => "rd",
    }
}

crate::st_enum! {
    /// `ST_TransitionEightDirectionType`: side and corner directions.
    EightDirection = "ST_TransitionEightDirectionType", default Left {
        Left => "l",
        Up => "u",
        Right => "r",
        Down => "d",
        LeftUp => "lu",
        RightUp => "ru",
        LeftDown => "ld",
        RightDown => "rd",
    }
}

crate::st_enum! {
    /// `ST_TransitionInOutDirectionType`
    InOutDirection = "ST_TransitionInOutDirectionType", default Out {
        Out => "out",
        In => "in",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlValue;

    #[test]
    fn test_layout_tokens() {
        assert_eq!(SlideLayoutType::parse_xml("titleOnly").unwrap(), SlideLayoutType::TitleOnly);
        assert_eq!(SlideLayoutType::default(), SlideLayoutType::Cust);
        assert!(SlideLayoutType::parse_xml("titleAndContent").is_err());
    }

    #[test]
    fn test_direction_tokens() {
        assert_eq!(EightDirection::RightDown.xml_value(), "rd");
        assert_eq!(SideDirection::parse_xml("u").unwrap(), SideDirection::Up);
        assert!(SideDirection::parse_xml("lu").is_err());
    }

    #[test]
    fn test_speed_durations() {
        assert_eq!(TransitionSpeed::default().duration_ms(), 500);
        assert_eq!(TransitionSpeed::Slow.duration_ms(), 1500);
        assert!(PlaceholderType::CtrTitle.is_title());
    }
}
