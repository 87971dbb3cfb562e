//! Series data: formula references with their cached values, literals,
//! data sources, number formats and manual layout.

use crate::chart::types::{LayoutMode, LayoutTarget};
use crate::chart::values::{Double, OptVal, UnsignedInt};
use crate::drawing::ext::ExtensionList;
use crate::drawing::text::TextBody;
use crate::error::{OoxmlError, Result};
use crate::xml::{
    ElementStart, Validate, XmlChoice, XmlRead, XmlReader, XmlValue, XmlWrite, XmlWriter,
    child_path, validate_all, validate_opt,
};
use std::io::{BufRead, Write};

/// `CT_NumFmt`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumFmt {
    pub format_code: String,
    pub source_linked: Option<bool>,
}

impl NumFmt {
    pub fn new(format_code: impl Into<String>) -> Self {
        Self {
            format_code: format_code.into(),
            source_linked: None,
        }
    }
}

impl XmlRead for NumFmt {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let num_fmt = Self {
            format_code: element.required_attr("formatCode")?,
            source_linked: element.parse_attr("sourceLinked")?,
        };
        reader.read_empty(element)?;
        Ok(num_fmt)
    }
}

impl XmlWrite for NumFmt {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .attr("formatCode", &self.format_code)
            .opt_attr("sourceLinked", self.source_linked.as_ref())
            .empty()
    }
}

impl Validate for NumFmt {
    const TYPE_NAME: &'static str = "CT_NumFmt";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `CT_StrVal`: one cached string point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrVal {
    pub idx: u32,
    pub v: String,
}

impl StrVal {
    pub fn new(idx: u32, v: impl Into<String>) -> Self {
        Self { idx, v: v.into() }
    }
}

impl XmlRead for StrVal {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut pt = Self {
            idx: element.required_attr("idx")?,
            v: String::new(),
        };
        reader.read_children(element, |reader, child| {
            if child.local_name() != "v" {
                return Ok(false);
            }
            pt.v = reader.read_text(child)?;
            Ok(true)
        })?;
        Ok(pt)
    }
}

impl XmlWrite for StrVal {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.element(name).attr("idx", &self.idx).open()?;
        writer.value_element("c:v", &self.v)?;
        writer.end(name)
    }
}

impl Validate for StrVal {
    const TYPE_NAME: &'static str = "CT_StrVal";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// `CT_NumVal`: one cached numeric point. The value is kept as written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumVal {
    pub idx: u32,
    pub format_code: Option<String>,
    pub v: String,
}

impl NumVal {
    pub fn new(idx: u32, value: f64) -> Self {
        Self {
            idx,
            format_code: None,
            v: value.to_xml_string(),
        }
    }

    /// The point as a number, if it parses as one.
    pub fn value(&self) -> Option<f64> {
        fast_float2::parse::<f64, _>(self.v.trim()).ok()
    }
}

impl XmlRead for NumVal {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut pt = Self {
            idx: element.required_attr("idx")?,
            format_code: element.parse_attr("formatCode")?,
            v: String::new(),
        };
        reader.read_children(element, |reader, child| {
            if child.local_name() != "v" {
                return Ok(false);
            }
            pt.v = reader.read_text(child)?;
            Ok(true)
        })?;
        Ok(pt)
    }
}

impl XmlWrite for NumVal {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer
            .element(name)
            .attr("idx", &self.idx)
            .opt_attr("formatCode", self.format_code.as_ref())
            .open()?;
        writer.value_element("c:v", &self.v)?;
        writer.end(name)
    }
}

impl Validate for NumVal {
    const TYPE_NAME: &'static str = "CT_NumVal";

    fn validate_with_path(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// Point indices must lie below the declared point count.
fn check_point_indices(
    path: &str,
    pt_count: &Option<UnsignedInt>,
    indices: impl Iterator<Item = u32>,
) -> Result<()> {
    let Some(count) = pt_count else {
        return Ok(());
    };
    for (i, idx) in indices.enumerate() {
        if idx >= count.val {
            return Err(OoxmlError::validation(
                format!("{}/pt[{}]/@idx", path, i),
                format!("index {} is not below ptCount {}", idx, count.val),
            ));
        }
    }
    Ok(())
}

/// `CT_StrData`: string cache or literal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrData {
    pub pt_count: Option<UnsignedInt>,
    pub pt: Vec<StrVal>,
    pub ext_lst: Option<ExtensionList>,
}

impl StrData {
    /// Consecutive points starting at index 0.
    pub fn from_values<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        let pt: Vec<StrVal> = values
            .into_iter()
            .enumerate()
            .map(|(idx, v)| StrVal::new(idx as u32, v))
            .collect();
        Self {
            pt_count: Some(UnsignedInt::new(pt.len() as u32)),
            pt,
            ext_lst: None,
        }
    }
}

impl XmlRead for StrData {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut data = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "ptCount" => data.pt_count = Some(reader.read(child)?),
                "pt" => data.pt.push(reader.read(child)?),
                "extLst" => data.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(data)
    }
}

impl XmlWrite for StrData {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.pt_count.is_none() && self.pt.is_empty() && self.ext_lst.is_none() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:ptCount", &self.pt_count)?;
        writer.children("c:pt", &self.pt)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for StrData {
    const TYPE_NAME: &'static str = "CT_StrData";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        check_point_indices(path, &self.pt_count, self.pt.iter().map(|pt| pt.idx))?;
        validate_all(path, "pt", &self.pt)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_NumData`: numeric cache or literal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumData {
    pub format_code: Option<String>,
    pub pt_count: Option<UnsignedInt>,
    pub pt: Vec<NumVal>,
    pub ext_lst: Option<ExtensionList>,
}

impl NumData {
    /// Consecutive points starting at index 0.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let pt: Vec<NumVal> = values
            .into_iter()
            .enumerate()
            .map(|(idx, v)| NumVal::new(idx as u32, v))
            .collect();
        Self {
            format_code: None,
            pt_count: Some(UnsignedInt::new(pt.len() as u32)),
            pt,
            ext_lst: None,
        }
    }

    /// Point values by index; missing points and unparsable values are `None`.
    pub fn values(&self) -> Vec<Option<f64>> {
        let len = self
            .pt_count
            .map(|count| count.val as usize)
            .unwrap_or_else(|| self.pt.iter().map(|pt| pt.idx as usize + 1).max().unwrap_or(0));
        let mut values = vec![None; len];
        for pt in &self.pt {
            if let Some(slot) = values.get_mut(pt.idx as usize) {
                *slot = pt.value();
            }
        }
        values
    }
}

impl XmlRead for NumData {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut data = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "formatCode" => data.format_code = Some(reader.read_text(child)?),
                "ptCount" => data.pt_count = Some(reader.read(child)?),
                "pt" => data.pt.push(reader.read(child)?),
                "extLst" => data.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(data)
    }
}

impl XmlWrite for NumData {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.format_code.is_none()
            && self.pt_count.is_none()
            && self.pt.is_empty()
            && self.ext_lst.is_none()
        {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_value_element("c:formatCode", &self.format_code)?;
        writer.opt_child("c:ptCount", &self.pt_count)?;
        writer.children("c:pt", &self.pt)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for NumData {
    const TYPE_NAME: &'static str = "CT_NumData";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        check_point_indices(path, &self.pt_count, self.pt.iter().map(|pt| pt.idx))?;
        validate_all(path, "pt", &self.pt)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// Shared shape of the formula references: `f`, an optional cache and an
/// extension list.
macro_rules! formula_ref {
    (
        $(#[$meta:meta])*
        $name:ident = $schema:literal, $cache:ident: $cache_ty:ty => $cache_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            /// Formula, e.g. `Sheet1!$B$2:$B$5`
            pub f: String,
            pub $cache: Option<$cache_ty>,
            pub ext_lst: Option<ExtensionList>,
        }

        impl $name {
            pub fn new(f: impl Into<String>) -> Self {
                Self {
                    f: f.into(),
                    ..Self::default()
                }
            }
        }

        impl XmlRead for $name {
            fn read_xml<R: BufRead>(
                reader: &mut XmlReader<R>,
                element: &ElementStart,
            ) -> Result<Self> {
                let mut reference = Self::default();
                reader.read_children(element, |reader, child| {
                    match child.local_name() {
                        "f" => reference.f = reader.read_text(child)?,
                        $cache_name => reference.$cache = Some(reader.read(child)?),
                        "extLst" => reference.ext_lst = Some(reader.read(child)?),
                        _ => return Ok(false),
                    }
                    Ok(true)
                })?;
                Ok(reference)
            }
        }

        impl XmlWrite for $name {
            fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
                writer.element(name).open()?;
                writer.value_element("c:f", &self.f)?;
                writer.opt_child(concat!("c:", $cache_name), &self.$cache)?;
                writer.opt_child("c:extLst", &self.ext_lst)?;
                writer.end(name)
            }
        }

        impl Validate for $name {
            const TYPE_NAME: &'static str = $schema;

            fn validate_with_path(&self, path: &str) -> Result<()> {
                if self.f.trim().is_empty() {
                    return Err(OoxmlError::validation(child_path(path, "f"), "formula is empty"));
                }
                validate_opt(path, $cache_name, &self.$cache)?;
                validate_opt(path, "extLst", &self.ext_lst)
            }
        }
    };
}

formula_ref! {
    /// `CT_StrRef`
    StrRef = "CT_StrRef", str_cache: StrData => "strCache"
}

formula_ref! {
    /// `CT_NumRef`
    NumRef = "CT_NumRef", num_cache: NumData => "numCache"
}

formula_ref! {
    /// `CT_MultiLvlStrRef`: multi-level category labels.
    MultiLvlStrRef = "CT_MultiLvlStrRef", multi_lvl_str_cache: MultiLvlStrData => "multiLvlStrCache"
}

/// `CT_Lvl`: one level of multi-level labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    pub pt: Vec<StrVal>,
}

impl XmlRead for Level {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut lvl = Self::default();
        reader.read_children(element, |reader, child| {
            if child.local_name() != "pt" {
                return Ok(false);
            }
            lvl.pt.push(reader.read(child)?);
            Ok(true)
        })?;
        Ok(lvl)
    }
}

impl XmlWrite for Level {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.pt.is_empty() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.children("c:pt", &self.pt)?;
        writer.end(name)
    }
}

impl Validate for Level {
    const TYPE_NAME: &'static str = "CT_Lvl";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_all(path, "pt", &self.pt)
    }
}

/// `CT_MultiLvlStrData`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiLvlStrData {
    pub pt_count: Option<UnsignedInt>,
    pub lvl: Vec<Level>,
    pub ext_lst: Option<ExtensionList>,
}

impl XmlRead for MultiLvlStrData {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut data = Self::default();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "ptCount" => data.pt_count = Some(reader.read(child)?),
                "lvl" => data.lvl.push(reader.read(child)?),
                "extLst" => data.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(data)
    }
}

impl XmlWrite for MultiLvlStrData {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.pt_count.is_none() && self.lvl.is_empty() && self.ext_lst.is_none() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:ptCount", &self.pt_count)?;
        writer.children("c:lvl", &self.lvl)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for MultiLvlStrData {
    const TYPE_NAME: &'static str = "CT_MultiLvlStrData";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        for (i, lvl) in self.lvl.iter().enumerate() {
            let lvl_path = format!("{}/lvl[{}]", path, i);
            check_point_indices(&lvl_path, &self.pt_count, lvl.pt.iter().map(|pt| pt.idx))?;
            lvl.validate_with_path(&lvl_path)?;
        }
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_AxDataSource`: category or x values (`c:cat`, `c:xVal`).
#[derive(Debug, Clone, PartialEq)]
pub enum AxDataSource {
    MultiLvlStrRef(MultiLvlStrRef),
    NumRef(NumRef),
    NumLit(NumData),
    StrRef(StrRef),
    StrLit(StrData),
}

impl XmlChoice for AxDataSource {
    fn is_choice(local_name: &str) -> bool {
        matches!(
            local_name,
            "multiLvlStrRef" | "numRef" | "numLit" | "strRef" | "strLit"
        )
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "multiLvlStrRef" => Ok(Self::MultiLvlStrRef(reader.read(element)?)),
            "numRef" => Ok(Self::NumRef(reader.read(element)?)),
            "numLit" => Ok(Self::NumLit(reader.read(element)?)),
            "strRef" => Ok(Self::StrRef(reader.read(element)?)),
            "strLit" => Ok(Self::StrLit(reader.read(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "an axis data source".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::MultiLvlStrRef(r) => writer.child("c:multiLvlStrRef", r),
            Self::NumRef(r) => writer.child("c:numRef", r),
            Self::NumLit(d) => writer.child("c:numLit", d),
            Self::StrRef(r) => writer.child("c:strRef", r),
            Self::StrLit(d) => writer.child("c:strLit", d),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::MultiLvlStrRef(_) => "multiLvlStrRef",
            Self::NumRef(_) => "numRef",
            Self::NumLit(_) => "numLit",
            Self::StrRef(_) => "strRef",
            Self::StrLit(_) => "strLit",
        }
    }
}

impl XmlRead for AxDataSource {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        reader.read_wrapped_choice(element)
    }
}

impl XmlWrite for AxDataSource {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.wrapped_choice(name, self)
    }
}

impl Validate for AxDataSource {
    const TYPE_NAME: &'static str = "CT_AxDataSource";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        let path = child_path(path, self.choice_name());
        match self {
            Self::MultiLvlStrRef(r) => r.validate_with_path(&path),
            Self::NumRef(r) => r.validate_with_path(&path),
            Self::NumLit(d) => d.validate_with_path(&path),
            Self::StrRef(r) => r.validate_with_path(&path),
            Self::StrLit(d) => d.validate_with_path(&path),
        }
    }
}

/// `CT_NumDataSource`: numeric values (`c:val`, `c:yVal`, `c:bubbleSize`,
/// error bar `c:plus`/`c:minus`).
#[derive(Debug, Clone, PartialEq)]
pub enum NumDataSource {
    NumRef(NumRef),
    NumLit(NumData),
}

impl XmlChoice for NumDataSource {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "numRef" | "numLit")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "numRef" => Ok(Self::NumRef(reader.read(element)?)),
            "numLit" => Ok(Self::NumLit(reader.read(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "c:numRef or c:numLit".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::NumRef(r) => writer.child("c:numRef", r),
            Self::NumLit(d) => writer.child("c:numLit", d),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::NumRef(_) => "numRef",
            Self::NumLit(_) => "numLit",
        }
    }
}

impl NumDataSource {
    /// Cached or literal data, whichever this source carries.
    pub fn data(&self) -> Option<&NumData> {
        match self {
            Self::NumRef(r) => r.num_cache.as_ref(),
            Self::NumLit(d) => Some(d),
        }
    }
}

impl XmlRead for NumDataSource {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        reader.read_wrapped_choice(element)
    }
}

impl XmlWrite for NumDataSource {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.wrapped_choice(name, self)
    }
}

impl Validate for NumDataSource {
    const TYPE_NAME: &'static str = "CT_NumDataSource";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        let path = child_path(path, self.choice_name());
        match self {
            Self::NumRef(r) => r.validate_with_path(&path),
            Self::NumLit(d) => d.validate_with_path(&path),
        }
    }
}

/// `CT_Tx`: text of a title, label or display unit label.
#[derive(Debug, Clone, PartialEq)]
pub enum Tx {
    StrRef(StrRef),
    Rich(Box<TextBody>),
}

impl XmlChoice for Tx {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "strRef" | "rich")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "strRef" => Ok(Self::StrRef(reader.read(element)?)),
            "rich" => Ok(Self::Rich(reader.read(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "c:strRef or c:rich".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::StrRef(r) => writer.child("c:strRef", r),
            Self::Rich(body) => writer.child("c:rich", body),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::StrRef(_) => "strRef",
            Self::Rich(_) => "rich",
        }
    }
}

impl XmlRead for Tx {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        reader.read_wrapped_choice(element)
    }
}

impl XmlWrite for Tx {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.wrapped_choice(name, self)
    }
}

impl Validate for Tx {
    const TYPE_NAME: &'static str = "CT_Tx";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        let path = child_path(path, self.choice_name());
        match self {
            Self::StrRef(r) => r.validate_with_path(&path),
            Self::Rich(body) => body.validate_with_path(&path),
        }
    }
}

/// `CT_SerTx`: series name, either a reference or a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum SerTx {
    StrRef(StrRef),
    /// `c:v`
    Value(String),
}

impl XmlChoice for SerTx {
    fn is_choice(local_name: &str) -> bool {
        matches!(local_name, "strRef" | "v")
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        match element.local_name() {
            "strRef" => Ok(Self::StrRef(reader.read(element)?)),
            "v" => Ok(Self::Value(reader.read_text(element)?)),
            _ => Err(OoxmlError::UnexpectedElement {
                expected: "c:strRef or c:v".to_string(),
                found: element.name().to_string(),
            }),
        }
    }

    fn write_choice<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Self::StrRef(r) => writer.child("c:strRef", r),
            Self::Value(v) => writer.value_element("c:v", v),
        }
    }

    fn choice_name(&self) -> &'static str {
        match self {
            Self::StrRef(_) => "strRef",
            Self::Value(_) => "v",
        }
    }
}

impl SerTx {
    /// The series name: the literal, or the first cached string.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            Self::StrRef(r) => r
                .str_cache
                .as_ref()
                .and_then(|cache| cache.pt.first())
                .map(|pt| pt.v.as_str()),
        }
    }
}

impl XmlRead for SerTx {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        reader.read_wrapped_choice(element)
    }
}

impl XmlWrite for SerTx {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.wrapped_choice(name, self)
    }
}

impl Validate for SerTx {
    const TYPE_NAME: &'static str = "CT_SerTx";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        match self {
            Self::StrRef(r) => r.validate_with_path(&child_path(path, "strRef")),
            Self::Value(_) => Ok(()),
        }
    }
}

/// `CT_ManualLayout`: position and size as fractions of the chart area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualLayout {
    pub layout_target: Option<OptVal<LayoutTarget>>,
    pub x_mode: Option<OptVal<LayoutMode>>,
    pub y_mode: Option<OptVal<LayoutMode>>,
    pub w_mode: Option<OptVal<LayoutMode>>,
    pub h_mode: Option<OptVal<LayoutMode>>,
    pub x: Option<Double>,
    pub y: Option<Double>,
    pub w: Option<Double>,
    pub h: Option<Double>,
    pub ext_lst: Option<ExtensionList>,
}

impl ManualLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// A layout placing the element at `(x, y)` with size `(w, h)`, all in
    /// `edge` mode.
    pub fn edge(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x_mode: Some(OptVal::new(LayoutMode::Edge)),
            y_mode: Some(OptVal::new(LayoutMode::Edge)),
            x: Some(Double::new(x)),
            y: Some(Double::new(y)),
            w: Some(Double::new(w)),
            h: Some(Double::new(h)),
            ..Self::default()
        }
    }
}

impl XmlRead for ManualLayout {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut layout = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "layoutTarget" => layout.layout_target = Some(reader.read(child)?),
                "xMode" => layout.x_mode = Some(reader.read(child)?),
                "yMode" => layout.y_mode = Some(reader.read(child)?),
                "wMode" => layout.w_mode = Some(reader.read(child)?),
                "hMode" => layout.h_mode = Some(reader.read(child)?),
                "x" => layout.x = Some(reader.read(child)?),
                "y" => layout.y = Some(reader.read(child)?),
                "w" => layout.w = Some(reader.read(child)?),
                "h" => layout.h = Some(reader.read(child)?),
                "extLst" => layout.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(layout)
    }
}

impl XmlWrite for ManualLayout {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if *self == Self::default() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:layoutTarget", &self.layout_target)?;
        writer.opt_child("c:xMode", &self.x_mode)?;
        writer.opt_child("c:yMode", &self.y_mode)?;
        writer.opt_child("c:wMode", &self.w_mode)?;
        writer.opt_child("c:hMode", &self.h_mode)?;
        writer.opt_child("c:x", &self.x)?;
        writer.opt_child("c:y", &self.y)?;
        writer.opt_child("c:w", &self.w)?;
        writer.opt_child("c:h", &self.h)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for ManualLayout {
    const TYPE_NAME: &'static str = "CT_ManualLayout";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        for (name, size) in [("w", &self.w), ("h", &self.h)] {
            if let Some(size) = size {
                if size.val < 0.0 {
                    return Err(OoxmlError::validation(
                        format!("{}/{}/@val", path, name),
                        format!("size must not be negative (have {})", size.val),
                    ));
                }
            }
        }
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

/// `CT_Layout`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub manual_layout: Option<ManualLayout>,
    pub ext_lst: Option<ExtensionList>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manual(layout: ManualLayout) -> Self {
        Self {
            manual_layout: Some(layout),
            ext_lst: None,
        }
    }
}

impl XmlRead for Layout {
    fn read_xml<R: BufRead>(reader: &mut XmlReader<R>, element: &ElementStart) -> Result<Self> {
        let mut layout = Self::new();
        reader.read_children(element, |reader, child| {
            match child.local_name() {
                "manualLayout" => layout.manual_layout = Some(reader.read(child)?),
                "extLst" => layout.ext_lst = Some(reader.read(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(layout)
    }
}

impl XmlWrite for Layout {
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        if self.manual_layout.is_none() && self.ext_lst.is_none() {
            return writer.element(name).empty();
        }
        writer.element(name).open()?;
        writer.opt_child("c:manualLayout", &self.manual_layout)?;
        writer.opt_child("c:extLst", &self.ext_lst)?;
        writer.end(name)
    }
}

impl Validate for Layout {
    const TYPE_NAME: &'static str = "CT_Layout";

    fn validate_with_path(&self, path: &str) -> Result<()> {
        validate_opt(path, "manualLayout", &self.manual_layout)?;
        validate_opt(path, "extLst", &self.ext_lst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_fragment, to_fragment};

    #[test]
    fn test_category_reference_with_cache() {
        let xml = r#"<c:cat><c:strRef><c:f>Sheet1!$A$2:$A$4</c:f><c:strCache><c:ptCount val="3"/><c:pt idx="0"><c:v>North</c:v></c:pt><c:pt idx="1"><c:v>South</c:v></c:pt><c:pt idx="2"><c:v>East &amp; West</c:v></c:pt></c:strCache></c:strRef></c:cat>"#;
        let cat: AxDataSource = from_fragment(xml).unwrap();
        let AxDataSource::StrRef(str_ref) = &cat else {
            panic!("expected a string reference");
        };
        assert_eq!(str_ref.f, "Sheet1!$A$2:$A$4");
        assert_eq!(str_ref.str_cache.as_ref().unwrap().pt[2].v, "East & West");
        assert!(cat.validate().is_ok());
        assert_eq!(to_fragment(&cat, "c:cat").unwrap(), xml);
    }

    #[test]
    fn test_numeric_cache_values() {
        let xml = r#"<c:val><c:numRef><c:f>Sheet1!$B$2:$B$5</c:f><c:numCache><c:formatCode>General</c:formatCode><c:ptCount val="4"/><c:pt idx="0"><c:v>4.3</c:v></c:pt><c:pt idx="1"><c:v>2.5</c:v></c:pt><c:pt idx="3"><c:v>4.5</c:v></c:pt></c:numCache></c:numRef></c:val>"#;
        let val: NumDataSource = from_fragment(xml).unwrap();
        assert_eq!(
            val.data().unwrap().values(),
            vec![Some(4.3), Some(2.5), None, Some(4.5)]
        );
        assert_eq!(to_fragment(&val, "c:val").unwrap(), xml);
    }

    #[test]
    fn test_point_index_beyond_count() {
        let mut data = NumData::from_values([1.0, 2.0]);
        data.pt[1].idx = 2;
        let err = NumDataSource::NumLit(data).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "CT_NumDataSource/numLit/pt[1]/@idx: index 2 is not below ptCount 2"
        );
    }

    #[test]
    fn test_empty_formula_is_invalid() {
        let tx = SerTx::StrRef(StrRef::new(""));
        let err = tx.validate().unwrap_err();
        assert_eq!(err.to_string(), "CT_SerTx/strRef/f: formula is empty");
    }

    #[test]
    fn test_series_name_literal() {
        let tx: SerTx = from_fragment("<c:tx><c:v>Revenue</c:v></c:tx>").unwrap();
        assert_eq!(tx.text(), Some("Revenue"));
        assert_eq!(to_fragment(&tx, "c:tx").unwrap(), "<c:tx><c:v>Revenue</c:v></c:tx>");
    }

    #[test]
    fn test_empty_data_source_is_an_error() {
        assert!(from_fragment::<NumDataSource>("<c:val/>").is_err());
    }

    #[test]
    fn test_manual_layout() {
        let xml = r#"<c:layout><c:manualLayout><c:layoutTarget val="inner"/><c:xMode val="edge"/><c:yMode val="edge"/><c:x val="0.1"/><c:y val="0.15"/><c:w val="0.8"/><c:h val="0.7"/></c:manualLayout></c:layout>"#;
        let layout: Layout = from_fragment(xml).unwrap();
        let manual = layout.manual_layout.as_ref().unwrap();
        assert_eq!(manual.layout_target.unwrap().value(), LayoutTarget::Inner);
        assert_eq!(manual.w.unwrap().val, 0.8);
        assert_eq!(to_fragment(&layout, "c:layout").unwrap(), xml);
        assert_eq!(to_fragment(&Layout::new(), "c:layout").unwrap(), "<c:layout/>");
    }
}
