//! Simple type (`ST_*`) conversion.
//!
//! Every attribute value and every text-only element content goes through
//! [`XmlValue`]. Primitive XSD types are implemented here; schema enumerations,
//! range-restricted numbers and union types are declared with the
//! [`st_enum!`](crate::st_enum), [`st_range!`](crate::st_range) and
//! [`st_percent_union!`](crate::st_percent_union) macros.

use crate::error::{OoxmlError, Result};

/// Conversion between a simple type and its lexical XML representation.
pub trait XmlValue: Sized {
    /// Parse the lexical form.
    fn parse_xml(value: &str) -> Result<Self>;

    /// Append the lexical form to `out`.
    fn write_value(&self, out: &mut String);

    /// Check facets (ranges, patterns) of an already parsed value.
    fn validate_value(&self, _path: &str) -> Result<()> {
        Ok(())
    }

    /// The lexical form as an owned string.
    fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.write_value(&mut out);
        out
    }
}

impl XmlValue for bool {
    fn parse_xml(value: &str) -> Result<Self> {
        match value.trim() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            other => Err(OoxmlError::invalid_value(
                "xsd:boolean",
                other,
                "expected 1, 0, true or false",
            )),
        }
    }

    #[inline]
    fn write_value(&self, out: &mut String) {
        out.push(if *self { '1' } else { '0' });
    }
}

macro_rules! impl_xml_value_int {
    ($($ty:ty => $xsd:literal),* $(,)?) => {
        $(
            impl XmlValue for $ty {
                fn parse_xml(value: &str) -> Result<Self> {
                    let trimmed = value.trim();
                    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
                    digits.parse::<$ty>().map_err(|e| {
                        OoxmlError::invalid_value($xsd, value, e.to_string())
                    })
                }

                #[inline]
                fn write_value(&self, out: &mut String) {
                    let mut buffer = itoa::Buffer::new();
                    out.push_str(buffer.format(*self));
                }
            }
        )*
    };
}

impl_xml_value_int!(
    i8 => "xsd:byte",
    u8 => "xsd:unsignedByte",
    i16 => "xsd:short",
    u16 => "xsd:unsignedShort",
    i32 => "xsd:int",
    u32 => "xsd:unsignedInt",
    i64 => "xsd:long",
    u64 => "xsd:unsignedLong",
);

impl XmlValue for f64 {
    fn parse_xml(value: &str) -> Result<Self> {
        match value.trim() {
            "INF" => Ok(f64::INFINITY),
            "-INF" => Ok(f64::NEG_INFINITY),
            "NaN" => Ok(f64::NAN),
            trimmed => fast_float2::parse::<f64, _>(trimmed)
                .ok()
                .filter(|v: &f64| v.is_finite())
                .ok_or_else(|| OoxmlError::invalid_value("xsd:double", value, "not a number")),
        }
    }

    fn write_value(&self, out: &mut String) {
        write_double(*self, out);
    }
}

/// Write an `xsd:double` the way Office does: shortest round-trip digits,
/// no trailing `.0`, and `INF`/`-INF`/`NaN` for non-finite values.
pub fn write_double(value: f64, out: &mut String) {
    if value.is_nan() {
        out.push_str("NaN");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "INF" } else { "-INF" });
    } else {
        let mut buffer = ryu::Buffer::new();
        let formatted = buffer.format_finite(value);
        out.push_str(formatted.strip_suffix(".0").unwrap_or(formatted));
    }
}

impl XmlValue for String {
    #[inline]
    fn parse_xml(value: &str) -> Result<Self> {
        Ok(value.to_string())
    }

    #[inline]
    fn write_value(&self, out: &mut String) {
        out.push_str(self);
    }
}

/// Check `min <= value <= max` and report a validation error otherwise.
pub fn check_range<T>(path: &str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min {
        return Err(OoxmlError::validation(
            path,
            format!("value must be >= {} (have {})", min, value),
        ));
    }
    if value > max {
        return Err(OoxmlError::validation(
            path,
            format!("value must be <= {} (have {})", max, value),
        ));
    }
    Ok(())
}

/// Check an `ST_HexColorRGB` / `xsd:hexBinary` value of a fixed byte length.
pub fn check_hex(path: &str, value: &str, bytes: usize) -> Result<()> {
    if value.len() != bytes * 2 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(OoxmlError::validation(
            path,
            format!("'{}' is not {} hex-encoded bytes", value, bytes),
        ));
    }
    Ok(())
}

/// Check the `s:ST_Guid` pattern `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`.
pub fn is_guid(value: &str) -> bool {
    let Some(inner) = value.strip_prefix('{').and_then(|v| v.strip_suffix('}')) else {
        return false;
    };
    let groups: Vec<&str> = inner.split('-').collect();
    groups.len() == 5
        && groups
            .iter()
            .zip([8usize, 4, 4, 4, 12])
            .all(|(g, len)| g.len() == len && g.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Declare a schema enumeration with its exact token table.
///
/// ```ignore
/// st_enum! {
///     /// Bar direction.
///     BarDir = "ST_BarDir", default Col {
///         Bar => "bar",
///         Col => "col",
///     }
/// }
/// ```
#[macro_export]
macro_rules! st_enum {
    (
        $(#[$meta:meta])*
        $name:ident = $schema:literal $(, default $default:ident)? {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Returns the XML token for this value.
            #[inline]
            pub const fn xml_value(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }

        impl $crate::xml::XmlValue for $name {
            fn parse_xml(value: &str) -> $crate::error::Result<Self> {
                match value {
                    $($token => Ok(Self::$variant),)+
                    _ => Err($crate::error::OoxmlError::invalid_value(
                        $schema,
                        value,
                        "not a member of the enumeration",
                    )),
                }
            }

            #[inline]
            fn write_value(&self, out: &mut String) {
                out.push_str(self.xml_value());
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.xml_value())
            }
        }

        $(
            impl Default for $name {
                #[inline]
                fn default() -> Self {
                    Self::$default
                }
            }
        )?
    };
}

/// Declare an open enumeration: a schema enumeration too large to list in
/// full, with the commonly used tokens as variants and anything else kept
/// verbatim in `Other`.
#[macro_export]
macro_rules! st_open_enum {
    (
        $(#[$meta:meta])*
        $name:ident = $schema:literal $(, default $default:ident)? {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Any other token of the enumeration
            Other(String),
        }

        impl $name {
            /// Returns the XML token for this value.
            #[inline]
            pub fn xml_value(&self) -> &str {
                match self {
                    $(Self::$variant => $token,)+
                    Self::Other(token) => token,
                }
            }
        }

        impl $crate::xml::XmlValue for $name {
            fn parse_xml(value: &str) -> $crate::error::Result<Self> {
                match value {
                    $($token => Ok(Self::$variant),)+
                    "" => Err($crate::error::OoxmlError::invalid_value(
                        $schema,
                        value,
                        "empty token",
                    )),
                    other => Ok(Self::Other(other.to_string())),
                }
            }

            #[inline]
            fn write_value(&self, out: &mut String) {
                out.push_str(self.xml_value());
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.xml_value())
            }
        }

        $(
            impl Default for $name {
                #[inline]
                fn default() -> Self {
                    Self::$default
                }
            }
        )?
    };
}

/// Declare a range-restricted numeric simple type.
///
/// Out-of-range values parse successfully; [`XmlValue::validate_value`]
/// reports them.
#[macro_export]
macro_rules! st_range {
    (
        $(#[$meta:meta])*
        $name:ident($ty:ty) = $schema:literal, $min:expr, $max:expr $(, default $default:expr)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
        pub struct $name(pub $ty);

        impl $name {
            /// Schema name of the simple type.
            pub const SCHEMA_NAME: &'static str = $schema;
            /// Smallest allowed value.
            pub const MIN: $ty = $min;
            /// Largest allowed value.
            pub const MAX: $ty = $max;
        }

        impl $crate::xml::XmlValue for $name {
            #[inline]
            fn parse_xml(value: &str) -> $crate::error::Result<Self> {
                <$ty as $crate::xml::XmlValue>::parse_xml(value).map(Self)
            }

            #[inline]
            fn write_value(&self, out: &mut String) {
                $crate::xml::XmlValue::write_value(&self.0, out);
            }

            fn validate_value(&self, path: &str) -> $crate::error::Result<()> {
                $crate::xml::value::check_range(path, self.0, Self::MIN, Self::MAX)
            }
        }

        impl From<$ty> for $name {
            #[inline]
            fn from(value: $ty) -> Self {
                Self(value)
            }
        }

        $(
            impl Default for $name {
                #[inline]
                fn default() -> Self {
                    Self($default)
                }
            }
        )?
    };
}

/// Declare a union of a percentage string (`"150%"`) and a plain number.
///
/// Both members share the same range; an enum holds exactly one member so
/// the union can never have two members set at once.
#[macro_export]
macro_rules! st_percent_union {
    (
        $(#[$meta:meta])*
        $name:ident($ty:ty) = $schema:literal, $min:expr, $max:expr $(, default $default:expr)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum $name {
            /// Percentage member (`"<n>%"`).
            Percent(i32),
            /// Numeric member.
            Value($ty),
        }

        impl $crate::xml::XmlValue for $name {
            fn parse_xml(value: &str) -> $crate::error::Result<Self> {
                let trimmed = value.trim();
                match trimmed.strip_suffix('%') {
                    Some(percent) => percent.parse::<i32>().map(Self::Percent).map_err(|e| {
                        $crate::error::OoxmlError::invalid_value($schema, value, e.to_string())
                    }),
                    None => <$ty as $crate::xml::XmlValue>::parse_xml(trimmed).map(Self::Value),
                }
            }

            fn write_value(&self, out: &mut String) {
                match self {
                    Self::Percent(percent) => {
                        $crate::xml::XmlValue::write_value(percent, out);
                        out.push('%');
                    },
                    Self::Value(value) => $crate::xml::XmlValue::write_value(value, out),
                }
            }

            fn validate_value(&self, path: &str) -> $crate::error::Result<()> {
                match *self {
                    Self::Percent(percent) => $crate::xml::value::check_range(
                        path,
                        i64::from(percent),
                        ($min) as i64,
                        ($max) as i64,
                    ),
                    Self::Value(value) => $crate::xml::value::check_range(
                        path,
                        i64::from(value),
                        ($min) as i64,
                        ($max) as i64,
                    ),
                }
            }
        }

        $(
            impl Default for $name {
                #[inline]
                fn default() -> Self {
                    Self::Percent($default)
                }
            }
        )?
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    crate::st_enum! {
        /// Test enumeration.
        Direction = "ST_Direction", default Horz {
            Horz => "horz",
            Vert => "vert",
        }
    }

    crate::st_range! {
        /// Test range.
        Angle(u16) = "ST_Angle", 0, 360, default 0
    }

    crate::st_percent_union! {
        /// Test union.
        Gap(u16) = "ST_Gap", 0, 500, default 150
    }

    #[test]
    fn test_bool_lexical_forms() {
        assert!(bool::parse_xml("1").unwrap());
        assert!(bool::parse_xml("true").unwrap());
        assert!(!bool::parse_xml(" 0 ").unwrap());
        assert!(!bool::parse_xml("false").unwrap());
        assert!(bool::parse_xml("yes").is_err());
        assert_eq!(true.to_xml_string(), "1");
    }

    #[test]
    fn test_double_formatting() {
        assert_eq!(100.0f64.to_xml_string(), "100");
        assert_eq!(0.25f64.to_xml_string(), "0.25");
        assert_eq!(f64::INFINITY.to_xml_string(), "INF");
        assert_eq!(f64::NEG_INFINITY.to_xml_string(), "-INF");
        assert_eq!(f64::parse_xml("-INF").unwrap(), f64::NEG_INFINITY);
        assert!(f64::parse_xml("NaN").unwrap().is_nan());
        assert!(f64::parse_xml("abc").is_err());
    }

    #[test]
    fn test_int_accepts_plus_sign() {
        assert_eq!(i32::parse_xml("+42").unwrap(), 42);
        assert!(u32::parse_xml("-1").is_err());
    }

    #[test]
    fn test_enum_tokens() {
        assert_eq!(Direction::parse_xml("vert").unwrap(), Direction::Vert);
        assert_eq!(Direction::default(), Direction::Horz);
        assert!(Direction::parse_xml("Vert").is_err());
        assert_eq!(Direction::Vert.to_string(), "vert");
    }

    crate::st_open_enum! {
        /// Test open enumeration.
        Shape = "ST_Shape", default Rect {
            Rect => "rect",
            Ellipse => "ellipse",
        }
    }

    #[test]
    fn test_open_enum_keeps_unlisted_tokens() {
        assert_eq!(Shape::parse_xml("rect").unwrap(), Shape::Rect);
        let other = Shape::parse_xml("flowChartProcess").unwrap();
        assert_eq!(other, Shape::Other("flowChartProcess".to_string()));
        assert_eq!(other.to_xml_string(), "flowChartProcess");
        assert!(Shape::parse_xml("").is_err());
    }

    #[test]
    fn test_range_validation() {
        let angle = Angle::parse_xml("400").unwrap();
        assert!(angle.validate_value("CT_Test/val").is_err());
        assert!(Angle(90).validate_value("CT_Test/val").is_ok());
    }

    #[test]
    fn test_percent_union_members() {
        assert_eq!(Gap::parse_xml("150%").unwrap(), Gap::Percent(150));
        assert_eq!(Gap::parse_xml("150").unwrap(), Gap::Value(150));
        assert_eq!(Gap::Percent(75).to_xml_string(), "75%");
        assert!(Gap::Percent(501).validate_value("p").is_err());
        assert!(Gap::Value(500).validate_value("p").is_ok());
        assert!(Gap::parse_xml("x%").is_err());
    }

    #[test]
    fn test_guid_pattern() {
        assert!(is_guid("{9F2A1C3E-0B7D-4E5F-8A6B-1C2D3E4F5A6B}"));
        assert!(!is_guid("9F2A1C3E-0B7D-4E5F-8A6B-1C2D3E4F5A6B"));
        assert!(!is_guid("{9F2A1C3E-0B7D-4E5F-8A6B-1C2D3E4F5A6}"));
    }

    proptest! {
        #[test]
        fn int_lexical_form_parses_back(v in any::<i64>()) {
            prop_assert_eq!(i64::parse_xml(&v.to_xml_string()).unwrap(), v);
        }

        #[test]
        fn finite_double_lexical_form_parses_back(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            prop_assert_eq!(f64::parse_xml(&v.to_xml_string()).unwrap(), v);
        }
    }
}
