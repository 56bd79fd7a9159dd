//! Dimension, variable and value types shared by every data source.

use std::collections::HashMap;
use std::fmt;

/// A named axis with a fixed length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dimension {
    /// Dimension name.
    pub name: String,
    /// Number of elements along this axis.
    pub len: usize,
    /// True for the record (unlimited) dimension.
    pub unlimited: bool,
}

impl Dimension {
    /// Create a fixed-length dimension.
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            len,
            unlimited: false,
        }
    }

    /// Create an unlimited dimension with its current length.
    pub fn unlimited(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            len,
            unlimited: true,
        }
    }

    /// True if `other` denotes the same axis. The unlimited flag does not
    /// take part in identity.
    pub fn same_axis(&self, other: &Dimension) -> bool {
        self.name == other.name && self.len == other.len
    }
}

/// Scalar element type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Signed 8-bit integer.
    Byte,
    /// Unsigned 8-bit integer.
    UByte,
    /// Signed 16-bit integer.
    Short,
    /// Unsigned 16-bit integer.
    UShort,
    /// Signed 32-bit integer.
    Int,
    /// Unsigned 32-bit integer.
    UInt,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Single character (classic text).
    Char,
    /// Variable-length string.
    String,
}

impl ElementType {
    /// True for integer and floating point types.
    pub fn is_numeric(self) -> bool {
        self.is_integral() || matches!(self, Self::Float | Self::Double)
    }

    /// True for integer types.
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::UByte
                | Self::Short
                | Self::UShort
                | Self::Int
                | Self::UInt
                | Self::Int64
                | Self::UInt64
        )
    }

    /// CDL-style type name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::UByte => "ubyte",
            Self::Short => "short",
            Self::UShort => "ushort",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single decoded table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed 8-bit integer.
    Byte(i8),
    /// Unsigned 8-bit integer.
    UByte(u8),
    /// Signed 16-bit integer.
    Short(i16),
    /// Unsigned 16-bit integer.
    UShort(u16),
    /// Signed 32-bit integer.
    Int(i32),
    /// Unsigned 32-bit integer.
    UInt(u32),
    /// Signed 64-bit integer; also used for dimension indexes.
    Int64(i64),
    /// Unsigned 64-bit integer.
    UInt64(u64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Single raw character byte.
    Char(u8),
    /// Text.
    Str(String),
}

impl Value {
    /// Element type this value was decoded as.
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Byte(_) => ElementType::Byte,
            Self::UByte(_) => ElementType::UByte,
            Self::Short(_) => ElementType::Short,
            Self::UShort(_) => ElementType::UShort,
            Self::Int(_) => ElementType::Int,
            Self::UInt(_) => ElementType::UInt,
            Self::Int64(_) => ElementType::Int64,
            Self::UInt64(_) => ElementType::UInt64,
            Self::Float(_) => ElementType::Float,
            Self::Double(_) => ElementType::Double,
            Self::Char(_) => ElementType::Char,
            Self::Str(_) => ElementType::String,
        }
    }

    /// Integer value, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Byte(v) => Some(i64::from(v)),
            Self::UByte(v) => Some(i64::from(v)),
            Self::Short(v) => Some(i64::from(v)),
            Self::UShort(v) => Some(i64::from(v)),
            Self::Int(v) => Some(i64::from(v)),
            Self::UInt(v) => Some(i64::from(v)),
            Self::Int64(v) => Some(v),
            Self::UInt64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Numeric value widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(f64::from(v)),
            Self::Double(v) => Some(v),
            Self::UInt64(v) => Some(v as f64),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    /// Raw character byte, if this is a character.
    pub fn as_char(&self) -> Option<u8> {
        match *self {
            Self::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(v) => write!(f, "{}", v),
            Self::UByte(v) => write!(f, "{}", v),
            Self::Short(v) => write!(f, "{}", v),
            Self::UShort(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Int64(v) => write!(f, "{}", v),
            Self::UInt64(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::Char(c) => write!(f, "{}", char::from(*c)),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Declared type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 64-bit integer dimension index.
    Index,
    /// The backing variable's own element type.
    Native(ElementType),
    /// Decoded text (time stamps and character arrays).
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => f.write_str("index"),
            Self::Native(t) => write!(f, "{}", t),
            Self::String => f.write_str("string"),
        }
    }
}

/// Metadata describing a variable in a data source.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    /// Full variable name, including any group path.
    pub name: String,
    /// Ordered dimensions, including a private string length dimension.
    pub dimensions: Vec<Dimension>,
    /// Element type.
    pub dtype: ElementType,
    /// Attributes rendered as strings.
    pub attributes: HashMap<String, String>,
}

impl VariableInfo {
    /// Create a variable without attributes.
    pub fn new(name: impl Into<String>, dimensions: Vec<Dimension>, dtype: ElementType) -> Self {
        Self {
            name: name.into(),
            dimensions,
            dtype,
            attributes: HashMap::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Name without group prefixes.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Length along each dimension.
    pub fn shape(&self) -> Vec<usize> {
        self.dimensions.iter().map(|d| d.len).collect()
    }

    /// True if this looks like a classic fixed-length string variable: a
    /// 2D character array whose second dimension runs along each string.
    pub fn is_array_string(&self) -> bool {
        self.dtype == ElementType::Char && self.rank() == 2
    }

    /// Length of each string in an array string variable.
    pub fn string_length(&self) -> Option<usize> {
        if self.is_array_string() {
            self.dimensions.last().map(|d| d.len)
        } else {
            None
        }
    }

    /// Dimensions excluding the private string length dimension.
    pub fn public_dimensions(&self) -> &[Dimension] {
        if self.is_array_string() {
            &self.dimensions[..self.rank() - 1]
        } else {
            &self.dimensions
        }
    }

    /// `units` attribute.
    pub fn units(&self) -> Option<&str> {
        self.attributes.get("units").map(String::as_str)
    }

    /// `calendar` attribute.
    pub fn calendar(&self) -> Option<&str> {
        self.attributes.get("calendar").map(String::as_str)
    }

    /// Human readable description (`long_name` or `description`).
    pub fn description(&self) -> Option<&str> {
        self.attributes
            .get("long_name")
            .or_else(|| self.attributes.get("description"))
            .map(String::as_str)
    }

    /// Type description, e.g. `float`, `char[8]` or `time<double>`.
    pub fn type_string(&self) -> String {
        let base = match self.string_length() {
            Some(len) => format!("char[{}]", len),
            None => self.dtype.name().to_string(),
        };
        if crate::table::TimeUnits::for_variable(self).is_some() {
            format!("time<{}>", base)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station_names() -> VariableInfo {
        VariableInfo::new(
            "station",
            vec![Dimension::new("station", 3), Dimension::new("name_strlen", 8)],
            ElementType::Char,
        )
    }

    #[test]
    fn test_public_dimensions_drop_string_length() {
        let var = station_names();
        assert!(var.is_array_string());
        assert_eq!(var.string_length(), Some(8));
        assert_eq!(var.public_dimensions(), &[Dimension::new("station", 3)]);
        assert_eq!(var.type_string(), "char[8]");
    }

    #[test]
    fn test_char_scalar_is_not_array_string() {
        let var = VariableInfo::new("flag", vec![Dimension::new("x", 4)], ElementType::Char);
        assert!(!var.is_array_string());
        assert_eq!(var.public_dimensions().len(), 1);
    }

    #[test]
    fn test_short_name_and_time_type_string() {
        let var = VariableInfo::new(
            "forecast/time",
            vec![Dimension::new("time", 2)],
            ElementType::Double,
        )
        .with_attribute("units", "hours since 2020-01-01");
        assert_eq!(var.short_name(), "time");
        assert_eq!(var.type_string(), "time<double>");
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::Short(-3).as_i64(), Some(-3));
        assert_eq!(Value::Float(1.5).as_i64(), None);
        assert_eq!(Value::UByte(7).as_f64(), Some(7.0));
        assert_eq!(Value::Char(b'a').to_string(), "a");
        assert_eq!(Value::Float(215.73935).to_string(), "215.73935");
    }
}
