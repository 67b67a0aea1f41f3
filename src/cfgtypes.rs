// Imports
use std::fmt;

// Implementation

/// The declared type of a schema parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Integer,
    Float,
    Double,
    Boolean,
    Character,
    String,
}

impl ParamType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::Character => "Character",
            Self::String => "String",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// The Rust representation of a decoded parameter value.
/// One variant per [`ParamType`]; the variant *is* the type tag.
pub enum ParamValue {
    Integer(i32),
    /// Single precision
    Float(f32),
    /// Double precision
    Double(f64),
    Boolean(bool),
    /// `'\0'` when the value token was empty.
    Character(char),
    String(String),
}

impl ParamValue {
    /// The zeroed payload a slot carries before anything was parsed into it.
    pub fn zero(ty: ParamType) -> Self {
        match ty {
            ParamType::Integer => Self::Integer(0),
            ParamType::Float => Self::Float(0.0),
            ParamType::Double => Self::Double(0.0),
            ParamType::Boolean => Self::Boolean(false),
            ParamType::Character => Self::Character('\0'),
            ParamType::String => Self::String(String::new()),
        }
    }

    pub fn param_type(&self) -> ParamType {
        match self {
            Self::Integer(_) => ParamType::Integer,
            Self::Float(_) => ParamType::Float,
            Self::Double(_) => ParamType::Double,
            Self::Boolean(_) => ParamType::Boolean,
            Self::Character(_) => ParamType::Character,
            Self::String(_) => ParamType::String,
        }
    }

    /// Gets a reference to the underlying string
    pub fn str(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    pub fn i32(&self) -> Option<i32> {
        if let Self::Integer(n) = *self {
            Some(n)
        } else {
            None
        }
    }

    pub fn f32(&self) -> Option<f32> {
        if let Self::Float(n) = *self {
            Some(n)
        } else {
            None
        }
    }

    pub fn f64(&self) -> Option<f64> {
        if let Self::Double(n) = *self {
            Some(n)
        } else {
            None
        }
    }

    pub fn bool(&self) -> Option<bool> {
        if let Self::Boolean(b) = *self {
            Some(b)
        } else {
            None
        }
    }

    pub fn char(&self) -> Option<char> {
        if let Self::Character(c) = *self {
            Some(c)
        } else {
            None
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Double(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Character('\0') => f.write_str("'\\0'"),
            Self::Character(c) => write!(f, "'{c}'"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// Typed extraction of a [`ParamValue`].
/// Each implementor names the one [`ParamType`] it can be read from, so a lookup
/// can reject a mismatched request before touching the value.
///
/// Ex.
/// ```
/// use cfgp::{parse_str, ParamType, Schema};
/// let schema = Schema::new([("userColorTemp", ParamType::Integer)])?;
/// let parsed = parse_str("userColorTemp 2100\n", &schema)?;
/// assert_eq!(parsed.get_as::<i32>("userColorTemp")?, Some(2100));
/// assert!(parsed.get_as::<f64>("userColorTemp").is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait FromParamValue: Sized {
    const PARAM_TYPE: ParamType;
    fn from_param_value(value: ParamValue) -> Option<Self>;
}

macro_rules! from_param_value {
    ($t:ty, $variant:ident) => {
        impl FromParamValue for $t {
            const PARAM_TYPE: ParamType = ParamType::$variant;
            fn from_param_value(value: ParamValue) -> Option<Self> {
                match value {
                    ParamValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

from_param_value!(i32, Integer);
from_param_value!(f32, Float);
from_param_value!(f64, Double);
from_param_value!(bool, Boolean);
from_param_value!(char, Character);
from_param_value!(String, String);
