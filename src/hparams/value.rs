//! Hyperparameter values and their type tags

use std::cmp::Ordering;
use std::fmt;

use prost_types::value::Kind;
use serde::{Deserialize, Serialize};

use crate::proto::DataType;

/// Type tag of a hyperparameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// Signed integer
    Int,
    /// Double-precision real
    Float,
    /// UTF-8 string
    Str,
    /// Boolean
    Bool,
}

impl DType {
    /// Wire data type reported to the dashboard.
    ///
    /// The dashboard has no integer type; integers are reported as `FLOAT64`.
    #[must_use]
    pub const fn data_type(self) -> DataType {
        match self {
            Self::Int | Self::Float => DataType::Float64,
            Self::Str => DataType::String,
            Self::Bool => DataType::Bool,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// A single hyperparameter value.
///
/// Values are dynamically typed so that domains can be declared from mixed
/// sources (config files, sweeps) and checked against a [`DType`] at the
/// validation boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HParamValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Real value
    Float(f64),
    /// String value
    Str(String),
}

impl HParamValue {
    /// Type tag of this value.
    #[must_use]
    pub const fn dtype(&self) -> DType {
        match self {
            Self::Int(_) => DType::Int,
            Self::Float(_) => DType::Float,
            Self::Str(_) => DType::Str,
            Self::Bool(_) => DType::Bool,
        }
    }

    /// Natural ordering between two values of the same dtype.
    ///
    /// Values of different dtypes order by dtype so that sorting never panics,
    /// but domains never hold mixed dtypes.
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) => 1,
            Self::Float(_) => 2,
            Self::Str(_) => 3,
        }
    }

    /// Convert into a `google.protobuf.Value`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_proto(&self) -> prost_types::Value {
        let kind = match self {
            Self::Int(v) => Kind::NumberValue(*v as f64),
            Self::Float(v) => Kind::NumberValue(*v),
            Self::Str(v) => Kind::StringValue(v.clone()),
            Self::Bool(v) => Kind::BoolValue(*v),
        };
        prost_types::Value { kind: Some(kind) }
    }
}

impl fmt::Display for HParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Str(v) => write!(f, "'{v}'"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for HParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for HParamValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for HParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for HParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for HParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for HParamValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}
