use super::Type;
use crate::{Error, Result};

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDateTime, Utc};
use num_bigint::BigInt;

/// A dynamically-typed value read from (or bound into) a query.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 8-bit integer
    I8(i8),

    /// Signed 16-bit integer
    I16(i16),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// 32-bit floating point
    F32(f32),

    /// 64-bit floating point
    F64(f64),

    /// Arbitrary-precision integer
    BigInt(BigInt),

    /// Arbitrary-precision decimal
    Decimal(BigDecimal),

    /// String value
    String(String),

    /// Raw byte value
    Bytes(Vec<u8>),

    /// An instant in time, zone-aware
    Timestamp(DateTime<Utc>),

    /// A date and time without a zone
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "bool")),
        }
    }

    pub fn to_i8(self) -> Result<i8> {
        match self.to_i64()? {
            v if i8::try_from(v).is_ok() => Ok(v as i8),
            v => Err(Error::type_conversion(Self::I64(v), "i8")),
        }
    }

    pub fn to_i16(self) -> Result<i16> {
        match self.to_i64()? {
            v if i16::try_from(v).is_ok() => Ok(v as i16),
            v => Err(Error::type_conversion(Self::I64(v), "i16")),
        }
    }

    pub fn to_i32(self) -> Result<i32> {
        match self.to_i64()? {
            v if i32::try_from(v).is_ok() => Ok(v as i32),
            v => Err(Error::type_conversion(Self::I64(v), "i32")),
        }
    }

    /// Converts to `i64`, accepting any narrower integer variant.
    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I8(v) => Ok(v as i64),
            Self::I16(v) => Ok(v as i64),
            Self::I32(v) => Ok(v as i64),
            Self::I64(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "i64")),
        }
    }

    pub fn to_f32(self) -> Result<f32> {
        match self {
            Self::F32(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "f32")),
        }
    }

    pub fn to_f64(self) -> Result<f64> {
        match self {
            Self::F32(v) => Ok(v as f64),
            Self::F64(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "f64")),
        }
    }

    pub fn to_bigint(self) -> Result<BigInt> {
        match self {
            Self::BigInt(v) => Ok(v),
            Self::I8(v) => Ok(v.into()),
            Self::I16(v) => Ok(v.into()),
            Self::I32(v) => Ok(v.into()),
            Self::I64(v) => Ok(v.into()),
            _ => Err(Error::type_conversion(self, "BigInt")),
        }
    }

    pub fn to_decimal(self) -> Result<BigDecimal> {
        match self {
            Self::Decimal(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "BigDecimal")),
        }
    }

    pub fn to_string(self) -> Result<String> {
        match self {
            Self::String(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "String")),
        }
    }

    pub fn to_option_string(self) -> Result<Option<String>> {
        match self {
            Self::Null => Ok(None),
            Self::String(v) => Ok(Some(v)),
            _ => Err(Error::type_conversion(self, "String")),
        }
    }

    pub fn to_option_i64(self) -> Result<Option<i64>> {
        match self {
            Self::Null => Ok(None),
            other => other.to_i64().map(Some),
        }
    }

    pub fn to_option_i32(self) -> Result<Option<i32>> {
        match self {
            Self::Null => Ok(None),
            other => other.to_i32().map(Some),
        }
    }

    pub fn to_option_f64(self) -> Result<Option<f64>> {
        match self {
            Self::Null => Ok(None),
            other => other.to_f64().map(Some),
        }
    }

    pub fn to_bytes(self) -> Result<Vec<u8>> {
        match self {
            Self::Bytes(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "Vec<u8>")),
        }
    }

    pub fn to_timestamp(self) -> Result<DateTime<Utc>> {
        match self {
            Self::Timestamp(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "DateTime<Utc>")),
        }
    }

    pub fn to_datetime(self) -> Result<NaiveDateTime> {
        match self {
            Self::DateTime(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "NaiveDateTime")),
        }
    }

    pub fn to_option_datetime(self) -> Result<Option<NaiveDateTime>> {
        match self {
            Self::Null => Ok(None),
            other => other.to_datetime().map(Some),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    /// Infers the static type of this value.
    pub fn infer_ty(&self) -> Type {
        match self {
            Self::Null => Type::Null,
            Self::Bool(_) => Type::Bool,
            Self::I8(_) => Type::I8,
            Self::I16(_) => Type::I16,
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::F32(_) => Type::F32,
            Self::F64(_) => Type::F64,
            Self::BigInt(_) => Type::BigInt,
            Self::Decimal(_) => Type::Decimal,
            Self::String(_) => Type::String,
            Self::Bytes(_) => Type::Bytes,
            Self::Timestamp(_) => Type::Timestamp,
            Self::DateTime(_) => Type::DateTime,
        }
    }

    pub fn is_a(&self, ty: &Type) -> bool {
        match self {
            Self::Null => true,
            other => other.infer_ty() == *ty,
        }
    }

    /// The value's natural rendering as a string, used when coercing toward
    /// a text-typed field. Decimal values are handled separately so that
    /// they never render in scientific notation.
    pub(crate) fn natural_string(&self) -> Option<String> {
        Some(match self {
            Self::Bool(v) => v.to_string(),
            Self::I8(v) => v.to_string(),
            Self::I16(v) => v.to_string(),
            Self::I32(v) => v.to_string(),
            Self::I64(v) => v.to_string(),
            Self::F32(v) => v.to_string(),
            Self::F64(v) => v.to_string(),
            Self::BigInt(v) => v.to_string(),
            Self::String(v) => v.clone(),
            Self::Timestamp(v) => v.to_rfc3339(),
            Self::DateTime(v) => v.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            _ => return None,
        })
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Self::I8(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Self::I16(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::F32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
