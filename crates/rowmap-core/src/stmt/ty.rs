use super::Value;

/// The static type a field (and its mutator parameter) is declared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 8-bit integer
    I8,

    /// Signed 16-bit integer
    I16,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// 32-bit floating point
    F32,

    /// 64-bit floating point
    F64,

    /// Arbitrary-precision integer
    BigInt,

    /// Arbitrary-precision decimal
    Decimal,

    /// String type
    String,

    /// Raw bytes
    Bytes,

    /// An instant in time, zone-aware
    Timestamp,

    /// A date and time without a zone
    DateTime,

    /// The inferred type of a null value. Fields are never declared with
    /// it; it only comes out of [`Value::infer_ty`].
    ///
    /// [`Value::infer_ty`]: super::Value::infer_ty
    Null,
}

impl Type {
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, Self::Decimal)
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, Self::Timestamp)
    }

    /// Coerces `value` toward this type.
    ///
    /// Total: combinations outside the fixed conversion table pass the value
    /// through unchanged. An incompatible value surfaces as an error at the
    /// mutator invocation, not here.
    pub fn coerce(&self, value: Value) -> Value {
        if value.is_null() {
            return value;
        }

        match self {
            Self::String => match value {
                Value::String(_) => value,
                Value::Decimal(_) => self.coerce_decimal(value),
                other => match other.natural_string() {
                    Some(s) => Value::String(s),
                    None => other,
                },
            },
            _ => match value {
                Value::Decimal(_) => self.coerce_decimal(value),
                Value::Timestamp(_) => self.coerce_timestamp(value),
                _ => value,
            },
        }
    }
}

impl From<&Self> for Type {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}
