use super::{Type, Value};

use num_bigint::ToBigInt;
use num_traits::ToPrimitive;

impl Type {
    /// Coerces a decimal value toward this type.
    ///
    /// The fractional part is truncated toward zero for integer targets. A
    /// value out of range for the target passes through unchanged.
    pub(super) fn coerce_decimal(&self, value: Value) -> Value {
        let Value::Decimal(ref decimal) = value else {
            return value;
        };

        let coerced = match self {
            // Plain decimal rendering, never scientific notation
            Type::String => Some(Value::String(decimal.to_plain_string())),
            Type::BigInt => decimal.to_bigint().map(Value::BigInt),
            Type::F64 => decimal.to_f64().map(Value::F64),
            Type::F32 => decimal.to_f32().map(Value::F32),
            Type::I64 => decimal.to_i64().map(Value::I64),
            Type::I32 => decimal.to_i32().map(Value::I32),
            Type::I16 => decimal.to_i16().map(Value::I16),
            Type::I8 => decimal.to_i8().map(Value::I8),
            _ => None,
        };

        match coerced {
            Some(coerced) => coerced,
            None => value,
        }
    }
}
