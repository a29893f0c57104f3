use super::{Type, Value};

impl Type {
    /// Coerces a timestamp value toward this type.
    ///
    /// The reference zone for zoned-to-local conversion is fixed at UTC.
    pub(super) fn coerce_timestamp(&self, value: Value) -> Value {
        let Value::Timestamp(ts) = value else {
            return value;
        };

        match self {
            Type::DateTime => Value::DateTime(ts.naive_utc()),
            Type::I64 => Value::I64(ts.timestamp_millis()),
            _ => Value::Timestamp(ts),
        }
    }
}
