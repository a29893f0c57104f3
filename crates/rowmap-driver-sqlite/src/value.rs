use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};

use rowmap_core::{stmt, Result};

use std::str::FromStr;

/// Bridges SQLite storage values and rowmap values in both directions.
#[derive(Debug)]
pub struct Value(stmt::Value);

impl From<stmt::Value> for Value {
    fn from(value: stmt::Value) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core rowmap value.
    pub fn into_inner(self) -> stmt::Value {
        self.0
    }

    /// Converts a SQLite value within a row to a rowmap value.
    ///
    /// SQLite reports storage classes, not column types, so the declared
    /// column type (when present) decides whether text and real values
    /// surface as decimals or timestamps. Unparseable text falls back to a
    /// plain string value.
    pub fn from_sql(row: &Row, index: usize, decltype: Option<&str>) -> Result<Self> {
        let value: SqlValue = row
            .get(index)
            .map_err(rowmap_core::Error::driver_operation_failed)?;

        let core_value = match value {
            SqlValue::Null => stmt::Value::Null,
            SqlValue::Integer(value) => match decltype {
                Some(decl) if decl.contains("BOOL") => stmt::Value::Bool(value != 0),
                _ => stmt::Value::I64(value),
            },
            SqlValue::Real(value) => match decltype {
                // The shortest round-trip rendering, not the exact binary
                // expansion: SQLite already collapsed the literal to a real
                Some(decl) if is_decimal_decl(decl) => {
                    match BigDecimal::from_str(&value.to_string()) {
                        Ok(decimal) => stmt::Value::Decimal(decimal),
                        Err(_) => stmt::Value::F64(value),
                    }
                }
                _ => stmt::Value::F64(value),
            },
            SqlValue::Text(value) => match decltype {
                Some(decl) if is_decimal_decl(decl) => match BigDecimal::from_str(&value) {
                    Ok(decimal) => stmt::Value::Decimal(decimal),
                    Err(_) => stmt::Value::String(value),
                },
                Some(decl) if decl.contains("TIMESTAMP") => match parse_timestamp(&value) {
                    Some(ts) => stmt::Value::Timestamp(ts),
                    None => stmt::Value::String(value),
                },
                Some(decl) if decl.contains("DATETIME") => {
                    match NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S%.f") {
                        Ok(dt) => stmt::Value::DateTime(dt),
                        Err(_) => stmt::Value::String(value),
                    }
                }
                _ => stmt::Value::String(value),
            },
            SqlValue::Blob(value) => stmt::Value::Bytes(value),
        };

        Ok(Value(core_value))
    }
}

fn is_decimal_decl(decl: &str) -> bool {
    decl.contains("DECIMAL") || decl.contains("NUMERIC")
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc())
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match &self.0 {
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            Value::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Value::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            Value::I8(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            Value::I16(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            Value::I32(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            Value::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::F32(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v as f64))),
            Value::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            // Text keeps full precision for values SQLite has no storage
            // class for
            Value::BigInt(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_string()))),
            Value::Decimal(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_plain_string()))),
            Value::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Value::Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            Value::Timestamp(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_rfc3339()))),
            Value::DateTime(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                v.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            ))),
        }
    }
}
