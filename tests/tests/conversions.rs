use rowmap::{Db, FieldRegistry, Model, Type, Value};

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;

#[derive(Debug, Default, PartialEq)]
struct Invoice {
    id: i64,
    // DECIMAL column routed into differently-typed fields
    total_cents: i32,
    total_text: String,
    // TIMESTAMP column as epoch milliseconds and as local date-time
    created_millis: i64,
    created_at: Option<NaiveDateTime>,
}

impl Model for Invoice {
    fn register(fields: &mut FieldRegistry<Self>) {
        fields
            .field("id", Type::I64)
            .field("totalCents", Type::I32)
            .field("totalText", Type::String)
            .field("createdMillis", Type::I64)
            .field("createdAt", Type::DateTime)
            .mutator("setId", Type::I64, |m, v| Ok(m.id = v.to_i64()?))
            .mutator("setTotalCents", Type::I32, |m, v| {
                Ok(m.total_cents = v.to_i32()?)
            })
            .mutator("setTotalText", Type::String, |m, v| {
                Ok(m.total_text = v.to_string()?)
            })
            .mutator("setCreatedMillis", Type::I64, |m, v| {
                Ok(m.created_millis = v.to_i64()?)
            })
            .mutator("setCreatedAt", Type::DateTime, |m, v| {
                Ok(m.created_at = v.to_option_datetime()?)
            });
    }
}

fn invoices_db() -> Db {
    let db = Db::builder().connect("sqlite::memory:").unwrap();

    db.execute(
        "CREATE TABLE invoices (
            id INTEGER PRIMARY KEY,
            total DECIMAL(10, 2) NOT NULL,
            created TIMESTAMP NOT NULL
        )",
        &[],
    )
    .unwrap();

    // timestamp stored as RFC 3339 text
    db.execute(
        "INSERT INTO invoices (id, total, created) VALUES (?1, ?2, ?3)",
        &[
            Value::I64(1),
            "123.40".into(),
            "2023-01-01T00:00:00Z".into(),
        ],
    )
    .unwrap();

    db
}

#[test]
fn decimal_column_to_i32_truncates() {
    let db = invoices_db();

    let invoice: Invoice = db
        .fetch_one("SELECT id, total AS total_cents FROM invoices", &[])
        .unwrap();

    assert_eq!(invoice.total_cents, 123);
}

#[test]
fn decimal_column_to_string_is_plain() {
    let db = invoices_db();

    let invoice: Invoice = db
        .fetch_one("SELECT id, total AS total_text FROM invoices", &[])
        .unwrap();

    // SQLite's numeric affinity drops the trailing zero before the driver
    // ever sees the value; plain notation is preserved
    assert_eq!(invoice.total_text, "123.4");
}

#[test]
fn timestamp_column_to_epoch_millis() {
    let db = invoices_db();

    let invoice: Invoice = db
        .fetch_one("SELECT id, created AS created_millis FROM invoices", &[])
        .unwrap();

    assert_eq!(invoice.created_millis, 1_672_531_200_000);
}

#[test]
fn timestamp_column_to_local_datetime() {
    let db = invoices_db();

    let invoice: Invoice = db
        .fetch_one("SELECT id, created AS created_at FROM invoices", &[])
        .unwrap();

    let expected = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(invoice.created_at, Some(expected));
}

#[test]
fn integer_column_narrows_into_i32_field() {
    let db = invoices_db();

    db.execute("CREATE TABLE widths (total_cents INTEGER)", &[])
        .unwrap();
    db.execute("INSERT INTO widths (total_cents) VALUES (?1)", &[512i64.into()])
        .unwrap();

    let invoice: Invoice = db.fetch_one("SELECT total_cents FROM widths", &[]).unwrap();
    assert_eq!(invoice.total_cents, 512);
}
