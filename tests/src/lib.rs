//! Shared fixtures for the integration tests.

use rowmap::{FieldRegistry, Model, Type, Value};

/// The standard target type most tests map into.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub email: Option<String>,
}

impl Model for User {
    fn register(fields: &mut FieldRegistry<Self>) {
        fields
            .field("id", Type::I64)
            .field("firstName", Type::String)
            .field("lastName", Type::String)
            .field("age", Type::I32)
            .field("email", Type::String)
            .mutator("setId", Type::I64, |m, v| Ok(m.id = v.to_i64()?))
            .mutator("setFirstName", Type::String, |m, v| {
                Ok(m.first_name = v.to_string()?)
            })
            .mutator("setLastName", Type::String, |m, v| {
                Ok(m.last_name = v.to_string()?)
            })
            .mutator("setAge", Type::I32, |m, v| Ok(m.age = v.to_i32()?))
            .mutator("setEmail", Type::String, |m, v| {
                Ok(m.email = v.to_option_string()?)
            });
    }
}

/// Opens an in-memory database with a populated `users` table.
pub fn users_db() -> rowmap::Db {
    let db = rowmap::Db::builder()
        .connect("sqlite::memory:")
        .expect("open in-memory database");

    db.execute(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            age INTEGER NOT NULL,
            email TEXT
        )",
        &[],
    )
    .unwrap();

    for (id, first, last, age, email) in [
        (1i64, "ada", "lovelace", 36, Some("ada@example.com")),
        (2, "alan", "turing", 41, None),
        (3, "grace", "hopper", 85, Some("grace@example.com")),
    ] {
        db.execute(
            "INSERT INTO users (id, first_name, last_name, age, email) VALUES (?1, ?2, ?3, ?4, ?5)",
            &[
                Value::I64(id),
                first.into(),
                last.into(),
                Value::I64(age),
                email.map(str::to_string).into(),
            ],
        )
        .unwrap();
    }

    db
}
