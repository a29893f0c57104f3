use pretty_assertions::assert_eq;
use tests::{users_db, User};

#[test]
fn exactly_one_row_returns_populated_instance() {
    let db = users_db();

    let user: User = db
        .fetch_one(
            "SELECT id, first_name, last_name, age, email FROM users WHERE id = ?1",
            &[1i64.into()],
        )
        .unwrap();

    assert_eq!(
        user,
        User {
            id: 1,
            first_name: "ada".to_string(),
            last_name: "lovelace".to_string(),
            age: 36,
            email: Some("ada@example.com".to_string()),
        }
    );
}

#[test]
fn zero_rows_is_record_not_found() {
    let db = users_db();

    let err = db
        .fetch_one::<User>("SELECT * FROM users WHERE id = ?1", &[999i64.into()])
        .unwrap_err();

    assert!(err.is_record_not_found());
    assert!(err.to_string().contains("no rows found"));
}

#[test]
fn two_rows_is_too_many_records() {
    let db = users_db();

    let err = db
        .fetch_one::<User>("SELECT * FROM users ORDER BY id", &[])
        .unwrap_err();

    assert!(err.is_too_many_records());
    assert!(err.to_string().contains("multiple rows found"));
}

#[test]
fn surplus_row_reports_cardinality_not_mapping_failure() {
    let db = users_db();

    // the second row's NULL would not fit the non-optional first_name
    // field, but it is never mapped: only its existence is checked
    let err = db
        .fetch_one::<User>(
            "SELECT id, first_name FROM users WHERE id = 1
             UNION ALL SELECT 99, NULL",
            &[],
        )
        .unwrap_err();

    assert!(err.is_too_many_records());
}

#[test]
fn null_column_maps_to_none() {
    let db = users_db();

    let user: User = db
        .fetch_one("SELECT * FROM users WHERE id = ?1", &[2i64.into()])
        .unwrap();

    assert_eq!(user.email, None);
}

#[test]
fn positional_parameters_bind_in_order() {
    let db = users_db();

    let user: User = db
        .fetch_one(
            "SELECT * FROM users WHERE first_name = ?1 AND age = ?2",
            &["grace".into(), 85i64.into()],
        )
        .unwrap();

    assert_eq!(user.id, 3);
}

#[test]
fn execution_failure_is_a_driver_error() {
    let db = users_db();

    let err = db
        .fetch_one::<User>("SELECT * FROM no_such_table", &[])
        .unwrap_err();

    assert!(err.is_driver());
}
