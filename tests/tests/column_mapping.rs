use pretty_assertions::assert_eq;
use tests::{users_db, User};

#[test]
fn extra_columns_are_silently_dropped() {
    let db = users_db();

    // `length(first_name)` has no matching field
    let user: User = db
        .fetch_one(
            "SELECT id, first_name, length(first_name) AS name_length FROM users WHERE id = ?1",
            &[1i64.into()],
        )
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.first_name, "ada");
}

#[test]
fn missing_columns_leave_fields_at_default() {
    let db = users_db();

    let user: User = db
        .fetch_one("SELECT id FROM users WHERE id = ?1", &[1i64.into()])
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.first_name, "");
    assert_eq!(user.age, 0);
    assert_eq!(user.email, None);
}

#[test]
fn column_aliases_map_through_normalization() {
    let db = users_db();

    let user: User = db
        .fetch_one(
            "SELECT id, last_name AS first_name FROM users WHERE id = ?1",
            &[3i64.into()],
        )
        .unwrap();

    assert_eq!(user.first_name, "hopper");
}

#[test]
fn already_normalized_labels_map_directly() {
    let db = users_db();

    let user: User = db
        .fetch_one(
            "SELECT id, first_name AS firstName FROM users WHERE id = ?1",
            &[1i64.into()],
        )
        .unwrap();

    assert_eq!(user.first_name, "ada");
}
