use pretty_assertions::assert_eq;
use tests::{users_db, User};

#[test]
fn zero_rows_yields_empty_vec() {
    let db = users_db();

    let users: Vec<User> = db
        .fetch_all("SELECT * FROM users WHERE id > ?1", &[100i64.into()])
        .unwrap();

    assert!(users.is_empty());
}

#[test]
fn preserves_result_order() {
    let db = users_db();

    let users: Vec<User> = db
        .fetch_all("SELECT * FROM users ORDER BY age DESC", &[])
        .unwrap();

    let ages: Vec<i32> = users.iter().map(|u| u.age).collect();
    assert_eq!(ages, vec![85, 41, 36]);
}

#[test]
fn every_row_is_fully_mapped() {
    let db = users_db();

    let users: Vec<User> = db.fetch_all("SELECT * FROM users ORDER BY id", &[]).unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(users[0].first_name, "ada");
    assert_eq!(users[1].first_name, "alan");
    assert_eq!(users[2].first_name, "grace");
}

#[test]
fn consecutive_calls_are_independent() {
    let db = users_db();

    // each call re-derives the descriptor and column map from scratch
    let first: Vec<User> = db.fetch_all("SELECT id FROM users", &[]).unwrap();
    let second: Vec<User> = db
        .fetch_all("SELECT id, first_name FROM users", &[])
        .unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
    assert!(first.iter().all(|u| u.first_name.is_empty()));
    assert!(second.iter().all(|u| !u.first_name.is_empty()));
}
