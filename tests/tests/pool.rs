use rowmap::{db::PoolConfig, Db, Error, Value};
use rowmap_driver_sqlite::Sqlite;

use std::time::Duration;

use tests::{users_db, User};

#[test]
fn connections_are_reused_across_calls() {
    let db = users_db();

    // in-memory SQLite caps the pool at one connection; if leases were not
    // returned, the second call would time out
    for _ in 0..10 {
        let users: Vec<User> = db.fetch_all("SELECT * FROM users", &[]).unwrap();
        assert_eq!(users.len(), 3);
    }
}

#[test]
fn lease_is_released_on_failure_paths() {
    let db = users_db();

    assert!(db
        .fetch_one::<User>("SELECT * FROM users WHERE id = 999", &[])
        .is_err());
    assert!(db.fetch_one::<User>("SELECT broken syntax !!", &[]).is_err());

    // the single connection must have been returned both times
    let user: User = db
        .fetch_one("SELECT * FROM users WHERE id = ?1", &[Value::I64(1)])
        .unwrap();
    assert_eq!(user.id, 1);
}

#[test]
fn validation_query_runs_on_borrow() {
    let mut builder = Db::builder();
    builder
        .test_on_borrow(true)
        .validation_query("SELECT 1")
        .max_wait(Duration::from_secs(1));

    let db = builder.driver(Sqlite::in_memory()).unwrap();
    db.execute("CREATE TABLE t (id INTEGER)", &[]).unwrap();

    let rows: Vec<tests::User> = db.fetch_all("SELECT id FROM t", &[]).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn closed_pool_rejects_new_leases() {
    let db = users_db();
    db.close();

    let err = db
        .fetch_all::<User>("SELECT * FROM users", &[])
        .unwrap_err();
    assert!(err.is_connection_pool());
}

#[test]
fn pool_config_defaults_are_consumed() {
    let config = PoolConfig::default();
    assert_eq!(config.max_total, 8);
    assert!(config.default_auto_commit);
    assert!(!config.test_on_borrow);
    assert!(config.validation_query.is_none());
    assert!(config.max_lifetime.is_none());
}

#[test]
fn invalid_url_is_rejected() {
    let err: Error = Db::builder().connect("not a url").unwrap_err();
    assert!(err.is_invalid_connection_url());
}

#[test]
fn unsupported_scheme_is_rejected() {
    let err: Error = Db::builder()
        .connect("oracle://localhost/prod")
        .unwrap_err();

    assert!(err.is_invalid_connection_url());
    assert!(err.to_string().contains("oracle"));
}
