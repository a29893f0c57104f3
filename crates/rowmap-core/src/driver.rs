mod result_set;
pub use result_set::ResultSet;

use crate::{stmt, Result};

use std::{borrow::Cow, fmt::Debug};

/// A database driver: knows how to open connections to one database.
pub trait Driver: Debug + Send + Sync + 'static {
    /// Connection URL this driver was configured with.
    fn url(&self) -> Cow<'_, str>;

    /// Open a new connection to the database.
    fn connect(&self) -> Result<Box<dyn Connection>>;

    /// Upper bound on concurrently open connections, if the driver has one.
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

/// A single database connection.
///
/// Implementations prepare the given SQL, bind `params` positionally in
/// order 1..N, and execute. Connections are not shared across threads
/// concurrently; the pool hands each one to a single caller at a time.
pub trait Connection: Send {
    /// Execute a query, returning its result cursor.
    fn query(&mut self, sql: &str, params: &[stmt::Value]) -> Result<ResultSet>;

    /// Execute a statement that returns no rows, returning the affected row
    /// count. Used by pool validation and test fixtures, not by the mapping
    /// path.
    fn execute(&mut self, sql: &str, params: &[stmt::Value]) -> Result<usize>;

    /// Cheap liveness check used by pools for test-on-borrow.
    fn ping(&mut self, validation_query: &str) -> Result<()> {
        self.query(validation_query, &[]).map(drop)
    }

    /// Apply the configured default auto-commit mode. Drivers without the
    /// concept accept any setting.
    fn set_auto_commit(&mut self, _enabled: bool) -> Result<()> {
        Ok(())
    }
}
