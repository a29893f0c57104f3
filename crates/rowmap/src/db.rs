mod builder;
mod pool;

pub use builder::Builder;
pub use pool::{Pool, PoolConfig, PoolConnection};

use crate::{stmt::Value, Cursor, Error, Model, Result, TypeDescriptor};

use tracing::debug;

/// A database handle: the query executor.
///
/// Cloning is cheap; all clones share the same connection pool. Each call
/// performs its own independent resolve-map-execute-release cycle against an
/// independently leased connection, so concurrent callers never share a
/// descriptor, column map, or cursor.
#[derive(Clone)]
pub struct Db {
    pool: Pool,
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db").finish_non_exhaustive()
    }
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Execute `sql` with `params` bound positionally and materialize
    /// exactly one row as `M`.
    ///
    /// Zero rows is a [record not found] error; a second available row is a
    /// [too many records] error.
    ///
    /// [record not found]: Error::is_record_not_found
    /// [too many records]: Error::is_too_many_records
    pub fn fetch_one<M: Model>(&self, sql: &str, params: &[Value]) -> Result<M> {
        let mut cursor = self.open_cursor::<M>(sql, params)?;

        let Some(first) = cursor.next()? else {
            return Err(Error::record_not_found("no rows found"));
        };

        // only row availability matters here; a surplus row is an error even
        // if it would not have mapped
        if cursor.has_next() {
            return Err(Error::too_many_records("multiple rows found"));
        }

        Ok(first)
    }

    /// Execute `sql` with `params` bound positionally and materialize every
    /// row as `M`, preserving result order. Zero rows is an empty `Vec`,
    /// not an error.
    pub fn fetch_all<M: Model>(&self, sql: &str, params: &[Value]) -> Result<Vec<M>> {
        self.open_cursor::<M>(sql, params)?.collect()
    }

    /// Execute a statement that returns no rows. Exposed for fixtures and
    /// schema setup; the mapping path never goes through here.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
        let mut conn = self.pool.get()?;
        conn.execute(sql, params)
    }

    /// Close the pool, dropping idle connections. Connections currently
    /// leased are dropped when returned.
    pub fn close(&self) {
        self.pool.close();
    }

    // The connection lease and prepared statement are scoped to this call
    // chain; drops release them on every exit path, including a conversion
    // or mutator failure mid-row.
    fn open_cursor<M: Model>(&self, sql: &str, params: &[Value]) -> Result<Cursor<M>> {
        let descriptor = TypeDescriptor::<M>::resolve();
        let mut conn = self.pool.get()?;

        debug!(target: "rowmap::db", sql, params = params.len(), "executing query");

        let rows = conn.query(sql, params)?;
        Ok(Cursor::new(rows, descriptor))
    }
}
