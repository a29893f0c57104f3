mod value;
pub(crate) use value::Value;

use rowmap_core::{
    driver::{self, ResultSet},
    stmt, Result,
};
use rusqlite::Connection as RusqliteConnection;
use url::Url;

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

/// SQLite driver, file-backed or in-memory.
#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(rowmap_core::Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(rowmap_core::Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl driver::Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn connect(&self) -> Result<Box<dyn driver::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory(),
        };
        Ok(Box::new(connection))
    }

    fn max_connections(&self) -> Option<usize> {
        // Each in-memory connection would see its own private database
        matches!(self, Self::InMemory).then_some(1)
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Self {
        let connection = RusqliteConnection::open_in_memory().unwrap();

        Self { connection }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path)
            .map_err(rowmap_core::Error::driver_operation_failed)?;
        Ok(Self { connection })
    }
}

impl driver::Connection for Connection {
    fn query(&mut self, sql: &str, params: &[stmt::Value]) -> Result<ResultSet> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .map_err(rowmap_core::Error::driver_operation_failed)?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        // Declared column types drive text/real bridging into decimal and
        // temporal values; SQLite itself only reports storage classes.
        let decltypes: Vec<Option<String>> = stmt
            .columns()
            .iter()
            .map(|column| column.decl_type().map(|ty| ty.to_ascii_uppercase()))
            .collect();

        let params = params
            .iter()
            .cloned()
            .map(Value::from)
            .collect::<Vec<_>>();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(rowmap_core::Error::driver_operation_failed)?;

        let width = columns.len();
        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut items = Vec::with_capacity(width);

                    for index in 0..width {
                        let decltype = decltypes[index].as_deref();
                        items.push(Value::from_sql(row, index, decltype)?.into_inner());
                    }

                    ret.push(items);
                }
                Ok(None) => break,
                Err(err) => {
                    return Err(rowmap_core::Error::driver_operation_failed(err));
                }
            }
        }

        Ok(ResultSet::new(columns, ret))
    }

    fn execute(&mut self, sql: &str, params: &[stmt::Value]) -> Result<usize> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .map_err(rowmap_core::Error::driver_operation_failed)?;

        let params = params
            .iter()
            .cloned()
            .map(Value::from)
            .collect::<Vec<_>>();

        stmt.execute(rusqlite::params_from_iter(params.iter()))
            .map_err(rowmap_core::Error::driver_operation_failed)
    }
}
