use super::{Db, Pool, PoolConfig};
use crate::{driver::Driver, Error, Result};

use url::Url;

use std::time::Duration;

/// Configures and opens a [`Db`].
#[derive(Default)]
pub struct Builder {
    pool: PoolConfig,
}

impl Builder {
    /// Replace the whole pool configuration, e.g. one deserialized from a
    /// configuration file.
    pub fn pool_config(&mut self, config: PoolConfig) -> &mut Self {
        self.pool = config;
        self
    }

    pub fn initial_size(&mut self, initial_size: usize) -> &mut Self {
        self.pool.initial_size = initial_size;
        self
    }

    pub fn min_idle(&mut self, min_idle: usize) -> &mut Self {
        self.pool.min_idle = min_idle;
        self
    }

    pub fn max_total(&mut self, max_total: usize) -> &mut Self {
        self.pool.max_total = max_total;
        self
    }

    pub fn max_wait(&mut self, max_wait: Duration) -> &mut Self {
        self.pool.max_wait = max_wait;
        self
    }

    pub fn default_auto_commit(&mut self, enabled: bool) -> &mut Self {
        self.pool.default_auto_commit = enabled;
        self
    }

    /// Validate connections with the configured validation query on each
    /// lease.
    pub fn test_on_borrow(&mut self, enabled: bool) -> &mut Self {
        self.pool.test_on_borrow = enabled;
        self
    }

    pub fn validation_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.pool.validation_query = Some(query.into());
        self
    }

    pub fn max_lifetime(&mut self, max_lifetime: Duration) -> &mut Self {
        self.pool.max_lifetime = Some(max_lifetime);
        self
    }

    /// Open a database handle, selecting the driver from the URL scheme.
    pub fn connect(&self, url: &str) -> Result<Db> {
        let parsed = Url::parse(url).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url}"))
        })?;

        let driver = match parsed.scheme() {
            "sqlite" => connect_sqlite(url)?,
            scheme => {
                return Err(Error::invalid_connection_url(format!(
                    "unsupported database scheme `{scheme}`; url={url}"
                )))
            }
        };

        self.build(driver)
    }

    /// Open a database handle with an explicitly constructed driver.
    pub fn driver(&self, driver: impl Driver) -> Result<Db> {
        self.build(Box::new(driver))
    }

    fn build(&self, driver: Box<dyn Driver>) -> Result<Db> {
        Ok(Db::new(Pool::new(driver, self.pool.clone())?))
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(rowmap_driver_sqlite::Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Driver>> {
    Err(crate::err!("`sqlite` feature not enabled"))
}
