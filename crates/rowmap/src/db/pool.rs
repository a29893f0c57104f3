//! Connection pooling for database connections.
//!
//! The pool is an external collaborator as far as the mapping core is
//! concerned: the executor only asks it for a working connection. What
//! lives here is the consumed configuration surface and a small synchronous
//! lease/return cycle around the driver's `connect`.

use crate::{driver::{Connection, Driver}, err, Error, Result};

use parking_lot::{Condvar, Mutex};
use serde::Deserialize;
use tracing::{debug, trace};

use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
    time::{Duration, Instant},
};

/// Configuration for connection pool behavior.
///
/// Field for field, this is the configuration surface a deployment hands
/// the connection source; the pool forwards the settings without
/// validating them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Connections opened eagerly when the pool is created.
    pub initial_size: usize,

    /// Floor on the connections opened at pool creation, together with
    /// `initial_size`. Idle connections are not replenished afterward.
    pub min_idle: usize,

    /// Upper bound on open connections.
    pub max_total: usize,

    /// How long `get` blocks waiting for a free connection before failing.
    pub max_wait: Duration,

    /// Auto-commit mode applied to each new connection.
    pub default_auto_commit: bool,

    /// Run the validation query on each lease.
    pub test_on_borrow: bool,

    /// Query used to validate a connection when `test_on_borrow` is set.
    pub validation_query: Option<String>,

    /// Connections older than this are discarded instead of re-leased.
    pub max_lifetime: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_size: 0,
            min_idle: 0,
            max_total: 8,
            max_wait: Duration::from_secs(30),
            default_auto_commit: true,
            test_on_borrow: false,
            validation_query: None,
            max_lifetime: None,
        }
    }
}

/// A connection pool that manages database connections.
#[derive(Clone)]
pub struct Pool {
    shared: Arc<Shared>,
}

struct Shared {
    driver: Box<dyn Driver>,
    config: PoolConfig,
    state: Mutex<State>,
    ready: Condvar,
}

struct State {
    idle: Vec<Idle>,
    total: usize,
    closed: bool,
}

struct Idle {
    conn: Box<dyn Connection>,
    created_at: Instant,
}

impl Pool {
    /// Creates a new connection pool from the given driver.
    pub fn new(driver: Box<dyn Driver>, mut config: PoolConfig) -> Result<Self> {
        if let Some(max) = driver.max_connections() {
            config.max_total = config.max_total.min(max);
        }
        config.max_total = config.max_total.max(1);

        let pool = Self {
            shared: Arc::new(Shared {
                driver,
                config,
                state: Mutex::new(State {
                    idle: Vec::new(),
                    total: 0,
                    closed: false,
                }),
                ready: Condvar::new(),
            }),
        };

        let warm = pool
            .shared
            .config
            .initial_size
            .max(pool.shared.config.min_idle)
            .min(pool.shared.config.max_total);

        for _ in 0..warm {
            let idle = pool.open()?;
            let mut state = pool.shared.state.lock();
            state.total += 1;
            state.idle.push(idle);
        }

        Ok(pool)
    }

    /// Retrieves a connection from the pool.
    ///
    /// Blocks up to `max_wait` when the pool is at `max_total` with nothing
    /// idle. Expired or invalid idle connections are discarded and replaced
    /// rather than returned.
    pub fn get(&self) -> Result<PoolConnection> {
        let config = &self.shared.config;
        let deadline = Instant::now() + config.max_wait;
        let mut state = self.shared.state.lock();

        loop {
            if state.closed {
                return Err(Error::connection_pool(PoolError::Closed));
            }

            if let Some(idle) = state.idle.pop() {
                if let Some(max_lifetime) = config.max_lifetime {
                    if idle.created_at.elapsed() > max_lifetime {
                        state.total -= 1;
                        self.shared.ready.notify_one();
                        trace!(target: "rowmap::pool", "discarding expired connection");
                        continue;
                    }
                }

                drop(state);
                match self.validate(idle) {
                    Ok(idle) => return Ok(self.lease(idle)),
                    Err(err) => {
                        trace!(target: "rowmap::pool", %err, "discarding invalid connection");
                        state = self.shared.state.lock();
                        state.total -= 1;
                        self.shared.ready.notify_one();
                        continue;
                    }
                }
            }

            if state.total < config.max_total {
                state.total += 1;
                drop(state);

                return match self.open() {
                    Ok(idle) => Ok(self.lease(idle)),
                    Err(err) => {
                        self.shared.state.lock().total -= 1;
                        self.shared.ready.notify_one();
                        Err(err)
                    }
                };
            }

            if self
                .shared
                .ready
                .wait_until(&mut state, deadline)
                .timed_out()
            {
                return Err(Error::connection_pool(PoolError::WaitTimeout(
                    config.max_wait,
                )));
            }
        }
    }

    /// Closes the pool. Idle connections are dropped now; leased ones when
    /// they are returned.
    pub fn close(&self) {
        let mut state = self.shared.state.lock();
        state.closed = true;
        let drained = state.idle.drain(..).count();
        state.total -= drained;
        self.shared.ready.notify_all();
        debug!(target: "rowmap::pool", drained, "pool closed");
    }

    fn open(&self) -> Result<Idle> {
        let mut conn = self.shared.driver.connect()?;
        conn.set_auto_commit(self.shared.config.default_auto_commit)?;
        debug!(target: "rowmap::pool", url = %self.shared.driver.url(), "opened connection");
        Ok(Idle {
            conn,
            created_at: Instant::now(),
        })
    }

    fn validate(&self, mut idle: Idle) -> Result<Idle> {
        if self.shared.config.test_on_borrow {
            if let Some(ref query) = self.shared.config.validation_query {
                idle.conn
                    .ping(query)
                    .map_err(|err| err.context(err!("connection failed validation")))?;
            }
        }
        Ok(idle)
    }

    fn lease(&self, idle: Idle) -> PoolConnection {
        PoolConnection {
            idle: Some(idle),
            shared: self.shared.clone(),
        }
    }
}

/// A connection retrieved from a pool.
///
/// When dropped, the connection is returned to the pool for reuse.
pub struct PoolConnection {
    idle: Option<Idle>,
    shared: Arc<Shared>,
}

impl Deref for PoolConnection {
    type Target = Box<dyn Connection>;

    fn deref(&self) -> &Self::Target {
        &self.idle.as_ref().expect("connection already returned").conn
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.idle.as_mut().expect("connection already returned").conn
    }
}

impl Drop for PoolConnection {
    fn drop(&mut self) {
        if let Some(idle) = self.idle.take() {
            let mut state = self.shared.state.lock();
            if state.closed {
                state.total -= 1;
            } else {
                state.idle.push(idle);
            }
            self.shared.ready.notify_one();
        }
    }
}

#[derive(Debug)]
enum PoolError {
    Closed,
    WaitTimeout(Duration),
}

impl std::error::Error for PoolError {}

impl core::fmt::Display for PoolError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            PoolError::Closed => f.write_str("connection pool is closed"),
            PoolError::WaitTimeout(wait) => {
                write!(f, "timed out after {:?} waiting for a connection", wait)
            }
        }
    }
}
