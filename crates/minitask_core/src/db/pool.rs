//! Per-request connection pool for file-backed SQLite databases.
//!
//! # Responsibility
//! - Hand each request an exclusively owned, fully bootstrapped connection.
//! - Recycle connections on drop so steady-state traffic reopens nothing.
//!
//! # Invariants
//! - Every connection handed out went through `open_db` bootstrap.
//! - The pool targets file databases; in-memory databases are private to a
//!   single connection and must not be pooled.
//! - Checkout never blocks on other requests beyond the idle-list lock.

use super::{open_db, DbResult};
use log::{debug, info};
use rusqlite::Connection;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

const MAX_IDLE_CONNECTIONS: usize = 4;

struct PoolInner {
    path: PathBuf,
    idle: Mutex<Vec<Connection>>,
}

impl PoolInner {
    fn lock_idle(&self) -> MutexGuard<'_, Vec<Connection>> {
        // A poisoned idle list only means another thread panicked while
        // holding the lock; the connections themselves remain valid.
        match self.idle.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Shared handle to a pool of bootstrapped SQLite connections.
#[derive(Clone)]
pub struct ConnectionPool {
    inner: Arc<PoolInner>,
}

impl ConnectionPool {
    /// Opens the pool against a database file.
    ///
    /// Eagerly opens one connection so schema migrations run at startup
    /// rather than on the first request; that connection is parked as idle.
    pub fn open(path: impl Into<PathBuf>) -> DbResult<Self> {
        let path = path.into();
        let first = open_db(&path)?;

        info!(
            "event=db_pool_open module=db status=ok path={}",
            path.display()
        );

        Ok(Self {
            inner: Arc::new(PoolInner {
                path,
                idle: Mutex::new(vec![first]),
            }),
        })
    }

    /// Checks out a connection for the duration of one request.
    ///
    /// Reuses an idle connection when available, otherwise opens a new one.
    /// The connection returns to the pool when the guard drops.
    pub fn checkout(&self) -> DbResult<PooledConnection> {
        let reused = self.inner.lock_idle().pop();

        let conn = match reused {
            Some(conn) => {
                debug!("event=db_pool_checkout module=db status=reused");
                conn
            }
            None => {
                debug!("event=db_pool_checkout module=db status=opened");
                open_db(&self.inner.path)?
            }
        };

        Ok(PooledConnection {
            conn: Some(conn),
            pool: Arc::clone(&self.inner),
        })
    }

    /// Returns the database file path this pool serves.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

/// Exclusively owned connection checked out from a `ConnectionPool`.
///
/// Dereferences to `rusqlite::Connection`; dropping the guard returns the
/// connection to the pool on every exit path, panics included.
pub struct PooledConnection {
    conn: Option<Connection>,
    pool: Arc<PoolInner>,
}

impl Deref for PooledConnection {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        self.conn
            .as_ref()
            .expect("connection present until drop")
    }
}

impl DerefMut for PooledConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.conn
            .as_mut()
            .expect("connection present until drop")
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            let mut idle = self.pool.lock_idle();
            if idle.len() < MAX_IDLE_CONNECTIONS {
                idle.push(conn);
            }
        }
    }
}
