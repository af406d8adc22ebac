//! Shared application state for the HTTP surface.
//!
//! # Responsibility
//! - Hold the connection pool handlers check sessions out of.
//!
//! # Invariants
//! - State is cheap to clone; the pool is shared, never duplicated.

use minitask_core::ConnectionPool;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: ConnectionPool,
}

impl AppState {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}
