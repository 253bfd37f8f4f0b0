//! Database test utilities
//!
//! Each `TestDb` is its own in-memory SQLite database with migrations
//! applied, so every test starts from clean state. The pool is pinned to a
//! single connection; an in-memory database lives and dies with its
//! connection.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::database;

#[derive(Debug, Clone)]
pub struct TestDb {
    pool: SqlitePool,
}

impl TestDb {
    /// Create an isolated in-memory test database with migrations applied.
    pub async fn new() -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory test database");

        database::migrate(&pool)
            .await
            .expect("Failed to run migrations on test database");

        Self { pool }
    }

    /// Returns the connection pool for this test database.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
