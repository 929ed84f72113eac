//! SQLite database driver.
//!
//! Provides [`SqliteExecutor`], the [`QueryExecutor`](crate::core::QueryExecutor)
//! implementation used by the catalog reader. Uses SQLx for connection
//! pooling and async query execution.
//!
//! # Connection Paths
//!
//! ```text
//! app.db            file database
//! :memory:          in-memory database living as long as the pool
//! ```

mod executor;

pub use executor::SqliteExecutor;
