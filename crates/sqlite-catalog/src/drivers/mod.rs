//! Database driver implementations.
//!
//! - [`sqlite`]: SQLite driver over an SQLx pool
//!
//! Each driver implements [`QueryExecutor`](crate::core::QueryExecutor),
//! the only seam the catalog reader depends on.

pub mod sqlite;

pub use sqlite::SqliteExecutor;
