//! # sqlite-catalog
//!
//! Typed reflection over the SQLite catalog, plus safe generation of DDL.
//!
//! - **Reflection**: read `sqlite_master` into a [`SchemaSnapshot`] and
//!   `PRAGMA table_info` / `index_list` / `index_xinfo` into immutable
//!   [`TableDescriptor`]s
//! - **DDL**: build CREATE / ALTER / DROP statements with every identifier
//!   quoted by [`quote_ident`]
//! - **User version**: read and write `PRAGMA user_version` for migration
//!   bookkeeping
//!
//! ## Example
//!
//! ```rust,no_run
//! use sqlite_catalog::ddl::{self, CreateIndexOptions, CreateTableOptions};
//! use sqlite_catalog::{CatalogReader, SqliteExecutor};
//!
//! #[tokio::main]
//! async fn main() -> sqlite_catalog::Result<()> {
//!     let reader = CatalogReader::new(SqliteExecutor::in_memory().await?);
//!
//!     reader
//!         .apply(&ddl::create_table(
//!             "users",
//!             &["id INTEGER PRIMARY KEY", "email TEXT NOT NULL"],
//!             &CreateTableOptions::default(),
//!         ))
//!         .await?;
//!     reader
//!         .apply(&ddl::create_index(
//!             "idx_users_email",
//!             "users",
//!             &["email"],
//!             &CreateIndexOptions { unique: true, ..Default::default() },
//!         ))
//!         .await?;
//!
//!     if let Some(table) = reader.table("users").await? {
//!         println!("{} has {} columns", table.name(), table.columns().len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod ddl;
pub mod drivers;
pub mod error;
pub mod reader;

// Re-exports for convenient access
pub use config::{Config, DatabaseConfig};
pub use self::core::{
    quote_ident, CatalogRow, CatalogValue, ColumnDescriptor, EntryKind, IndexBuilder,
    IndexDescriptor, IndexOrigin, IndexedColumn, QueryExecutor, SchemaEntry, SchemaSnapshot,
    TableDescriptor,
};
pub use drivers::SqliteExecutor;
pub use error::{CatalogError, Result};
pub use reader::CatalogReader;
