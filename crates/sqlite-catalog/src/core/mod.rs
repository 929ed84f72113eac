//! Core abstractions for catalog reflection.
//!
//! - [`identifier`]: identifier quoting for generated SQL
//! - [`value`]: dynamically typed catalog rows
//! - [`schema`]: catalog entries and whole-database snapshots
//! - [`table`]: table, column and index descriptors
//! - [`traits`]: the execution contract the reader depends on
//!
//! Everything here is a plain value: descriptors hold no connection and
//! never change after construction.

pub mod identifier;
pub mod schema;
pub mod table;
pub mod traits;
pub mod value;

pub use identifier::quote_ident;
pub use schema::{EntryKind, SchemaEntry, SchemaSnapshot};
pub use table::{
    ColumnDescriptor, IndexBuilder, IndexDescriptor, IndexOrigin, IndexedColumn, TableDescriptor,
};
pub use traits::QueryExecutor;
pub use value::{CatalogRow, CatalogValue};
