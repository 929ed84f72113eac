//! Catalog reader: builds schema snapshots and table descriptors.
//!
//! The reader holds an executor and nothing else. It keeps no cache, so
//! every call re-reads the live catalog.
//!
//! # Failure policy
//!
//! - [`CatalogReader::schema`] is best effort: a failed catalog query is
//!   logged and an empty snapshot is returned.
//! - [`CatalogReader::table`] is strict: any failure while reading columns,
//!   indexes or index columns is returned as an error, never as a partially
//!   populated descriptor.

use tracing::{debug, warn};

use crate::core::identifier::quote_ident;
use crate::core::schema::SchemaSnapshot;
use crate::core::table::{ColumnDescriptor, IndexBuilder, TableDescriptor};
use crate::core::traits::QueryExecutor;
use crate::error::{CatalogError, Result};

const SCHEMA_QUERY: &str = "SELECT type, name, tbl_name, rootpage, sql FROM sqlite_master";

/// Reads the catalog through a [`QueryExecutor`].
#[derive(Debug, Clone)]
pub struct CatalogReader<E> {
    executor: E,
}

impl<E: QueryExecutor> CatalogReader<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// The wrapped executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Snapshot of every catalog entry, in catalog order.
    ///
    /// Returns an empty snapshot if the catalog query fails.
    pub async fn schema(&self) -> SchemaSnapshot {
        match self.executor.query(SCHEMA_QUERY).await {
            Ok(rows) => {
                let snapshot = SchemaSnapshot::from_rows(&rows);
                debug!("Read {} catalog entries", snapshot.len());
                snapshot
            }
            Err(e) => {
                warn!("Failed to read schema catalog, returning empty snapshot: {}", e);
                SchemaSnapshot::default()
            }
        }
    }

    /// Full descriptor for `name`, or `None` if the table has no columns.
    ///
    /// The descriptor carries `name` as given. SQLite resolves it
    /// case-insensitively, so `table("USERS")` finds `Users` and reports
    /// `"USERS"`. Views have columns too and resolve like tables; use
    /// [`SchemaSnapshot::entry`] to tell the two apart.
    pub async fn table(&self, name: &str) -> Result<Option<TableDescriptor>> {
        let quoted = quote_ident(name);

        let column_rows = self
            .executor
            .query(&format!("PRAGMA table_info({})", quoted))
            .await?;
        if column_rows.is_empty() {
            debug!("Table {} not found", name);
            return Ok(None);
        }
        let columns: Vec<ColumnDescriptor> =
            column_rows.iter().map(ColumnDescriptor::from_row).collect();

        let index_rows = self
            .executor
            .query(&format!("PRAGMA index_list({})", quoted))
            .await?;
        let mut builders: Vec<IndexBuilder> =
            index_rows.iter().map(IndexBuilder::from_row).collect();

        for builder in &mut builders {
            let rows = self
                .executor
                .query(&format!("PRAGMA index_xinfo({})", quote_ident(builder.name())))
                .await?;
            builder.extend_from_rows(&rows);
        }

        let indexes = builders.into_iter().map(IndexBuilder::build).collect::<Vec<_>>();

        debug!(
            "Loaded table {} with {} columns and {} indexes",
            name,
            columns.len(),
            indexes.len()
        );
        Ok(Some(TableDescriptor::new(name, columns, indexes)))
    }

    /// Whether a table named `name` exists.
    pub async fn table_exists(&self, name: &str) -> Result<bool> {
        let rows = self
            .executor
            .query(&format!("PRAGMA table_info({})", quote_ident(name)))
            .await?;
        Ok(!rows.is_empty())
    }

    /// Descriptors for every user table in the catalog.
    ///
    /// Engine-owned `sqlite_` tables are skipped. Unlike [`schema`](Self::schema),
    /// a failed catalog query is an error, as is the first table that cannot
    /// be read.
    pub async fn tables(&self) -> Result<Vec<TableDescriptor>> {
        let rows = self.executor.query(SCHEMA_QUERY).await?;
        let snapshot = SchemaSnapshot::from_rows(&rows);
        let mut tables = Vec::new();

        for entry in snapshot.tables().filter(|e| !e.is_internal()) {
            if let Some(table) = self.table(entry.name()).await? {
                tables.push(table);
            }
        }

        Ok(tables)
    }

    /// The database's user version number.
    pub async fn user_version(&self) -> Result<i32> {
        let rows = self.executor.query("PRAGMA user_version").await?;
        let version = rows
            .first()
            .and_then(|row| row.int("user_version"))
            .unwrap_or_default();
        i32::try_from(version).map_err(|e| CatalogError::query(e, "reading PRAGMA user_version"))
    }

    /// Persist a new user version number.
    ///
    /// SQLite stores the version in a 32-bit header field.
    pub async fn set_user_version(&self, version: i32) -> Result<()> {
        self.executor
            .execute(&format!("PRAGMA user_version = {}", version))
            .await
    }

    /// Execute a statement, typically one produced by the [`ddl`](crate::ddl) builders.
    pub async fn apply(&self, sql: &str) -> Result<()> {
        self.executor.execute(sql).await
    }
}
