//! Execution contract consumed by the catalog reader.
//!
//! The reader never talks to a driver directly. It depends on the narrow
//! [`QueryExecutor`] seam below, which the SQLite driver implements over an
//! `sqlx` pool and which tests may implement over canned rows.

use std::sync::Arc;

use async_trait::async_trait;

use super::value::CatalogRow;
use crate::error::Result;

/// Run SQL text against a database.
///
/// Implementations must surface every prepare, execute or row-iteration
/// failure as an error. Retry, timeout and cancellation policy belongs to
/// the implementation, not to callers of this trait.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Prepare `sql`, step through every result row, and return them in order.
    async fn query(&self, sql: &str) -> Result<Vec<CatalogRow>>;

    /// Execute a statement that returns no rows.
    async fn execute(&self, sql: &str) -> Result<()>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn query(&self, sql: &str) -> Result<Vec<CatalogRow>> {
        (**self).query(sql).await
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        (**self).execute(sql).await
    }
}
