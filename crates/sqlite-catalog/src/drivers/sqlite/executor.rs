//! SQLx-backed execution of catalog queries and DDL.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::core::traits::QueryExecutor;
use crate::core::value::{CatalogRow, CatalogValue};
use crate::error::{CatalogError, Result};

/// Connection pool timeout.
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// SQLite executor over a connection pool.
///
/// Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    pool: SqlitePool,
}

impl SqliteExecutor {
    /// Open a pool from configuration and test the connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = if config.is_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.path)
                .create_if_missing(config.create_if_missing)
                .read_only(config.read_only)
        };
        let options = options.busy_timeout(Duration::from_secs(config.busy_timeout_secs));

        // An in-memory database disappears with its last connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(if config.is_memory() { 1 } else { 0 })
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| {
                CatalogError::query(e, format!("opening SQLite database {}", config.path))
            })?;

        let executor = Self::from_pool(pool);
        executor.test_connection().await?;

        info!("Connected to SQLite database: {}", config.path);
        Ok(executor)
    }

    /// Open a private in-memory database.
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig::for_path(":memory:")).await
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Test the database connection.
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CatalogError::query(e, "testing SQLite connection"))?;
        Ok(())
    }

    /// Close the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Convert an SQLx row into an owned, dynamically typed catalog row.
    ///
    /// Values are decoded by their runtime storage class, not the declared
    /// column type, since PRAGMA results have no declared types.
    fn to_catalog_row(row: &SqliteRow) -> Result<CatalogRow> {
        let mut columns = Vec::with_capacity(row.len());
        let mut values = Vec::with_capacity(row.len());

        for (i, column) in row.columns().iter().enumerate() {
            columns.push(column.name().to_string());

            let raw = row.try_get_raw(i)?;
            let value = if raw.is_null() {
                CatalogValue::Null
            } else {
                match raw.type_info().name() {
                    "INTEGER" | "BOOLEAN" => CatalogValue::Integer(row.try_get_unchecked(i)?),
                    "REAL" => CatalogValue::Real(row.try_get_unchecked(i)?),
                    "BLOB" => CatalogValue::Blob(row.try_get_unchecked(i)?),
                    _ => CatalogValue::Text(row.try_get_unchecked(i)?),
                }
            };
            values.push(value);
        }

        Ok(CatalogRow::new(columns, values))
    }
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    async fn query(&self, sql: &str) -> Result<Vec<CatalogRow>> {
        debug!("query: {}", sql);

        // Not cached: some PRAGMA results are computed when the statement
        // is prepared, and every read must see the live catalog.
        let rows: Vec<SqliteRow> = sqlx::query(sql)
            .persistent(false)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CatalogError::query(e, format!("running query: {}", sql)))?;

        rows.iter().map(Self::to_catalog_row).collect()
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        debug!("execute: {}", sql);

        sqlx::query(sql)
            .persistent(false)
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::query(e, format!("executing statement: {}", sql)))?;
        Ok(())
    }
}
