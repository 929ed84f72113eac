//! Configuration validation.

use super::Config;
use crate::error::{CatalogError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let db = &config.database;

    if db.path.trim().is_empty() {
        return Err(CatalogError::Config("database.path is required".into()));
    }
    if db.max_connections == 0 {
        return Err(CatalogError::Config(
            "database.max_connections must be at least 1".into(),
        ));
    }
    if db.read_only && db.create_if_missing {
        return Err(CatalogError::Config(
            "database.read_only and database.create_if_missing cannot both be set".into(),
        ));
    }
    // Pooled in-memory connections share one cache and contend on table locks.
    if db.is_memory() && db.max_connections > 1 {
        return Err(CatalogError::Config(
            "database.max_connections must be 1 for an in-memory database".into(),
        ));
    }

    Ok(())
}
