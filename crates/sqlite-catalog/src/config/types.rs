//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection configuration.
    pub database: DatabaseConfig,
}

/// SQLite database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file path, or `:memory:` for a private in-memory database.
    pub path: String,

    /// Create the file if it does not exist (default: false).
    #[serde(default)]
    pub create_if_missing: bool,

    /// Open the database read-only (default: false).
    #[serde(default)]
    pub read_only: bool,

    /// Maximum pooled connections (default: 1).
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait on a locked database before failing (default: 5).
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Configuration for `path` with every other field at its default.
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: false,
            read_only: false,
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }

    /// Whether the path names a private in-memory database.
    ///
    /// Only the exact `:memory:` name qualifies. Any other path, URI-looking
    /// or not, is opened as a file name.
    pub fn is_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

fn default_max_connections() -> u32 {
    1
}

fn default_busy_timeout_secs() -> u64 {
    5
}
