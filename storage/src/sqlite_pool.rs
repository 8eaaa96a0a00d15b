//! SQLite connection pool wrapper for the storage crate.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::StorageError;

/// Manages a single SQLite pool; creates the DB file (and its directory) if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database URL (`sqlite://path`, `sqlite:path`, a bare path, or `sqlite::memory:`).
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        info!(database_url = %database_url, "Initializing SQLite pool");

        let in_memory = is_in_memory(database_url);
        if !in_memory {
            ensure_parent_dir(database_url)?;
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StorageError::InvalidUrl(format!("{}: {}", database_url, e)))?
            .create_if_missing(true);

        // Every connection to an in-memory database is a separate database unless the pool holds exactly one.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Filesystem path part of a SQLite URL, without scheme and query string.
fn database_path(database_url: &str) -> &str {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    rest.split('?').next().unwrap_or(rest)
}

fn ensure_parent_dir(database_url: &str) -> Result<(), StorageError> {
    let path = Path::new(database_path(database_url));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Database(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_strips_scheme_and_query() {
        assert_eq!(database_path("sqlite://./data/relay.db"), "./data/relay.db");
        assert_eq!(database_path("sqlite:relay.db?mode=rwc"), "relay.db");
        assert_eq!(database_path("/var/lib/relay.db"), "/var/lib/relay.db");
    }

    #[test]
    fn test_is_in_memory() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(!is_in_memory("sqlite://./data/relay.db"));
    }
}
