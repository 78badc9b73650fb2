// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - SQLite work never runs on the async executor threads

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a connection pool for the configured database file
///
/// - SQLite in WAL mode
/// - Foreign keys enabled
/// - Busy timeout set to avoid immediate errors
pub fn create_connection_pool(config: &AppConfig) -> AppResult<ConnectionPool> {
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let manager = SqliteConnectionManager::file(&config.database_path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
    });

    let pool = Pool::builder()
        .max_size(config.pool_size)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    log::debug!(
        "Opened database pool at {} ({} connections)",
        config.database_path.display(),
        config.pool_size
    );
    Ok(pool)
}

/// Single-connection in-memory pool with the schema applied
///
/// Every in-memory SQLite connection is its own database, so the pool is
/// capped at one connection.
pub fn create_test_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    {
        let conn = get_connection(&pool)?;
        super::migrations::initialize_database(&conn)?;
    }
    Ok(pool)
}

/// Get a connection from the pool
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Run `f` with a pooled connection on the blocking thread pool
pub async fn with_connection<T, F>(pool: &Arc<ConnectionPool>, f: F) -> AppResult<T>
where
    F: FnOnce(&mut Connection) -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = Arc::clone(pool);
    tokio::task::spawn_blocking(move || {
        let mut conn = get_connection(&pool)?;
        f(&mut *conn)
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_pool_creation() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_path: dir.path().join("nested").join("pawpal.db"),
            pool_size: 2,
        };

        let pool = create_connection_pool(&config).unwrap();
        let conn = get_connection(&pool).unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
        assert!(config.database_path.exists());
    }

    #[test]
    fn test_test_pool_has_schema() {
        let pool = create_test_pool().unwrap();
        let conn = get_connection(&pool).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('users', 'dogs', 'walk_requests', 'walk_applications')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 4);
    }

    #[tokio::test]
    async fn test_with_connection_runs_on_blocking_pool() {
        let pool = Arc::new(create_test_pool().unwrap());
        let sum: i32 = with_connection(&pool, |conn| {
            Ok(conn.query_row("SELECT 1 + 1", [], |row| row.get(0))?)
        })
        .await
        .unwrap();
        assert_eq!(sum, 2);
    }

    #[test]
    fn test_pool_on_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_path: dir.path().join("flat.db"),
            pool_size: 1,
        };
        assert!(create_connection_pool(&config).is_ok());
    }
}
