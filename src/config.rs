// src/config.rs
//
// Runtime configuration
//
// Resolution order for the database path:
// 1. explicit value (CLI flag)
// 2. PAWPAL_DATABASE environment variable
// 3. {APP_DATA}/pawpal/pawpal.db

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Environment variable overriding the database location
pub const DATABASE_ENV_VAR: &str = "PAWPAL_DATABASE";

/// Default number of pooled SQLite connections
pub const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub pool_size: u32,
}

impl AppConfig {
    /// Build the configuration, preferring `database_override` when given
    pub fn load(database_override: Option<PathBuf>) -> AppResult<Self> {
        let database_path = match database_override {
            Some(path) => path,
            None => match std::env::var_os(DATABASE_ENV_VAR) {
                Some(path) if !path.is_empty() => PathBuf::from(path),
                _ => default_database_path()?,
            },
        };

        Ok(Self {
            database_path,
            pool_size: DEFAULT_POOL_SIZE,
        })
    }
}

/// Path structure: {APP_DATA}/pawpal/pawpal.db
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("pawpal").join("pawpal.db"))
}
