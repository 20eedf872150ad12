//! Storage configuration.
//!
//! Configuration starts from defaults and can be overridden from the
//! process environment:
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `SECONDBRAIN_DB_PATH` | Database file path | `secondbrain_db/secondbrain.db` |
//! | `SECONDBRAIN_POOL_SIZE` | Maximum pooled connections | `1` |
//! | `SECONDBRAIN_BUSY_TIMEOUT_MS` | `SQLite` busy timeout | `5000` |

use camino::{Utf8Path, Utf8PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding the database file path.
pub const DATABASE_PATH_ENV: &str = "SECONDBRAIN_DB_PATH";

/// Environment variable overriding the connection pool size.
pub const POOL_SIZE_ENV: &str = "SECONDBRAIN_POOL_SIZE";

/// Environment variable overriding the `SQLite` busy timeout in milliseconds.
pub const BUSY_TIMEOUT_ENV: &str = "SECONDBRAIN_BUSY_TIMEOUT_MS";

const DEFAULT_DATABASE_PATH: &str = "secondbrain_db/secondbrain.db";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value found in the environment.
        value: String,
    },

    /// The pool size must allow at least one connection.
    #[error("SECONDBRAIN_POOL_SIZE must be at least 1")]
    EmptyPool,
}

/// Location and connection settings for the `SQLite` store.
///
/// The default pool holds a single connection, which serializes every
/// statement issued by this process.
///
/// # Examples
///
/// ```
/// use secondbrain::config::StorageConfig;
///
/// let config = StorageConfig::new("/tmp/notes.db").with_pool_size(2);
/// assert_eq!(config.database_path().as_str(), "/tmp/notes.db");
/// assert_eq!(config.pool_size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    database_path: Utf8PathBuf,
    pool_size: u32,
    busy_timeout: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: Utf8PathBuf::from(DEFAULT_DATABASE_PATH),
            pool_size: 1,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl StorageConfig {
    /// Creates a configuration for the given database file with default
    /// connection settings.
    #[must_use]
    pub fn new(database_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            ..Self::default()
        }
    }

    /// Sets the maximum number of pooled connections (at least one).
    #[must_use]
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size.max(1);
        self
    }

    /// Sets how long a connection waits on a locked database.
    #[must_use]
    pub const fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(DATABASE_PATH_ENV).filter(|value| !value.trim().is_empty()) {
            config.database_path = Utf8PathBuf::from(path.trim());
        }

        if let Some(raw) = lookup(POOL_SIZE_ENV) {
            let pool_size = parse_number(POOL_SIZE_ENV, &raw)?;
            if pool_size == 0 {
                return Err(ConfigError::EmptyPool);
            }
            config.pool_size = u32::try_from(pool_size).map_err(|_| ConfigError::InvalidValue {
                key: POOL_SIZE_ENV,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(BUSY_TIMEOUT_ENV) {
            config.busy_timeout = Duration::from_millis(parse_number(BUSY_TIMEOUT_ENV, &raw)?);
        }

        Ok(config)
    }

    /// Returns the database file path.
    #[must_use]
    pub fn database_path(&self) -> &Utf8Path {
        &self.database_path
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns the `SQLite` busy timeout.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }
}

fn parse_number(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_owned(),
    })
}
