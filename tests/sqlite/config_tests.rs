//! Opening the store from environment configuration.

use super::helpers::database_path;
use crate::test_helpers::EnvVarGuard;
use rstest::rstest;
use secondbrain::config::{
    BUSY_TIMEOUT_ENV, ConfigError, DATABASE_PATH_ENV, POOL_SIZE_ENV, StorageConfig,
};
use secondbrain::storage::{SCHEMA_VERSION, open_pool, schema_version};
use std::time::Duration;

#[rstest]
fn environment_selects_the_database_file() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = database_path(&dir);
    let config = {
        let _guard = EnvVarGuard::set_many(&[
            (DATABASE_PATH_ENV, Some(path.as_str())),
            (POOL_SIZE_ENV, Some("2")),
            (BUSY_TIMEOUT_ENV, None),
        ]);
        StorageConfig::from_env().expect("configuration should load")
    };

    let pool = open_pool(&config).expect("store should open");
    let mut conn = pool.get().expect("connection should be available");

    assert_eq!(config.database_path(), path.as_path());
    assert_eq!(config.pool_size(), 2);
    assert_eq!(config.busy_timeout(), Duration::from_secs(5));
    assert!(path.is_file());
    assert_eq!(
        schema_version(&mut conn).expect("version should be readable"),
        SCHEMA_VERSION
    );
}

#[rstest]
fn invalid_environment_values_are_reported() {
    let _guard = EnvVarGuard::set_many(&[
        (DATABASE_PATH_ENV, None),
        (POOL_SIZE_ENV, Some("0")),
        (BUSY_TIMEOUT_ENV, None),
    ]);

    assert_eq!(StorageConfig::from_env(), Err(ConfigError::EmptyPool));
}
