//! Shared fixtures for the integration suites.
//!
//! Each test gets its own SQLite file in a temporary directory, connected
//! through the same pool and migrations the ops binary uses. The directory
//! handle rides along so the file outlives the pool.

use backend::outbound::persistence::{DbPool, PoolConfig, migrations};
use tempfile::TempDir;

/// One disposable, fully migrated store.
pub struct TempStore {
    pub pool: DbPool,
    _dir: TempDir,
}

/// Create a fresh SQLite file, connect a small pool, and migrate it.
pub fn temp_store() -> TempStore {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("erp.db");
    let config = PoolConfig::new(path.display().to_string())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = DbPool::new(config).expect("connect to temp store");
    migrations::run(&pool).expect("migrate temp store");
    TempStore { pool, _dir: dir }
}
