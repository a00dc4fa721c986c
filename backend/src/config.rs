//! Runtime configuration loaded via OrthoConfig.
//!
//! Values layer defaults, an optional config file, `GROUNDWORK_`-prefixed
//! environment variables, and command-line overrides. The storage URL
//! resolves in priority order: explicit value, then a secret file, then the
//! embedded `erp.db` SQLite default.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::outbound::persistence::PoolConfig;

/// Storage URL used when neither a value nor a readable secret file exists.
pub const DEFAULT_DATABASE_URL: &str = "erp.db";

const DEFAULT_SECRET_PATH: &str = "/var/run/secrets/groundwork/database_url";

/// Failures raised while resolving settings into usable values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A configured secret file could not be read.
    #[error("failed to read storage URL from {path}: {source}")]
    SecretFile {
        /// File named by the configuration.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Configuration values controlling storage and pooling.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GROUNDWORK")]
pub struct Settings {
    /// Storage URL: a `postgres://` URL or a SQLite file path.
    pub database_url: Option<String>,
    /// File holding the storage URL, read when no explicit value is set.
    pub database_url_file: Option<PathBuf>,
    /// Connections the pool may hold.
    pub max_connections: Option<u32>,
}

impl Settings {
    /// Resolve the storage URL.
    ///
    /// An explicit `database_url` wins outright. A configured
    /// `database_url_file` must then be readable; the operator named it, so
    /// quietly substituting the default store would mask a deployment fault.
    /// With neither set, the conventional secret path is consulted and the
    /// [`DEFAULT_DATABASE_URL`] file store is the final fallback.
    pub fn resolve_database_url(&self) -> Result<String, SettingsError> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }
        if let Some(path) = &self.database_url_file {
            return read_secret(path).map_err(|source| SettingsError::SecretFile {
                path: path.clone(),
                source,
            });
        }
        match read_secret(Path::new(DEFAULT_SECRET_PATH)) {
            Ok(url) => Ok(url),
            Err(_) => Ok(DEFAULT_DATABASE_URL.to_owned()),
        }
    }

    /// Build pool settings from the resolved URL and configured sizing.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let mut config = PoolConfig::new(self.resolve_database_url()?);
        if let Some(max) = self.max_connections {
            config = config.with_max_size(max);
        }
        Ok(config)
    }
}

fn read_secret(path: &Path) -> std::io::Result<String> {
    let contents = std::fs::read_to_string(path)?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "secret file is empty",
        ));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration loading and URL resolution.

    use std::ffi::OsString;
    use std::io::Write;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> Settings {
        Settings::load_from_iter([OsString::from("groundwork")]).expect("config should load")
    }

    #[rstest]
    fn defaults_resolve_to_the_embedded_file_store() {
        let _guard = lock_env([
            ("GROUNDWORK_DATABASE_URL", None::<String>),
            ("GROUNDWORK_DATABASE_URL_FILE", None::<String>),
            ("GROUNDWORK_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.resolve_database_url().expect("resolution"),
            DEFAULT_DATABASE_URL
        );
        assert!(settings.max_connections.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "GROUNDWORK_DATABASE_URL",
                Some("postgres://erp-host/groundwork".to_owned()),
            ),
            ("GROUNDWORK_DATABASE_URL_FILE", None::<String>),
            ("GROUNDWORK_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.resolve_database_url().expect("resolution"),
            "postgres://erp-host/groundwork"
        );
        assert_eq!(settings.max_connections, Some(4));
    }

    #[rstest]
    fn secret_files_supply_the_url_when_no_value_is_set() {
        let mut secret = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(secret, "postgres://vault-host/groundwork").expect("write secret");
        let _guard = lock_env([
            ("GROUNDWORK_DATABASE_URL", None::<String>),
            (
                "GROUNDWORK_DATABASE_URL_FILE",
                Some(secret.path().display().to_string()),
            ),
            ("GROUNDWORK_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.resolve_database_url().expect("resolution"),
            "postgres://vault-host/groundwork"
        );
    }

    #[rstest]
    fn unreadable_configured_secret_files_are_an_error() {
        let _guard = lock_env([
            ("GROUNDWORK_DATABASE_URL", None::<String>),
            (
                "GROUNDWORK_DATABASE_URL_FILE",
                Some("/nonexistent/groundwork/database_url".to_owned()),
            ),
            ("GROUNDWORK_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        let error = settings.resolve_database_url().expect_err("should fail");
        assert!(matches!(error, SettingsError::SecretFile { .. }));
    }

    #[rstest]
    fn pool_config_carries_the_configured_sizing() {
        let _guard = lock_env([
            ("GROUNDWORK_DATABASE_URL", Some("erp.db".to_owned())),
            ("GROUNDWORK_DATABASE_URL_FILE", None::<String>),
            ("GROUNDWORK_MAX_CONNECTIONS", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let config = settings.pool_config().expect("pool config");
        assert_eq!(config.database_url(), "erp.db");
    }
}
