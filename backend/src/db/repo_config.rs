//! Repository configuration file support.
//!
//! This module provides utilities for reading repository configuration from
//! TOML configuration files.
//!
//! ```toml
//! [repository]
//! type = "sqlite"
//!
//! [sqlite]
//! database_url = "litlog.db"
//! max_connections = 4
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;
#[cfg(feature = "sqlite-repo")]
use super::repositories::sqlite::{normalize_database_url, SqliteConfig};

/// Where binaries look for `repository.toml`, in order.
pub const DEFAULT_SEARCH_PATHS: [&str; 3] = [
    "repository.toml",
    "backend/repository.toml",
    "../repository.toml",
];

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub sqlite: SqliteSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// SQLite connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for SqliteSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            connect_timeout: default_connect_timeout(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_database_url() -> String {
    "litlog.db".to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse repository configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load the first of `paths` that exists.
    ///
    /// Later paths are not consulted once one exists, even if it fails to parse.
    pub fn from_first_existing<P: AsRef<Path>>(
        paths: &[P],
    ) -> Result<Option<Self>, RepositoryError> {
        for path in paths {
            let path: &Path = path.as_ref();
            if path.exists() {
                return Self::from_file(path).map(Some);
            }
        }
        Ok(None)
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Convert to SqliteConfig if this is a SQLite configuration.
    #[cfg(feature = "sqlite-repo")]
    pub fn to_sqlite_config(&self) -> Result<Option<SqliteConfig>, RepositoryError> {
        let repo_type = self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if repo_type != RepositoryType::Sqlite {
            return Ok(None);
        }

        if self.sqlite.database_url.trim().is_empty() {
            return Err(RepositoryError::configuration(
                "SQLite repository requires 'sqlite.database_url' setting",
            ));
        }

        Ok(Some(SqliteConfig {
            database_url: normalize_database_url(&self.sqlite.database_url),
            max_pool_size: self.sqlite.max_connections,
            connection_timeout_sec: self.sqlite.connect_timeout,
            busy_timeout_ms: self.sqlite.busy_timeout_ms,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_config() {
        let toml = r#"
[repository]
type = "local"
"#;

        let config = RepositoryConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.repository.repo_type, "local");
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
        assert_eq!(config.sqlite.database_url, "litlog.db");
    }

    #[test]
    fn test_unparseable_config_is_configuration_error() {
        let err = RepositoryConfig::from_toml_str("[repository").unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }

    #[cfg(feature = "sqlite-repo")]
    #[test]
    fn test_parse_sqlite_config() {
        let toml = r#"
[repository]
type = "sqlite"

[sqlite]
database_url = "sqlite:///./data/litlog.db"
max_connections = 8
connect_timeout = 15
"#;

        let config = RepositoryConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Sqlite);

        let sqlite = config.to_sqlite_config().unwrap().unwrap();
        assert_eq!(sqlite.database_url, "./data/litlog.db");
        assert_eq!(sqlite.max_pool_size, 8);
        assert_eq!(sqlite.connection_timeout_sec, 15);
        assert_eq!(sqlite.busy_timeout_ms, 5000);
    }

    #[cfg(feature = "sqlite-repo")]
    #[test]
    fn test_sqlite_requires_database_url() {
        let toml = r#"
[repository]
type = "sqlite"

[sqlite]
database_url = ""
"#;

        let config = RepositoryConfig::from_toml_str(toml).unwrap();
        assert!(config.to_sqlite_config().is_err());
    }

    #[cfg(feature = "sqlite-repo")]
    #[test]
    fn test_local_config_has_no_sqlite_config() {
        let config = RepositoryConfig::from_toml_str("[repository]\ntype = \"memory\"\n").unwrap();
        assert!(config.to_sqlite_config().unwrap().is_none());
    }

    #[test]
    fn test_no_file_found_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = [dir.path().join("repository.toml")];
        assert!(RepositoryConfig::from_first_existing(&missing)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_malformed_existing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("repository.toml");
        let fallback = dir.path().join("fallback.toml");
        fs::write(&broken, "[repository").unwrap();
        fs::write(&fallback, "[repository]\ntype = \"local\"\n").unwrap();

        let err = RepositoryConfig::from_first_existing(&[broken, fallback]).unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }

    #[test]
    fn test_first_existing_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.toml");
        fs::write(&present, "[repository]\ntype = \"local\"\n").unwrap();

        let config = RepositoryConfig::from_first_existing(&[dir.path().join("absent.toml"), present])
            .unwrap()
            .unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
    }
}
