//! Repository factory for dependency injection.
//!
//! This module creates repository instances from runtime configuration. The
//! resulting handle is built once at process start and passed to whoever
//! needs it; nothing here keeps a global.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use super::repo_config::{RepositoryConfig, DEFAULT_SEARCH_PATHS};
use super::repositories::LocalRepository;
#[cfg(feature = "sqlite-repo")]
use super::repositories::{SqliteConfig, SqliteRepository};
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// SQLite + Diesel implementation
    Sqlite,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("sqlite", "local", "memory").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. When unset or unparseable, defaults to SQLite
    /// if that backend is compiled in, otherwise Local.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or_else(Self::compiled_default)
    }

    fn compiled_default() -> Self {
        if cfg!(feature = "sqlite-repo") {
            Self::Sqlite
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use litlog::db::{RepositoryFactory, RepositoryType, SqliteConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = SqliteConfig::with_url("litlog.db");
///     let _sqlite = RepositoryFactory::create(RepositoryType::Sqlite, Some(&config)).await?;
///
///     let _local = RepositoryFactory::create_local();
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `sqlite_config` - Optional SQLite configuration; defaults are used when absent
    #[cfg(feature = "sqlite-repo")]
    pub async fn create(
        repo_type: RepositoryType,
        sqlite_config: Option<&SqliteConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Sqlite => {
                let config = sqlite_config.cloned().unwrap_or_default();
                let repo = Self::create_sqlite(&config).await?;
                Ok(repo as Arc<dyn FullRepository>)
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a repository instance based on type.
    #[cfg(not(feature = "sqlite-repo"))]
    pub async fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Sqlite => Err(RepositoryError::configuration(
                "SQLite repository feature not enabled",
            )),
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Open a SQLite repository.
    ///
    /// Opening touches the filesystem, so it runs on the blocking pool.
    #[cfg(feature = "sqlite-repo")]
    pub async fn create_sqlite(config: &SqliteConfig) -> RepositoryResult<Arc<SqliteRepository>> {
        let config = config.clone();
        let repo = tokio::task::spawn_blocking(move || SqliteRepository::new(config))
            .await
            .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))??;
        Ok(Arc::new(repo))
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` to pick the backend and, for SQLite, the
    /// variables documented on [`SqliteConfig::from_env`].
    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = RepositoryType::from_env();
        info!(?repo_type, "Creating repository from environment");

        #[cfg(feature = "sqlite-repo")]
        {
            Self::create(repo_type, Some(&SqliteConfig::from_env())).await
        }
        #[cfg(not(feature = "sqlite-repo"))]
        {
            Self::create(repo_type).await
        }
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    /// Create the repository a binary should use at startup.
    ///
    /// A `repository.toml` in one of the standard locations wins; without
    /// one, the environment decides. A file that exists but cannot be read
    /// or parsed is an error.
    pub async fn resolve() -> RepositoryResult<Arc<dyn FullRepository>> {
        Self::resolve_from(&DEFAULT_SEARCH_PATHS).await
    }

    /// [`resolve`](Self::resolve) over an explicit list of candidate files.
    pub async fn resolve_from<P: AsRef<Path>>(
        paths: &[P],
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match RepositoryConfig::from_first_existing(paths)? {
            Some(config) => {
                info!("Using repository.toml");
                Self::from_repository_config(&config).await
            }
            None => Self::from_env().await,
        }
    }

    /// Create repository from a RepositoryConfig instance.
    pub async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        #[cfg(feature = "sqlite-repo")]
        {
            let sqlite_config = config.to_sqlite_config()?;
            Self::create(repo_type, sqlite_config.as_ref()).await
        }
        #[cfg(not(feature = "sqlite-repo"))]
        {
            Self::create(repo_type).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{AuthorRepository, MaintenanceRepository};

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(
            RepositoryType::from_str("local").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str("Memory").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str("SQLite").unwrap(),
            RepositoryType::Sqlite
        );
        assert!(RepositoryType::from_str("postgres").is_err());
    }

    #[tokio::test]
    async fn test_create_local_repository() {
        let repo = RepositoryFactory::create_local();
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_local_from_repository_config() {
        let config = RepositoryConfig::from_toml_str("[repository]\ntype = \"local\"\n").unwrap();
        let repo = RepositoryFactory::from_repository_config(&config)
            .await
            .unwrap();
        assert!(repo.list_authors().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_type_in_config_is_rejected() {
        let config = RepositoryConfig::from_toml_str("[repository]\ntype = \"oracle\"\n").unwrap();
        let result = RepositoryFactory::from_repository_config(&config).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }
}
