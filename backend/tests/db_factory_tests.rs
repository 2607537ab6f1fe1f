//! Tests for db::factory module - repository creation and configuration.

mod support;

use std::io::Write;
use std::str::FromStr;

use litlog::db::factory::{RepositoryFactory, RepositoryType};
use litlog::db::{AuthorRepository, MaintenanceRepository, RepositoryConfig, RepositoryError};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

#[test]
fn test_repository_type_from_str_sqlite() {
    assert_eq!(
        RepositoryType::from_str("sqlite").unwrap(),
        RepositoryType::Sqlite
    );
    assert_eq!(
        RepositoryType::from_str("SQLITE3").unwrap(),
        RepositoryType::Sqlite
    );
}

#[test]
fn test_repository_type_from_str_local() {
    assert_eq!(
        RepositoryType::from_str("local").unwrap(),
        RepositoryType::Local
    );
    assert_eq!(
        RepositoryType::from_str("memory").unwrap(),
        RepositoryType::Local
    );
}

#[test]
fn test_repository_type_from_str_invalid() {
    let result = RepositoryType::from_str("invalid");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", None)], || {
        let expected = if cfg!(feature = "sqlite-repo") {
            RepositoryType::Sqlite
        } else {
            RepositoryType::Local
        };
        assert_eq!(RepositoryType::from_env(), expected);
    });
}

#[test]
fn test_repository_type_from_env_local() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("local"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

#[test]
fn test_repository_type_from_env_garbage_falls_back() {
    let default = support::with_scoped_env(&[("REPOSITORY_TYPE", None)], RepositoryType::from_env);
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("mongodb"))], || {
        assert_eq!(RepositoryType::from_env(), default);
    });
}

#[test]
fn test_from_env_local_repository_is_usable() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("local"))], || {
        block_on(async {
            let repo = RepositoryFactory::from_env().await.unwrap();
            assert!(repo.health_check().await.unwrap());
            assert!(repo.list_authors().await.unwrap().is_empty());
        });
    });
}

#[cfg(feature = "sqlite-repo")]
#[test]
fn test_from_env_sqlite_uses_database_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("from-env.db");
    let url = format!("sqlite:///{}", path.display());

    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("sqlite")),
            ("DATABASE_URL", Some(url.as_str())),
            ("SQLITE_POOL_MAX", Some("2")),
        ],
        || {
            block_on(async {
                let repo = RepositoryFactory::from_env().await.unwrap();
                assert!(repo.health_check().await.unwrap());
            });
        },
    );

    assert!(path.exists());
}

#[test]
fn test_from_config_file_local() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"local\"").unwrap();

    let repo = block_on(RepositoryFactory::from_config_file(file.path())).unwrap();
    assert!(block_on(repo.health_check()).unwrap());
}

#[test]
fn test_from_config_file_missing_is_configuration_error() {
    let result = block_on(RepositoryFactory::from_config_file(
        "/definitely/not/here/repository.toml",
    ));
    assert!(matches!(
        result,
        Err(RepositoryError::ConfigurationError { .. })
    ));
}

#[cfg(feature = "sqlite-repo")]
#[test]
fn test_sqlite_config_section_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("from-toml.db");
    let toml = format!(
        "[repository]\ntype = \"sqlite\"\n\n[sqlite]\ndatabase_url = \"{}\"\nmax_connections = 2\n",
        path.display()
    );
    let config = RepositoryConfig::from_toml_str(&toml).unwrap();

    let repo = block_on(RepositoryFactory::from_repository_config(&config)).unwrap();
    assert!(block_on(repo.health_check()).unwrap());
    assert!(path.exists());
}

#[test]
fn test_resolve_rejects_malformed_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repository.toml");
    std::fs::write(&path, "[repository").unwrap();

    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("local"))], || {
        let result = block_on(RepositoryFactory::resolve_from(&[&path]));
        assert!(matches!(
            result,
            Err(RepositoryError::ConfigurationError { .. })
        ));
    });
}

#[test]
fn test_resolve_without_config_file_uses_environment() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("repository.toml");

    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("local"))], || {
        block_on(async {
            let repo = RepositoryFactory::resolve_from(&[&missing]).await.unwrap();
            assert!(repo.health_check().await.unwrap());
        });
    });
}

#[test]
fn test_resolve_prefers_config_file_over_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repository.toml");
    std::fs::write(&path, "[repository]\ntype = \"local\"\n").unwrap();

    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("sqlite")),
            ("DATABASE_URL", Some("/nonexistent-dir/should-not-open.db")),
        ],
        || {
            block_on(async {
                let repo = RepositoryFactory::resolve_from(&[&path]).await.unwrap();
                assert!(repo.list_authors().await.unwrap().is_empty());
            });
        },
    );
}
