//! SQLite repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Foreign keys enforced on every pooled connection
//! - Schema created from the table declarations when the repository opens
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL`: SQLite file path or `sqlite:///` URL (default: `litlog.db`)
//! - `SQLITE_POOL_MAX`: Maximum pool size (default: 4)
//! - `SQLITE_CONN_TIMEOUT_SEC`: Connection checkout timeout in seconds (default: 30)
//! - `SQLITE_BUSY_TIMEOUT_MS`: How long a writer waits on a locked database (default: 5000)

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use std::time::Duration;
use tokio::task;
use tracing::{debug, info};

use crate::db::repository::{
    AuthorRepository, BookRepository, ErrorContext, MaintenanceRepository, RepositoryError,
    RepositoryResult, ReviewRepository,
};
use crate::models::{Author, AuthorId, Book, BookId, NewAuthor, NewBook, NewReview, Review};

mod models;
mod schema;

use models::*;
use schema::*;

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "litlog.db";

/// Configuration for opening the SQLite store.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database file path (or `:memory:`)
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Connection checkout timeout in seconds
    pub connection_timeout_sec: u64,
    /// SQLite busy timeout in milliseconds
    pub busy_timeout_ms: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_pool_size: 4,
            connection_timeout_sec: 30,
            busy_timeout_ms: 5000,
        }
    }
}

impl SqliteConfig {
    /// Create configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_url = std::env::var("DATABASE_URL")
            .map(|url| normalize_database_url(&url))
            .unwrap_or(defaults.database_url);

        let max_pool_size = std::env::var("SQLITE_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.max_pool_size);

        let connection_timeout_sec = std::env::var("SQLITE_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.connection_timeout_sec);

        let busy_timeout_ms = std::env::var("SQLITE_BUSY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.busy_timeout_ms);

        Self {
            database_url,
            max_pool_size,
            connection_timeout_sec,
            busy_timeout_ms,
        }
    }

    /// Create a new configuration with a database path.
    pub fn with_url(database_url: impl AsRef<str>) -> Self {
        Self {
            database_url: normalize_database_url(database_url.as_ref()),
            ..Default::default()
        }
    }
}

/// Turn a SQLAlchemy-style `sqlite:///path` URL into the plain path Diesel expects.
///
/// `sqlite:///./litlog.db` becomes `./litlog.db` and `sqlite:////var/db` becomes
/// `/var/db`. Anything without the scheme is returned unchanged.
pub fn normalize_database_url(url: &str) -> String {
    url.strip_prefix("sqlite:///")
        .or_else(|| url.strip_prefix("sqlite://"))
        .unwrap_or(url)
        .to_string()
}

/// Per-connection pragmas applied by the pool on checkout of a new connection.
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout_ms
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Diesel-backed repository for SQLite.
#[derive(Clone, Debug)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Open (or create) the database file and create any missing tables.
    ///
    /// # Returns
    /// * `Ok(SqliteRepository)` on success
    /// * `Err(RepositoryError)` if the file cannot be opened or the schema cannot be created
    pub fn new(config: SqliteConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout_ms: config.busy_timeout_ms,
            }))
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("database_url={}", config.database_url)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_schema"),
                )
            })?;
            Self::create_schema(&mut conn)?;
        }

        info!(database_url = %config.database_url, "SQLite repository opened");

        Ok(Self { pool })
    }

    fn create_schema(conn: &mut SqliteConnection) -> RepositoryResult<()> {
        conn.batch_execute(CREATE_TABLES_SQL).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Schema creation failed: {}", e),
                ErrorContext::new("create_schema"),
            )
        })?;
        debug!("SQLite schema ensured");
        Ok(())
    }

    /// Run `f` on a pooled connection inside the blocking thread pool.
    ///
    /// The connection is returned to the pool when `f` finishes, whether it
    /// succeeded or not.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation).with_details("get_connection"),
                )
            })?;

            f(&mut *conn).map_err(|e| {
                if e.context().operation.is_none() {
                    e.with_operation(operation)
                } else {
                    e
                }
            })
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn author_exists_in(conn: &mut SqliteConnection, author_id: i64) -> RepositoryResult<bool> {
    diesel::select(exists(authors::table.filter(authors::id.eq(author_id))))
        .get_result::<bool>(conn)
        .map_err(RepositoryError::from)
}

fn book_exists_in(conn: &mut SqliteConnection, book_id: i64) -> RepositoryResult<bool> {
    diesel::select(exists(books::table.filter(books::id.eq(book_id))))
        .get_result::<bool>(conn)
        .map_err(RepositoryError::from)
}

#[async_trait]
impl AuthorRepository for SqliteRepository {
    async fn list_authors(&self) -> RepositoryResult<Vec<Author>> {
        self.with_conn("list_authors", |conn| {
            let rows = authors::table
                .order(authors::id.asc())
                .select(AuthorRow::as_select())
                .load::<AuthorRow>(conn)?;
            Ok(rows.into_iter().map(Author::from).collect())
        })
        .await
    }

    async fn insert_authors(&self, new_authors: &[NewAuthor]) -> RepositoryResult<Vec<Author>> {
        let new_authors = new_authors.to_vec();
        self.with_conn("insert_authors", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                new_authors
                    .iter()
                    .map(|author| {
                        diesel::insert_into(authors::table)
                            .values(NewAuthorRow::from(author))
                            .returning(AuthorRow::as_returning())
                            .get_result::<AuthorRow>(tx)
                            .map(Author::from)
                            .map_err(RepositoryError::from)
                    })
                    .collect()
            })
        })
        .await
    }

    async fn author_exists(&self, author_id: AuthorId) -> RepositoryResult<bool> {
        self.with_conn("author_exists", move |conn| {
            author_exists_in(conn, author_id.value())
        })
        .await
    }
}

#[async_trait]
impl BookRepository for SqliteRepository {
    async fn list_books(&self) -> RepositoryResult<Vec<Book>> {
        self.with_conn("list_books", |conn| {
            let rows = books::table
                .order(books::id.asc())
                .select(BookRow::as_select())
                .load::<BookRow>(conn)?;
            Ok(rows.into_iter().map(Book::from).collect())
        })
        .await
    }

    async fn insert_books(&self, new_books: &[NewBook]) -> RepositoryResult<Vec<Book>> {
        let new_books = new_books.to_vec();
        self.with_conn("insert_books", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let mut stored = Vec::with_capacity(new_books.len());
                for book in &new_books {
                    if !author_exists_in(tx, book.author_id.value())? {
                        return Err(RepositoryError::invalid_reference_with_context(
                            "author_id",
                            format!("author {} does not exist", book.author_id),
                            ErrorContext::new("insert_books")
                                .with_entity("author")
                                .with_entity_id(book.author_id),
                        ));
                    }

                    let row = diesel::insert_into(books::table)
                        .values(NewBookRow::from(book))
                        .returning(BookRow::as_returning())
                        .get_result::<BookRow>(tx)
                        .map_err(|e| RepositoryError::from(e).with_reference_field("author_id"))?;
                    stored.push(Book::from(row));
                }
                Ok(stored)
            })
        })
        .await
    }

    async fn book_exists(&self, book_id: BookId) -> RepositoryResult<bool> {
        self.with_conn("book_exists", move |conn| book_exists_in(conn, book_id.value()))
            .await
    }

    async fn books_by_author(&self, author_id: AuthorId) -> RepositoryResult<Vec<Book>> {
        self.with_conn("books_by_author", move |conn| {
            let rows = books::table
                .filter(books::author_id.eq(author_id.value()))
                .order(books::id.asc())
                .select(BookRow::as_select())
                .load::<BookRow>(conn)?;
            Ok(rows.into_iter().map(Book::from).collect())
        })
        .await
    }
}

#[async_trait]
impl ReviewRepository for SqliteRepository {
    async fn list_reviews(&self) -> RepositoryResult<Vec<Review>> {
        self.with_conn("list_reviews", |conn| {
            let rows = reviews::table
                .order(reviews::id.asc())
                .select(ReviewRow::as_select())
                .load::<ReviewRow>(conn)?;
            Ok(rows.into_iter().map(Review::from).collect())
        })
        .await
    }

    async fn insert_reviews(&self, new_reviews: &[NewReview]) -> RepositoryResult<Vec<Review>> {
        let new_reviews = new_reviews.to_vec();
        self.with_conn("insert_reviews", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let mut stored = Vec::with_capacity(new_reviews.len());
                for review in &new_reviews {
                    if !book_exists_in(tx, review.book_id.value())? {
                        return Err(RepositoryError::invalid_reference_with_context(
                            "book_id",
                            format!("book {} does not exist", review.book_id),
                            ErrorContext::new("insert_reviews")
                                .with_entity("book")
                                .with_entity_id(review.book_id),
                        ));
                    }

                    let row = diesel::insert_into(reviews::table)
                        .values(NewReviewRow::from(review))
                        .returning(ReviewRow::as_returning())
                        .get_result::<ReviewRow>(tx)
                        .map_err(|e| RepositoryError::from(e).with_reference_field("book_id"))?;
                    stored.push(Review::from(row));
                }
                Ok(stored)
            })
        })
        .await
    }

    async fn reviews_by_book(&self, book_id: BookId) -> RepositoryResult<Vec<Review>> {
        self.with_conn("reviews_by_book", move |conn| {
            let rows = reviews::table
                .filter(reviews::book_id.eq(book_id.value()))
                .order(reviews::id.asc())
                .select(ReviewRow::as_select())
                .load::<ReviewRow>(conn)?;
            Ok(rows.into_iter().map(Review::from).collect())
        })
        .await
    }
}

#[async_trait]
impl MaintenanceRepository for SqliteRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn clear_all(&self) -> RepositoryResult<()> {
        self.with_conn("clear_all", |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                // Children first so no foreign key is left dangling mid-transaction.
                let reviews_deleted = diesel::delete(reviews::table).execute(tx)?;
                let books_deleted = diesel::delete(books::table).execute(tx)?;
                let authors_deleted = diesel::delete(authors::table).execute(tx)?;
                debug!(
                    reviews_deleted,
                    books_deleted, authors_deleted, "Cleared all tables"
                );
                Ok(())
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_database_url() {
        assert_eq!(normalize_database_url("sqlite:///./litlog.db"), "./litlog.db");
        assert_eq!(normalize_database_url("sqlite:////var/lib/litlog.db"), "/var/lib/litlog.db");
        assert_eq!(normalize_database_url("litlog.db"), "litlog.db");
        assert_eq!(normalize_database_url(":memory:"), ":memory:");
    }

    #[test]
    fn test_default_config_points_at_local_file() {
        let config = SqliteConfig::default();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_pool_size, 4);
    }

    #[test]
    fn test_with_url_normalizes() {
        let config = SqliteConfig::with_url("sqlite:///data.db");
        assert_eq!(config.database_url, "data.db");
        assert_eq!(config.busy_timeout_ms, 5000);
    }

    fn open_temp() -> (tempfile::TempDir, SqliteRepository) {
        let dir = tempfile::tempdir().unwrap();
        let config = SqliteConfig {
            max_pool_size: 2,
            ..SqliteConfig::with_url(dir.path().join("fk.db").to_string_lossy())
        };
        let repo = SqliteRepository::new(config).unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced_without_prior_check() {
        let (_dir, repo) = open_temp();

        let err = repo
            .with_conn("raw_insert_book", |conn| {
                diesel::insert_into(books::table)
                    .values(NewBookRow {
                        title: "Orphan",
                        genre: None,
                        publish_date: None,
                        author_id: 999,
                    })
                    .execute(conn)
                    .map_err(RepositoryError::from)
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::InvalidReference { .. }));
        assert!(err.is_client_error());
        assert!(repo.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_review_foreign_key_enforced_without_prior_check() {
        let (_dir, repo) = open_temp();

        let err = repo
            .with_conn("raw_insert_review", |conn| {
                diesel::insert_into(reviews::table)
                    .values(NewReviewRow {
                        rating: 1,
                        content: "dangling",
                        book_id: 999,
                    })
                    .execute(conn)
                    .map_err(|e| RepositoryError::from(e).with_reference_field("book_id"))
            })
            .await
            .unwrap_err();

        match err {
            RepositoryError::InvalidReference { field, context, .. } => {
                assert_eq!(field.as_deref(), Some("book_id"));
                assert_eq!(context.operation.as_deref(), Some("raw_insert_review"));
            }
            other => panic!("expected InvalidReference, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_every_pooled_connection_enforces_foreign_keys() {
        let (_dir, repo) = open_temp();
        let pool = repo.pool.clone();

        let enabled = tokio::task::spawn_blocking(move || {
            let mut first = pool.get().unwrap();
            let mut second = pool.get().unwrap();
            [&mut first, &mut second].map(|conn| {
                diesel::sql_query("PRAGMA foreign_keys")
                    .load::<ForeignKeysPragma>(&mut **conn)
                    .unwrap()[0]
                    .foreign_keys
            })
        })
        .await
        .unwrap();

        assert_eq!(enabled, [1, 1]);
    }

    #[derive(QueryableByName)]
    struct ForeignKeysPragma {
        #[diesel(sql_type = diesel::sql_types::Integer)]
        foreign_keys: i32,
    }
}
