//! Repository trait for authors.

use async_trait::async_trait;

use super::error::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{Author, AuthorId, NewAuthor};

/// Storage operations for [`Author`] rows.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// List every author in insertion order.
    async fn list_authors(&self) -> RepositoryResult<Vec<Author>>;

    /// Insert a batch of authors in a single commit.
    ///
    /// # Returns
    /// * `Ok(Vec<Author>)` - The stored authors, in input order, with assigned IDs
    /// * `Err(RepositoryError)` - If the operation fails; nothing is stored
    async fn insert_authors(&self, authors: &[NewAuthor]) -> RepositoryResult<Vec<Author>>;

    /// Check whether an author with this ID exists.
    async fn author_exists(&self, author_id: AuthorId) -> RepositoryResult<bool>;

    /// Insert one author and return it with its assigned ID.
    async fn create_author(&self, author: &NewAuthor) -> RepositoryResult<Author> {
        self.insert_authors(std::slice::from_ref(author))
            .await?
            .pop()
            .ok_or_else(|| {
                RepositoryError::internal_with_context(
                    "Insert returned no row",
                    ErrorContext::new("create_author").with_entity("author"),
                )
            })
    }
}
