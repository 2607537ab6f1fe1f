//! Repository trait for books.

use async_trait::async_trait;

use super::error::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{AuthorId, Book, BookId, NewBook};

/// Storage operations for [`Book`] rows.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// List every book in insertion order.
    async fn list_books(&self) -> RepositoryResult<Vec<Book>>;

    /// Insert a batch of books in a single commit.
    ///
    /// # Returns
    /// * `Ok(Vec<Book>)` - The stored books, in input order, with assigned IDs
    /// * `Err(RepositoryError::InvalidReference)` - If any `author_id` does not exist
    /// * `Err(RepositoryError)` - If the operation fails; nothing is stored
    async fn insert_books(&self, books: &[NewBook]) -> RepositoryResult<Vec<Book>>;

    /// Check whether a book with this ID exists.
    async fn book_exists(&self, book_id: BookId) -> RepositoryResult<bool>;

    /// All books written by one author, in insertion order.
    async fn books_by_author(&self, author_id: AuthorId) -> RepositoryResult<Vec<Book>>;

    /// Insert one book and return it with its assigned ID.
    async fn create_book(&self, book: &NewBook) -> RepositoryResult<Book> {
        self.insert_books(std::slice::from_ref(book))
            .await?
            .pop()
            .ok_or_else(|| {
                RepositoryError::internal_with_context(
                    "Insert returned no row",
                    ErrorContext::new("create_book").with_entity("book"),
                )
            })
    }
}
