//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. Rows live in `Vec`s in
//! insertion order, giving fast, deterministic, and isolated execution.
//! Foreign keys are checked the same way the SQLite backend enforces them.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::*;

/// In-memory local repository.
///
/// # Example
/// ```
/// use litlog::db::repositories::LocalRepository;
/// use litlog::db::repository::AuthorRepository;
/// use litlog::models::NewAuthor;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let repo = LocalRepository::new();
/// repo.create_author(&NewAuthor::new("Jane Doe", None)).await.unwrap();
/// assert_eq!(repo.author_count(), 1);
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    authors: Vec<Author>,
    books: Vec<Book>,
    reviews: Vec<Review>,

    // ID counters
    next_author_id: i64,
    next_book_id: i64,
    next_review_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            authors: Vec::new(),
            books: Vec::new(),
            reviews: Vec::new(),
            next_author_id: 1,
            next_book_id: 1,
            next_review_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalData {
    fn has_author(&self, author_id: AuthorId) -> bool {
        self.authors.iter().any(|a| a.id == author_id)
    }

    fn has_book(&self, book_id: BookId) -> bool {
        self.books.iter().any(|b| b.id == book_id)
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Get the number of authors stored.
    pub fn author_count(&self) -> usize {
        self.data.read().authors.len()
    }

    /// Get the number of books stored.
    pub fn book_count(&self) -> usize {
        self.data.read().books.len()
    }

    /// Get the number of reviews stored.
    pub fn review_count(&self) -> usize {
        self.data.read().reviews.len()
    }

    fn ensure_healthy(data: &LocalData, operation: &str) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "Local repository marked unhealthy",
                ErrorContext::new(operation),
            ))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorRepository for LocalRepository {
    async fn list_authors(&self) -> RepositoryResult<Vec<Author>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "list_authors")?;
        Ok(data.authors.clone())
    }

    async fn insert_authors(&self, authors: &[NewAuthor]) -> RepositoryResult<Vec<Author>> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "insert_authors")?;

        let mut stored = Vec::with_capacity(authors.len());
        for new_author in authors {
            let id = AuthorId(data.next_author_id);
            data.next_author_id += 1;
            let author = new_author.clone().into_author(id);
            data.authors.push(author.clone());
            stored.push(author);
        }
        Ok(stored)
    }

    async fn author_exists(&self, author_id: AuthorId) -> RepositoryResult<bool> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "author_exists")?;
        Ok(data.has_author(author_id))
    }
}

#[async_trait]
impl BookRepository for LocalRepository {
    async fn list_books(&self) -> RepositoryResult<Vec<Book>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "list_books")?;
        Ok(data.books.clone())
    }

    async fn insert_books(&self, books: &[NewBook]) -> RepositoryResult<Vec<Book>> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "insert_books")?;

        // Validate the whole batch first so a failure stores nothing.
        if let Some(dangling) = books.iter().find(|b| !data.has_author(b.author_id)) {
            return Err(RepositoryError::invalid_reference_with_context(
                "author_id",
                format!("author {} does not exist", dangling.author_id),
                ErrorContext::new("insert_books")
                    .with_entity("author")
                    .with_entity_id(dangling.author_id),
            ));
        }

        let mut stored = Vec::with_capacity(books.len());
        for new_book in books {
            let id = BookId(data.next_book_id);
            data.next_book_id += 1;
            let book = new_book.clone().into_book(id);
            data.books.push(book.clone());
            stored.push(book);
        }
        Ok(stored)
    }

    async fn book_exists(&self, book_id: BookId) -> RepositoryResult<bool> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "book_exists")?;
        Ok(data.has_book(book_id))
    }

    async fn books_by_author(&self, author_id: AuthorId) -> RepositoryResult<Vec<Book>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "books_by_author")?;
        Ok(data
            .books
            .iter()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReviewRepository for LocalRepository {
    async fn list_reviews(&self) -> RepositoryResult<Vec<Review>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "list_reviews")?;
        Ok(data.reviews.clone())
    }

    async fn insert_reviews(&self, reviews: &[NewReview]) -> RepositoryResult<Vec<Review>> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "insert_reviews")?;

        if let Some(dangling) = reviews.iter().find(|r| !data.has_book(r.book_id)) {
            return Err(RepositoryError::invalid_reference_with_context(
                "book_id",
                format!("book {} does not exist", dangling.book_id),
                ErrorContext::new("insert_reviews")
                    .with_entity("book")
                    .with_entity_id(dangling.book_id),
            ));
        }

        let mut stored = Vec::with_capacity(reviews.len());
        for new_review in reviews {
            let id = ReviewId(data.next_review_id);
            data.next_review_id += 1;
            let review = new_review.clone().into_review(id);
            data.reviews.push(review.clone());
            stored.push(review);
        }
        Ok(stored)
    }

    async fn reviews_by_book(&self, book_id: BookId) -> RepositoryResult<Vec<Review>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "reviews_by_book")?;
        Ok(data
            .reviews
            .iter()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MaintenanceRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn clear_all(&self) -> RepositoryResult<()> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "clear_all")?;
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
        Ok(())
    }
}
