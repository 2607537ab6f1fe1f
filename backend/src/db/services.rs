//! High-level database service layer.
//!
//! This module provides repository-agnostic operations that work with any
//! implementation of the repository traits. Business rules live here so they
//! behave the same regardless of the storage backend: a book or review is
//! only handed to storage after the entity it references has been found.
//!
//! # Usage
//!
//! ```no_run
//! use litlog::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!
//!     let authors = services::list_authors(&repo).await?;
//!     println!("Found {} authors", authors.len());
//!
//!     Ok(())
//! }
//! ```

use tracing::{info, warn};

use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{Author, Book, NewAuthor, NewBook, NewReview, Review};

// ==================== Health & Connection ====================

/// Check if the database connection is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Authors ====================

/// List all authors in storage order.
pub async fn list_authors<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Author>> {
    repo.list_authors().await
}

/// Store a new author and return it with its assigned ID.
pub async fn create_author<R: FullRepository + ?Sized>(
    repo: &R,
    author: &NewAuthor,
) -> RepositoryResult<Author> {
    let created = repo.create_author(author).await?;
    info!(author_id = %created.id, name = %created.name, "Created author");
    Ok(created)
}

// ==================== Books ====================

/// List all books in storage order.
pub async fn list_books<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Book>> {
    repo.list_books().await
}

/// Store a new book after confirming its author exists.
///
/// # Returns
/// * `Ok(Book)` - The stored book; its `author_id` equals the input
/// * `Err(RepositoryError::InvalidReference)` - If `author_id` names no author
/// * `Err(RepositoryError)` - If storage fails
pub async fn create_book<R: FullRepository + ?Sized>(
    repo: &R,
    book: &NewBook,
) -> RepositoryResult<Book> {
    if !repo.author_exists(book.author_id).await? {
        warn!(author_id = %book.author_id, "Rejected book with unknown author");
        return Err(RepositoryError::invalid_reference_with_context(
            "author_id",
            format!("author {} does not exist", book.author_id),
            ErrorContext::new("create_book")
                .with_entity("author")
                .with_entity_id(book.author_id),
        ));
    }

    let created = repo.create_book(book).await?;
    info!(book_id = %created.id, author_id = %created.author_id, "Created book");
    Ok(created)
}

// ==================== Reviews ====================

/// List all reviews in storage order.
pub async fn list_reviews<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Review>> {
    repo.list_reviews().await
}

/// Store a new review after confirming its book exists.
///
/// The rating is stored as given; no range is enforced.
pub async fn create_review<R: FullRepository + ?Sized>(
    repo: &R,
    review: &NewReview,
) -> RepositoryResult<Review> {
    if !repo.book_exists(review.book_id).await? {
        warn!(book_id = %review.book_id, "Rejected review with unknown book");
        return Err(RepositoryError::invalid_reference_with_context(
            "book_id",
            format!("book {} does not exist", review.book_id),
            ErrorContext::new("create_review")
                .with_entity("book")
                .with_entity_id(review.book_id),
        ));
    }

    let created = repo.create_review(review).await?;
    info!(review_id = %created.id, book_id = %created.book_id, "Created review");
    Ok(created)
}
