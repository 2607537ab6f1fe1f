//! Demo data for manual testing.
//!
//! [`seed_data`] wipes the store and inserts a fixed set of three authors,
//! four books and three reviews. Each entity group is committed on its own so
//! later groups can reference the IDs assigned to earlier ones. Do not run it
//! against a store that is serving requests.

use serde::Serialize;
use tracing::info;

use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{NewAuthor, NewBook, NewReview};

/// `(name, bio)`
const AUTHORS: [(&str, &str); 3] = [
    (
        "J.K. Rowling",
        "British author, philanthropist, and film producer.",
    ),
    (
        "George Orwell",
        "English novelist and essayist, journalist and critic.",
    ),
    (
        "J.R.R. Tolkien",
        "English writer, poet, philologist, and academic.",
    ),
];

/// `(title, genre, publish_date, index into AUTHORS)`
const BOOKS: [(&str, &str, &str, usize); 4] = [
    ("Harry Potter and the Sorcerer's Stone", "Fantasy", "1997", 0),
    ("1984", "Dystopian", "1949", 1),
    ("The Hobbit", "Fantasy", "1937", 2),
    ("Animal Farm", "Satire", "1945", 1),
];

/// `(rating, content, index into BOOKS)`
const REVIEWS: [(i64, &str, usize); 3] = [
    (5, "Absolutely magical! Defined my childhood.", 0),
    (4, "Scary but important read.", 1),
    (5, "A classic adventure.", 2),
];

/// Row counts inserted by one seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub authors: usize,
    pub books: usize,
    pub reviews: usize,
}

/// Clear the store and repopulate it with the fixed demo dataset.
pub async fn seed_data<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<SeedSummary> {
    info!("Clearing old data...");
    repo.clear_all().await?;

    info!("Creating authors...");
    let new_authors: Vec<NewAuthor> = AUTHORS
        .iter()
        .map(|(name, bio)| NewAuthor::new(*name, Some(*bio)))
        .collect();
    let authors = repo.insert_authors(&new_authors).await?;

    info!("Creating books...");
    let new_books = BOOKS
        .iter()
        .map(|(title, genre, published, author_idx)| {
            let author = authors.get(*author_idx).ok_or_else(|| missing_row("author"))?;
            Ok(NewBook::new(*title, Some(*genre), Some(*published), author.id))
        })
        .collect::<RepositoryResult<Vec<_>>>()?;
    let books = repo.insert_books(&new_books).await?;

    info!("Creating reviews...");
    let new_reviews = REVIEWS
        .iter()
        .map(|(rating, content, book_idx)| {
            let book = books.get(*book_idx).ok_or_else(|| missing_row("book"))?;
            Ok(NewReview::new(*rating, *content, book.id))
        })
        .collect::<RepositoryResult<Vec<_>>>()?;
    let reviews = repo.insert_reviews(&new_reviews).await?;

    let summary = SeedSummary {
        authors: authors.len(),
        books: books.len(),
        reviews: reviews.len(),
    };
    info!(
        authors = summary.authors,
        books = summary.books,
        reviews = summary.reviews,
        "Done! Database populated."
    );
    Ok(summary)
}

fn missing_row(entity: &str) -> RepositoryError {
    RepositoryError::internal_with_context(
        "Insert returned fewer rows than requested",
        ErrorContext::new("seed_data").with_entity(entity),
    )
}
