//! Repository trait for reviews.

use async_trait::async_trait;

use super::error::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{BookId, NewReview, Review};

/// Storage operations for [`Review`] rows.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// List every review in insertion order.
    async fn list_reviews(&self) -> RepositoryResult<Vec<Review>>;

    /// Insert a batch of reviews in a single commit.
    ///
    /// # Returns
    /// * `Ok(Vec<Review>)` - The stored reviews, in input order, with assigned IDs
    /// * `Err(RepositoryError::InvalidReference)` - If any `book_id` does not exist
    /// * `Err(RepositoryError)` - If the operation fails; nothing is stored
    async fn insert_reviews(&self, reviews: &[NewReview]) -> RepositoryResult<Vec<Review>>;

    /// All reviews of one book, in insertion order.
    async fn reviews_by_book(&self, book_id: BookId) -> RepositoryResult<Vec<Review>>;

    /// Insert one review and return it with its assigned ID.
    async fn create_review(&self, review: &NewReview) -> RepositoryResult<Review> {
        self.insert_reviews(std::slice::from_ref(review))
            .await?
            .pop()
            .ok_or_else(|| {
                RepositoryError::internal_with_context(
                    "Insert returned no row",
                    ErrorContext::new("create_review").with_entity("review"),
                )
            })
    }
}
