//! Store-wide operations that are not tied to one entity.

use async_trait::async_trait;

use super::error::RepositoryResult;

#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Check if the database connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Delete all reviews, then all books, then all authors, in one commit.
    async fn clear_all(&self) -> RepositoryResult<()>;
}
