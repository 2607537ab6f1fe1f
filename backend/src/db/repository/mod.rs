//! Repository trait definitions for database operations.
//!
//! Each entity has its own focused trait, plus one for store-wide
//! maintenance. Implementations provide all of them.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`authors`]: Author inserts and reads
//! - [`books`]: Book inserts and reads
//! - [`reviews`]: Review inserts and reads
//! - [`maintenance`]: Health checks and clearing the store
//!
//! # Convenience Trait Bound
//!
//! For functions that need all repository capabilities, use the [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     repo.clear_all().await?;
//!     repo.create_author(&NewAuthor::new("Jane Doe", None)).await?;
//!     Ok(())
//! }
//! ```

pub mod authors;
pub mod books;
pub mod error;
pub mod maintenance;
pub mod reviews;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use authors::AuthorRepository;
pub use books::BookRepository;
pub use maintenance::MaintenanceRepository;
pub use reviews::ReviewRepository;

/// Composite trait bound for a complete repository implementation.
///
/// This trait is automatically implemented for any type that implements
/// all four repository traits.
pub trait FullRepository:
    AuthorRepository + BookRepository + ReviewRepository + MaintenanceRepository
{
}

// Blanket implementation: any type implementing all four traits automatically implements FullRepository
impl<T> FullRepository for T where
    T: AuthorRepository + BookRepository + ReviewRepository + MaintenanceRepository
{
}
