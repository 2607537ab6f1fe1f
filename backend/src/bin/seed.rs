//! LitLog Seed Binary
//!
//! Wipes the configured store and fills it with the sample authors, books
//! and reviews. Uses the same repository resolution as `litlog-server`.
//!
//! ```bash
//! cargo run --bin litlog-seed
//! ```

use tracing::info;

use litlog::db::{seed_data, RepositoryFactory};
use litlog::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let repository = RepositoryFactory::resolve().await?;
    let summary = seed_data(repository.as_ref()).await?;

    info!(
        authors = summary.authors,
        books = summary.books,
        reviews = summary.reviews,
        "Seed complete"
    );
    Ok(())
}
