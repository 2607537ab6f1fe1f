//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{extract::State, http::Uri, Json};

use super::dto::{
    Author, Book, HealthResponse, NewAuthor, NewBook, NewReview, Review, WelcomeResponse,
};
use super::error::AppError;
use super::extract::ApiJson;
use super::state::AppState;
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Root & Health
// =============================================================================

/// GET /
///
/// Static greeting; never touches storage.
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse::default())
}

/// GET /health
///
/// Health check endpoint to verify the service is running and database is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Authors
// =============================================================================

/// GET /authors
pub async fn list_authors(State(state): State<AppState>) -> HandlerResult<Vec<Author>> {
    let authors = db_services::list_authors(state.repository.as_ref()).await?;
    Ok(Json(authors))
}

/// POST /authors
pub async fn create_author(
    State(state): State<AppState>,
    ApiJson(author): ApiJson<NewAuthor>,
) -> HandlerResult<Author> {
    let created = db_services::create_author(state.repository.as_ref(), &author).await?;
    Ok(Json(created))
}

// =============================================================================
// Books
// =============================================================================

/// GET /books
pub async fn list_books(State(state): State<AppState>) -> HandlerResult<Vec<Book>> {
    let books = db_services::list_books(state.repository.as_ref()).await?;
    Ok(Json(books))
}

/// POST /books
///
/// Rejects an `author_id` that names no author with 422 `INVALID_REFERENCE`.
pub async fn create_book(
    State(state): State<AppState>,
    ApiJson(book): ApiJson<NewBook>,
) -> HandlerResult<Book> {
    let created = db_services::create_book(state.repository.as_ref(), &book).await?;
    Ok(Json(created))
}

// =============================================================================
// Reviews
// =============================================================================

/// GET /reviews
pub async fn list_reviews(State(state): State<AppState>) -> HandlerResult<Vec<Review>> {
    let reviews = db_services::list_reviews(state.repository.as_ref()).await?;
    Ok(Json(reviews))
}

/// POST /reviews
///
/// Rejects a `book_id` that names no book with 422 `INVALID_REFERENCE`.
pub async fn create_review(
    State(state): State<AppState>,
    ApiJson(review): ApiJson<NewReview>,
) -> HandlerResult<Review> {
    let created = db_services::create_review(state.repository.as_ref(), &review).await?;
    Ok(Json(created))
}

// =============================================================================
// Fallback
// =============================================================================

/// Any path without a route.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
