//! Data Transfer Objects for the HTTP API.
//!
//! Entities and create inputs already derive Serialize/Deserialize and are
//! re-exported from the models module; only endpoint-specific bodies are
//! defined here.

use serde::{Deserialize, Serialize};

pub use crate::models::{Author, Book, NewAuthor, NewBook, NewReview, Review};

/// Greeting served at `/`.
pub const WELCOME_MESSAGE: &str = "Welcome to the LitLog API";

/// Response body for `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

impl Default for WelcomeResponse {
    fn default() -> Self {
        Self {
            message: WELCOME_MESSAGE.to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Database connection status
    pub database: String,
}
