//! HTTP server module for the LitLog backend.
//!
//! This module provides an axum-based HTTP server that exposes the catalog
//! as a REST API. It reuses the service layer and repository pattern from
//! the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Payload validation (ApiJson extractor)                │
//! │  - JSON serialization                                    │
//! │  - CORS, compression, error handling                     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (db/services.rs)                          │
//! │  - Reference checks before insert                        │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                  │
//! │  - LocalRepository / SqliteRepository                    │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use router::{create_router, create_router_with_config};
pub use state::AppState;
