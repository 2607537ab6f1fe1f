//! # LitLog Backend
//!
//! A small REST API for tracking authors, the books they wrote, and reviews
//! of those books.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Entity and create-input shapes shared by every layer
//! - [`db`]: Repository traits, SQLite and in-memory backends, services, seed data
//! - [`http`]: Axum-based HTTP server, request handlers and error mapping
//! - [`logging`]: `tracing` subscriber setup for the binaries
//!
//! Two binaries ship with the crate: `litlog-server` serves the API and
//! `litlog-seed` resets the store to a fixed sample dataset.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod logging;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
