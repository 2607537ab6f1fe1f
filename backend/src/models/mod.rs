//! Domain model for the LitLog catalog.
//!
//! Stored entities ([`Author`], [`Book`], [`Review`]) carry their
//! storage-assigned identifier. The matching create inputs ([`NewAuthor`],
//! [`NewBook`], [`NewReview`]) have no identifier field at all, so a client
//! cannot influence id assignment.

pub mod catalog;
pub mod macros;

pub use catalog::*;
