//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Optional read-through cache for resolutions (Redis or no-op)
//! - [`persistence`] - PostgreSQL mapping store

pub mod cache;
pub mod persistence;
