//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Every
//! statement is wrapped in a deadline (see [`deadline`]).
//!
//! # Repositories
//!
//! - [`PgMappingRepository`] - Short mapping storage, expiry and index lifecycle

pub mod deadline;
pub mod pg_mapping_repository;

pub use deadline::with_deadline;
pub use pg_mapping_repository::PgMappingRepository;
