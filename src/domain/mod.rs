//! Domain layer containing business entities and logic.
//!
//! This module defines the short mapping entity, the storage contract it is
//! persisted through, and the background expiry sweep. It has no knowledge of
//! HTTP or of the concrete storage engine.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`reaper`] - Periodic removal of expired mappings
//!
//! # Mapping Lifecycle
//!
//! 1. A creation request receives a freshly generated short ID
//! 2. The mapping is written once with `last_modified = now`
//! 3. Resolution only sees mappings younger than the configured TTL
//! 4. [`reaper::run_reaper`] physically deletes mappings past their TTL

pub mod entities;
pub mod reaper;
pub mod repositories;
