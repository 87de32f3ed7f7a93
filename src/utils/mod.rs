//! Utility functions shared across layers.
//!
//! - [`id_generator`] - Short ID generation
//! - [`url_validation`] - Original URL validation

pub mod id_generator;
pub mod url_validation;
