//! Core domain entities representing the business data model.
//!
//! - [`ShortMapping`] - A short ID bound to an original URL

pub mod short_mapping;

pub use short_mapping::ShortMapping;
