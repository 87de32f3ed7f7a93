//! Short ID generation.
//!
//! IDs are drawn uniformly from the 62-character alphanumeric alphabet. With
//! the default length of 7 that is roughly 3.5e12 possible values, so
//! collisions are treated as negligible rather than checked for.

use rand::{Rng, distr::Alphanumeric};

/// Default number of characters in a short ID.
pub const DEFAULT_ID_LENGTH: usize = 7;

/// ID returned by every call while test mode is enabled.
pub const TEST_MODE_ID: &str = "1234567";

/// Produces short IDs on demand.
///
/// In test mode every call returns [`TEST_MODE_ID`] so that creation and
/// resolution flows can be exercised end to end without mocking randomness.
#[derive(Debug, Clone, Copy)]
pub struct IdGenerator {
    length: usize,
    test_mode: bool,
}

impl IdGenerator {
    pub fn new(length: usize, test_mode: bool) -> Self {
        Self { length, test_mode }
    }

    /// Returns a new short ID of the configured length.
    pub fn generate(&self) -> String {
        if self.test_mode {
            return TEST_MODE_ID.to_string();
        }

        generate_id(self.length)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_LENGTH, false)
    }
}

/// Generates `length` characters from `[a-zA-Z0-9]` using the thread-local RNG.
pub fn generate_id(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true if `id` has the expected length and only alphanumeric ASCII.
pub fn is_well_formed(id: &str, length: usize) -> bool {
    id.len() == length && id.bytes().all(|b| b.is_ascii_alphanumeric())
}
