//! DTOs for the greeting endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct HelloQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub value: String,
    /// `"Online"` or `"Offline"`, depending on a storage ping.
    pub database: &'static str,
}
