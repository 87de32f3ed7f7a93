//! DTOs for the short link generation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortMapping;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    /// The original URL. A missing field deserializes to an empty string so
    /// that it is reported as a validation error rather than a body error.
    #[serde(default)]
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,
}

/// Created short link.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    #[serde(rename = "originalURL")]
    pub original_url: String,
    #[serde(rename = "shortURL")]
    pub short_url: String,
    #[serde(rename = "shortID")]
    pub short_id: String,
}

impl GenerateResponse {
    pub fn new(mapping: ShortMapping, short_url: String) -> Self {
        Self {
            original_url: mapping.original_url,
            short_url,
            short_id: mapping.short_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_response_field_names() {
        let mapping = ShortMapping::new(
            "1234567".to_string(),
            "https://www.google.com".to_string(),
            Utc::now(),
        );
        let response = GenerateResponse::new(mapping, "http://s.test/s/1234567".to_string());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["originalURL"], "https://www.google.com");
        assert_eq!(json["shortURL"], "http://s.test/s/1234567");
        assert_eq!(json["shortID"], "1234567");
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let request: GenerateRequest = serde_json::from_str(r#"{"url": ""}"#).unwrap();
        assert!(request.validate().is_err());

        let request: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());
    }
}
