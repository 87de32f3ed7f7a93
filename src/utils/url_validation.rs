//! Validation of user-supplied original URLs.
//!
//! The URL is stored exactly as supplied; parsing only decides whether it is
//! acceptable.

use serde_json::json;
use url::Url;

use crate::error::AppError;

/// Checks that `input` is a non-empty, absolute URL usable as a `Location`.
///
/// Control characters are rejected before parsing: `Url::parse` drops tab, CR
/// and LF silently, but the raw string is what gets stored and redirected to.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the input is blank, contains control
/// characters, or cannot be parsed.
pub fn validate_original_url(input: &str) -> Result<(), AppError> {
    if input.trim().is_empty() {
        return Err(AppError::bad_request(
            "URL must not be empty",
            json!({ "field": "url" }),
        ));
    }

    if input.chars().any(|c| c.is_ascii_control()) {
        return Err(AppError::bad_request(
            "URL must not contain control characters",
            json!({ "field": "url" }),
        ));
    }

    Url::parse(input).map_err(|e| {
        AppError::bad_request(
            "Invalid URL format",
            json!({ "field": "url", "value": input, "reason": e.to_string() }),
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_absolute_urls() {
        assert!(validate_original_url("https://www.google.com").is_ok());
        assert!(validate_original_url("http://example.com/path?q=1#frag").is_ok());
        assert!(validate_original_url("ftp://files.example.com/a.txt").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        let err = validate_original_url("").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("empty"));

        assert!(validate_original_url("   ").is_err());
    }

    #[test]
    fn test_rejects_unparseable() {
        let err = validate_original_url("not-a-url").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_rejects_control_characters() {
        for input in [
            "https://example.com/a\nb",
            "https://example.com/a\rb",
            "https://example.com/\tpath",
            "https://example.com/\u{7f}",
        ] {
            let err = validate_original_url(input).unwrap_err();
            assert!(matches!(err, AppError::Validation { .. }), "{input:?}");
            assert!(err.to_string().contains("control characters"));
        }
    }
}
