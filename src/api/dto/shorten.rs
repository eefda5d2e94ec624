//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as, skip_serializing_none};
use validator::Validate;

use crate::application::services::ShortenCommand;

/// Request to shorten a single URL.
///
/// Only presence checks happen here. Format rules for `url` and
/// `custom_code` are enforced by the link service.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten. `https://` is added when no scheme is given.
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,

    /// Optional custom short code. An empty string is treated as absent.
    #[serde(default)]
    pub custom_code: Option<String>,

    /// Optional lifetime in seconds. Accepts a number or a numeric string.
    /// Zero or negative values mean the link never expires.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl From<ShortenRequest> for ShortenCommand {
    fn from(request: ShortenRequest) -> Self {
        ShortenCommand {
            url: request.url,
            custom_code: request.custom_code.filter(|code| !code.is_empty()),
            ttl_seconds: request.expires_in,
        }
    }
}

/// Created short link.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expires_in_accepts_number_and_string() {
        let numeric: ShortenRequest =
            serde_json::from_value(json!({ "url": "example.com", "expires_in": 60 })).unwrap();
        let text: ShortenRequest =
            serde_json::from_value(json!({ "url": "example.com", "expires_in": "60" })).unwrap();

        assert_eq!(numeric.expires_in, Some(60));
        assert_eq!(text.expires_in, Some(60));
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let request: ShortenRequest =
            serde_json::from_value(json!({ "url": "example.com" })).unwrap();

        assert!(request.custom_code.is_none());
        assert!(request.expires_in.is_none());
    }

    #[test]
    fn test_empty_custom_code_becomes_none() {
        let request: ShortenRequest =
            serde_json::from_value(json!({ "url": "example.com", "custom_code": "" })).unwrap();

        let command = ShortenCommand::from(request);
        assert!(command.custom_code.is_none());
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let request: ShortenRequest = serde_json::from_value(json!({ "url": "" })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_omits_missing_expiry() {
        let response = ShortenResponse {
            short_url: "http://localhost:8080/abc".to_string(),
            short_code: "abc".to_string(),
            original_url: "https://example.com".to_string(),
            expires_at: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("expires_at").is_none());
        assert_eq!(value["short_code"], "abc");
    }
}
