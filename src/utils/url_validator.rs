//! URL normalization and validation of user input.
//!
//! Normalization only adds a missing scheme. Everything else is rejected
//! rather than rewritten.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

/// Allowed characters for caller-supplied codes.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

pub const DEFAULT_MAX_URL_LENGTH: usize = 2048;
pub const DEFAULT_MIN_CODE_LENGTH: usize = 3;
pub const DEFAULT_MAX_CODE_LENGTH: usize = 20;

/// Reasons a URL or custom code is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("value is too long: {actual} characters (maximum {max})")]
    TooLong { max: usize, actual: usize },

    #[error("value is too short: {actual} characters (minimum {min})")]
    TooShort { min: usize, actual: usize },

    #[error("invalid character '{character}'")]
    InvalidCharacter { character: char },

    #[error("malformed URL: {reason}")]
    Malformed { reason: String },
}

/// Validates target URLs and custom codes against configured limits.
#[derive(Debug, Clone, Copy)]
pub struct UrlValidator {
    max_url_length: usize,
    min_code_length: usize,
    max_code_length: usize,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_URL_LENGTH,
            DEFAULT_MIN_CODE_LENGTH,
            DEFAULT_MAX_CODE_LENGTH,
        )
    }
}

impl UrlValidator {
    pub fn new(max_url_length: usize, min_code_length: usize, max_code_length: usize) -> Self {
        Self {
            max_url_length,
            min_code_length,
            max_code_length,
        }
    }

    /// Checks a normalized URL.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::TooLong`] if longer than the configured maximum
    /// - [`ValidationError::Malformed`] if empty, unparseable, without a host,
    ///   or containing control characters
    pub fn validate_url(&self, url: &str) -> Result<(), ValidationError> {
        if url.trim().is_empty() {
            return Err(ValidationError::Malformed {
                reason: "URL is empty".to_string(),
            });
        }

        if url.len() > self.max_url_length {
            return Err(ValidationError::TooLong {
                max: self.max_url_length,
                actual: url.len(),
            });
        }

        // The parser silently drops tabs and newlines; the stored string would keep them.
        if let Some(character) = url.chars().find(|c| c.is_control()) {
            return Err(ValidationError::Malformed {
                reason: format!("URL contains control character {:?}", character),
            });
        }

        let parsed = Url::parse(url).map_err(|e| ValidationError::Malformed {
            reason: e.to_string(),
        })?;

        if parsed.cannot_be_a_base() || parsed.host_str().is_none_or(str::is_empty) {
            return Err(ValidationError::Malformed {
                reason: "URL has no host".to_string(),
            });
        }

        Ok(())
    }

    /// Checks a caller-supplied short code.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::TooShort`] / [`ValidationError::TooLong`] outside the length window
    /// - [`ValidationError::InvalidCharacter`] for anything outside `[A-Za-z0-9_-]`
    pub fn validate_custom_code(&self, code: &str) -> Result<(), ValidationError> {
        let length = code.chars().count();

        if length < self.min_code_length {
            return Err(ValidationError::TooShort {
                min: self.min_code_length,
                actual: length,
            });
        }

        if length > self.max_code_length {
            return Err(ValidationError::TooLong {
                max: self.max_code_length,
                actual: length,
            });
        }

        if !CUSTOM_CODE_REGEX.is_match(code) {
            let character = code
                .chars()
                .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
                .unwrap_or_default();
            return Err(ValidationError::InvalidCharacter { character });
        }

        Ok(())
    }
}

/// Prepends `https://` when the input has no `http://` or `https://` prefix.
///
/// The prefix check ignores ASCII case. Input that already carries a scheme
/// is returned unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("example.com"), "https://example.com");
/// assert_eq!(normalize("http://example.com"), "http://example.com");
/// ```
pub fn normalize(url: &str) -> String {
    if has_http_scheme(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn has_http_scheme(url: &str) -> bool {
    let starts_with = |prefix: &str| {
        url.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };

    starts_with("http://") || starts_with("https://")
}
