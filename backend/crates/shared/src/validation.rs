//! Input Validation
//!
//! Value objects and helpers that sanitize user supplied input before it
//! reaches an external service or a cache key.
//!
//! ## Processing order
//! - NFKC normalization
//! - Length check (Unicode code points, before trimming)
//! - HTML special characters dropped, surrounding whitespace trimmed
//! - Shape check specific to the value object

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::error::app_error::AppError;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length of a business name (in characters)
pub const BUSINESS_NAME_MAX_LENGTH: usize = 100;

/// Maximum length of a search query (in characters)
pub const SEARCH_QUERY_MAX_LENGTH: usize = 500;

/// Default maximum length used by [`sanitize`] callers without a stricter bound
pub const DEFAULT_MAX_LENGTH: usize = 255;

/// Characters that could open markup or an entity
const HTML_SPECIAL_CHARS: &[char] = &['&', '<', '>', '"', '\''];

/// Punctuation accepted inside a business name besides letters, digits and `_`
const BUSINESS_NAME_PUNCTUATION: &[char] = &['-', '\'', '&', ',', '.', '(', ')'];

/// Characters removed from search queries
const SEARCH_QUERY_STRIPPED: &[char] = &['<', '>', '{', '}', '[', ']', '\\'];

// ============================================================================
// Error Types
// ============================================================================

/// Input validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Input exceeds maximum length of {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Input cannot be empty")]
    Empty,

    #[error("Business name contains invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Phone number must be 10 digits (or 11 with country code), got {digits}")]
    InvalidPhoneNumber { digits: usize },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let message = err.to_string();
        AppError::validation(message).with_source(err)
    }
}

// ============================================================================
// Sanitization
// ============================================================================

/// Sanitize free text input
///
/// Rejects input longer than `max_length` characters, trims surrounding
/// whitespace and drops characters that would form HTML markup or entities.
pub fn sanitize(input: &str, max_length: usize) -> Result<String, ValidationError> {
    let normalized: String = input.nfkc().collect();

    let actual = normalized.chars().count();
    if actual > max_length {
        return Err(ValidationError::TooLong {
            max: max_length,
            actual,
        });
    }

    Ok(normalized
        .trim()
        .chars()
        .filter(|c| !HTML_SPECIAL_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string())
}

// ============================================================================
// BusinessName Value Object
// ============================================================================

/// Validated business name
///
/// # Invariants
/// - Non-empty after sanitization
/// - At most [`BUSINESS_NAME_MAX_LENGTH`] characters
/// - Only letters, digits, `_`, whitespace and `- ' & , . ( )`
///
/// The original casing is kept for display; [`BusinessName::canonical`]
/// gives the lowercase form used in cache keys.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BusinessName(String);

impl BusinessName {
    pub fn parse(input: impl AsRef<str>) -> Result<Self, ValidationError> {
        let sanitized = sanitize(input.as_ref(), BUSINESS_NAME_MAX_LENGTH)?;
        if sanitized.is_empty() {
            return Err(ValidationError::Empty);
        }

        if let Some(bad) = sanitized.chars().find(|c| !is_business_name_char(*c)) {
            return Err(ValidationError::InvalidCharacter(bad));
        }

        Ok(Self(sanitized))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form, for cache keys and comparisons
    pub fn canonical(&self) -> String {
        self.0.to_lowercase()
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_business_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace() || BUSINESS_NAME_PUNCTUATION.contains(&c)
}

impl fmt::Debug for BusinessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BusinessName").field(&self.0).finish()
    }
}

impl fmt::Display for BusinessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BusinessName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<BusinessName> for String {
    fn from(name: BusinessName) -> Self {
        name.0
    }
}

impl AsRef<str> for BusinessName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SearchQuery Value Object
// ============================================================================

/// Validated web search query
///
/// # Invariants
/// - Non-empty after sanitization
/// - At most [`SEARCH_QUERY_MAX_LENGTH`] characters before stripping
/// - No `< > { } [ ] \` characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(input: impl AsRef<str>) -> Result<Self, ValidationError> {
        let sanitized = sanitize(input.as_ref(), SEARCH_QUERY_MAX_LENGTH)?;
        let stripped: String = sanitized
            .chars()
            .filter(|c| !SEARCH_QUERY_STRIPPED.contains(c))
            .collect();
        let query = stripped.trim();
        if query.is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(Self(query.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Contact details
// ============================================================================

/// Validate an absolute http(s) URL
pub fn validate_url(url: &str) -> Result<&str, ValidationError> {
    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| ValidationError::InvalidUrl("missing scheme".to_string()))?;

    if scheme != "http" && scheme != "https" {
        return Err(ValidationError::InvalidUrl(
            "only http and https URLs are allowed".to_string(),
        ));
    }

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidUrl("missing host".to_string()));
    }

    Ok(url)
}

/// Validate an email address (`local@domain.tld`)
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    let (local, domain) = email.split_once('@').ok_or(ValidationError::InvalidEmail)?;

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));

    let domain_ok = match domain.rsplit_once('.') {
        Some((name, tld)) => {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
                && tld.len() >= 2
                && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    };

    if local_ok && domain_ok {
        Ok(email.to_string())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Validate a US phone number and return its digits
pub fn validate_phone_number(phone: &str) -> Result<String, ValidationError> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 | 11 => Ok(digits),
        n => Err(ValidationError::InvalidPhoneNumber { digits: n }),
    }
}
