//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to process exit codes.

use serde::Serialize;

/// Error classification shared by every tool in the workspace
///
/// Each variant maps to a `sysexits.h` style exit code so the CLI can
/// report failures consistently regardless of which tool produced them.
///
/// ## Notes
/// * `non_exhaustive` - new kinds may be added without a breaking change
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Validation;
/// assert_eq!(kind.exit_code(), 65);
/// assert_eq!(kind.as_str(), "Validation Failed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Programmer supplied an unusable argument (zero capacity, empty window)
    InvalidArgument,
    /// User input failed validation (business name, search query, ...)
    Validation,
    /// Requested record does not exist
    NotFound,
    /// Credentials were rejected by an external service
    Unauthorized,
    /// Operation gave up waiting
    Timeout,
    /// Local or remote rate limit reached
    RateLimited,
    /// External service answered with an error or malformed payload
    Upstream,
    /// External service could not be reached
    ServiceUnavailable,
    /// Missing or malformed configuration
    Configuration,
    /// Bug or unexpected internal state
    Internal,
}

impl ErrorKind {
    /// Exit code for the process when an error of this kind aborts it
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::InvalidArgument.exit_code(), 64);
    /// assert_eq!(ErrorKind::Internal.exit_code(), 70);
    /// ```
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::InvalidArgument => 64,
            ErrorKind::Validation => 65,
            ErrorKind::NotFound => 66,
            ErrorKind::ServiceUnavailable | ErrorKind::Upstream => 69,
            ErrorKind::Internal => 70,
            ErrorKind::Timeout | ErrorKind::RateLimited => 75,
            ErrorKind::Unauthorized => 77,
            ErrorKind::Configuration => 78,
        }
    }

    /// Human readable label
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "Invalid Argument",
            ErrorKind::Validation => "Validation Failed",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::RateLimited => "Rate Limited",
            ErrorKind::Upstream => "Upstream Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
            ErrorKind::Configuration => "Configuration Error",
            ErrorKind::Internal => "Internal Error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorKind::InvalidArgument.exit_code(), 64);
        assert_eq!(ErrorKind::Validation.exit_code(), 65);
        assert_eq!(ErrorKind::NotFound.exit_code(), 66);
        assert_eq!(ErrorKind::Upstream.exit_code(), 69);
        assert_eq!(ErrorKind::ServiceUnavailable.exit_code(), 69);
        assert_eq!(ErrorKind::Internal.exit_code(), 70);
        assert_eq!(ErrorKind::Timeout.exit_code(), 75);
        assert_eq!(ErrorKind::RateLimited.exit_code(), 75);
        assert_eq!(ErrorKind::Unauthorized.exit_code(), 77);
        assert_eq!(ErrorKind::Configuration.exit_code(), 78);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorKind::RateLimited).unwrap();
        assert_eq!(json, "\"RATE_LIMITED\"");
    }
}
