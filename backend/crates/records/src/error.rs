//! Records Error Types
//!
//! Records-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::ValidationError;
use platform::ThrottleError;
use thiserror::Error;

/// Records result type alias
pub type RecordsResult<T> = Result<T, RecordsError>;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("Invalid business name: {0}")]
    InvalidBusinessName(#[from] ValidationError),

    #[error("years_back must be between 1 and 10, got {0}")]
    InvalidYearsBack(u32),

    /// The records source could not answer
    #[error("Records source unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Throttle(#[from] ThrottleError),
}

impl RecordsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordsError::InvalidBusinessName(_) | RecordsError::InvalidYearsBack(_) => {
                ErrorKind::Validation
            }
            RecordsError::Unavailable(_) => ErrorKind::ServiceUnavailable,
            RecordsError::Throttle(e) => e.kind(),
        }
    }
}

impl From<RecordsError> for AppError {
    fn from(err: RecordsError) -> Self {
        match err {
            RecordsError::Throttle(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(RecordsError::InvalidYearsBack(11).kind(), ErrorKind::Validation);
        assert_eq!(
            RecordsError::Unavailable("down".into()).kind(),
            ErrorKind::ServiceUnavailable
        );

        let app: AppError = RecordsError::InvalidYearsBack(0).into();
        assert_eq!(app.exit_code(), 65);
    }
}
