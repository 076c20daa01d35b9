// src/error/types.rs
use crate::domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Domain(DomainError::Validation(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::Domain(DomainError::NotFound(message.into()))
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        AppError::Domain(DomainError::Duplicate(message.into()))
    }

    /// The domain failure carried by this error, if any
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Domain(err) => Some(err),
            _ => None,
        }
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_constructors() {
        assert_eq!(
            AppError::not_found("film 3 not found").domain(),
            Some(&DomainError::NotFound("film 3 not found".to_string()))
        );
        assert!(matches!(
            AppError::duplicate("email in use").domain(),
            Some(DomainError::Duplicate(_))
        ));
        assert!(AppError::Pool("exhausted".to_string()).domain().is_none());
    }

    #[test]
    fn test_io_errors_convert() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
