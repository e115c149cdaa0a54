//! Application error types

use thiserror::Error;

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Errors that can occur outside the engine
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error (terminal or files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (config or tape) error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging could not be initialized
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },
}

impl AppError {
    /// Create a logging setup error
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_error() {
        let err = AppError::logging("subscriber already set");
        assert_eq!(
            err.to_string(),
            "Logging setup failed: subscriber already set"
        );
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: AppError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
