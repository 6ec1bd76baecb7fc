//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// A worker running a rotation job panicked or was cancelled
    #[error("Rotation worker for '{file}' failed: {message}")]
    WorkerFailed { file: String, message: String },

    /// Extension pattern could not be compiled
    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern { pattern: String },

    /// Internal assertion failure
    #[error("Internal assertion failed: {message}")]
    Assertion { message: String },
}

impl InternalError {
    /// Create a worker failure error
    pub fn worker_failed(file: &str, message: impl Into<String>) -> Self {
        Self::WorkerFailed {
            file: file.to_string(),
            message: message.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
        }
    }

    /// Create an assertion error
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_failed_error() {
        let error = InternalError::worker_failed("sunset.jpg", "task panicked");
        assert!(error.to_string().contains("sunset.jpg"));
        assert!(error.to_string().contains("task panicked"));
    }

    #[test]
    fn test_invalid_pattern_error() {
        let error = InternalError::invalid_pattern("*.{png");
        assert!(error.to_string().contains("*.{png"));
    }
}
