//! Core error types for TYPECAST.

use std::fmt;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Snapshot could not be read
    SourceRead {
        /// Identifier of the snapshot that failed
        source: String,
        /// Underlying failure
        reason: String,
    },

    /// Invalid configuration
    InvalidConfig {
        /// What was rejected
        reason: String,
    },

    /// Cancelled
    Cancelled,

    /// Internal error (for unexpected errors)
    Internal {
        /// Error message
        message: String,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceRead { source, reason } => {
                write!(f, "Failed to read {}: {}", source, reason)
            }
            Self::InvalidConfig { reason } => write!(f, "Invalid configuration: {}", reason),
            Self::Cancelled => write!(f, "Operation cancelled"),
            Self::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Cancelled;
        assert_eq!(format!("{}", err), "Operation cancelled");

        let err = CoreError::SourceRead {
            source: "demo.py".to_string(),
            reason: "No such file".to_string(),
        };
        assert_eq!(format!("{}", err), "Failed to read demo.py: No such file");
    }

    #[test]
    fn test_invalid_config_error() {
        let err = CoreError::InvalidConfig {
            reason: "indent_group must be at least 1".to_string(),
        };
        let s = format!("{}", err);
        assert!(s.contains("indent_group"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = CoreError::Cancelled;
        let err2 = CoreError::Cancelled;
        assert_eq!(err1, err2);

        let err3 = CoreError::Internal {
            message: "boom".to_string(),
        };
        assert_ne!(err1, err3);
    }
}
