//! Error types raised by the platform

use crate::types::ClassId;

/// Result type for platform calls
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Failures reported by the underlying reflection platform
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlatformError {
    /// The invoked code raised an exception
    #[error("{exception}: {message}")]
    Thrown {
        /// Qualified name of the raised exception type
        exception: String,
        /// Exception message
        message: String,
    },

    /// Visibility enforcement rejected the call
    #[error("Illegal access: {0}")]
    IllegalAccess(String),

    /// Receiver or arguments were rejected by the platform
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// The class cannot be instantiated (abstract, interface, primitive)
    #[error("Instantiation failed: {0}")]
    Instantiation(String),

    /// No class with this ID is known
    #[error("Unknown class: {0}")]
    UnknownClass(ClassId),

    /// The member handle does not resolve
    #[error("Unknown member: {0}")]
    UnknownMember(String),
}

impl PlatformError {
    /// Exception raised from inside invoked code
    pub fn thrown(exception: &str, message: impl Into<String>) -> Self {
        PlatformError::Thrown {
            exception: exception.to_string(),
            message: message.into(),
        }
    }
}
