//! Facade error types

use mirror_sdk::PlatformError;
use thiserror::Error;

/// Result type for facade operations
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Categorized failure of a reflective operation
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The member could not be made accessible
    #[error("Could not access '{signature}' from '{class}'; it is inaccessible")]
    Inaccessible {
        /// Pretty signature of the member
        signature: String,
        /// Qualified name of the declaring class
        class: String,
    },

    /// The arguments are not compatible with the declared parameters
    #[error(
        "Mismatched argument types for '{signature}' from '{class}'; provided=[{}], expected=[{}]",
        .provided.join(", "),
        .expected.join(", ")
    )]
    MismatchedArguments {
        /// Pretty signature of the member
        signature: String,
        /// Qualified name of the declaring class
        class: String,
        /// Declared parameter type names
        expected: Vec<String>,
        /// Supplied argument values
        provided: Vec<String>,
    },

    /// The platform call failed, or the receiver did not fit the member
    #[error("Could not invoke '{signature}' from '{class}': {reason}")]
    Invocation {
        /// Pretty signature of the member
        signature: String,
        /// Qualified name of the declaring class
        class: String,
        /// What went wrong
        reason: String,
        /// The platform failure, if the platform was reached
        #[source]
        cause: Option<PlatformError>,
    },

    /// The API was used against its contract
    #[error("Invalid usage: {0}")]
    InvalidUsage(String),

    /// Metadata could not be read
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl MirrorError {
    /// The platform failure behind an invocation error
    pub fn cause(&self) -> Option<&PlatformError> {
        match self {
            MirrorError::Invocation { cause, .. } => cause.as_ref(),
            MirrorError::Platform(err) => Some(err),
            _ => None,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or has unknown values
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
