//! Errors raised while defining classes

use mirror_sdk::ClassId;

/// Class definition errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DefineError {
    /// A class with this qualified name already exists
    #[error("Class already defined: {0}")]
    DuplicateClass(String),

    /// Class names must not be empty
    #[error("Class name must not be empty")]
    EmptyName,

    /// A referenced type is not registered
    #[error("Unknown type {ty} referenced by {context}")]
    UnknownType {
        /// The missing type
        ty: ClassId,
        /// What referenced it
        context: String,
    },

    /// The superclass cannot be extended
    #[error("Invalid superclass for {class}: {reason}")]
    InvalidSuperclass {
        /// Class being defined
        class: String,
        /// Why the superclass was rejected
        reason: String,
    },

    /// An implemented type is not an interface
    #[error("{class} cannot implement non-interface {interface}")]
    NotAnInterface {
        /// Class being defined
        class: String,
        /// The rejected type
        interface: ClassId,
    },
}
