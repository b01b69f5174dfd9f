//! Error types for runtime support operations

use thiserror::Error;

/// Errors that can occur in generated wiring artifacts
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A provider box was populated a second time
    #[error("Provider box already populated")]
    AlreadyPopulated,

    /// A registration name was used twice
    #[error("Component already registered: {name}")]
    DuplicateName {
        /// The registration name
        name: String,
    },

    /// A lookup used a name the registry does not contain
    #[error("Component not registered: {name}")]
    UnknownComponent {
        /// The requested name
        name: String,
    },

    /// The registered instance is not of the requested type
    #[error("Component type mismatch for: {name}")]
    TypeMismatch {
        /// The requested name
        name: String,
    },
}

/// Result alias for runtime support operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
