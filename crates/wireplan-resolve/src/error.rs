//! Error types for graph resolution

use thiserror::Error;

use wireplan_catalog::TypePath;

/// Errors that can occur during a resolution pass
///
/// Every variant names the component whose declaration caused the failure;
/// parameter-level variants name the parameter too.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A parameter demands a type no discovered component satisfies
    #[error("{component} parameter {parameter} requires a component of type {required} which does not exist")]
    MissingDependency {
        /// Component declaring the parameter
        component: TypePath,
        /// Parameter name
        parameter: String,
        /// Demanded type, in display form
        required: String,
    },

    /// Qualifier filtering left zero or several candidates for a parameter
    #[error("{component} parameter {parameter} has ambiguous candidates of type {required}: {candidates:?}")]
    AmbiguousDependency {
        /// Component declaring the parameter
        component: TypePath,
        /// Parameter name
        parameter: String,
        /// Demanded type, in display form
        required: String,
        /// Every candidate considered, before qualifier filtering
        candidates: Vec<String>,
    },

    /// A type does not designate exactly one constructor for injection
    #[error("{component} must designate exactly 1 of its {total} constructors for injection, found {designated}")]
    InvalidConstructor {
        /// Component with the invalid constructor set
        component: TypePath,
        /// Number of constructors designated for injection
        designated: usize,
        /// Total number of declared constructors
        total: usize,
    },

    /// A component depends on itself outside a provider indirection
    #[error("Circular dependency: {component} depends on itself, directly or indirectly")]
    CircularDependency {
        /// Component at which the cycle was detected
        component: TypePath,
    },

    /// A parameter uses a type shape the resolver does not support
    #[error("{component} parameter {parameter} has unsupported type: {detail}")]
    UnsupportedType {
        /// Component declaring the parameter
        component: TypePath,
        /// Parameter name
        parameter: String,
        /// What made the shape unsupported
        detail: String,
    },
}

/// Result alias for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;
