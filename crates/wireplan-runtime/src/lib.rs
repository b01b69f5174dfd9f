#![warn(missing_docs)]

//! Wireplan Runtime Support
//!
//! Types linked by generated wiring artifacts: the deferred provider box that
//! carries a component to consumers declared before it is constructed, and the
//! name-keyed registry the generated initializer fills and hands to callers.

pub mod error;
pub mod provider;
pub mod registry;

pub use error::{RuntimeError, RuntimeResult};
pub use provider::ProviderBox;
pub use registry::{Registry, RegistryBuilder};
