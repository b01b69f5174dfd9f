#![warn(missing_docs)]

//! Wireplan Type Catalog
//!
//! Data model for the component types a host introspection facility reports to
//! the wiring planner: type identities, parameter shapes, constructor and
//! method records, and the catalog seam the planner enumerates.

pub mod catalog;
pub mod entry;
pub mod error;
pub mod types;

pub use catalog::{MemoryCatalog, TypeCatalog};
pub use entry::{ConstructorSpec, MethodSpec, ParamSpec, TypeEntry};
pub use error::CatalogError;
pub use types::{ParamShape, TypeArg, TypePath};
