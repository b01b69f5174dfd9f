#![warn(missing_docs)]

//! Wireplan Resolution Engine
//!
//! Single-pass resolution of a dependency-injection graph: catalog entries in,
//! deterministic injection plan out. A pass runs five stages in fixed order
//! (component discovery, parameter classification, cycle analysis and
//! construction ordering, identifier allocation, plan assembly) and the first
//! error aborts it.

pub mod component;
pub mod containers;
pub mod error;
pub mod identifiers;
pub mod ordering;
pub mod plan;
pub mod planner;
pub mod resolver;
pub mod scanner;

pub use component::{Component, ComponentGraph, ComponentId, Dependency};
pub use containers::{ConstructionIdiom, ContainerKind, ContainerTable};
pub use error::{ResolveError, ResolveResult};
pub use identifiers::{IdentifierAllocator, IdentifierMap};
pub use ordering::ConstructionOrderer;
pub use plan::{
    provider_box_id, ArgumentExpr, InjectionPlan, InjectionPlanBuilder, Instruction,
    PROVIDER_BOX_SUFFIX,
};
pub use planner::WiringPlanner;
pub use resolver::{DependencyResolver, ResolverConfig};
pub use scanner::ComponentScanner;
