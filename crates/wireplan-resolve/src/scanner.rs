//! Component discovery over catalog entries

use std::collections::HashSet;

use tracing::debug;

use wireplan_catalog::{ConstructorSpec, TypeCatalog, TypeEntry, TypePath};

use crate::component::ComponentGraph;
use crate::error::{ResolveError, ResolveResult};

/// Normalizes catalog entries into graph components
///
/// Scanning assigns each component its qualifier, selects the designated
/// constructor, collects injection methods, and builds the assignability
/// closure. No dependency resolution happens here; parameters are carried
/// through untouched.
#[derive(Debug, Default)]
pub struct ComponentScanner;

impl ComponentScanner {
    /// New scanner
    pub fn new() -> Self {
        Self
    }

    /// Scan `catalog` into a component graph, preserving discovery order
    pub fn scan(&self, catalog: &dyn TypeCatalog) -> ResolveResult<ComponentGraph> {
        let mut graph = ComponentGraph::default();
        for entry in catalog.enumerate() {
            self.scan_entry(&mut graph, entry)?;
        }
        Ok(graph)
    }

    fn scan_entry(&self, graph: &mut ComponentGraph, entry: TypeEntry) -> ResolveResult<()> {
        let constructor = designated_constructor(&entry)?;
        let qualifier = entry
            .qualifier
            .clone()
            .unwrap_or_else(|| entry.path.simple_name().to_string());
        let methods = entry
            .methods
            .iter()
            .filter(|method| method.inject)
            .cloned()
            .collect();

        let mut closure: HashSet<TypePath> = entry.supertypes.iter().cloned().collect();
        closure.insert(entry.path.clone());

        debug!("Discovered component {} as {:?}", entry.path, qualifier);
        graph.insert(entry.path, qualifier, closure, constructor.params, methods);
        Ok(())
    }
}

/// The constructor a component is built through
///
/// A sole constructor is used as-is; with several, exactly one must be
/// designated for injection.
fn designated_constructor(entry: &TypeEntry) -> ResolveResult<ConstructorSpec> {
    if entry.constructors.len() == 1 {
        return Ok(entry.constructors[0].clone());
    }
    let designated: Vec<&ConstructorSpec> = entry
        .constructors
        .iter()
        .filter(|constructor| constructor.designated)
        .collect();
    match designated.as_slice() {
        [constructor] => Ok((*constructor).clone()),
        _ => Err(ResolveError::InvalidConstructor {
            component: entry.path.clone(),
            designated: designated.len(),
            total: entry.constructors.len(),
        }),
    }
}
