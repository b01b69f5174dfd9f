//! Construction identifier allocation

use std::collections::HashSet;

use crate::component::{ComponentGraph, ComponentId};

/// One-to-one map from components to construction identifiers
///
/// Produced by [`IdentifierAllocator::allocate`] with an entry for every
/// component of the graph it was built from.
#[derive(Debug, Clone)]
pub struct IdentifierMap {
    names: Vec<String>,
}

impl IdentifierMap {
    /// Identifier allocated for `id`
    pub fn get(&self, id: ComponentId) -> &str {
        &self.names[id.0]
    }

    /// Number of allocated identifiers
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Allocates unique identifiers in construction order
///
/// The base identifier is the component's simple type name with its first
/// character lowercased; only the first character is touched. A collision
/// takes the first free numeric suffix, counted from 1.
#[derive(Debug, Default)]
pub struct IdentifierAllocator;

impl IdentifierAllocator {
    /// New allocator
    pub fn new() -> Self {
        Self
    }

    /// Allocate an identifier for every component, walking `order`
    ///
    /// `order` must list every component of `graph` exactly once. Writes each
    /// identifier onto its component and returns the whole map.
    pub fn allocate(&self, graph: &mut ComponentGraph, order: &[ComponentId]) -> IdentifierMap {
        let mut names = vec![String::new(); graph.len()];
        let mut taken: HashSet<String> = HashSet::new();
        for id in order {
            let base = base_identifier(graph.component(*id).path.simple_name());
            let name = if taken.insert(base.clone()) {
                base
            } else {
                let mut suffix = 1u64;
                loop {
                    let candidate = format!("{}{}", base, suffix);
                    if taken.insert(candidate.clone()) {
                        break candidate;
                    }
                    suffix += 1;
                }
            };
            graph.set_identifier(*id, name.clone());
            names[id.0] = name;
        }
        IdentifierMap { names }
    }
}

/// Simple name with its first character lowercased
fn base_identifier(simple_name: &str) -> String {
    let mut chars = simple_name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
