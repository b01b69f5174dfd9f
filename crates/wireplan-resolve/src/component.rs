//! Component arena and the resolved dependency graph

use std::collections::{HashMap, HashSet};

use wireplan_catalog::{MethodSpec, ParamSpec, TypePath};

use crate::containers::ContainerKind;

/// Index of a component in the graph arena
///
/// Ids are only meaningful against the graph that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

/// A resolved constructor or method argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// The argument is one component, passed directly
    Direct {
        /// Component supplying the argument
        target: ComponentId,
    },
    /// The argument is a deferred slot later populated with one component
    Provider {
        /// Component the slot will carry
        target: ComponentId,
    },
    /// The argument is a container of every assignable component
    Collection {
        /// Recognized container kind
        kind: ContainerKind,
        /// Element type the members were collected against
        element: TypePath,
        /// Members in discovery order; may be empty
        members: Vec<ComponentId>,
    },
}

/// One discovered component and everything later stages attach to it
#[derive(Debug, Clone)]
pub struct Component {
    /// Arena index
    pub id: ComponentId,
    /// Path of the component type
    pub path: TypePath,
    /// Qualifier: explicit, or the simple type name by default
    pub qualifier: String,
    /// Assignability closure: the component's own path plus its supertypes
    pub closure: HashSet<TypePath>,
    /// Designated constructor parameters, declaration order
    pub params: Vec<ParamSpec>,
    /// Injection-designated methods, declaration order
    pub methods: Vec<MethodSpec>,
    /// Resolved constructor dependencies, one per parameter
    pub dependencies: Vec<Dependency>,
    /// Resolved method dependencies, one list per injection method
    pub method_dependencies: Vec<Vec<Dependency>>,
    /// Transitive construction weight, written by the orderer
    pub weight: Option<u64>,
    /// Construction identifier, written by the allocator
    pub identifier: Option<String>,
}

/// Arena of discovered components plus the assignability index
///
/// The index maps every path in any component's closure to the components
/// assignable to it, in discovery order. All tie-breaks downstream lean on
/// that order being stable.
#[derive(Debug, Clone, Default)]
pub struct ComponentGraph {
    components: Vec<Component>,
    by_type: HashMap<TypePath, Vec<ComponentId>>,
}

impl ComponentGraph {
    /// Append a discovered component, indexing its closure
    pub(crate) fn insert(
        &mut self,
        path: TypePath,
        qualifier: String,
        closure: HashSet<TypePath>,
        params: Vec<ParamSpec>,
        methods: Vec<MethodSpec>,
    ) -> ComponentId {
        let id = ComponentId(self.components.len());
        for assignable in &closure {
            self.by_type.entry(assignable.clone()).or_default().push(id);
        }
        self.components.push(Component {
            id,
            path,
            qualifier,
            closure,
            params,
            methods,
            dependencies: Vec::new(),
            method_dependencies: Vec::new(),
            weight: None,
            identifier: None,
        });
        id
    }

    /// All components, discovery order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The component at `id`
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.0]
    }

    /// All ids, discovery order
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> {
        (0..self.components.len()).map(ComponentId)
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the graph has no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components whose closure contains `path`, discovery order
    pub fn assignable_to(&self, path: &TypePath) -> &[ComponentId] {
        self.by_type.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Components whose own path is exactly `path`, discovery order
    pub fn with_exact_path(&self, path: &TypePath) -> Vec<ComponentId> {
        self.assignable_to(path)
            .iter()
            .copied()
            .filter(|id| self.component(*id).path == *path)
            .collect()
    }

    pub(crate) fn set_dependencies(
        &mut self,
        id: ComponentId,
        dependencies: Vec<Dependency>,
        method_dependencies: Vec<Vec<Dependency>>,
    ) {
        let component = &mut self.components[id.0];
        component.dependencies = dependencies;
        component.method_dependencies = method_dependencies;
    }

    pub(crate) fn set_weight(&mut self, id: ComponentId, weight: u64) {
        self.components[id.0].weight = Some(weight);
    }

    pub(crate) fn set_identifier(&mut self, id: ComponentId, identifier: String) {
        self.components[id.0].identifier = Some(identifier);
    }
}
