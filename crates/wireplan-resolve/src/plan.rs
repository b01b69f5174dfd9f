//! Injection plan data and the plan builder
//!
//! The plan is the artifact of a successful pass: a flat instruction list a
//! code emitter renders into host initialization source, plus the identifier
//! map and the container idiom table the emitter needs alongside it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use wireplan_catalog::TypePath;

use crate::component::{ComponentGraph, ComponentId, Dependency};
use crate::containers::{ConstructionIdiom, ContainerKind};
use crate::identifiers::IdentifierMap;

/// Suffix appended to a component identifier to name its provider box
pub const PROVIDER_BOX_SUFFIX: &str = "Provider";

/// How one argument position is filled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgumentExpr {
    /// The constructed component bound to this identifier
    Identifier(String),
    /// The provider box with this name
    ProviderBox(String),
    /// A container of previously constructed components
    Container {
        /// Recognized container kind
        kind: ContainerKind,
        /// Element type, for emitters whose idiom needs one
        element: TypePath,
        /// Member identifiers in discovery order
        items: Vec<String>,
    },
}

/// One step of generated initialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Allocate an empty provider box before any construction runs
    AllocateProviderBox {
        /// Box name: the target identifier plus the provider suffix
        box_id: String,
        /// Path of the component the box will carry
        component: TypePath,
    },
    /// Invoke a component constructor and bind the instance
    Construct {
        /// Identifier the instance is bound to
        identifier: String,
        /// Component type being constructed
        component: TypePath,
        /// Constructor arguments in declaration order
        arguments: Vec<ArgumentExpr>,
    },
    /// Populate the provider box of a just-constructed component
    PopulateProviderBox {
        /// Box name
        box_id: String,
        /// Identifier of the instance written into the box
        identifier: String,
    },
    /// Invoke an injection method on a constructed component
    InvokeMethod {
        /// Identifier of the receiver
        identifier: String,
        /// Method name
        method: String,
        /// Method arguments in declaration order
        arguments: Vec<ArgumentExpr>,
    },
    /// Register a constructed component in the runtime registry
    Register {
        /// Registration name
        name: String,
        /// Identifier of the registered instance
        identifier: String,
    },
}

/// Declarative initialization plan handed to the code emitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionPlan {
    /// Instructions in execution order
    pub instructions: Vec<Instruction>,
    /// Component paths with their identifiers, in construction order
    pub identifiers: Vec<(TypePath, String)>,
    /// Container construction idioms for the emitter
    pub idioms: Vec<(ContainerKind, ConstructionIdiom)>,
}

impl InjectionPlan {
    /// Identifiers of [`Instruction::Construct`] steps, in execution order
    pub fn construct_sequence(&self) -> Vec<&str> {
        self.instructions
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::Construct { identifier, .. } => Some(identifier.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Box name for a component identifier
pub fn provider_box_id(identifier: &str) -> String {
    format!("{}{}", identifier, PROVIDER_BOX_SUFFIX)
}

/// Assembles the four-phase initialization plan from a fully resolved graph
///
/// Phase order is what makes provider indirection sound: every box exists
/// before any constructor runs, every instance exists before any injection
/// method runs, and registration happens last. Buildable only after
/// resolution, ordering, and identifier allocation have all succeeded, so
/// assembly itself cannot fail.
#[derive(Debug, Default)]
pub struct InjectionPlanBuilder;

impl InjectionPlanBuilder {
    /// New builder
    pub fn new() -> Self {
        Self
    }

    /// Build the plan for `graph`, walking components in `order`
    pub fn build(
        &self,
        graph: &ComponentGraph,
        order: &[ComponentId],
        identifiers: &IdentifierMap,
    ) -> InjectionPlan {
        let provider_targets = provider_targets(graph);
        let mut instructions = Vec::new();

        // Phase 1: provider boxes, in construction order of their targets.
        for id in order {
            if provider_targets.contains(id) {
                instructions.push(Instruction::AllocateProviderBox {
                    box_id: provider_box_id(identifiers.get(*id)),
                    component: graph.component(*id).path.clone(),
                });
            }
        }

        // Phase 2: constructions, each provider target populating its box
        // immediately after its constructor runs.
        for id in order {
            let component = graph.component(*id);
            let identifier = identifiers.get(*id).to_string();
            instructions.push(Instruction::Construct {
                identifier: identifier.clone(),
                component: component.path.clone(),
                arguments: component
                    .dependencies
                    .iter()
                    .map(|dependency| argument(identifiers, dependency))
                    .collect(),
            });
            if provider_targets.contains(id) {
                instructions.push(Instruction::PopulateProviderBox {
                    box_id: provider_box_id(&identifier),
                    identifier,
                });
            }
        }

        // Phase 3: injection methods, declaration order per component.
        for id in order {
            let component = graph.component(*id);
            for (method, dependencies) in
                component.methods.iter().zip(&component.method_dependencies)
            {
                instructions.push(Instruction::InvokeMethod {
                    identifier: identifiers.get(*id).to_string(),
                    method: method.name.clone(),
                    arguments: dependencies
                        .iter()
                        .map(|dependency| argument(identifiers, dependency))
                        .collect(),
                });
            }
        }

        // Phase 4: registrations under the allocated identifiers.
        for id in order {
            instructions.push(Instruction::Register {
                name: identifiers.get(*id).to_string(),
                identifier: identifiers.get(*id).to_string(),
            });
        }

        InjectionPlan {
            instructions,
            identifiers: order
                .iter()
                .map(|id| (graph.component(*id).path.clone(), identifiers.get(*id).to_string()))
                .collect(),
            idioms: ContainerKind::ALL
                .iter()
                .map(|kind| (*kind, kind.idiom()))
                .collect(),
        }
    }
}

/// Components reached through a provider edge anywhere in the graph,
/// constructor and method positions both
fn provider_targets(graph: &ComponentGraph) -> HashSet<ComponentId> {
    let mut targets = HashSet::new();
    for component in graph.components() {
        let all_dependencies = component
            .dependencies
            .iter()
            .chain(component.method_dependencies.iter().flatten());
        for dependency in all_dependencies {
            if let Dependency::Provider { target } = dependency {
                targets.insert(*target);
            }
        }
    }
    targets
}

fn argument(identifiers: &IdentifierMap, dependency: &Dependency) -> ArgumentExpr {
    match dependency {
        Dependency::Direct { target } => {
            ArgumentExpr::Identifier(identifiers.get(*target).to_string())
        }
        Dependency::Provider { target } => {
            ArgumentExpr::ProviderBox(provider_box_id(identifiers.get(*target)))
        }
        Dependency::Collection {
            kind,
            element,
            members,
        } => ArgumentExpr::Container {
            kind: *kind,
            element: element.clone(),
            items: members
                .iter()
                .map(|member| identifiers.get(*member).to_string())
                .collect(),
        },
    }
}
