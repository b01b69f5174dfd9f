//! Cycle analysis and construction ordering

use tracing::debug;

use crate::component::{ComponentGraph, ComponentId, Dependency};
use crate::error::{ResolveError, ResolveResult};

/// Traversal state of one component while weighing the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Resolved(u64),
}

/// Computes transitive construction weights and the construction order
///
/// A component's weight counts everything that must exist before its
/// constructor can run: each direct target and each collection member
/// contributes one plus its own weight. Provider arguments contribute nothing,
/// since the deferred slot is populated after construction. Sorting by
/// ascending weight therefore places every non-provider dependency before its
/// dependent; equal weights keep discovery order.
///
/// Revisiting a component already on the traversal stack means its
/// constructor transitively requires itself, which no construction order can
/// satisfy.
#[derive(Debug, Default)]
pub struct ConstructionOrderer;

impl ConstructionOrderer {
    /// New orderer
    pub fn new() -> Self {
        Self
    }

    /// Weigh every component and return the ids in construction order
    ///
    /// Writes each component's weight onto the graph.
    pub fn order(&self, graph: &mut ComponentGraph) -> ResolveResult<Vec<ComponentId>> {
        let mut marks = vec![Mark::Unvisited; graph.len()];
        for id in graph.ids() {
            self.weigh(graph, id, &mut marks)?;
        }

        let mut weights = vec![0u64; graph.len()];
        for (idx, mark) in marks.iter().enumerate() {
            if let Mark::Resolved(weight) = mark {
                weights[idx] = *weight;
                graph.set_weight(ComponentId(idx), *weight);
            }
        }

        let mut order: Vec<ComponentId> = graph.ids().collect();
        order.sort_by_key(|id| weights[id.0]);
        debug!(
            "Construction order: {:?}",
            order
                .iter()
                .map(|id| graph.component(*id).path.to_string())
                .collect::<Vec<_>>()
        );
        Ok(order)
    }

    fn weigh(
        &self,
        graph: &ComponentGraph,
        id: ComponentId,
        marks: &mut [Mark],
    ) -> ResolveResult<u64> {
        match marks[id.0] {
            Mark::Resolved(weight) => return Ok(weight),
            Mark::InProgress => {
                return Err(ResolveError::CircularDependency {
                    component: graph.component(id).path.clone(),
                });
            }
            Mark::Unvisited => {}
        }
        marks[id.0] = Mark::InProgress;

        // Transitive counts double per diamond level and can exceed u64 on
        // deep ladder graphs; saturate instead of wrapping.
        let mut weight = 0u64;
        for dependency in &graph.component(id).dependencies {
            match dependency {
                Dependency::Direct { target } => {
                    weight = weight
                        .saturating_add(1)
                        .saturating_add(self.weigh(graph, *target, marks)?);
                }
                Dependency::Collection { members, .. } => {
                    for member in members {
                        weight = weight
                            .saturating_add(1)
                            .saturating_add(self.weigh(graph, *member, marks)?);
                    }
                }
                // Populated after construction, so no ordering constraint.
                Dependency::Provider { .. } => {}
            }
        }

        marks[id.0] = Mark::Resolved(weight);
        Ok(weight)
    }
}

#[cfg(test)]
mod tests {
    use wireplan_catalog::{MemoryCatalog, ParamSpec, TypeEntry, TypePath};

    use crate::resolver::DependencyResolver;
    use crate::scanner::ComponentScanner;

    use super::*;

    fn ordered(catalog: MemoryCatalog) -> ResolveResult<(ComponentGraph, Vec<ComponentId>)> {
        let mut graph = ComponentScanner::new().scan(&catalog)?;
        DependencyResolver::new().resolve_graph(&mut graph)?;
        let order = ConstructionOrderer::new().order(&mut graph)?;
        Ok((graph, order))
    }

    fn param(name: &str, shape: &str) -> ParamSpec {
        ParamSpec::parse(name, shape).unwrap()
    }

    fn paths(graph: &ComponentGraph, order: &[ComponentId]) -> Vec<String> {
        order
            .iter()
            .map(|id| graph.component(*id).path.to_string())
            .collect()
    }

    #[test]
    fn test_chain_weights_and_order() {
        let catalog = MemoryCatalog::new()
            .with_entry(
                TypeEntry::new("vehicle.Car")
                    .with_constructor(vec![param("engine", "vehicle.Engine")]),
            )
            .with_entry(
                TypeEntry::new("vehicle.Engine")
                    .with_constructor(vec![param("turbo", "vehicle.Turbocharger")]),
            )
            .with_entry(TypeEntry::new("vehicle.Turbocharger").with_constructor(vec![]));

        let (graph, order) = ordered(catalog).unwrap();
        assert_eq!(
            paths(&graph, &order),
            vec!["vehicle.Turbocharger", "vehicle.Engine", "vehicle.Car"]
        );

        let weight_of = |path: &str| {
            graph
                .components()
                .iter()
                .find(|c| c.path == TypePath::new(path))
                .and_then(|c| c.weight)
                .unwrap()
        };
        assert_eq!(weight_of("vehicle.Turbocharger"), 0);
        assert_eq!(weight_of("vehicle.Engine"), 1);
        assert_eq!(weight_of("vehicle.Car"), 2);
    }

    #[test]
    fn test_equal_weights_keep_discovery_order() {
        let catalog = MemoryCatalog::new()
            .with_entry(TypeEntry::new("vehicle.Wheel").with_constructor(vec![]))
            .with_entry(TypeEntry::new("vehicle.Mirror").with_constructor(vec![]))
            .with_entry(TypeEntry::new("vehicle.Horn").with_constructor(vec![]));

        let (graph, order) = ordered(catalog).unwrap();
        assert_eq!(
            paths(&graph, &order),
            vec!["vehicle.Wheel", "vehicle.Mirror", "vehicle.Horn"]
        );
    }

    #[test]
    fn test_collection_members_are_counted() {
        let catalog = MemoryCatalog::new()
            .with_entry(
                TypeEntry::new("vehicle.Bus")
                    .with_constructor(vec![param("seats", "util.List<? extends vehicle.Seat>")]),
            )
            .with_entry(
                TypeEntry::new("vehicle.DriversSeat")
                    .with_supertype("vehicle.Seat")
                    .with_constructor(vec![]),
            )
            .with_entry(
                TypeEntry::new("vehicle.PassengerSeat")
                    .with_supertype("vehicle.Seat")
                    .with_constructor(vec![]),
            );

        let (graph, order) = ordered(catalog).unwrap();
        assert_eq!(
            paths(&graph, &order),
            vec![
                "vehicle.DriversSeat",
                "vehicle.PassengerSeat",
                "vehicle.Bus"
            ]
        );
        let bus = graph
            .components()
            .iter()
            .find(|c| c.path == TypePath::new("vehicle.Bus"))
            .unwrap();
        assert_eq!(bus.weight, Some(2));
    }

    #[test]
    fn test_provider_edge_carries_no_weight_and_breaks_cycles() {
        let catalog = MemoryCatalog::new()
            .with_entry(
                TypeEntry::new("cycle.A")
                    .with_constructor(vec![param("b", "inject.Provider<cycle.B>")]),
            )
            .with_entry(
                TypeEntry::new("cycle.B").with_constructor(vec![param("a", "cycle.A")]),
            );

        let (graph, order) = ordered(catalog).unwrap();
        assert_eq!(paths(&graph, &order), vec!["cycle.A", "cycle.B"]);
        assert_eq!(graph.components()[0].weight, Some(0));
        assert_eq!(graph.components()[1].weight, Some(1));
    }

    #[test]
    fn test_direct_cycle_is_an_error() {
        let catalog = MemoryCatalog::new()
            .with_entry(TypeEntry::new("cycle.A").with_constructor(vec![param("b", "cycle.B")]))
            .with_entry(TypeEntry::new("cycle.B").with_constructor(vec![param("a", "cycle.A")]));

        let err = ordered(catalog).unwrap_err();
        assert!(matches!(err, ResolveError::CircularDependency { .. }));
    }

    #[test]
    fn test_self_dependency_is_an_error() {
        let catalog = MemoryCatalog::new()
            .with_entry(TypeEntry::new("cycle.A").with_constructor(vec![param("a", "cycle.A")]));

        let err = ordered(catalog).unwrap_err();
        match err {
            ResolveError::CircularDependency { component } => {
                assert_eq!(component, TypePath::new("cycle.A"));
            }
            other => panic!("expected CircularDependency, got {other:?}"),
        }
    }

    #[test]
    fn test_cycle_through_collection_membership_is_an_error() {
        let catalog = MemoryCatalog::new().with_entry(
            TypeEntry::new("cycle.Convoy")
                .with_supertype("cycle.Vehicle")
                .with_constructor(vec![param("members", "util.List<? extends cycle.Vehicle>")]),
        );

        let err = ordered(catalog).unwrap_err();
        assert!(matches!(err, ResolveError::CircularDependency { .. }));
    }

    #[test]
    fn test_deep_diamond_ladder_saturates_instead_of_overflowing() {
        // Each level doubles the transitive count of the join below it, so
        // seventy levels push the top joins past u64.
        let mut catalog =
            MemoryCatalog::new().with_entry(TypeEntry::new("ladder.Join0").with_constructor(vec![]));
        let levels = 70;
        for level in 1..=levels {
            let below = format!("ladder.Join{}", level - 1);
            catalog = catalog
                .with_entry(
                    TypeEntry::new(format!("ladder.Left{level}"))
                        .with_constructor(vec![param("below", &below)]),
                )
                .with_entry(
                    TypeEntry::new(format!("ladder.Right{level}"))
                        .with_constructor(vec![param("below", &below)]),
                )
                .with_entry(TypeEntry::new(format!("ladder.Join{level}")).with_constructor(vec![
                    param("left", &format!("ladder.Left{level}")),
                    param("right", &format!("ladder.Right{level}")),
                ]));
        }

        let (graph, order) = ordered(catalog).unwrap();
        assert_eq!(order.len(), graph.len());

        let weight_of = |path: String| {
            graph
                .components()
                .iter()
                .find(|c| c.path == TypePath::new(path.as_str()))
                .and_then(|c| c.weight)
                .unwrap()
        };
        assert_eq!(weight_of(format!("ladder.Join{levels}")), u64::MAX);
        assert!(weight_of("ladder.Join40".to_string()) < u64::MAX);
    }

    #[test]
    fn test_method_dependencies_do_not_constrain_order() {
        let catalog = MemoryCatalog::new()
            .with_entry(
                TypeEntry::new("pair.Left")
                    .with_constructor(vec![])
                    .with_inject_method("setRight", vec![param("right", "pair.Right")]),
            )
            .with_entry(
                TypeEntry::new("pair.Right")
                    .with_constructor(vec![])
                    .with_inject_method("setLeft", vec![param("left", "pair.Left")]),
            );

        let (graph, order) = ordered(catalog).unwrap();
        assert_eq!(paths(&graph, &order), vec!["pair.Left", "pair.Right"]);
    }
}
