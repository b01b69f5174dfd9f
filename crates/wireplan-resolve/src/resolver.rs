//! Parameter classification against the discovered graph

use tracing::debug;

use wireplan_catalog::{ParamShape, ParamSpec, TypeArg, TypePath};

use crate::component::{ComponentGraph, ComponentId, Dependency};
use crate::containers::{ContainerKind, ContainerTable};
use crate::error::{ResolveError, ResolveResult};

/// Settings for dependency classification
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Path recognized as the provider indirection wrapper
    pub provider_path: TypePath,
    /// Container recognition table, scanned most specific first
    pub containers: ContainerTable,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            provider_path: TypePath::new("inject.Provider"),
            containers: ContainerTable::default(),
        }
    }
}

impl ResolverConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different provider wrapper path
    pub fn with_provider_path(mut self, path: impl Into<TypePath>) -> Self {
        self.provider_path = path.into();
        self
    }

    /// Use a different container recognition table
    pub fn with_containers(mut self, containers: ContainerTable) -> Self {
        self.containers = containers;
        self
    }
}

/// Classifies every constructor and method parameter into a dependency
///
/// Classification tries, in order: array shapes, the provider wrapper, plain
/// type lookup against the assignability index, and the container table. A
/// parameter that matches none of them is a missing dependency.
pub struct DependencyResolver {
    config: ResolverConfig,
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyResolver {
    /// Resolver with default configuration
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    /// Resolver with the given configuration
    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolve every parameter of every component in `graph`
    ///
    /// Writes constructor and method dependency lists onto each component.
    /// The first classification failure aborts the pass.
    pub fn resolve_graph(&self, graph: &mut ComponentGraph) -> ResolveResult<()> {
        let ids: Vec<ComponentId> = graph.ids().collect();
        for id in ids {
            let params = graph.component(id).params.clone();
            let methods = graph.component(id).methods.clone();

            let dependencies = params
                .iter()
                .map(|param| self.resolve_param(graph, id, param))
                .collect::<ResolveResult<Vec<_>>>()?;
            let method_dependencies = methods
                .iter()
                .map(|method| {
                    method
                        .params
                        .iter()
                        .map(|param| self.resolve_param(graph, id, param))
                        .collect::<ResolveResult<Vec<_>>>()
                })
                .collect::<ResolveResult<Vec<_>>>()?;

            debug!(
                "Resolved {} constructor and {} method arguments for {}",
                dependencies.len(),
                method_dependencies.iter().map(Vec::len).sum::<usize>(),
                graph.component(id).path
            );
            graph.set_dependencies(id, dependencies, method_dependencies);
        }
        Ok(())
    }

    /// Classify one parameter of `owner`
    pub fn resolve_param(
        &self,
        graph: &ComponentGraph,
        owner: ComponentId,
        param: &ParamSpec,
    ) -> ResolveResult<Dependency> {
        let owner_path = &graph.component(owner).path;
        match &param.shape {
            ParamShape::Array { element } => Ok(Dependency::Collection {
                kind: ContainerKind::Array,
                element: element.clone(),
                members: graph.assignable_to(element).to_vec(),
            }),
            ParamShape::Declared { path, args } if *path == self.config.provider_path => {
                self.resolve_provider(graph, owner_path, param, args)
            }
            ParamShape::Declared { path, args } => {
                // Closure entries are erased paths, so a generic use can only
                // be satisfied through the container table.
                let candidates: &[ComponentId] = if args.is_empty() {
                    graph.assignable_to(path)
                } else {
                    &[]
                };
                if !candidates.is_empty() {
                    let required = param.shape.to_string();
                    let target =
                        disambiguate(graph, owner_path, param, candidates, &required)?;
                    return Ok(Dependency::Direct { target });
                }

                if let Some(kind) = self.config.containers.lookup(path) {
                    let arg = single_type_arg(owner_path, param, path, args)?;
                    let (element, members) =
                        member_candidates(graph, owner_path, param, arg)?;
                    return Ok(Dependency::Collection {
                        kind,
                        element,
                        members,
                    });
                }

                Err(ResolveError::MissingDependency {
                    component: owner_path.clone(),
                    parameter: param.name.clone(),
                    required: param.shape.to_string(),
                })
            }
        }
    }

    /// Resolve a provider-wrapped parameter to its single target
    fn resolve_provider(
        &self,
        graph: &ComponentGraph,
        owner_path: &TypePath,
        param: &ParamSpec,
        args: &[TypeArg],
    ) -> ResolveResult<Dependency> {
        let arg = single_type_arg(owner_path, param, &self.config.provider_path, args)?;
        let (_, candidates) = member_candidates(graph, owner_path, param, arg)?;
        if candidates.is_empty() {
            return Err(ResolveError::MissingDependency {
                component: owner_path.clone(),
                parameter: param.name.clone(),
                required: arg.to_string(),
            });
        }
        let target = disambiguate(graph, owner_path, param, &candidates, &arg.to_string())?;
        Ok(Dependency::Provider { target })
    }
}

/// Pick the single component for a parameter, applying its qualifier
///
/// The parameter's qualifier, when present, must leave exactly one survivor
/// even when only one candidate exists; anything else is ambiguous, reported
/// with the full pre-filter candidate list.
fn disambiguate(
    graph: &ComponentGraph,
    owner_path: &TypePath,
    param: &ParamSpec,
    candidates: &[ComponentId],
    required: &str,
) -> ResolveResult<ComponentId> {
    let survivors: Vec<ComponentId> = match &param.qualifier {
        Some(qualifier) => candidates
            .iter()
            .copied()
            .filter(|id| graph.component(*id).qualifier == *qualifier)
            .collect(),
        None => candidates.to_vec(),
    };
    if let [only] = survivors.as_slice() {
        return Ok(*only);
    }
    Err(ResolveError::AmbiguousDependency {
        component: owner_path.clone(),
        parameter: param.name.clone(),
        required: required.to_string(),
        candidates: candidates
            .iter()
            .map(|id| graph.component(*id).path.to_string())
            .collect(),
    })
}

/// Candidate members for a collection or provider type argument
///
/// Returns the element path the members were collected against together with
/// the assignable components, in discovery order. An empty result is valid
/// for collections and a missing dependency for providers; callers decide.
fn member_candidates(
    graph: &ComponentGraph,
    owner_path: &TypePath,
    param: &ParamSpec,
    arg: &TypeArg,
) -> ResolveResult<(TypePath, Vec<ComponentId>)> {
    match arg {
        TypeArg::Shape(ParamShape::Declared { path, args }) if args.is_empty() => {
            Ok((path.clone(), graph.assignable_to(path).to_vec()))
        }
        // Erased closures never contain a generic use.
        TypeArg::Shape(ParamShape::Declared { path, .. }) => Ok((path.clone(), Vec::new())),
        TypeArg::Shape(ParamShape::Array { .. }) => Err(unsupported(
            owner_path,
            param,
            "array type arguments are not supported",
        )),
        // Exact matches only: every component satisfies a lower bound, and
        // collecting them all would wire the whole graph into one argument.
        TypeArg::WildcardSuper(bound) => Ok((bound.clone(), graph.with_exact_path(bound))),
        TypeArg::WildcardExtends(bound) => Ok((bound.clone(), graph.assignable_to(bound).to_vec())),
        TypeArg::Wildcard => Err(unsupported(
            owner_path,
            param,
            "wildcard without a usable bound",
        )),
    }
}

/// Exactly one type argument, or the raw/arity errors
fn single_type_arg<'a>(
    owner_path: &TypePath,
    param: &ParamSpec,
    generic: &TypePath,
    args: &'a [TypeArg],
) -> ResolveResult<&'a TypeArg> {
    match args {
        [arg] => Ok(arg),
        [] => Err(unsupported(
            owner_path,
            param,
            format!("raw use of generic type {}", generic),
        )),
        _ => Err(unsupported(
            owner_path,
            param,
            format!(
                "expected 1 type argument for {}, found {}",
                generic,
                args.len()
            ),
        )),
    }
}

fn unsupported(owner_path: &TypePath, param: &ParamSpec, detail: impl Into<String>) -> ResolveError {
    ResolveError::UnsupportedType {
        component: owner_path.clone(),
        parameter: param.name.clone(),
        detail: detail.into(),
    }
}
