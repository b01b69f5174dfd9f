//! Pipeline driver from catalog to injection plan

use tracing::{debug, info};

use wireplan_catalog::TypeCatalog;

use crate::error::ResolveResult;
use crate::identifiers::IdentifierAllocator;
use crate::ordering::ConstructionOrderer;
use crate::plan::{InjectionPlan, InjectionPlanBuilder};
use crate::resolver::{DependencyResolver, ResolverConfig};
use crate::scanner::ComponentScanner;

/// Drives a full planning pass: scan, resolve, order, name, assemble
///
/// The pass is a single synchronous batch. Stages run in fixed sequence, the
/// first error aborts, and a plan only exists once every stage has succeeded.
#[derive(Debug, Default)]
pub struct WiringPlanner {
    config: ResolverConfig,
}

impl WiringPlanner {
    /// Planner with the default resolver configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Planner with the given resolver configuration
    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Run the full pass over `catalog`
    pub fn build_plan(&self, catalog: &dyn TypeCatalog) -> ResolveResult<InjectionPlan> {
        let mut graph = ComponentScanner::new().scan(catalog)?;
        info!("Discovered {} components", graph.len());

        DependencyResolver::with_config(self.config.clone()).resolve_graph(&mut graph)?;
        debug!("Classified every parameter of {} components", graph.len());

        let order = ConstructionOrderer::new().order(&mut graph)?;
        let identifiers = IdentifierAllocator::new().allocate(&mut graph, &order);
        let plan = InjectionPlanBuilder::new().build(&graph, &order, &identifiers);
        info!("Planned {} initialization instructions", plan.instructions.len());
        Ok(plan)
    }
}
