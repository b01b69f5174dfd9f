//! End-to-End Test Suite: Catalog Dumps Through Plan Construction to Runtime Wiring
//!
//! Loads a catalog dump the way host tooling hands one over, builds an
//! injection plan from it, and replays the plan's instruction stream against
//! the runtime crate exactly as generated initializer code would: allocate
//! provider boxes, construct, populate, invoke methods, register.

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use tempfile::TempDir;
use wireplan_catalog::MemoryCatalog;
use wireplan_resolve::{ArgumentExpr, InjectionPlan, Instruction, WiringPlanner};
use wireplan_runtime::{ProviderBox, Registry};

/// Catalog dump for a small service wiring: two leaf services, a user service
/// that hands out a provider of itself, and an event bus collecting listeners.
const CATALOG_DUMP: &str = r#"[
    { "path": "app.Database", "constructors": [{ "params": [] }] },
    { "path": "app.Cache", "constructors": [{ "params": [] }] },
    {
        "path": "app.UserService",
        "constructors": [
            {
                "designated": true,
                "params": [
                    { "name": "database", "shape": "app.Database" },
                    { "name": "cache", "shape": "app.Cache" },
                    { "name": "self", "shape": "inject.Provider<app.UserService>" }
                ]
            },
            { "params": [] }
        ]
    },
    {
        "path": "app.AuditService",
        "supertypes": ["app.Listener"],
        "constructors": [{ "params": [] }]
    },
    {
        "path": "app.MetricsService",
        "supertypes": ["app.Listener"],
        "constructors": [{ "params": [] }]
    },
    {
        "path": "app.EventBus",
        "constructors": [
            {
                "params": [
                    { "name": "listeners", "shape": "util.List<? extends app.Listener>" }
                ]
            }
        ],
        "methods": [
            {
                "name": "setUserService",
                "inject": true,
                "params": [{ "name": "service", "shape": "app.UserService" }]
            }
        ]
    }
]"#;

/// Stand-in for a constructed host object: which component it is and the
/// rendered argument list its constructor received
#[derive(Debug)]
struct ComponentInstance {
    component: String,
    arguments: Vec<String>,
}

type BoxMap = HashMap<String, Arc<ProviderBox<Arc<ComponentInstance>>>>;

/// Replay a plan the way generated initializer code executes it, asserting
/// the ordering contracts every instruction relies on
fn replay(plan: &InjectionPlan) -> (Registry, BoxMap) {
    let mut boxes: BoxMap = HashMap::new();
    let mut instances: HashMap<String, Arc<ComponentInstance>> = HashMap::new();
    let mut builder = Registry::builder();

    for instruction in &plan.instructions {
        match instruction {
            Instruction::AllocateProviderBox { box_id, .. } => {
                boxes.insert(box_id.clone(), Arc::new(ProviderBox::new()));
            }
            Instruction::Construct {
                identifier,
                component,
                arguments,
            } => {
                let rendered = arguments
                    .iter()
                    .map(|argument| render(argument, &instances, &boxes))
                    .collect();
                instances.insert(
                    identifier.clone(),
                    Arc::new(ComponentInstance {
                        component: component.to_string(),
                        arguments: rendered,
                    }),
                );
            }
            Instruction::PopulateProviderBox { box_id, identifier } => {
                let instance = instances
                    .get(identifier)
                    .expect("population should follow construction")
                    .clone();
                boxes
                    .get(box_id)
                    .expect("population should follow allocation")
                    .set(instance)
                    .expect("each box should be populated once");
            }
            Instruction::InvokeMethod {
                identifier,
                arguments,
                ..
            } => {
                assert!(
                    instances.contains_key(identifier),
                    "method receiver {identifier} should be constructed"
                );
                for argument in arguments {
                    render(argument, &instances, &boxes);
                }
            }
            Instruction::Register { name, identifier } => {
                let instance = instances
                    .get(identifier)
                    .expect("registration should follow construction")
                    .clone();
                builder = builder
                    .register(name, instance)
                    .expect("registration names should be unique");
            }
        }
    }
    (builder.build(), boxes)
}

/// Render one argument, asserting everything it refers to already exists
fn render(
    argument: &ArgumentExpr,
    instances: &HashMap<String, Arc<ComponentInstance>>,
    boxes: &BoxMap,
) -> String {
    match argument {
        ArgumentExpr::Identifier(name) => {
            assert!(
                instances.contains_key(name),
                "argument {name} should be constructed before use"
            );
            name.clone()
        }
        ArgumentExpr::ProviderBox(box_id) => {
            assert!(
                boxes.contains_key(box_id),
                "provider box {box_id} should be allocated before use"
            );
            box_id.clone()
        }
        ArgumentExpr::Container { items, .. } => {
            for item in items {
                assert!(
                    instances.contains_key(item),
                    "container member {item} should be constructed before use"
                );
            }
            format!("[{}]", items.join(", "))
        }
    }
}

#[test]
fn test_catalog_dump_to_registry_workflow() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let dump_path = temp_dir.path().join("catalog.json");
    fs::write(&dump_path, CATALOG_DUMP).expect("Failed to write catalog dump");

    let text = fs::read_to_string(&dump_path).expect("Failed to read catalog dump");
    let catalog = MemoryCatalog::from_json(&text).expect("Catalog dump should load");
    let plan = WiringPlanner::new()
        .build_plan(&catalog)
        .expect("Catalog should resolve");

    assert_eq!(
        plan.construct_sequence(),
        vec![
            "database",
            "cache",
            "auditService",
            "metricsService",
            "userService",
            "eventBus",
        ]
    );

    let (registry, _) = replay(&plan);
    assert_eq!(registry.len(), 6);

    let user_service = registry
        .get::<ComponentInstance>("userService")
        .expect("userService should be registered");
    assert_eq!(user_service.component, "app.UserService");
    assert_eq!(
        user_service.arguments,
        vec!["database", "cache", "userServiceProvider"]
    );

    let event_bus = registry
        .get::<ComponentInstance>("eventBus")
        .expect("eventBus should be registered");
    assert_eq!(event_bus.arguments, vec!["[auditService, metricsService]"]);

    for (_, identifier) in &plan.identifiers {
        assert!(
            registry.contains(identifier),
            "{identifier} should be registered"
        );
    }
}

#[test]
fn test_provider_box_holds_registered_instance_after_replay() {
    let catalog = MemoryCatalog::from_json(CATALOG_DUMP).expect("Catalog dump should load");
    let plan = WiringPlanner::new()
        .build_plan(&catalog)
        .expect("Catalog should resolve");

    let (registry, boxes) = replay(&plan);

    let slot = boxes
        .get("userServiceProvider")
        .expect("userService provider box should be allocated");
    let provided = slot.get().expect("box should be populated after replay");
    let registered = registry
        .get::<ComponentInstance>("userService")
        .expect("userService should be registered");
    assert!(Arc::ptr_eq(provided, &registered));
}

#[test]
fn test_plan_survives_handoff_through_a_json_file() {
    let catalog = MemoryCatalog::from_json(CATALOG_DUMP).expect("Catalog dump should load");
    let plan = WiringPlanner::new()
        .build_plan(&catalog)
        .expect("Catalog should resolve");

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let plan_path = temp_dir.path().join("plan.json");
    let text = serde_json::to_string_pretty(&plan).expect("Plan should serialize");
    fs::write(&plan_path, text).expect("Failed to write plan");

    let reloaded: InjectionPlan =
        serde_json::from_str(&fs::read_to_string(&plan_path).expect("Failed to read plan"))
            .expect("Plan should deserialize");
    assert_eq!(reloaded, plan);
}

#[test]
fn test_unresolvable_dump_reports_the_parameter() {
    let text = r#"[
        {
            "path": "app.UserService",
            "constructors": [
                { "params": [{ "name": "database", "shape": "app.Database" }] }
            ]
        }
    ]"#;

    let catalog = MemoryCatalog::from_json(text).expect("Catalog dump should load");
    let err = WiringPlanner::new()
        .build_plan(&catalog)
        .expect_err("missing dependency should fail resolution");
    let message = err.to_string();
    assert!(message.contains("app.UserService"));
    assert!(message.contains("database"));
    assert!(message.contains("app.Database"));
}
