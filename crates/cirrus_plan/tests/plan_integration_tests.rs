//! Integration tests for deployment plan building.

use chrono::NaiveDate;

use cirrus_config::{Environment, SettingsCatalog};
use cirrus_naming::{NameResolver, ResourceKind, TagContext};
use cirrus_plan::{DeploymentPlan, PlanBuilder};

fn build(environment: Environment) -> DeploymentPlan {
    let catalog = SettingsCatalog::builtin().unwrap();
    let context = TagContext::new(
        "platform",
        format!("platform-{environment}"),
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    )
    .with_owner("platform-team")
    .with_cost_center("cc-1234");

    PlanBuilder::new(&catalog, &context)
        .build(environment)
        .unwrap()
}

#[test]
fn test_plans_build_for_every_environment() {
    for environment in Environment::all() {
        let plan = build(environment);
        assert_eq!(plan.environment, environment);
        assert_eq!(plan.location, "westus2");
        assert!(plan.len() > 10, "{environment}: {} resources", plan.len());
    }
}

#[test]
fn test_plan_is_deterministic() {
    let first = build(Environment::Staging);
    let second = build(Environment::Staging);
    assert_eq!(first, second);
}

#[test]
fn test_resource_group_purposes_survive_composition() {
    let plan = build(Environment::Dev);
    let groups = plan.resources_of_kind(ResourceKind::ResourceGroup);

    let app = groups.iter().find(|r| r.name == "rg-app-dev").unwrap();
    assert_eq!(app.tags.get("Purpose"), Some("Application Resources"));
    assert_eq!(app.tags.get("Owner"), Some("platform-team"));
    assert_eq!(app.tags.get("CostCenter"), Some("cc-1234"));
}

#[test]
fn test_feature_resources_match_environment_flags() {
    let prod = build(Environment::Prod);
    let dev = build(Environment::Dev);

    // CDN is a staging/prod concern, Cosmos a dev experiment
    assert_eq!(prod.resources_of_kind(ResourceKind::CdnProfile).len(), 1);
    assert_eq!(prod.resources_of_kind(ResourceKind::CosmosAccount).len(), 0);
    assert_eq!(dev.resources_of_kind(ResourceKind::CdnProfile).len(), 0);
    assert_eq!(dev.resources_of_kind(ResourceKind::CosmosAccount).len(), 1);
}

#[test]
fn test_every_name_in_every_plan_is_valid() {
    let resolver = NameResolver::new();
    for environment in Environment::all() {
        let plan = build(environment);
        for resource in &plan.resources {
            resolver
                .validate(resource.kind, &resource.name)
                .unwrap_or_else(|e| panic!("{}: {e}", resource.name));
        }
    }
}

#[test]
fn test_plan_serializes_to_json_and_yaml() {
    let plan = build(Environment::Qa);

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["environment"], "qa");
    assert_eq!(json["location"], "westus2");
    assert!(json["resources"].as_array().unwrap().len() == plan.len());

    let yaml = serde_yaml::to_string(&plan).unwrap();
    assert!(yaml.contains("environment: qa"));
    assert!(yaml.contains("rg-app-qa"));
}

#[test]
fn test_subnet_properties_follow_settings() {
    let plan = build(Environment::Prod);
    let subnets = plan.resources_of_kind(ResourceKind::Subnet);

    let data = subnets
        .iter()
        .find(|r| r.name == "snet-data-prod")
        .unwrap();
    assert_eq!(
        data.properties.get("addressPrefix").map(String::as_str),
        Some("10.2.3.0/24")
    );
    assert_eq!(
        data.properties
            .get("privateEndpointNetworkPolicies")
            .map(String::as_str),
        Some("Disabled")
    );
}
