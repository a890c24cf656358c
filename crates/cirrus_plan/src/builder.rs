//! Deployment plan assembly.
//!
//! The builder resolves an environment's settings once, then walks the
//! platform layout in provisioning order: resource groups, networking,
//! security, monitoring, storage, and finally the feature-gated
//! resources. Names and tags for every entry come from the naming
//! conventions, so a plan that builds is a plan whose identifiers are
//! all valid.

use std::collections::BTreeMap;

use tracing::debug;

use cirrus_config::{Environment, EnvironmentSettings, Feature, SettingsCatalog};
use cirrus_naming::{compose_tags, region_code, NameRequest, NameResolver, ResourceKind, TagContext};

use crate::error::PlanResult;
use crate::plan::{DeploymentPlan, PlannedResource};

/// Standard resource groups and their purpose tags.
const RESOURCE_GROUPS: [(&str, &str); 5] = [
    ("app", "Application Resources"),
    ("network", "Networking Resources"),
    ("security", "Security Resources"),
    ("monitoring", "Monitoring and Observability"),
    ("data", "Data and Storage Resources"),
];

/// Subnet tiers that get their own network security group.
const NSG_TIERS: [&str; 3] = ["web", "app", "data"];

/// Service endpoints enabled per subnet tier.
fn tier_service_endpoints(tier: &str) -> &'static [&'static str] {
    match tier {
        "gateway" => &["Microsoft.KeyVault"],
        "web" => &["Microsoft.KeyVault", "Microsoft.Storage"],
        "app" => &["Microsoft.KeyVault", "Microsoft.Storage", "Microsoft.Sql"],
        "data" => &["Microsoft.KeyVault", "Microsoft.Storage"],
        "management" => &["Microsoft.KeyVault"],
        _ => &[],
    }
}

/// Builds deployment plans from resolved settings.
pub struct PlanBuilder<'a> {
    catalog: &'a SettingsCatalog,
    context: &'a TagContext,
    resolver: NameResolver,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(catalog: &'a SettingsCatalog, context: &'a TagContext) -> Self {
        Self {
            catalog,
            context,
            resolver: NameResolver::new(),
        }
    }

    /// Assemble the full plan for one environment.
    pub fn build(&self, environment: Environment) -> PlanResult<DeploymentPlan> {
        let settings = self.catalog.resolve(environment)?;
        debug!(%environment, location = %settings.location, "building deployment plan");

        let mut plan = DeploymentPlan::new(
            environment,
            settings.location.clone(),
            settings.features.enabled(),
        );

        self.add_resource_groups(&mut plan, settings)?;
        self.add_networking(&mut plan, settings)?;
        self.add_security(&mut plan, settings)?;
        self.add_monitoring(&mut plan, settings)?;
        self.add_storage(&mut plan, settings)?;
        self.add_feature_resources(&mut plan, settings)?;

        debug!(resources = plan.len(), "deployment plan ready");
        Ok(plan)
    }

    fn name(&self, kind: ResourceKind, base: &str, settings: &EnvironmentSettings) -> PlanResult<String> {
        Ok(self
            .resolver
            .resolve(&NameRequest::new(kind, base, settings.environment))?)
    }

    fn tags(
        &self,
        settings: &EnvironmentSettings,
        component: &str,
        overrides: Option<&BTreeMap<String, String>>,
    ) -> PlanResult<cirrus_naming::Tags> {
        Ok(compose_tags(
            self.context,
            settings.environment,
            component,
            overrides,
        )?)
    }

    fn add_resource_groups(
        &self,
        plan: &mut DeploymentPlan,
        settings: &EnvironmentSettings,
    ) -> PlanResult<()> {
        for (group, purpose) in RESOURCE_GROUPS {
            let mut overrides = BTreeMap::new();
            overrides.insert("Purpose".to_string(), purpose.to_string());

            let name = self.name(ResourceKind::ResourceGroup, group, settings)?;
            let tags = self.tags(settings, "core", Some(&overrides))?;
            plan.push(PlannedResource::new(
                ResourceKind::ResourceGroup,
                name,
                "core",
                tags,
            ));
        }
        Ok(())
    }

    fn add_networking(
        &self,
        plan: &mut DeploymentPlan,
        settings: &EnvironmentSettings,
    ) -> PlanResult<()> {
        let network = &settings.network;

        let vnet_name = self.name(ResourceKind::VirtualNetwork, "main", settings)?;
        let vnet = PlannedResource::new(
            ResourceKind::VirtualNetwork,
            vnet_name,
            "networking",
            self.tags(settings, "networking", None)?,
        )
        .with_property("addressSpace", network.address_space.to_string())
        .with_property("ddosProtection", network.enable_ddos_protection.to_string())
        .with_property("firewall", network.enable_firewall.to_string());
        plan.push(vnet);

        for (tier, prefix) in &network.subnets {
            let name = self.name(ResourceKind::Subnet, tier, settings)?;
            let mut subnet = PlannedResource::new(
                ResourceKind::Subnet,
                name,
                "networking",
                self.tags(settings, "networking", None)?,
            )
            .with_property("addressPrefix", prefix.to_string());

            let endpoints = tier_service_endpoints(tier);
            if !endpoints.is_empty() {
                subnet = subnet.with_property("serviceEndpoints", endpoints.join(","));
            }
            // Private endpoints land in the data tier, which needs
            // network policies off for them to bind.
            if tier == "data" {
                subnet = subnet.with_property("privateEndpointNetworkPolicies", "Disabled");
            }
            plan.push(subnet);
        }

        for tier in NSG_TIERS {
            if !network.subnets.contains_key(tier) {
                continue;
            }
            let name = self.name(ResourceKind::NetworkSecurityGroup, tier, settings)?;
            plan.push(PlannedResource::new(
                ResourceKind::NetworkSecurityGroup,
                name,
                "networking",
                self.tags(settings, "networking", None)?,
            ));
        }

        Ok(())
    }

    fn add_security(
        &self,
        plan: &mut DeploymentPlan,
        settings: &EnvironmentSettings,
    ) -> PlanResult<()> {
        let security = &settings.security;

        let vault_name = self.name(ResourceKind::KeyVault, "main", settings)?;
        let vault = PlannedResource::new(
            ResourceKind::KeyVault,
            vault_name,
            "security",
            self.tags(settings, "security", None)?,
        )
        .with_property("purgeProtection", security.enable_purge_protection.to_string())
        .with_property(
            "softDeleteRetentionDays",
            security.soft_delete_retention_days.to_string(),
        )
        .with_property(
            "privateEndpoints",
            security.enable_private_endpoints.to_string(),
        )
        .with_property("rbacAuthorization", "true");
        plan.push(vault);

        for identity in ["app", "data"] {
            let name = self.name(ResourceKind::ManagedIdentity, identity, settings)?;
            plan.push(PlannedResource::new(
                ResourceKind::ManagedIdentity,
                name,
                "security",
                self.tags(settings, "security", None)?,
            ));
        }

        Ok(())
    }

    fn add_monitoring(
        &self,
        plan: &mut DeploymentPlan,
        settings: &EnvironmentSettings,
    ) -> PlanResult<()> {
        let monitoring = &settings.monitoring;

        // Production keeps at least 90 days regardless of the table.
        let retention = if settings.environment == Environment::Prod {
            monitoring.log_retention_days.max(90)
        } else {
            monitoring.log_retention_days
        };
        let quota = monitoring
            .daily_quota_gb
            .map(|gb| gb.to_string())
            .unwrap_or_else(|| "unlimited".to_string());

        let workspace_name = self.name(ResourceKind::LogAnalytics, "central", settings)?;
        let workspace = PlannedResource::new(
            ResourceKind::LogAnalytics,
            workspace_name.clone(),
            "monitoring",
            self.tags(settings, "monitoring", None)?,
        )
        .with_property("retentionDays", retention.to_string())
        .with_property("dailyQuotaGb", quota)
        .with_property(
            "diagnosticSettings",
            monitoring.enable_diagnostic_settings.to_string(),
        );
        plan.push(workspace);

        let insights_name = self.name(ResourceKind::AppInsights, "app", settings)?;
        let insights = PlannedResource::new(
            ResourceKind::AppInsights,
            insights_name,
            "monitoring",
            self.tags(settings, "monitoring", None)?,
        )
        .with_property("workspace", workspace_name);
        plan.push(insights);

        Ok(())
    }

    fn add_storage(
        &self,
        plan: &mut DeploymentPlan,
        settings: &EnvironmentSettings,
    ) -> PlanResult<()> {
        let code = region_code(&settings.location);

        let accounts: [(&str, &str, &str); 2] = [
            ("app", "Hot", "data,uploads,exports"),
            ("logs", "Cool", "diagnostics,audit,flow-logs"),
        ];

        for (base, tier, containers) in accounts {
            let request = NameRequest::new(ResourceKind::StorageAccount, base, settings.environment)
                .with_region_code(&code);
            let name = self.resolver.resolve(&request)?;

            let account = PlannedResource::new(
                ResourceKind::StorageAccount,
                name,
                "storage",
                self.tags(settings, "storage", None)?,
            )
            .with_property("sku", "Standard_LRS")
            .with_property("accessTier", tier)
            .with_property("containers", containers);
            plan.push(account);
        }

        Ok(())
    }

    fn add_feature_resources(
        &self,
        plan: &mut DeploymentPlan,
        settings: &EnvironmentSettings,
    ) -> PlanResult<()> {
        // The enabled-feature list is consulted once; nothing below
        // branches on individual flags.
        for feature in settings.features.enabled() {
            let (kind, base, component) = match feature {
                Feature::ContainerApps => {
                    (ResourceKind::ContainerAppsEnvironment, "apps", "microservices")
                }
                Feature::Functions => (ResourceKind::FunctionApp, "worker", "functions"),
                Feature::ServiceBus => (ResourceKind::ServiceBusNamespace, "messaging", "messaging"),
                Feature::SqlDatabase => (ResourceKind::SqlServer, "main", "database"),
                Feature::ApiManagement => (ResourceKind::ApiManagement, "gateway", "gateway"),
                Feature::Cdn => (ResourceKind::CdnProfile, "frontend", "frontend"),
                Feature::DataFactory => (ResourceKind::DataFactory, "etl", "etl"),
                Feature::RedisCache => (ResourceKind::RedisCache, "cache", "caching"),
                Feature::CosmosDb => (ResourceKind::CosmosAccount, "nosql", "database"),
            };

            let name = self.name(kind, base, settings)?;
            let resource = PlannedResource::new(
                kind,
                name,
                component,
                self.tags(settings, component, None)?,
            )
            .with_property("feature", feature.to_string());
            plan.push(resource);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context() -> TagContext {
        TagContext::new(
            "platform",
            "platform-test",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    fn build(environment: Environment) -> DeploymentPlan {
        let catalog = SettingsCatalog::builtin().unwrap();
        let context = context();
        PlanBuilder::new(&catalog, &context).build(environment).unwrap()
    }

    #[test]
    fn test_resource_groups_come_first() {
        let plan = build(Environment::Dev);
        for resource in plan.resources.iter().take(RESOURCE_GROUPS.len()) {
            assert_eq!(resource.kind, ResourceKind::ResourceGroup);
        }
        assert_eq!(plan.resources_of_kind(ResourceKind::ResourceGroup).len(), 5);
    }

    #[test]
    fn test_networking_covers_every_subnet() {
        let plan = build(Environment::Staging);
        assert_eq!(plan.resources_of_kind(ResourceKind::VirtualNetwork).len(), 1);
        assert_eq!(plan.resources_of_kind(ResourceKind::Subnet).len(), 5);
        assert_eq!(
            plan.resources_of_kind(ResourceKind::NetworkSecurityGroup).len(),
            3
        );
    }

    #[test]
    fn test_vnet_carries_address_space() {
        let plan = build(Environment::Prod);
        let vnet = &plan.resources_of_kind(ResourceKind::VirtualNetwork)[0];
        assert_eq!(
            vnet.properties.get("addressSpace").map(String::as_str),
            Some("10.2.0.0/16")
        );
        assert_eq!(
            vnet.properties.get("ddosProtection").map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn test_prod_feature_selection() {
        let plan = build(Environment::Prod);
        assert!(plan.has_feature(Feature::Cdn));
        assert!(plan.has_feature(Feature::RedisCache));
        assert!(!plan.has_feature(Feature::CosmosDb));
        assert_eq!(plan.resources_of_kind(ResourceKind::CdnProfile).len(), 1);
        assert_eq!(plan.resources_of_kind(ResourceKind::CosmosAccount).len(), 0);
    }

    #[test]
    fn test_qa_skips_api_management() {
        let plan = build(Environment::Qa);
        assert!(!plan.has_feature(Feature::ApiManagement));
        assert_eq!(plan.resources_of_kind(ResourceKind::ApiManagement).len(), 0);
    }

    #[test]
    fn test_dev_gets_etl_cache_and_nosql() {
        let plan = build(Environment::Dev);
        assert_eq!(plan.resources_of_kind(ResourceKind::DataFactory).len(), 1);
        assert_eq!(plan.resources_of_kind(ResourceKind::RedisCache).len(), 1);
        assert_eq!(plan.resources_of_kind(ResourceKind::CosmosAccount).len(), 1);
    }

    #[test]
    fn test_storage_names_are_region_coded() {
        let plan = build(Environment::Dev);
        let accounts = plan.resources_of_kind(ResourceKind::StorageAccount);
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].name, "stappdevwus2");
        assert_eq!(accounts[1].name, "stlogsdevwus2");
    }

    #[test]
    fn test_every_resource_name_is_valid() {
        let resolver = NameResolver::new();
        for environment in Environment::all() {
            let plan = build(environment);
            for resource in &plan.resources {
                resolver.validate(resource.kind, &resource.name).unwrap();
            }
        }
    }

    #[test]
    fn test_every_resource_carries_required_tags() {
        let plan = build(Environment::Prod);
        for resource in &plan.resources {
            for key in cirrus_naming::REQUIRED_TAGS {
                assert!(
                    resource.tags.contains_key(key),
                    "{} missing {}",
                    resource.name,
                    key
                );
            }
        }
    }

    #[test]
    fn test_unlimited_quota_rendered_for_prod() {
        let plan = build(Environment::Prod);
        let workspace = &plan.resources_of_kind(ResourceKind::LogAnalytics)[0];
        assert_eq!(
            workspace.properties.get("dailyQuotaGb").map(String::as_str),
            Some("unlimited")
        );
    }
}
