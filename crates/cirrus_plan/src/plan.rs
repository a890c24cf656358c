//! Deployment plan types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cirrus_config::{Environment, Feature};
use cirrus_naming::{ResourceKind, Tags};

/// One resource the deployment will provision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedResource {
    pub kind: ResourceKind,
    /// Resolved, validated resource name
    pub name: String,
    /// Component label the resource belongs to (core, networking, ...)
    pub component: String,
    pub tags: Tags,
    /// Provider-relevant settings surfaced by the plan
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl PlannedResource {
    pub fn new(
        kind: ResourceKind,
        name: impl Into<String>,
        component: impl Into<String>,
        tags: Tags,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            component: component.into(),
            tags,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// The ordered set of resources to provision for one environment.
///
/// External provisioning code walks `resources` in order and feeds each
/// entry to the provider SDK; the plan itself never touches the cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    pub environment: Environment,
    pub location: String,
    /// Features enabled for this environment
    pub enabled_features: Vec<Feature>,
    /// Resources in provisioning order
    pub resources: Vec<PlannedResource>,
}

impl DeploymentPlan {
    pub fn new(
        environment: Environment,
        location: impl Into<String>,
        enabled_features: Vec<Feature>,
    ) -> Self {
        Self {
            environment,
            location: location.into(),
            enabled_features,
            resources: Vec::new(),
        }
    }

    pub fn push(&mut self, resource: PlannedResource) {
        self.resources.push(resource);
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resources belonging to one component label.
    pub fn resources_for_component(&self, component: &str) -> Vec<&PlannedResource> {
        self.resources
            .iter()
            .filter(|r| r.component == component)
            .collect()
    }

    /// Resources of one kind.
    pub fn resources_of_kind(&self, kind: ResourceKind) -> Vec<&PlannedResource> {
        self.resources.iter().filter(|r| r.kind == kind).collect()
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.enabled_features.contains(&feature)
    }
}
