//! Governance tag composition.
//!
//! Every provisioned resource carries the same tag baseline for cost
//! allocation, ownership and automation tracking. Deployment metadata
//! (project, stack, date) is injected through [`TagContext`] so
//! composition stays pure and clock-free.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cirrus_config::Environment;

use crate::error::{NamingResult, ValidationError};

/// Tag keys that must be present and non-empty on every resource.
pub const REQUIRED_TAGS: [&str; 6] = [
    "Environment",
    "ManagedBy",
    "Project",
    "Stack",
    "CreatedDate",
    "Component",
];

/// The tool marker written into the `ManagedBy` tag.
pub const MANAGED_BY: &str = "cirrus";

/// Deployment metadata injected into every tag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagContext {
    /// Project name
    pub project: String,
    /// Stack name for this deployment run
    pub stack: String,
    /// Deployment start date, injected by the caller
    pub deployed_on: NaiveDate,
    /// Owning team or individual
    pub owner: Option<String>,
    /// Cost center for billing
    pub cost_center: Option<String>,
}

impl TagContext {
    pub fn new(
        project: impl Into<String>,
        stack: impl Into<String>,
        deployed_on: NaiveDate,
    ) -> Self {
        Self {
            project: project.into(),
            stack: stack.into(),
            deployed_on,
            owner: None,
            cost_center: None,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.cost_center = Some(cost_center.into());
        self
    }
}

/// An ordered tag mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for Tags {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Compose the governance tags for one resource.
///
/// Starts from the fixed baseline, adds environment and component, then
/// applies `overrides` last so they win on key collision. Fails when a
/// required key ends up missing or empty.
pub fn compose_tags(
    context: &TagContext,
    environment: Environment,
    component: &str,
    overrides: Option<&BTreeMap<String, String>>,
) -> NamingResult<Tags> {
    let mut tags = BTreeMap::new();
    tags.insert("Environment".to_string(), environment.to_string());
    tags.insert("ManagedBy".to_string(), MANAGED_BY.to_string());
    tags.insert("Project".to_string(), context.project.clone());
    tags.insert("Stack".to_string(), context.stack.clone());
    tags.insert(
        "CreatedDate".to_string(),
        context.deployed_on.format("%Y-%m-%d").to_string(),
    );
    tags.insert("Component".to_string(), component.to_string());

    if let Some(owner) = &context.owner {
        tags.insert("Owner".to_string(), owner.clone());
    }
    if let Some(cost_center) = &context.cost_center {
        tags.insert("CostCenter".to_string(), cost_center.clone());
    }

    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            tags.insert(key.clone(), value.clone());
        }
    }

    validate_tags(&tags)?;
    Ok(Tags(tags))
}

fn validate_tags(tags: &BTreeMap<String, String>) -> NamingResult<()> {
    for key in REQUIRED_TAGS {
        match tags.get(key) {
            None => return Err(ValidationError::MissingTag(key.to_string())),
            Some(value) if value.trim().is_empty() => {
                return Err(ValidationError::EmptyTag(key.to_string()))
            }
            Some(_) => {}
        }
    }
    Ok(())
}
