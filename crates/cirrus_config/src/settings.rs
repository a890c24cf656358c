//! Per-environment settings records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::error::ConfigResult;
use crate::network::{Cidr, NetworkSettings};

/// Security configuration for an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySettings {
    /// Key Vault purge protection
    pub enable_purge_protection: bool,
    /// Soft-delete retention window in days
    pub soft_delete_retention_days: u32,
    /// Whether data-plane access goes through private endpoints
    pub enable_private_endpoints: bool,
    /// IP ranges allowed through service firewalls
    pub allowed_ip_ranges: Vec<Cidr>,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            enable_purge_protection: false,
            soft_delete_retention_days: 30,
            enable_private_endpoints: false,
            allowed_ip_ranges: Vec::new(),
        }
    }
}

/// Monitoring configuration for an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringSettings {
    /// Log Analytics data retention in days
    pub log_retention_days: u32,
    /// Whether diagnostic settings are attached to resources
    pub enable_diagnostic_settings: bool,
    /// Daily ingestion cap in gigabytes, `None` meaning no cap
    pub daily_quota_gb: Option<f64>,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            log_retention_days: 30,
            enable_diagnostic_settings: true,
            daily_quota_gb: None,
        }
    }
}

/// Resource categories that can be toggled per environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    ContainerApps,
    Functions,
    ServiceBus,
    SqlDatabase,
    ApiManagement,
    Cdn,
    DataFactory,
    RedisCache,
    CosmosDb,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::ContainerApps => "container_apps",
            Feature::Functions => "functions",
            Feature::ServiceBus => "service_bus",
            Feature::SqlDatabase => "sql_database",
            Feature::ApiManagement => "api_management",
            Feature::Cdn => "cdn",
            Feature::DataFactory => "data_factory",
            Feature::RedisCache => "redis_cache",
            Feature::CosmosDb => "cosmos_db",
        }
    }

    pub fn all() -> [Feature; 9] {
        [
            Feature::ContainerApps,
            Feature::Functions,
            Feature::ServiceBus,
            Feature::SqlDatabase,
            Feature::ApiManagement,
            Feature::Cdn,
            Feature::DataFactory,
            Feature::RedisCache,
            Feature::CosmosDb,
        ]
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Feature flags controlling which resource categories are provisioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub enable_container_apps: bool,
    pub enable_functions: bool,
    pub enable_service_bus: bool,
    pub enable_sql_database: bool,
    pub enable_api_management: bool,
    pub enable_cdn: bool,
    pub enable_data_factory: bool,
    pub enable_redis_cache: bool,
    pub enable_cosmos_db: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_container_apps: true,
            enable_functions: true,
            enable_service_bus: true,
            enable_sql_database: true,
            enable_api_management: true,
            enable_cdn: false,
            enable_data_factory: false,
            enable_redis_cache: false,
            enable_cosmos_db: false,
        }
    }
}

impl FeatureFlags {
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::ContainerApps => self.enable_container_apps,
            Feature::Functions => self.enable_functions,
            Feature::ServiceBus => self.enable_service_bus,
            Feature::SqlDatabase => self.enable_sql_database,
            Feature::ApiManagement => self.enable_api_management,
            Feature::Cdn => self.enable_cdn,
            Feature::DataFactory => self.enable_data_factory,
            Feature::RedisCache => self.enable_redis_cache,
            Feature::CosmosDb => self.enable_cosmos_db,
        }
    }

    /// The enabled features as an explicit list, in declaration order.
    ///
    /// The orchestration layer consults this once instead of branching
    /// on individual flags.
    pub fn enabled(&self) -> Vec<Feature> {
        Feature::all()
            .into_iter()
            .filter(|f| self.is_enabled(*f))
            .collect()
    }
}

/// Complete settings for one environment.
///
/// Constructed once per deployment run from the settings catalog and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSettings {
    pub environment: Environment,
    /// Azure region, e.g. `westus2`
    pub location: String,
    pub network: NetworkSettings,
    pub security: SecuritySettings,
    pub monitoring: MonitoringSettings,
    pub features: FeatureFlags,
}

impl EnvironmentSettings {
    /// Check the record's internal consistency.
    pub fn validate(&self) -> ConfigResult<()> {
        self.network.validate()
    }
}
