//! The static per-environment settings table.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use tracing::debug;

use crate::environment::Environment;
use crate::error::{ConfigError, ConfigResult};
use crate::network::{Cidr, NetworkSettings};
use crate::settings::{
    EnvironmentSettings, FeatureFlags, MonitoringSettings, SecuritySettings,
};

/// The standard subnet tiers provisioned in every environment, at /24
/// offsets 0-4 inside the environment's VNet.
pub const SUBNET_TIERS: [&str; 5] = ["gateway", "web", "app", "data", "management"];

/// Immutable lookup table from environment to its settings record.
///
/// Constructed once at process start and passed by reference to every
/// consumer; there is no ambient global table. Construction validates
/// the whole table (subnet plans plus cross-environment VNet
/// disjointness), so a catalog that exists is a catalog that is
/// consistent.
#[derive(Debug, Clone)]
pub struct SettingsCatalog {
    entries: BTreeMap<Environment, EnvironmentSettings>,
}

impl SettingsCatalog {
    /// The built-in environment table for the platform.
    pub fn builtin() -> ConfigResult<Self> {
        Self::new(vec![dev()?, qa()?, staging()?, prod()?])
    }

    /// Build a catalog from explicit entries, validating each record
    /// and the cross-environment address plan.
    pub fn new(entries: Vec<EnvironmentSettings>) -> ConfigResult<Self> {
        let mut table = BTreeMap::new();

        for entry in entries {
            entry.validate()?;
            let environment = entry.environment;
            if table.insert(environment, entry).is_some() {
                return Err(ConfigError::DuplicateEnvironment(environment.to_string()));
            }
        }

        let catalog = Self { entries: table };
        catalog.validate_address_plan()?;

        debug!(environments = catalog.entries.len(), "settings catalog loaded");
        Ok(catalog)
    }

    /// VNet address spaces must be pairwise disjoint: environments share
    /// connectivity and a collision would break cross-environment routing.
    fn validate_address_plan(&self) -> ConfigResult<()> {
        let entries: Vec<_> = self.entries.values().collect();
        for (i, first) in entries.iter().enumerate() {
            for second in entries.iter().skip(i + 1) {
                if first
                    .network
                    .address_space
                    .overlaps(&second.network.address_space)
                {
                    return Err(ConfigError::EnvironmentCidrOverlap {
                        first: first.environment.to_string(),
                        first_cidr: first.network.address_space.to_string(),
                        second: second.environment.to_string(),
                        second_cidr: second.network.address_space.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up the settings for an environment.
    pub fn resolve(&self, environment: Environment) -> ConfigResult<&EnvironmentSettings> {
        self.entries
            .get(&environment)
            .ok_or_else(|| ConfigError::UnknownEnvironment {
                name: environment.to_string(),
                valid: self.known_names(),
            })
    }

    /// Look up the settings by environment name or stack path.
    pub fn resolve_name(&self, name: &str) -> ConfigResult<&EnvironmentSettings> {
        let environment = Environment::from_stack_name(name)?;
        self.resolve(environment)
    }

    /// Environments present in the catalog, in promotion order.
    pub fn environments(&self) -> impl Iterator<Item = Environment> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn known_names(&self) -> String {
        self.entries
            .keys()
            .map(|e| e.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Standard network plan: 10.<n>.0.0/16 with the five subnet tiers at
/// /24 offsets.
fn standard_network(second_octet: u8) -> ConfigResult<NetworkSettings> {
    let mut network = NetworkSettings::new(Cidr::new(Ipv4Addr::new(10, second_octet, 0, 0), 16)?);
    for (offset, tier) in SUBNET_TIERS.iter().enumerate() {
        network = network.with_subnet(
            *tier,
            Cidr::new(Ipv4Addr::new(10, second_octet, offset as u8, 0), 24)?,
        );
    }
    Ok(network)
}

fn dev() -> ConfigResult<EnvironmentSettings> {
    Ok(EnvironmentSettings {
        environment: Environment::Dev,
        location: "westus2".to_string(),
        network: standard_network(0)?,
        security: SecuritySettings {
            enable_purge_protection: false,
            soft_delete_retention_days: 7,
            enable_private_endpoints: false,
            allowed_ip_ranges: Vec::new(),
        },
        monitoring: MonitoringSettings {
            log_retention_days: 30,
            enable_diagnostic_settings: true,
            daily_quota_gb: Some(1.0),
        },
        // Dev also gets the ETL, caching and NoSQL stacks for testing
        features: FeatureFlags {
            enable_data_factory: true,
            enable_redis_cache: true,
            enable_cosmos_db: true,
            ..FeatureFlags::default()
        },
    })
}

fn qa() -> ConfigResult<EnvironmentSettings> {
    Ok(EnvironmentSettings {
        environment: Environment::Qa,
        location: "westus2".to_string(),
        network: standard_network(3)?,
        security: SecuritySettings {
            enable_purge_protection: false,
            soft_delete_retention_days: 14,
            enable_private_endpoints: false,
            allowed_ip_ranges: Vec::new(),
        },
        monitoring: MonitoringSettings {
            log_retention_days: 30,
            enable_diagnostic_settings: true,
            daily_quota_gb: Some(2.0),
        },
        // QA runs a minimal footprint, no API Management
        features: FeatureFlags {
            enable_api_management: false,
            ..FeatureFlags::default()
        },
    })
}

fn staging() -> ConfigResult<EnvironmentSettings> {
    Ok(EnvironmentSettings {
        environment: Environment::Staging,
        location: "westus2".to_string(),
        network: standard_network(1)?,
        security: SecuritySettings {
            enable_purge_protection: false,
            soft_delete_retention_days: 30,
            enable_private_endpoints: true,
            allowed_ip_ranges: Vec::new(),
        },
        monitoring: MonitoringSettings {
            log_retention_days: 60,
            enable_diagnostic_settings: true,
            daily_quota_gb: Some(5.0),
        },
        // CDN is exercised in staging before it reaches prod
        features: FeatureFlags {
            enable_cdn: true,
            ..FeatureFlags::default()
        },
    })
}

fn prod() -> ConfigResult<EnvironmentSettings> {
    Ok(EnvironmentSettings {
        environment: Environment::Prod,
        location: "westus2".to_string(),
        network: standard_network(2)?
            .with_ddos_protection(true)
            .with_firewall(true),
        security: SecuritySettings {
            enable_purge_protection: true,
            soft_delete_retention_days: 90,
            enable_private_endpoints: true,
            allowed_ip_ranges: Vec::new(),
        },
        monitoring: MonitoringSettings {
            log_retention_days: 365,
            enable_diagnostic_settings: true,
            daily_quota_gb: None,
        },
        features: FeatureFlags {
            enable_cdn: true,
            enable_redis_cache: true,
            ..FeatureFlags::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Feature;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = SettingsCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 4);
        let environments: Vec<_> = catalog.environments().collect();
        assert_eq!(environments, Environment::all());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let catalog = SettingsCatalog::builtin().unwrap();
        let first = catalog.resolve(Environment::Staging).unwrap();
        let second = catalog.resolve(Environment::Staging).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_name_accepts_stack_paths() {
        let catalog = SettingsCatalog::builtin().unwrap();
        let settings = catalog.resolve_name("org/platform/qa").unwrap();
        assert_eq!(settings.environment, Environment::Qa);
    }

    #[test]
    fn test_resolve_name_rejects_unknown() {
        let catalog = SettingsCatalog::builtin().unwrap();
        let err = catalog.resolve_name("nonexistent").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment { .. }));
    }

    #[test]
    fn test_builtin_address_plan() {
        let catalog = SettingsCatalog::builtin().unwrap();
        assert_eq!(
            catalog
                .resolve(Environment::Dev)
                .unwrap()
                .network
                .address_space
                .to_string(),
            "10.0.0.0/16"
        );
        assert_eq!(
            catalog
                .resolve(Environment::Staging)
                .unwrap()
                .network
                .address_space
                .to_string(),
            "10.1.0.0/16"
        );
        assert_eq!(
            catalog
                .resolve(Environment::Prod)
                .unwrap()
                .network
                .address_space
                .to_string(),
            "10.2.0.0/16"
        );
        assert_eq!(
            catalog
                .resolve(Environment::Qa)
                .unwrap()
                .network
                .address_space
                .to_string(),
            "10.3.0.0/16"
        );
    }

    #[test]
    fn test_builtin_vnets_are_pairwise_disjoint() {
        let catalog = SettingsCatalog::builtin().unwrap();
        let spaces: Vec<_> = catalog
            .environments()
            .map(|e| catalog.resolve(e).unwrap().network.address_space)
            .collect();

        for (i, first) in spaces.iter().enumerate() {
            for second in spaces.iter().skip(i + 1) {
                assert!(!first.overlaps(second), "{} overlaps {}", first, second);
            }
        }
    }

    #[test]
    fn test_every_environment_has_standard_subnets() {
        let catalog = SettingsCatalog::builtin().unwrap();
        for environment in catalog.environments() {
            let network = &catalog.resolve(environment).unwrap().network;
            for tier in SUBNET_TIERS {
                assert!(
                    network.subnets.contains_key(tier),
                    "{} is missing subnet '{}'",
                    environment,
                    tier
                );
            }
        }
    }

    #[test]
    fn test_prod_posture() {
        let catalog = SettingsCatalog::builtin().unwrap();
        let prod = catalog.resolve(Environment::Prod).unwrap();

        assert!(prod.network.enable_ddos_protection);
        assert!(prod.network.enable_firewall);
        assert!(prod.security.enable_purge_protection);
        assert_eq!(prod.security.soft_delete_retention_days, 90);
        assert_eq!(prod.monitoring.log_retention_days, 365);
        assert!(prod.monitoring.daily_quota_gb.is_none());
        assert!(prod.features.is_enabled(Feature::Cdn));
        assert!(prod.features.is_enabled(Feature::RedisCache));
        assert!(!prod.features.is_enabled(Feature::CosmosDb));
    }

    #[test]
    fn test_qa_has_no_api_management() {
        let catalog = SettingsCatalog::builtin().unwrap();
        let qa = catalog.resolve(Environment::Qa).unwrap();
        assert!(!qa.features.is_enabled(Feature::ApiManagement));
    }

    #[test]
    fn test_overlapping_catalog_rejected() {
        let mut first = dev().unwrap();
        first.environment = Environment::Dev;
        let mut second = qa().unwrap();
        second.environment = Environment::Qa;
        second.network = first.network.clone();

        let err = SettingsCatalog::new(vec![first, second]).unwrap_err();
        assert!(matches!(err, ConfigError::EnvironmentCidrOverlap { .. }));
    }

    #[test]
    fn test_duplicate_environment_rejected() {
        let err = SettingsCatalog::new(vec![dev().unwrap(), dev().unwrap()]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateEnvironment(_)));
    }
}
