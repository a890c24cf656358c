//! Resource naming conventions.
//!
//! Names follow the `{prefix}-{base}-{environment}[-{region}][-{instance}]`
//! convention, collapsed to plain concatenation for kinds that forbid
//! hyphens. Each kind carries the Azure length and character constraints
//! for its service.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use cirrus_config::Environment;

use crate::error::{NamingResult, ValidationError};

/// Azure resource kinds with naming constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    ResourceGroup,
    StorageAccount,
    KeyVault,
    VirtualNetwork,
    Subnet,
    NetworkSecurityGroup,
    PublicIp,
    NetworkInterface,
    VirtualMachine,
    KubernetesCluster,
    ContainerRegistry,
    LogAnalytics,
    AppInsights,
    ManagedIdentity,
    SqlServer,
    PostgresServer,
    ServiceBusNamespace,
    FunctionApp,
    ContainerAppsEnvironment,
    ApiManagement,
    DataFactory,
    RedisCache,
    CosmosAccount,
    CdnProfile,
}

impl ResourceKind {
    /// The short prefix code used in resource names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::ResourceGroup => "rg",
            ResourceKind::StorageAccount => "st",
            ResourceKind::KeyVault => "kv",
            ResourceKind::VirtualNetwork => "vnet",
            ResourceKind::Subnet => "snet",
            ResourceKind::NetworkSecurityGroup => "nsg",
            ResourceKind::PublicIp => "pip",
            ResourceKind::NetworkInterface => "nic",
            ResourceKind::VirtualMachine => "vm",
            ResourceKind::KubernetesCluster => "aks",
            ResourceKind::ContainerRegistry => "acr",
            ResourceKind::LogAnalytics => "law",
            ResourceKind::AppInsights => "appi",
            ResourceKind::ManagedIdentity => "id",
            ResourceKind::SqlServer => "sql",
            ResourceKind::PostgresServer => "psql",
            ResourceKind::ServiceBusNamespace => "sbns",
            ResourceKind::FunctionApp => "func",
            ResourceKind::ContainerAppsEnvironment => "cae",
            ResourceKind::ApiManagement => "apim",
            ResourceKind::DataFactory => "adf",
            ResourceKind::RedisCache => "redis",
            ResourceKind::CosmosAccount => "cosmos",
            ResourceKind::CdnProfile => "cdn",
        }
    }

    /// Maximum name length accepted by the service.
    pub fn max_length(&self) -> usize {
        match self {
            ResourceKind::ResourceGroup => 90,
            ResourceKind::StorageAccount => 24,
            ResourceKind::KeyVault => 24,
            ResourceKind::VirtualNetwork => 64,
            ResourceKind::Subnet => 80,
            ResourceKind::NetworkSecurityGroup => 80,
            ResourceKind::PublicIp => 80,
            ResourceKind::NetworkInterface => 80,
            ResourceKind::VirtualMachine => 64,
            ResourceKind::KubernetesCluster => 63,
            ResourceKind::ContainerRegistry => 50,
            ResourceKind::LogAnalytics => 63,
            ResourceKind::AppInsights => 260,
            ResourceKind::ManagedIdentity => 128,
            ResourceKind::SqlServer => 63,
            ResourceKind::PostgresServer => 63,
            ResourceKind::ServiceBusNamespace => 50,
            ResourceKind::FunctionApp => 60,
            ResourceKind::ContainerAppsEnvironment => 60,
            ResourceKind::ApiManagement => 50,
            ResourceKind::DataFactory => 63,
            ResourceKind::RedisCache => 63,
            ResourceKind::CosmosAccount => 44,
            ResourceKind::CdnProfile => 90,
        }
    }

    /// Whether the service only accepts lowercase names.
    pub fn lowercase_only(&self) -> bool {
        matches!(
            self,
            ResourceKind::StorageAccount
                | ResourceKind::ContainerRegistry
                | ResourceKind::CosmosAccount
        )
    }

    /// Whether name segments are joined with hyphens.
    pub fn hyphenated(&self) -> bool {
        !matches!(
            self,
            ResourceKind::StorageAccount | ResourceKind::ContainerRegistry
        )
    }

    pub fn all() -> [ResourceKind; 24] {
        [
            ResourceKind::ResourceGroup,
            ResourceKind::StorageAccount,
            ResourceKind::KeyVault,
            ResourceKind::VirtualNetwork,
            ResourceKind::Subnet,
            ResourceKind::NetworkSecurityGroup,
            ResourceKind::PublicIp,
            ResourceKind::NetworkInterface,
            ResourceKind::VirtualMachine,
            ResourceKind::KubernetesCluster,
            ResourceKind::ContainerRegistry,
            ResourceKind::LogAnalytics,
            ResourceKind::AppInsights,
            ResourceKind::ManagedIdentity,
            ResourceKind::SqlServer,
            ResourceKind::PostgresServer,
            ResourceKind::ServiceBusNamespace,
            ResourceKind::FunctionApp,
            ResourceKind::ContainerAppsEnvironment,
            ResourceKind::ApiManagement,
            ResourceKind::DataFactory,
            ResourceKind::RedisCache,
            ResourceKind::CosmosAccount,
            ResourceKind::CdnProfile,
        ]
    }
}

impl FromStr for ResourceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.to_lowercase();
        ResourceKind::all()
            .into_iter()
            .find(|kind| kind.as_str() == code)
            .ok_or_else(|| ValidationError::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request for one resource name.
#[derive(Debug, Clone)]
pub struct NameRequest<'a> {
    pub kind: ResourceKind,
    pub base: &'a str,
    pub environment: Environment,
    pub region_code: Option<&'a str>,
    pub instance: Option<&'a str>,
}

impl<'a> NameRequest<'a> {
    pub fn new(kind: ResourceKind, base: &'a str, environment: Environment) -> Self {
        Self {
            kind,
            base,
            environment,
            region_code: None,
            instance: None,
        }
    }

    pub fn with_region_code(mut self, code: &'a str) -> Self {
        self.region_code = Some(code);
        self
    }

    pub fn with_instance(mut self, instance: &'a str) -> Self {
        self.instance = Some(instance);
        self
    }
}

/// Deterministic resolver from naming requests to validated names.
pub struct NameResolver {
    hyphenated_pattern: Regex,
    compact_pattern: Regex,
}

impl NameResolver {
    pub fn new() -> Self {
        Self {
            hyphenated_pattern: Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*$").unwrap(),
            compact_pattern: Regex::new(r"^[a-z0-9]+$").unwrap(),
        }
    }

    /// Resolve a request to a resource name.
    ///
    /// When the composed name exceeds the kind's length limit the base
    /// name is truncated first; the prefix, environment, region and
    /// instance segments are always preserved.
    pub fn resolve(&self, request: &NameRequest<'_>) -> NamingResult<String> {
        let kind = request.kind;
        let base = request.base.trim();
        if base.is_empty() {
            return Err(ValidationError::EmptyBaseName);
        }
        if !base.is_ascii() {
            return Err(ValidationError::InvalidCharacter {
                name: base.to_string(),
                kind: kind.to_string(),
            });
        }

        let separator = if kind.hyphenated() { "-" } else { "" };
        let fixed_segments: Vec<&str> = [
            Some(kind.as_str()),
            Some(request.environment.as_str()),
            request.region_code,
            request.instance,
        ]
        .into_iter()
        .flatten()
        .collect();

        // Length consumed by everything except the base name.
        let fixed_len: usize = fixed_segments.iter().map(|s| s.len()).sum::<usize>()
            + separator.len() * fixed_segments.len();

        let max = kind.max_length();
        let available = max.saturating_sub(fixed_len);
        if available == 0 {
            return Err(ValidationError::NameTooLong {
                name: self.join(kind, base, request, separator),
                kind: kind.to_string(),
                max,
            });
        }

        let truncated = if base.len() > available {
            &base[..available]
        } else {
            base
        };

        let mut name = self.join(kind, truncated, request, separator);
        if kind.lowercase_only() {
            name = name.to_lowercase();
        }

        self.validate(kind, &name)?;
        Ok(name)
    }

    fn join(
        &self,
        kind: ResourceKind,
        base: &str,
        request: &NameRequest<'_>,
        separator: &str,
    ) -> String {
        let mut parts = vec![kind.as_str(), base, request.environment.as_str()];
        if let Some(code) = request.region_code {
            parts.push(code);
        }
        if let Some(instance) = request.instance {
            parts.push(instance);
        }
        parts.join(separator)
    }

    /// Check a composed name against the kind's constraints.
    pub fn validate(&self, kind: ResourceKind, name: &str) -> NamingResult<()> {
        if name.len() > kind.max_length() {
            return Err(ValidationError::NameTooLong {
                name: name.to_string(),
                kind: kind.to_string(),
                max: kind.max_length(),
            });
        }

        let pattern = if kind.hyphenated() {
            &self.hyphenated_pattern
        } else {
            &self.compact_pattern
        };
        if !pattern.is_match(name)
            || (kind.lowercase_only() && name.chars().any(|c| c.is_ascii_uppercase()))
        {
            return Err(ValidationError::InvalidCharacter {
                name: name.to_string(),
                kind: kind.to_string(),
            });
        }

        Ok(())
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a name with the default resolver.
pub fn resolve_name(
    kind: ResourceKind,
    base: &str,
    environment: Environment,
) -> NamingResult<String> {
    NameResolver::new().resolve(&NameRequest::new(kind, base, environment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_group_naming() {
        let name = resolve_name(ResourceKind::ResourceGroup, "app", Environment::Prod).unwrap();
        assert_eq!(name, "rg-app-prod");
        assert!(name.len() <= 90);
    }

    #[test]
    fn test_storage_account_naming() {
        let name = resolve_name(ResourceKind::StorageAccount, "app", Environment::Dev).unwrap();
        assert_eq!(name, "stappdev");
        assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!(name.len() <= 24);
    }

    #[test]
    fn test_key_vault_naming() {
        let name = resolve_name(ResourceKind::KeyVault, "secrets", Environment::Prod).unwrap();
        assert_eq!(name, "kv-secrets-prod");
        assert!(name.len() <= 24);
    }

    #[test]
    fn test_name_with_region_code() {
        let resolver = NameResolver::new();
        let request = NameRequest::new(ResourceKind::ResourceGroup, "webapp", Environment::Dev)
            .with_region_code("wus2");
        assert_eq!(resolver.resolve(&request).unwrap(), "rg-webapp-dev-wus2");
    }

    #[test]
    fn test_name_with_instance() {
        let resolver = NameResolver::new();
        let request = NameRequest::new(ResourceKind::VirtualMachine, "web", Environment::Prod)
            .with_instance("001");
        assert_eq!(resolver.resolve(&request).unwrap(), "vm-web-prod-001");
    }

    #[test]
    fn test_storage_account_lowercases_base() {
        let name = resolve_name(ResourceKind::StorageAccount, "Media", Environment::Qa).unwrap();
        assert_eq!(name, "stmediaqa");
    }

    #[test]
    fn test_long_base_is_truncated_not_the_suffix() {
        let base = "a-very-long-application-name-for-the-vault";
        let name = resolve_name(ResourceKind::KeyVault, base, Environment::Staging).unwrap();

        assert_eq!(name.len(), 24);
        assert!(name.starts_with("kv-"));
        assert!(name.ends_with("-staging"));
    }

    #[test]
    fn test_short_base_appears_unmodified() {
        for kind in [
            ResourceKind::ResourceGroup,
            ResourceKind::VirtualNetwork,
            ResourceKind::LogAnalytics,
        ] {
            let name = resolve_name(kind, "billing", Environment::Dev).unwrap();
            assert!(name.contains("billing"), "{name}");
        }
    }

    #[test]
    fn test_empty_base_name_rejected() {
        assert_eq!(
            resolve_name(ResourceKind::ResourceGroup, "", Environment::Dev),
            Err(ValidationError::EmptyBaseName)
        );
        assert_eq!(
            resolve_name(ResourceKind::ResourceGroup, "   ", Environment::Dev),
            Err(ValidationError::EmptyBaseName)
        );
    }

    #[test]
    fn test_invalid_characters_rejected() {
        let err = resolve_name(ResourceKind::StorageAccount, "my-app", Environment::Dev)
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCharacter { .. }));

        let err =
            resolve_name(ResourceKind::ResourceGroup, "app_core", Environment::Dev).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCharacter { .. }));
    }

    #[test]
    fn test_kind_codes_round_trip() {
        for kind in ResourceKind::all() {
            assert_eq!(kind.as_str().parse::<ResourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = "blob".parse::<ResourceKind>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownKind("blob".to_string()));
    }

    #[test]
    fn test_all_kinds_produce_valid_names_for_all_environments() {
        let resolver = NameResolver::new();
        for kind in ResourceKind::all() {
            for environment in Environment::all() {
                let name = resolver
                    .resolve(&NameRequest::new(kind, "app", environment))
                    .unwrap();
                resolver.validate(kind, &name).unwrap();
            }
        }
    }
}
