//! Error types for the configuration module.

use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while resolving deployment configuration.
///
/// Catalog-level variants (`EnvironmentCidrOverlap`, `DuplicateEnvironment`)
/// are raised once at catalog construction and indicate misconfiguration,
/// not a transient condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown environment: {name}. Valid environments: {valid}")]
    UnknownEnvironment { name: String, valid: String },

    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length: {0} (must be 0-32)")]
    InvalidPrefixLength(u8),

    #[error("Subnet '{subnet}' ({cidr}) lies outside the VNet address space {vnet}")]
    SubnetOutsideVnet {
        subnet: String,
        cidr: String,
        vnet: String,
    },

    #[error("Subnets '{first}' and '{second}' have overlapping address prefixes")]
    SubnetOverlap { first: String, second: String },

    #[error("VNet address spaces of '{first}' ({first_cidr}) and '{second}' ({second_cidr}) overlap")]
    EnvironmentCidrOverlap {
        first: String,
        first_cidr: String,
        second: String,
        second_cidr: String,
    },

    #[error("Environment '{0}' is defined more than once")]
    DuplicateEnvironment(String),
}
