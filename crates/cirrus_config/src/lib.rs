//! # cirrus_config
//!
//! Per-environment deployment settings for the Cirrus platform.
//!
//! This crate holds the environment model and the static settings table:
//! network address plans, security posture, monitoring quotas and
//! feature flags for each deployment target. Resolution is a pure table
//! lookup over an immutable catalog constructed once at process start.
//!
//! ## Example
//!
//! ```rust
//! use cirrus_config::{Environment, SettingsCatalog};
//!
//! let catalog = SettingsCatalog::builtin().unwrap();
//! let settings = catalog.resolve(Environment::Prod).unwrap();
//!
//! assert_eq!(settings.location, "westus2");
//! assert!(settings.security.enable_purge_protection);
//! ```

pub mod catalog;
pub mod environment;
pub mod error;
pub mod network;
pub mod settings;

pub use catalog::{SettingsCatalog, SUBNET_TIERS};
pub use environment::Environment;
pub use error::{ConfigError, ConfigResult};
pub use network::{Cidr, NetworkSettings};
pub use settings::{
    EnvironmentSettings, Feature, FeatureFlags, MonitoringSettings, SecuritySettings,
};
