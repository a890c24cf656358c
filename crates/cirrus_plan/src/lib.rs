//! # cirrus_plan
//!
//! Declarative deployment plans for the Cirrus platform.
//!
//! A plan is the handoff point between configuration and provisioning:
//! it lists every resource an environment needs, with its validated
//! name, governance tags and provider-relevant properties, in the order
//! the platform provisions them. Building a plan performs no I/O.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cirrus_config::{Environment, SettingsCatalog};
//! use cirrus_naming::TagContext;
//! use cirrus_plan::PlanBuilder;
//!
//! let catalog = SettingsCatalog::builtin().unwrap();
//! let context = TagContext::new(
//!     "platform",
//!     "platform-dev",
//!     NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
//! );
//!
//! let plan = PlanBuilder::new(&catalog, &context)
//!     .build(Environment::Dev)
//!     .unwrap();
//! assert!(!plan.is_empty());
//! ```

pub mod builder;
pub mod error;
pub mod plan;

pub use builder::PlanBuilder;
pub use error::{PlanError, PlanResult};
pub use plan::{DeploymentPlan, PlannedResource};
