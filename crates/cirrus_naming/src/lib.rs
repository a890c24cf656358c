//! # cirrus_naming
//!
//! Azure resource naming conventions and governance tags for the
//! Cirrus platform.
//!
//! Names follow the `{prefix}-{base}-{environment}` convention with
//! per-kind length and character constraints; tags carry the governance
//! baseline every resource must be labelled with. Both are pure
//! transformations over injected inputs.
//!
//! ## Example
//!
//! ```rust
//! use cirrus_config::Environment;
//! use cirrus_naming::{resolve_name, ResourceKind};
//!
//! let name = resolve_name(ResourceKind::StorageAccount, "app", Environment::Dev).unwrap();
//! assert_eq!(name, "stappdev");
//! ```

pub mod error;
pub mod naming;
pub mod region;
pub mod tags;

pub use error::{NamingResult, ValidationError};
pub use naming::{resolve_name, NameRequest, NameResolver, ResourceKind};
pub use region::region_code;
pub use tags::{compose_tags, TagContext, Tags, MANAGED_BY, REQUIRED_TAGS};
