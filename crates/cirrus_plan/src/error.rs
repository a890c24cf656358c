//! Error types for plan building.

use thiserror::Error;

/// Result type alias for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors that can occur while building a deployment plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Configuration error: {0}")]
    Config(#[from] cirrus_config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] cirrus_naming::ValidationError),
}
