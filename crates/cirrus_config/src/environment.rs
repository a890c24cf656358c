//! Deployment environment identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named deployment target with its own configuration and isolated
/// resource set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Qa,
    Staging,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Qa => "qa",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }

    /// All environments in promotion order.
    pub fn all() -> [Environment; 4] {
        [
            Environment::Dev,
            Environment::Qa,
            Environment::Staging,
            Environment::Prod,
        ]
    }

    /// Resolve the environment from a stack name.
    ///
    /// Accepts a bare name (`dev`) or a full stack path
    /// (`org/project/dev`) and resolves the final segment.
    pub fn from_stack_name(stack: &str) -> Result<Self, ConfigError> {
        let name = stack.rsplit('/').next().unwrap_or(stack);
        name.parse()
    }

    pub(crate) fn valid_names() -> String {
        Self::all()
            .iter()
            .map(|e| e.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "qa" => Ok(Environment::Qa),
            "staging" => Ok(Environment::Staging),
            "prod" => Ok(Environment::Prod),
            _ => Err(ConfigError::UnknownEnvironment {
                name: s.to_string(),
                valid: Self::valid_names(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
