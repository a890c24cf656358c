//! CLI command definitions.
//!
//! This module defines the command structure for the Cirrus CLI.
//! Each subcommand exposes one piece of the configuration core.

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use cirrus_config::Environment;
use cirrus_naming::TagContext;

pub mod environments;
pub mod name;
pub mod plan;
pub mod settings;
pub mod tags;
pub mod validate;

/// Cirrus - Azure deployment configuration toolkit
#[derive(Parser)]
#[command(name = "cirrus")]
#[command(version, about = "Cirrus - Azure deployment configuration toolkit")]
#[command(long_about = r#"
Cirrus resolves per-environment deployment settings, Azure resource
names and governance tags, and assembles the declarative deployment
plan that provisioning tooling consumes.

COMMANDS:
  environments  → List the known environments and their address plans
  settings      → Resolve the settings record for one environment
  name          → Resolve a resource name following the naming convention
  tags          → Compose the governance tags for a component
  plan          → Build the full deployment plan for an environment
  validate      → Check the settings catalog and every planned name

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Configuration error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the known environments
    Environments(environments::EnvironmentsArgs),

    /// Resolve the settings for one environment
    Settings(settings::SettingsArgs),

    /// Resolve a resource name
    Name(name::NameArgs),

    /// Compose governance tags for a component
    Tags(tags::TagsArgs),

    /// Build the deployment plan for an environment
    Plan(plan::PlanArgs),

    /// Validate the settings catalog
    Validate(validate::ValidateArgs),
}

/// Output rendering for commands that emit structured data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Deployment metadata shared by tag-producing commands.
#[derive(Args)]
pub struct ContextArgs {
    /// Project name recorded in resource tags
    #[arg(long, default_value = "platform", env = "CIRRUS_PROJECT")]
    pub project: String,

    /// Stack name; defaults to <project>-<environment>
    #[arg(long, env = "CIRRUS_STACK")]
    pub stack: Option<String>,

    /// Deployment date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Owning team recorded in resource tags
    #[arg(long, env = "CIRRUS_OWNER")]
    pub owner: Option<String>,

    /// Cost center recorded in resource tags
    #[arg(long, env = "CIRRUS_COST_CENTER")]
    pub cost_center: Option<String>,
}

impl ContextArgs {
    /// Build the injected tag context for an environment.
    pub fn tag_context(&self, environment: Environment) -> TagContext {
        let stack = self
            .stack
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.project, environment));
        let date = self.date.unwrap_or_else(|| Utc::now().date_naive());

        let mut context = TagContext::new(self.project.clone(), stack, date);
        if let Some(owner) = &self.owner {
            context = context.with_owner(owner.clone());
        }
        if let Some(cost_center) = &self.cost_center {
            context = context.with_cost_center(cost_center.clone());
        }
        context
    }
}
