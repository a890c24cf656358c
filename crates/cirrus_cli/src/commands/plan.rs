//! Plan command - Build the deployment plan for an environment.

use anyhow::Result;
use clap::Args;
use tracing::info;

use cirrus_config::{Environment, SettingsCatalog};
use cirrus_plan::{DeploymentPlan, PlanBuilder};

use super::{ContextArgs, OutputFormat};

#[derive(Args)]
pub struct PlanArgs {
    /// Environment name or stack path
    #[arg(short, long)]
    env: String,

    #[command(flatten)]
    context: ContextArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub fn execute(args: PlanArgs) -> Result<()> {
    let environment = Environment::from_stack_name(&args.env)?;
    let catalog = SettingsCatalog::builtin()?;
    let context = args.context.tag_context(environment);

    info!("Building deployment plan for environment: {environment}");

    let plan = PlanBuilder::new(&catalog, &context).build(environment)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&plan)?),
        OutputFormat::Text => print_text(&plan),
    }

    Ok(())
}

fn print_text(plan: &DeploymentPlan) {
    println!(
        "Deployment plan for {} ({})",
        plan.environment, plan.location
    );
    println!(
        "Enabled features: {}",
        plan.enabled_features
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();

    println!("{:<26} {:<30} {}", "KIND", "NAME", "COMPONENT");
    for resource in &plan.resources {
        println!(
            "{:<26} {:<30} {}",
            resource.kind.to_string(),
            resource.name,
            resource.component
        );
    }

    println!();
    println!("{} resources planned", plan.len());
}
