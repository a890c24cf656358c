//! Validate command - Check the settings catalog.

use anyhow::Result;
use clap::Args;
use tracing::info;

use cirrus_config::{Environment, SettingsCatalog};
use cirrus_plan::PlanBuilder;

use super::ContextArgs;

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    context: ContextArgs,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating settings catalog");

    println!("🔍 Validating settings catalog...");

    // Construction runs the subnet plans and the cross-environment
    // address disjointness checks.
    let catalog = SettingsCatalog::builtin()?;
    println!("   ✅ Catalog loaded: {} environments", catalog.len());

    // Building every plan exercises naming and tagging for each
    // resource the environment would provision.
    for environment in Environment::all() {
        let context = args.context.tag_context(environment);
        let plan = PlanBuilder::new(&catalog, &context).build(environment)?;
        let settings = catalog.resolve(environment)?;

        println!(
            "   ✅ {:<8} VNet {:<14} {} resources",
            environment.to_string(),
            settings.network.address_space.to_string(),
            plan.len(),
        );
    }

    println!();
    println!("✅ Settings catalog is consistent");

    Ok(())
}
