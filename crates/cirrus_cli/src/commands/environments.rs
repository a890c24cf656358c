//! Environments command - List the known environments.

use anyhow::Result;
use clap::Args;

use cirrus_config::SettingsCatalog;

#[derive(Args)]
pub struct EnvironmentsArgs {}

pub fn execute(_args: EnvironmentsArgs) -> Result<()> {
    let catalog = SettingsCatalog::builtin()?;

    println!(
        "{:<10} {:<10} {:<16} {:<8} {}",
        "NAME", "LOCATION", "VNET", "SUBNETS", "FEATURES"
    );
    for environment in catalog.environments() {
        let settings = catalog.resolve(environment)?;
        println!(
            "{:<10} {:<10} {:<16} {:<8} {}",
            environment.to_string(),
            settings.location,
            settings.network.address_space.to_string(),
            settings.network.subnets.len(),
            settings.features.enabled().len(),
        );
    }

    Ok(())
}
