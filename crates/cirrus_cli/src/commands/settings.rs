//! Settings command - Resolve one environment's settings.

use anyhow::Result;
use clap::Args;
use tracing::info;

use cirrus_config::{EnvironmentSettings, SettingsCatalog};

use super::OutputFormat;

#[derive(Args)]
pub struct SettingsArgs {
    /// Environment name or stack path (e.g. dev, org/platform/prod)
    #[arg(short, long)]
    env: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub fn execute(args: SettingsArgs) -> Result<()> {
    let catalog = SettingsCatalog::builtin()?;
    let settings = catalog.resolve_name(&args.env)?;

    info!("Resolved settings for environment: {}", settings.environment);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(settings)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(settings)?),
        OutputFormat::Text => print_text(settings),
    }

    Ok(())
}

fn print_text(settings: &EnvironmentSettings) {
    println!("Environment: {}", settings.environment);
    println!("Location:    {}", settings.location);
    println!();

    println!("Network");
    println!("  address space:   {}", settings.network.address_space);
    for (tier, prefix) in &settings.network.subnets {
        println!("  subnet {:<12} {}", tier, prefix);
    }
    println!("  ddos protection: {}", settings.network.enable_ddos_protection);
    println!("  firewall:        {}", settings.network.enable_firewall);
    println!();

    println!("Security");
    println!("  purge protection:    {}", settings.security.enable_purge_protection);
    println!(
        "  soft-delete days:    {}",
        settings.security.soft_delete_retention_days
    );
    println!(
        "  private endpoints:   {}",
        settings.security.enable_private_endpoints
    );
    println!();

    println!("Monitoring");
    println!("  log retention days: {}", settings.monitoring.log_retention_days);
    match settings.monitoring.daily_quota_gb {
        Some(gb) => println!("  daily quota:        {gb} GB"),
        None => println!("  daily quota:        unlimited"),
    }
    println!();

    println!("Features");
    for feature in settings.features.enabled() {
        println!("  - {feature}");
    }
}
