//! Name command - Resolve a resource name.

use anyhow::Result;
use clap::Args;

use cirrus_config::Environment;
use cirrus_naming::{region_code, NameRequest, NameResolver, ResourceKind};

#[derive(Args)]
pub struct NameArgs {
    /// Resource kind code (rg, st, kv, vnet, ...)
    #[arg(short, long)]
    kind: String,

    /// Logical base name
    #[arg(short, long)]
    name: String,

    /// Environment name or stack path
    #[arg(short, long)]
    env: String,

    /// Azure region; adds its short code to the name
    #[arg(long)]
    region: Option<String>,

    /// Instance identifier appended to the name (e.g. 001)
    #[arg(long)]
    instance: Option<String>,
}

pub fn execute(args: NameArgs) -> Result<()> {
    let kind: ResourceKind = args.kind.parse()?;
    let environment = Environment::from_stack_name(&args.env)?;

    let code = args.region.as_deref().map(region_code);

    let mut request = NameRequest::new(kind, &args.name, environment);
    if let Some(code) = &code {
        request = request.with_region_code(code);
    }
    if let Some(instance) = &args.instance {
        request = request.with_instance(instance);
    }

    let resolved = NameResolver::new().resolve(&request)?;
    println!("{resolved}");

    Ok(())
}
