//! Tags command - Compose governance tags.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;

use cirrus_config::Environment;
use cirrus_naming::compose_tags;

use super::{ContextArgs, OutputFormat};

#[derive(Args)]
pub struct TagsArgs {
    /// Environment name or stack path
    #[arg(short, long)]
    env: String,

    /// Component label (core, networking, security, ...)
    #[arg(short, long)]
    component: String,

    /// Tag overrides, applied last
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    #[command(flatten)]
    context: ContextArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub fn execute(args: TagsArgs) -> Result<()> {
    let environment = Environment::from_stack_name(&args.env)?;
    let context = args.context.tag_context(environment);
    let overrides = parse_overrides(&args.set)?;

    let tags = compose_tags(
        &context,
        environment,
        &args.component,
        if overrides.is_empty() {
            None
        } else {
            Some(&overrides)
        },
    )?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tags)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&tags)?),
        OutputFormat::Text => {
            for (key, value) in tags.iter() {
                println!("{key:<12} {value}");
            }
        }
    }

    Ok(())
}

fn parse_overrides(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut overrides = BTreeMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid tag override '{pair}' (expected KEY=VALUE)"))?;
        overrides.insert(key.to_string(), value.to_string());
    }
    Ok(overrides)
}
