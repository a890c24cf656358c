//! Cirrus CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Configuration error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const CONFIGURATION_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.quiet {
        "cirrus=error"
    } else if cli.verbose {
        "cirrus=debug"
    } else {
        "cirrus=info"
    };

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive(default_level.parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Environments(args) => commands::environments::execute(args),
        Commands::Settings(args) => commands::settings::execute(args),
        Commands::Name(args) => commands::name::execute(args),
        Commands::Tags(args) => commands::tags::execute(args),
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Map library errors to exit codes at the boundary.
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<cirrus_naming::ValidationError>().is_some() {
        return ExitCodes::VALIDATION_FAILURE;
    }
    if e.downcast_ref::<cirrus_config::ConfigError>().is_some() {
        return ExitCodes::CONFIGURATION_ERROR;
    }
    if let Some(plan_error) = e.downcast_ref::<cirrus_plan::PlanError>() {
        return match plan_error {
            cirrus_plan::PlanError::Config(_) => ExitCodes::CONFIGURATION_ERROR,
            cirrus_plan::PlanError::Validation(_) => ExitCodes::VALIDATION_FAILURE,
        };
    }
    if e.downcast_ref::<clap::Error>().is_some() {
        return ExitCodes::INVALID_ARGS;
    }
    ExitCodes::GENERAL_ERROR
}
