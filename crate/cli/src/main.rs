use std::process;

use clap::{Parser, Subcommand};
use cosmian_logger::{LoggingConfig, log_init_with_config};
use cosmian_validation_cli::{
    actions::{resolve::ResolveAction, validate::ValidateAction},
    error::result::CliResult,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: CliCommands,
}

#[derive(Subcommand)]
enum CliCommands {
    Validate(ValidateAction),
    Resolve(ResolveAction),
}

fn main() {
    if let Some(err) = main_().err() {
        eprintln!("ERROR: {err}");
        process::exit(1);
    }
}

fn main_() -> CliResult<()> {
    let cli = Cli::parse();
    log_init_with_config(&cli.logging, "warn");

    match cli.command {
        CliCommands::Validate(action) => action.process(),
        CliCommands::Resolve(action) => action.process(),
    }
}
