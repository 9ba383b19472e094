//! fe-kit CLI
//!
//! Adds and upgrades front-end modules in a project's package.json, then
//! hands off to the package manager.

mod cli;
mod commands;
mod context;
mod error;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, normalize_args};
use context::CommandContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        // Unrecognized subcommands fall back to usage with a success status
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => {
            Cli::command().print_help()?;
            return Ok(());
        }
        Err(e) => e.exit(),
    };

    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if command == Commands::Version {
        return commands::run_version();
    }

    let ctx = CommandContext::resolve(cli.dir.as_deref(), cli.package_manager)?;
    execute_command(&ctx, command)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(e) = result {
        eprintln!("{} could not set up logging: {}", "warning:".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(ctx: &CommandContext, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Add { modules, dry_run } => commands::run_add(ctx, &modules, dry_run),
        Commands::Upgrade { modules, dry_run } => commands::run_upgrade(ctx, &modules, dry_run),
        Commands::List { json } => commands::run_list(ctx, json),
        Commands::Version => commands::run_version(),
    }
}
