//! shell-hook CLI
//!
//! Installs and removes a marker-delimited source block in shell startup files.

mod cli;
mod commands;
mod context;
mod error;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use hook_core::CommandValidator;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use context::Context;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {}", e)))?;
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.profile, cli.home),
        None => {
            println!(
                "{} Safe installer for shell startup hooks",
                "shell-hook".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "shell-hook --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(
    cmd: Commands,
    profile: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<()> {
    let validator = CommandValidator::new();

    match cmd {
        Commands::Install {
            template,
            shell,
            dry_run,
            strict,
        } => {
            let template = template.ok_or_else(|| {
                CliError::user(
                    "No hook template given. Pass --template or set SHELL_HOOK_TEMPLATE.",
                )
            })?;
            let ctx = Context::load(profile.as_deref(), home, shell)?.strict(strict);
            commands::run_install(&ctx, &template, &validator, dry_run)
        }
        Commands::Uninstall { dry_run, strict } => {
            let ctx = Context::load(profile.as_deref(), home, None)?.strict(strict);
            commands::run_uninstall(&ctx, &validator, dry_run)
        }
        Commands::Status { shell } => {
            let ctx = Context::load(profile.as_deref(), home, shell)?;
            commands::run_status(&ctx, &validator)
        }
    }
}
