//! Uninstall command implementation

use colored::Colorize;
use hook_core::{FileOutcome, Patcher, SyntaxValidator, UninstallOptions};

use super::{note_unchecked, print_diff, rejection_detail};
use crate::context::Context;
use crate::error::Result;

/// Remove the hook from every shell config.
///
/// A file that fails its syntax check is restored and reported; the other
/// files are still processed and the command succeeds.
pub fn run_uninstall(
    ctx: &Context,
    validator: &dyn SyntaxValidator,
    dry_run: bool,
) -> Result<()> {
    let tool = &ctx.profile.tool_name;
    println!("{} Uninstalling {}...", "=>".blue().bold(), tool.cyan());

    let report = Patcher::new(&ctx.profile, &ctx.env, validator)
        .uninstall(UninstallOptions { dry_run })?;

    for file in &report.files {
        match &file.outcome {
            FileOutcome::Missing | FileOutcome::NothingFound => {}
            FileOutcome::Planned => print_diff(&file.path, &file.before, &file.after),
            FileOutcome::Removed { validation } => {
                note_unchecked(&file.path, validation);
                println!(
                    "{} Removed {} snippet from {}",
                    "\u{2713}".green().bold(),
                    tool,
                    file.path.display()
                );
            }
            FileOutcome::RolledBack { validation } => {
                println!(
                    "{} Validation failed; restored {}",
                    "warning:".yellow().bold(),
                    file.path.display()
                );
                println!("  {}", rejection_detail(validation).dimmed());
            }
        }
    }

    if report.hook_file_removed {
        let verb = if dry_run { "Would remove" } else { "Removed" };
        println!(
            "{} {} hook file {}",
            "\u{2713}".green().bold(),
            verb,
            report.hook_file.display()
        );
    }

    if report.nothing_found() {
        println!(
            "{} No {} snippet found in shell configs",
            "note:".yellow().bold(),
            tool
        );
    } else if !dry_run {
        println!("\n{} {} uninstalled", "\u{2713}".green().bold(), tool);
        println!(
            "{} Restart your terminal or run: {}",
            "hint:".cyan().bold(),
            "source ~/.zshrc (or your shell config)".cyan()
        );
    }

    Ok(())
}
