//! Install command implementation

use std::path::Path;

use colored::Colorize;
use hook_blocks::{BlockChange, LegacyArtifact};
use hook_core::{InstallOptions, InstallOutcome, Patcher, SyntaxValidator};

use super::{note_unchecked, print_diff, rejection_detail};
use crate::context::Context;
use crate::error::{CliError, Result};

/// Install the hook for the user's shell.
///
/// A rejected startup file is restored and reported as an error.
pub fn run_install(
    ctx: &Context,
    template_path: &Path,
    validator: &dyn SyntaxValidator,
    dry_run: bool,
) -> Result<()> {
    let template = hook_fs::io::read_text(template_path)?;
    let tool = &ctx.profile.tool_name;

    println!("{} Installing {}...", "=>".blue().bold(), tool.cyan());

    let report = Patcher::new(&ctx.profile, &ctx.env, validator)
        .install(&template, InstallOptions { dry_run })?;

    for artifact in &report.legacy_removed {
        println!(
            "{} Migrating {} in {}",
            "note:".yellow().bold(),
            describe_legacy(artifact),
            report.rc_file.display()
        );
    }

    match &report.outcome {
        InstallOutcome::Planned => {
            print_diff(&report.rc_file, &report.before, &report.after);
            println!(
                "{} Dry run: would write hook file {}",
                "note:".yellow().bold(),
                report.hook_file.display()
            );
            Ok(())
        }
        InstallOutcome::RolledBack { validation } => Err(CliError::RolledBack {
            path: report.rc_file.clone(),
            detail: rejection_detail(validation),
        }),
        InstallOutcome::Installed { validation } => {
            note_unchecked(&report.rc_file, validation);

            let message = match report.change {
                BlockChange::Unchanged => "Source snippet already present in",
                BlockChange::Replaced => "Updated source snippet in",
                BlockChange::Inserted => "Added source snippet to",
            };
            println!(
                "{} {} {}",
                "\u{2713}".green().bold(),
                message,
                report.rc_file.display()
            );
            println!("  Hook file: {}", report.hook_file.display().to_string().dimmed());
            if let Some(backup) = &report.backup {
                println!("  Backup:    {}", backup.display().to_string().dimmed());
            }

            println!(
                "\n{} Restart your terminal or run: {}",
                "hint:".cyan().bold(),
                format!("source {}", report.rc_file.display()).cyan()
            );
            Ok(())
        }
    }
}

fn describe_legacy(artifact: &LegacyArtifact) -> String {
    match artifact {
        LegacyArtifact::Definition {
            first_line,
            last_line,
        } => format!("legacy inline definition (lines {}-{})", first_line, last_line),
        LegacyArtifact::MarkerBlock {
            start_marker,
            count,
        } => format!("{} legacy block(s) starting with {:?}", count, start_marker),
    }
}
