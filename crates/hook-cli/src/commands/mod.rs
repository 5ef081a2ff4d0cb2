//! Command implementations for hook-cli

pub mod install;
pub mod status;
pub mod uninstall;

pub use install::run_install;
pub use status::run_status;
pub use uninstall::run_uninstall;

use std::path::Path;

use colored::Colorize;
use hook_core::Validation;
use hook_core::diff::unified_diff;

/// Print a colored unified diff of a planned change.
fn print_diff(path: &Path, before: &str, after: &str) {
    let diff = unified_diff(path, before, after);
    if diff.is_empty() {
        println!("  {} {}", "no changes:".dimmed(), path.display());
        return;
    }

    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
}

/// Warn when a change was kept without a syntax check.
fn note_unchecked(path: &Path, validation: &Validation) {
    if let Validation::Unavailable { reason } = validation {
        println!(
            "{} {}; {} was not syntax checked",
            "warning:".yellow().bold(),
            reason,
            path.display()
        );
    }
}

/// Human readable detail of a rejected validation.
fn rejection_detail(validation: &Validation) -> String {
    match validation {
        Validation::Passed => "passed".to_string(),
        Validation::Failed { detail } => detail.clone(),
        Validation::Unavailable { reason } => format!("{} (strict mode)", reason),
    }
}
