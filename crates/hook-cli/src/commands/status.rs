//! Status command implementation

use colored::Colorize;
use hook_blocks::Location;
use hook_core::{Patcher, StatusEntry, SyntaxValidator};

use crate::context::Context;
use crate::error::Result;

/// Print where the hook is installed
pub fn run_status(ctx: &Context, validator: &dyn SyntaxValidator) -> Result<()> {
    let status = Patcher::new(&ctx.profile, &ctx.env, validator).status()?;

    println!(
        "{} {} hook status\n",
        "=>".blue().bold(),
        ctx.profile.tool_name.cyan()
    );
    println!("  {:<6} {:<18} {}", "SHELL".bold(), "STATE".bold(), "FILE".bold());
    println!("  {}", "\u{2500}".repeat(55).dimmed());

    for entry in &status.entries {
        let marker = if entry.selected { "*" } else { " " };
        println!(
            "{} {:<6} {:<18} {}",
            marker,
            entry.dialect.to_string(),
            describe(entry),
            entry.path.display()
        );
        if entry.legacy_blocks > 0 || entry.legacy_definition {
            println!(
                "         {} legacy install present; run install to migrate",
                "note:".yellow().bold()
            );
        }
    }

    let hook_state = if status.hook_file_exists {
        "present".green()
    } else {
        "missing".dimmed()
    };
    println!(
        "\n  Hook file: {} ({})",
        status.hook_file.display(),
        hook_state
    );

    Ok(())
}

fn describe(entry: &StatusEntry) -> colored::ColoredString {
    if !entry.exists {
        return "no file".dimmed();
    }
    match entry.location {
        Location::Found(_) => "installed".green(),
        Location::Absent => "not installed".normal(),
        Location::StartOnly(_) | Location::EndOnly(_) | Location::Reversed { .. } => {
            "malformed markers".yellow()
        }
    }
}
