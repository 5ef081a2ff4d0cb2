//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// shell-hook - Install a sourced hook into your shell startup file, safely
#[derive(Parser, Debug)]
#[command(name = "shell-hook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hook profile (TOML). Defaults to the built-in bg-task profile
    #[arg(long, global = true, env = "SHELL_HOOK_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Home directory to operate on instead of the current user's
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install the hook file and add the source block to your shell config
    ///
    /// The startup file is picked from $SHELL (zsh, bash or fish). It is
    /// backed up first and restored if the result fails a syntax check.
    ///
    /// Examples:
    ///   shell-hook install -t bg-function.sh
    ///   shell-hook install -t bg-function.sh --shell /bin/bash --dry-run
    Install {
        /// File written verbatim as the hook file
        #[arg(short, long, env = "SHELL_HOOK_TEMPLATE")]
        template: Option<PathBuf>,

        /// Login shell used to pick the startup file
        #[arg(long, env = "SHELL")]
        shell: Option<String>,

        /// Show the change without applying it
        #[arg(long)]
        dry_run: bool,

        /// Roll back when no syntax checker is installed
        #[arg(long)]
        strict: bool,
    },

    /// Remove the source block from every shell config and delete the hook file
    Uninstall {
        /// Show the changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Roll back when no syntax checker is installed
        #[arg(long)]
        strict: bool,
    },

    /// Show where the hook is installed
    Status {
        /// Login shell used to pick the startup file
        #[arg(long, env = "SHELL")]
        shell: Option<String>,
    },
}
