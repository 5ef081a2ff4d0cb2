//! Core orchestration layer for shell-hook
//!
//! Wraps the pure block editing in `hook-blocks` with the safety protocol
//! needed to touch a user's shell startup files:
//!
//! - **Backups**: every file is copied aside before it is modified
//! - **Validation**: the result is syntax-checked with the shell's own parser
//! - **Rollback**: a failed check restores the backup byte-for-byte
//!
//! # Architecture
//!
//! ```text
//!                  hook-cli
//!                     |
//!                 hook-core
//!                     |
//!          +----------+----------+
//!          |                     |
//!       hook-fs             hook-blocks
//! ```

pub mod backup;
pub mod diff;
pub mod error;
pub mod patcher;
pub mod profile;
pub mod shell;
pub mod validate;

pub use backup::{BackupHandle, BackupManager};
pub use error::{Error, Result};
pub use patcher::{
    FileOutcome, FileReport, HookEnvironment, InstallOptions, InstallOutcome, InstallReport,
    Patcher, Stage, StatusEntry, StatusReport, UninstallOptions, UninstallReport,
};
pub use profile::HookProfile;
pub use shell::ShellDialect;
pub use validate::{CommandValidator, SyntaxValidator, UnavailablePolicy, Validation};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_missing_backup_displays_path() {
        let error = Error::MissingBackup {
            path: PathBuf::from("/home/user/.zshrc"),
        };

        let display = format!("{}", error);
        assert!(
            display.contains("/home/user/.zshrc"),
            "Error display should contain the path, got: {}",
            display
        );
    }

    #[test]
    fn missing_profile_file_is_a_filesystem_error() {
        let result = HookProfile::load(std::path::Path::new("/nonexistent/profile.toml"));
        assert!(matches!(result, Err(Error::Fs(_))));
    }
}
