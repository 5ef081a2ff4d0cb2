//! Error types for hook-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from hook-core
    #[error(transparent)]
    Core(#[from] hook_core::Error),

    /// Error from hook-fs
    #[error(transparent)]
    Fs(#[from] hook_fs::Error),

    /// Install was rejected by the syntax check and undone
    #[error("Validation failed. Restored {} from backup: {detail}", path.display())]
    RolledBack { path: PathBuf, detail: String },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
