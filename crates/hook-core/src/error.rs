//! Error types for hook-core

use std::path::PathBuf;

/// Result type for hook-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hook-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The user's home directory could not be determined
    #[error("Could not determine the home directory")]
    HomeNotFound,

    /// A hook profile failed validation
    #[error("Invalid profile: {message}")]
    InvalidProfile { message: String },

    /// A rollback was requested for a file that was never backed up
    #[error("No backup was taken for {path} in this run")]
    MissingBackup { path: PathBuf },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from hook-fs
    #[error(transparent)]
    Fs(#[from] hook_fs::Error),

    /// Block error from hook-blocks
    #[error(transparent)]
    Blocks(#[from] hook_blocks::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
