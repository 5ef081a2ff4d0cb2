//! Backups of shell startup files
//!
//! Before a startup file is modified it is copied next to itself as
//! `<file>.<tool>.bak.<timestamp>`, where the timestamp is the UTC time in
//! ISO 8601 with `:` and `.` replaced by `-`
//! (e.g. `.zshrc.bg-task.bak.2026-10-19T08-30-00-123Z`). Backups are never
//! modified or deleted by this crate.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use hook_fs::io;

use crate::Result;

/// A backup taken before a file was modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupHandle {
    original: PathBuf,
    backup: PathBuf,
}

impl BackupHandle {
    /// The file that was backed up
    pub fn original(&self) -> &Path {
        &self.original
    }

    /// The backup copy
    pub fn path(&self) -> &Path {
        &self.backup
    }

    /// Overwrite the original file with the backup's bytes.
    pub fn restore(&self) -> Result<()> {
        let bytes = std::fs::read(&self.backup).map_err(|e| hook_fs::Error::io(&self.backup, e))?;
        io::write_atomic(&self.original, &bytes)?;
        tracing::info!(
            path = %self.original.display(),
            backup = %self.backup.display(),
            "Restored from backup"
        );
        Ok(())
    }
}

/// Creates sibling backups of files for one tool
#[derive(Debug, Clone)]
pub struct BackupManager {
    tool: String,
}

impl BackupManager {
    /// Create a new BackupManager; `tool` becomes part of every backup name
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    /// Backup file name for `path` at time `at`, before collision handling
    pub fn backup_path_for(&self, path: &Path, at: DateTime<Utc>) -> PathBuf {
        let stamp = at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-");

        let mut name = OsString::from(path.as_os_str());
        name.push(format!(".{}.bak.{}", self.tool, stamp));
        PathBuf::from(name)
    }

    /// Back up `path` now.
    ///
    /// Returns `None` if the file does not exist. The copy is fsync'd before
    /// this returns.
    pub fn backup(&self, path: &Path) -> Result<Option<BackupHandle>> {
        self.backup_at(path, Utc::now())
    }

    /// Back up `path` as if it were time `at`.
    ///
    /// Two backups in the same millisecond get `-1`, `-2`, ... suffixes so an
    /// earlier backup is never overwritten.
    pub fn backup_at(&self, path: &Path, at: DateTime<Utc>) -> Result<Option<BackupHandle>> {
        if !path.exists() {
            return Ok(None);
        }

        let base = self.backup_path_for(path, at);
        let mut backup = base.clone();
        let mut attempt = 0;
        while backup.exists() {
            attempt += 1;
            let mut name = OsString::from(base.as_os_str());
            name.push(format!("-{}", attempt));
            backup = PathBuf::from(name);
        }

        let bytes = io::copy_durable(path, &backup)?;
        tracing::debug!(
            path = %path.display(),
            backup = %backup.display(),
            bytes,
            "Created backup"
        );

        Ok(Some(BackupHandle {
            original: path.to_path_buf(),
            backup,
        }))
    }
}
