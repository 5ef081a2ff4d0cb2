//! Durable I/O operations for shell startup files

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Resolve the file that a write to `path` should actually land on.
///
/// rc files are frequently symlinks into a dotfiles checkout. Renaming a
/// temp file over the link would replace it with a regular file, so writes
/// go to the link target instead.
pub fn resolve_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename in the target's directory. The temp file is
/// fsync'd before the rename and inherits the permissions of the file it
/// replaces.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let target = resolve_target(path);

    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(
        ".{}.{}.tmp",
        target
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = target.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    if let Ok(meta) = fs::metadata(&target) {
        temp_file
            .set_permissions(meta.permissions())
            .map_err(|e| Error::io(&temp_path, e))?;
    }

    let written = temp_file
        .write_all(content)
        .and_then(|_| temp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }
    drop(temp_file);

    fs::rename(&temp_path, &target).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(&target, e)
    })?;

    tracing::debug!(path = %target.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => Error::NotUtf8 {
            path: path.to_path_buf(),
        },
        _ => Error::io(path, e),
    })
}

/// Read text content, treating a missing file as empty.
pub fn read_text_or_empty(path: &Path) -> Result<String> {
    match read_text(path) {
        Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            Ok(String::new())
        }
        other => other,
    }
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Copy `from` to `to` and fsync the copy before returning.
///
/// Fails if `to` already exists.
pub fn copy_durable(from: &Path, to: &Path) -> Result<u64> {
    let bytes = fs::read(from).map_err(|e| Error::io(from, e))?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(to)
        .map_err(|e| Error::io(to, e))?;
    file.write_all(&bytes).map_err(|e| Error::io(to, e))?;
    file.sync_all().map_err(|e| Error::io(to, e))?;

    Ok(bytes.len() as u64)
}

/// Create a directory and all its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Create an empty file if nothing exists at `path`.
///
/// Returns `true` if the file was created.
pub fn touch(path: &Path) -> Result<bool> {
    if fs::symlink_metadata(path).is_ok() {
        return Ok(false);
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }
    File::create(path).map_err(|e| Error::io(path, e))?;
    Ok(true)
}

/// Remove a file, treating a missing file as success.
///
/// Returns `true` if a file was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}
