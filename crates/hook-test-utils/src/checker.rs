//! Fake shell executables standing in for `zsh -n` and friends.
//!
//! Each fake is a `/bin/sh` script that ignores its arguments, optionally
//! prints a message to stderr, and exits with a fixed status. Put
//! [`FakeChecker::bin_dir`] on `PATH` for the process under test.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A directory of fake shell executables.
pub struct FakeChecker {
    temp_dir: TempDir,
}

impl Default for FakeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeChecker {
    /// Create an empty bin directory; no shell is "installed" yet.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn bin_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Install a fake `name` that accepts every file.
    pub fn passing(&self, name: &str) -> PathBuf {
        self.install(name, 0, "")
    }

    /// Install a fake `name` that rejects every file with `message`.
    pub fn failing(&self, name: &str, message: &str) -> PathBuf {
        self.install(name, 1, message)
    }

    fn install(&self, name: &str, status: i32, message: &str) -> PathBuf {
        let path = self.bin_dir().join(name);
        let mut script = String::from("#!/bin/sh\n");
        if !message.is_empty() {
            script.push_str(&format!("echo '{}' >&2\n", message.replace('\'', "")));
        }
        script.push_str(&format!("exit {}\n", status));
        fs::write(&path, script).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }

        path
    }
}
