//! [`TestHome`] fixture for shell-hook test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary home directory with helpers for writing and inspecting
/// shell startup files.
///
/// # Example
///
/// ```rust,no_run
/// use hook_test_utils::TestHome;
///
/// let home = TestHome::new();
/// home.write(".zshrc", "alias ll='ls -la'\n");
/// assert_eq!(home.read(".zshrc"), "alias ll='ls -la'\n");
/// assert!(home.backups_of(".zshrc").is_empty());
/// ```
pub struct TestHome {
    temp_dir: TempDir,
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHome {
    /// Create an empty temporary home directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the home directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the home directory.
    pub fn join(&self, rel: &str) -> PathBuf {
        self.path().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Read `rel` as text. Panics if missing.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.join(rel))
            .unwrap_or_else(|e| panic!("TestHome::read({}): {}", rel, e))
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.join(rel).exists()
    }

    /// Backups of `rel` created next to it, sorted by name.
    ///
    /// Matches any sibling named `<file>.<tool>.bak.<stamp>`.
    pub fn backups_of(&self, rel: &str) -> Vec<PathBuf> {
        let path = self.join(rel);
        let Some(dir) = path.parent() else {
            return Vec::new();
        };
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            return Vec::new();
        };
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };

        let prefix = format!("{}.", name);
        let mut backups: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy())
                    .is_some_and(|n| n.starts_with(&prefix) && n.contains(".bak."))
            })
            .collect();
        backups.sort();
        backups
    }
}
