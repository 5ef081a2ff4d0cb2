//! Best-effort syntax validation of shell startup files

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::shell::ShellDialect;

/// Outcome of checking a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The checker ran and accepted the file
    Passed,
    /// The checker ran and rejected the file
    Failed { detail: String },
    /// No checker could be run for this dialect
    Unavailable { reason: String },
}

/// How to treat [`Validation::Unavailable`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnavailablePolicy {
    /// Keep the change and warn
    #[default]
    Proceed,
    /// Roll the change back, as for a failed check
    Rollback,
}

impl UnavailablePolicy {
    /// Whether a file with this validation outcome may be kept.
    pub fn accepts(&self, validation: &Validation) -> bool {
        match validation {
            Validation::Passed => true,
            Validation::Failed { .. } => false,
            Validation::Unavailable { .. } => matches!(self, Self::Proceed),
        }
    }
}

/// Checks whether a file parses for a given shell.
pub trait SyntaxValidator {
    fn validate(&self, path: &Path, dialect: ShellDialect) -> Validation;
}

/// Runs the shell's own parser in no-exec mode (`zsh -n`, `bash -n`,
/// `fish --no-execute`) and blocks until it exits.
#[derive(Debug, Clone, Default)]
pub struct CommandValidator {
    search_path: Option<OsString>,
}

impl CommandValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look the checker up on `search_path` instead of the inherited `PATH`.
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }
}

impl SyntaxValidator for CommandValidator {
    fn validate(&self, path: &Path, dialect: ShellDialect) -> Validation {
        let (program, args) = dialect.checker();

        let mut command = Command::new(program);
        command.args(args).arg(path).stdin(Stdio::null());
        if let Some(search_path) = &self.search_path {
            command.env("PATH", search_path);
        }

        let output = command.output();

        match output {
            Ok(out) if out.status.success() => {
                tracing::debug!(%dialect, path = %path.display(), "Syntax check passed");
                Validation::Passed
            }
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
                let detail = if stderr.is_empty() {
                    format!("{} exited with status {:?}", program, out.status.code())
                } else {
                    stderr
                };
                tracing::debug!(%dialect, path = %path.display(), %detail, "Syntax check failed");
                Validation::Failed { detail }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Validation::Unavailable {
                reason: format!("{} not found on PATH", program),
            },
            Err(e) => Validation::Unavailable {
                reason: format!("could not run {}: {}", program, e),
            },
        }
    }
}
