//! Profile and environment resolution shared by all commands

use std::path::{Path, PathBuf};

use hook_core::{HookEnvironment, HookProfile, UnavailablePolicy};

use crate::error::Result;

/// Everything a command needs to know about where and what to patch
#[derive(Debug, Clone)]
pub struct Context {
    pub profile: HookProfile,
    pub env: HookEnvironment,
}

impl Context {
    /// Resolve the profile (file or built-in) and the home directory.
    ///
    /// An explicit `shell` wins over the `$SHELL` of the process.
    pub fn load(
        profile_path: Option<&Path>,
        home: Option<PathBuf>,
        shell: Option<String>,
    ) -> Result<Self> {
        let profile = match profile_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading profile");
                HookProfile::load(path)?
            }
            None => HookProfile::default(),
        };

        let env = match home {
            Some(home) => HookEnvironment::new(home, shell),
            None => {
                let detected = HookEnvironment::detect()?;
                HookEnvironment::new(detected.home, shell.or(detected.shell))
            }
        };

        Ok(Self { profile, env })
    }

    /// Treat a missing syntax checker as a failure.
    pub fn strict(mut self, strict: bool) -> Self {
        if strict {
            self.profile.unavailable_validator = UnavailablePolicy::Rollback;
        }
        self
    }
}
