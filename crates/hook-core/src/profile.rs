//! Hook profiles
//!
//! A profile carries everything that distinguishes one tool's hook from
//! another's: branding, marker lines, legacy formats to migrate away from and
//! where the hook file lives. Profiles are plain TOML:
//!
//! ```toml
//! tool_name = "bg-task"
//! hook_dir = ".config/bg-task"
//! hook_file = "bg-task.zsh"
//!
//! [markers]
//! start = "# >>> bg-task start >>>"
//! end = "# <<< bg-task end <<<"
//!
//! [legacy_definition]
//! anchor = "# Enhanced bg function"
//! terminator_prefix = "alias begin="
//! ```

use std::path::{Path, PathBuf};

use hook_blocks::{AnchoredDefinition, LegacyRules, MarkerPair};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::shell::ShellDialect;
use crate::validate::UnavailablePolicy;

/// Start and end marker lines as written in a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub start: String,
    pub end: String,
}

impl MarkerConfig {
    pub fn to_pair(&self) -> Result<MarkerPair> {
        Ok(MarkerPair::new(&self.start, &self.end)?)
    }
}

/// Inline definition left behind by old installers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyDefinitionConfig {
    pub anchor: String,
    pub terminator_prefix: String,
}

/// Parameters of one tool's hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookProfile {
    /// Tool name, used in backup file names and the block comment
    pub tool_name: String,
    /// Current marker pair
    pub markers: MarkerConfig,
    /// Marker pairs written by earlier versions
    #[serde(default)]
    pub legacy_markers: Vec<MarkerConfig>,
    /// Inline definition written by earlier versions
    #[serde(default)]
    pub legacy_definition: Option<LegacyDefinitionConfig>,
    /// Directory of the hook file, relative to the home directory
    pub hook_dir: String,
    /// File name of the hook file
    pub hook_file: String,
    /// What to do when no syntax checker is installed
    #[serde(default)]
    pub unavailable_validator: UnavailablePolicy,
}

impl Default for HookProfile {
    fn default() -> Self {
        Self {
            tool_name: "bg-task".into(),
            markers: MarkerConfig {
                start: "# >>> bg-task start >>>".into(),
                end: "# <<< bg-task end <<<".into(),
            },
            legacy_markers: Vec::new(),
            legacy_definition: Some(LegacyDefinitionConfig {
                anchor: "# Enhanced bg function".into(),
                terminator_prefix: "alias begin=".into(),
            }),
            hook_dir: ".config/bg-task".into(),
            hook_file: "bg-task.zsh".into(),
            unavailable_validator: UnavailablePolicy::default(),
        }
    }
}

impl HookProfile {
    /// Parse and validate a profile from TOML
    pub fn parse(content: &str) -> Result<Self> {
        let profile: Self = toml::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load and validate a profile file
    pub fn load(path: &Path) -> Result<Self> {
        let content = hook_fs::io::read_text(path)?;
        Self::parse(&content)
    }

    /// Check every field that ends up in a path or a marker.
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.tool_name, "tool_name")?;
        validate_identifier(&self.hook_file, "hook_file")?;

        let hook_dir = Path::new(&self.hook_dir);
        if self.hook_dir.is_empty()
            || hook_dir.is_absolute()
            || self.hook_dir.split('/').any(|c| c == "..")
        {
            return Err(Error::InvalidProfile {
                message: format!(
                    "hook_dir must be a relative path inside the home directory, got {:?}",
                    self.hook_dir
                ),
            });
        }
        if !self
            .hook_dir
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
        {
            return Err(Error::InvalidProfile {
                message: format!(
                    "hook_dir may only contain ASCII letters, digits, '-', '_', '.' and '/', got {:?}",
                    self.hook_dir
                ),
            });
        }

        let markers = self.markers()?;
        for dialect in ShellDialect::ALL {
            markers
                .check_body(&self.snippet(dialect))
                .map_err(|e| Error::InvalidProfile {
                    message: format!("{} snippet: {}", dialect, e),
                })?;
        }

        self.legacy_rules()?;
        Ok(())
    }

    pub fn markers(&self) -> Result<MarkerPair> {
        self.markers.to_pair()
    }

    pub fn legacy_rules(&self) -> Result<LegacyRules> {
        let marker_pairs = self
            .legacy_markers
            .iter()
            .map(MarkerConfig::to_pair)
            .collect::<Result<Vec<_>>>()?;

        Ok(LegacyRules {
            definition: self
                .legacy_definition
                .as_ref()
                .map(|d| AnchoredDefinition {
                    anchor: d.anchor.clone(),
                    terminator_prefix: d.terminator_prefix.clone(),
                }),
            marker_pairs,
        })
    }

    /// Location of the hook file under `home`
    pub fn hook_path(&self, home: &Path) -> PathBuf {
        home.join(&self.hook_dir).join(&self.hook_file)
    }

    /// Hook file path as the shell should spell it, relative to `$HOME`
    pub fn hook_shell_path(&self) -> String {
        format!(
            "$HOME/{}/{}",
            self.hook_dir.trim_end_matches('/'),
            self.hook_file
        )
    }

    /// Body placed between the markers for `dialect`.
    ///
    /// Rendering depends only on the profile and the dialect.
    pub fn snippet(&self, dialect: ShellDialect) -> String {
        let path = self.hook_shell_path();
        match dialect {
            ShellDialect::Zsh | ShellDialect::Bash => format!(
                "# {tool}: source function\nif [ -f \"{path}\" ]; then\n  source \"{path}\"\nfi",
                tool = self.tool_name,
            ),
            ShellDialect::Fish => format!(
                "# {tool}: source function\nif test -f \"{path}\"\n  source \"{path}\"\nend",
                tool = self.tool_name,
            ),
        }
    }
}

/// Validate that a name is safe to embed in a file name.
fn validate_identifier(value: &str, field: &str) -> Result<()> {
    let valid = !value.is_empty()
        && !value.starts_with('.')
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidProfile {
            message: format!(
                "{} may only contain ASCII letters, digits, '-', '_' and '.', got {:?}",
                field, value
            ),
        })
    }
}
