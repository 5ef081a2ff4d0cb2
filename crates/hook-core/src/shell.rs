//! Shell dialects and their startup files

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A shell whose startup file can carry a hook block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellDialect {
    Zsh,
    Bash,
    Fish,
}

impl fmt::Display for ShellDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl ShellDialect {
    /// Every dialect, in the order candidate files are inspected.
    pub const ALL: [ShellDialect; 3] = [Self::Zsh, Self::Bash, Self::Fish];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Zsh => "zsh",
            Self::Bash => "bash",
            Self::Fish => "fish",
        }
    }

    /// Parse a dialect from its name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == s)
    }

    /// Pick the dialect named by a `$SHELL` value.
    ///
    /// Matches on substrings so `/usr/local/bin/zsh` and `bash-5.2` both
    /// resolve. Anything unrecognised falls back to zsh.
    pub fn from_shell_env(shell: Option<&str>) -> Self {
        let shell = shell.unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|d| shell.contains(d.name()))
            .unwrap_or(Self::Zsh)
    }

    /// Startup file of this dialect, relative to the home directory.
    pub fn rc_relative(&self) -> &'static str {
        match self {
            Self::Zsh => ".zshrc",
            Self::Bash => ".bashrc",
            Self::Fish => ".config/fish/config.fish",
        }
    }

    pub fn rc_file(&self, home: &Path) -> PathBuf {
        home.join(self.rc_relative())
    }

    /// Program and flags that parse a file without executing it.
    pub fn checker(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Zsh => ("zsh", &["-n"]),
            Self::Bash => ("bash", &["-n"]),
            Self::Fish => ("fish", &["--no-execute"]),
        }
    }

    /// Every candidate startup file under `home`, in inspection order.
    pub fn candidates(home: &Path) -> Vec<(ShellDialect, PathBuf)> {
        Self::ALL
            .into_iter()
            .map(|d| (d, d.rc_file(home)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("/bin/zsh"), ShellDialect::Zsh)]
    #[case(Some("/usr/local/bin/bash"), ShellDialect::Bash)]
    #[case(Some("/opt/homebrew/bin/fish"), ShellDialect::Fish)]
    #[case(Some("/bin/tcsh"), ShellDialect::Zsh)]
    #[case(None, ShellDialect::Zsh)]
    fn test_from_shell_env(#[case] shell: Option<&str>, #[case] expected: ShellDialect) {
        assert_eq!(ShellDialect::from_shell_env(shell), expected);
    }

    #[test]
    fn test_candidates_order() {
        let home = Path::new("/home/user");
        let candidates = ShellDialect::candidates(home);
        assert_eq!(
            candidates,
            vec![
                (ShellDialect::Zsh, PathBuf::from("/home/user/.zshrc")),
                (ShellDialect::Bash, PathBuf::from("/home/user/.bashrc")),
                (
                    ShellDialect::Fish,
                    PathBuf::from("/home/user/.config/fish/config.fish")
                ),
            ]
        );
    }

    #[test]
    fn test_parse_roundtrip_names() {
        for dialect in ShellDialect::ALL {
            assert_eq!(ShellDialect::parse(&dialect.to_string()), Some(dialect));
        }
        assert_eq!(ShellDialect::parse("tcsh"), None);
    }
}
