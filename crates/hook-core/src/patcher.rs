//! Install, uninstall and status workflows
//!
//! Every mutation of a startup file follows the same protocol:
//!
//! ```text
//! Start -> BackedUp -> Migrated -> Patched -> Validated -> Done
//!                                                      \-> RolledBack
//! ```
//!
//! The block edits themselves are pure (`hook-blocks`); this module adds the
//! file I/O, backups, validation and rollback around them. Per-run state is a
//! `RunState` value owned by the workflow, never a global. The stages each
//! file went through are returned on its report.

use std::path::{Path, PathBuf};

use hook_blocks::legacy::strip_definition;
use hook_blocks::{
    BlockChange, LegacyArtifact, Location, MarkerPair, locate, remove_all, strip_legacy,
    upsert_block,
};
use hook_fs::io;

use crate::backup::{BackupHandle, BackupManager};
use crate::error::{Error, Result};
use crate::profile::HookProfile;
use crate::shell::ShellDialect;
use crate::validate::{SyntaxValidator, Validation};

/// Where the workflows run: the home directory and the user's `$SHELL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEnvironment {
    pub home: PathBuf,
    pub shell: Option<String>,
}

impl HookEnvironment {
    pub fn new(home: impl Into<PathBuf>, shell: Option<String>) -> Self {
        Self {
            home: home.into(),
            shell,
        }
    }

    /// Read the home directory and `$SHELL` from the process environment
    pub fn detect() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeNotFound)?;
        Ok(Self::new(home, std::env::var("SHELL").ok()))
    }

    /// Dialect install targets
    pub fn dialect(&self) -> ShellDialect {
        ShellDialect::from_shell_env(self.shell.as_deref())
    }
}

/// Progress of one file through the mutation protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    BackedUp,
    Migrated,
    Patched,
    Validated,
    Done,
    RolledBack,
}

/// State of a single run: the backups taken and how far each file got.
#[derive(Debug, Default)]
struct RunState {
    backups: Vec<BackupHandle>,
    stages: Vec<(PathBuf, Stage)>,
}

impl RunState {
    fn backup_for(&self, path: &Path) -> Option<&BackupHandle> {
        self.backups.iter().find(|b| b.original() == path)
    }

    /// Stages `path` went through, in order
    fn trail(&self, path: &Path) -> Vec<Stage> {
        self.stages
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, stage)| *stage)
            .collect()
    }

    fn enter(&mut self, path: &Path, stage: Stage) {
        tracing::debug!(path = %path.display(), ?stage, "Stage");
        self.stages.push((path.to_path_buf(), stage));
    }

    fn rollback(&mut self, path: &Path) -> Result<()> {
        self.backup_for(path)
            .ok_or_else(|| Error::MissingBackup {
                path: path.to_path_buf(),
            })?
            .restore()?;
        self.enter(path, Stage::RolledBack);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Compute the change without touching the filesystem
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UninstallOptions {
    /// Compute the change without touching the filesystem
    pub dry_run: bool,
}

/// Final state of an install
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The block is in place and the file was accepted
    Installed { validation: Validation },
    /// The file was rejected and restored from its backup
    RolledBack { validation: Validation },
    /// Dry run: nothing was written
    Planned,
}

/// What an install did
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub dialect: ShellDialect,
    pub rc_file: PathBuf,
    pub hook_file: PathBuf,
    pub change: BlockChange,
    pub legacy_removed: Vec<LegacyArtifact>,
    pub backup: Option<PathBuf>,
    pub before: String,
    pub after: String,
    pub outcome: InstallOutcome,
    /// Stages the startup file went through
    pub stages: Vec<Stage>,
}

impl InstallReport {
    pub fn succeeded(&self) -> bool {
        !matches!(self.outcome, InstallOutcome::RolledBack { .. })
    }
}

/// Final state of one candidate file during uninstall
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file does not exist
    Missing,
    /// The file contains no block
    NothingFound,
    /// Blocks were removed and the file was accepted
    Removed { validation: Validation },
    /// The file was rejected and restored from its backup
    RolledBack { validation: Validation },
    /// Dry run: blocks would be removed
    Planned,
}

/// What uninstall did to one candidate file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub dialect: ShellDialect,
    pub path: PathBuf,
    pub outcome: FileOutcome,
    /// Current and legacy blocks found
    pub blocks_removed: usize,
    pub backup: Option<PathBuf>,
    pub before: String,
    pub after: String,
    /// Stages the file went through; empty for a missing file
    pub stages: Vec<Stage>,
}

/// What an uninstall did
#[derive(Debug, Clone)]
pub struct UninstallReport {
    pub files: Vec<FileReport>,
    pub hook_file: PathBuf,
    pub hook_file_removed: bool,
}

impl UninstallReport {
    /// True if no candidate file contained a block
    pub fn nothing_found(&self) -> bool {
        self.files.iter().all(|f| f.blocks_removed == 0)
    }

    pub fn rolled_back(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::RolledBack { .. }))
    }
}

/// Hook state of one candidate file
#[derive(Debug, Clone)]
pub struct StatusEntry {
    pub dialect: ShellDialect,
    pub path: PathBuf,
    pub exists: bool,
    /// Whether install would target this file
    pub selected: bool,
    pub location: Location,
    pub legacy_blocks: usize,
    pub legacy_definition: bool,
}

#[derive(Debug, Clone)]
pub struct StatusReport {
    pub entries: Vec<StatusEntry>,
    pub hook_file: PathBuf,
    pub hook_file_exists: bool,
}

/// Drives the install and uninstall workflows for one profile.
pub struct Patcher<'a> {
    profile: &'a HookProfile,
    env: &'a HookEnvironment,
    validator: &'a dyn SyntaxValidator,
    backups: BackupManager,
}

impl<'a> Patcher<'a> {
    pub fn new(
        profile: &'a HookProfile,
        env: &'a HookEnvironment,
        validator: &'a dyn SyntaxValidator,
    ) -> Self {
        Self {
            profile,
            env,
            validator,
            backups: BackupManager::new(&profile.tool_name),
        }
    }

    /// Install the hook into the startup file of the user's shell.
    ///
    /// Writes `template` verbatim as the hook file, then backs up, migrates,
    /// patches and validates the startup file. A rejected file is restored and
    /// reported as [`InstallOutcome::RolledBack`]; I/O failures are errors.
    pub fn install(&self, template: &str, options: InstallOptions) -> Result<InstallReport> {
        let dialect = self.env.dialect();
        let rc_file = dialect.rc_file(&self.env.home);
        let hook_file = self.profile.hook_path(&self.env.home);
        let markers = self.profile.markers()?;
        let rules = self.profile.legacy_rules()?;
        let snippet = self.profile.snippet(dialect);
        markers.check_body(&snippet)?;
        let mut state = RunState::default();

        tracing::info!(
            tool = %self.profile.tool_name,
            %dialect,
            rc = %rc_file.display(),
            dry_run = options.dry_run,
            "Installing hook"
        );
        state.enter(&rc_file, Stage::Start);

        let backup = if options.dry_run {
            None
        } else {
            if let Some(dir) = hook_file.parent() {
                io::ensure_dir(dir)?;
            }
            io::write_text(&hook_file, template)?;
            io::touch(&rc_file)?;
            self.take_backup(&mut state, &rc_file)?
        };

        let before = io::read_text_or_empty(&rc_file)?;

        let migration = strip_legacy(&before, &rules);
        state.enter(&rc_file, Stage::Migrated);

        let upsert = upsert_block(&migration.content, &markers, &snippet)?;

        let mut report = InstallReport {
            dialect,
            rc_file,
            hook_file,
            change: upsert.change,
            legacy_removed: migration.removed,
            backup,
            before,
            after: upsert.content,
            outcome: InstallOutcome::Planned,
            stages: Vec::new(),
        };

        if options.dry_run {
            report.stages = state.trail(&report.rc_file);
            return Ok(report);
        }

        if report.after != report.before {
            io::write_text(&report.rc_file, &report.after)?;
        }
        state.enter(&report.rc_file, Stage::Patched);

        let validation = self.validator.validate(&report.rc_file, dialect);
        state.enter(&report.rc_file, Stage::Validated);

        report.outcome = if self.accepts(&report.rc_file, &validation) {
            state.enter(&report.rc_file, Stage::Done);
            InstallOutcome::Installed { validation }
        } else {
            state.rollback(&report.rc_file)?;
            InstallOutcome::RolledBack { validation }
        };
        report.stages = state.trail(&report.rc_file);

        Ok(report)
    }

    /// Remove the hook from every candidate startup file.
    ///
    /// A rejected file is restored and processing continues with the next
    /// candidate. The hook file is deleted on a best-effort basis.
    pub fn uninstall(&self, options: UninstallOptions) -> Result<UninstallReport> {
        let markers = self.profile.markers()?;
        let legacy = self.profile.legacy_rules()?;
        let mut state = RunState::default();

        tracing::info!(
            tool = %self.profile.tool_name,
            dry_run = options.dry_run,
            "Uninstalling hook"
        );

        let mut files = Vec::new();
        for (dialect, path) in ShellDialect::candidates(&self.env.home) {
            let report = self.uninstall_file(
                &mut state,
                dialect,
                path,
                &markers,
                &legacy.marker_pairs,
                options,
            )?;
            files.push(report);
        }

        let hook_file = self.profile.hook_path(&self.env.home);
        let hook_file_removed = if options.dry_run {
            hook_file.exists()
        } else {
            remove_hook_file(&hook_file)
        };

        Ok(UninstallReport {
            files,
            hook_file,
            hook_file_removed,
        })
    }

    fn uninstall_file(
        &self,
        state: &mut RunState,
        dialect: ShellDialect,
        path: PathBuf,
        markers: &MarkerPair,
        legacy_pairs: &[MarkerPair],
        options: UninstallOptions,
    ) -> Result<FileReport> {
        if !path.exists() {
            return Ok(FileReport {
                dialect,
                path,
                outcome: FileOutcome::Missing,
                blocks_removed: 0,
                backup: None,
                before: String::new(),
                after: String::new(),
                stages: Vec::new(),
            });
        }
        state.enter(&path, Stage::Start);

        let before = io::read_text(&path)?;
        let (mut after, mut blocks_removed) = remove_all(&before, markers);
        for pair in legacy_pairs {
            let (stripped, count) = remove_all(&after, pair);
            after = stripped;
            blocks_removed += count;
        }

        let mut report = FileReport {
            dialect,
            path,
            outcome: FileOutcome::NothingFound,
            blocks_removed,
            backup: None,
            before,
            after,
            stages: Vec::new(),
        };

        if blocks_removed == 0 || options.dry_run {
            if blocks_removed == 0 {
                tracing::debug!(path = %report.path.display(), "No block found");
            } else {
                report.outcome = FileOutcome::Planned;
            }
            report.stages = state.trail(&report.path);
            return Ok(report);
        }

        report.backup = self.take_backup(state, &report.path)?;
        io::write_text(&report.path, &report.after)?;
        state.enter(&report.path, Stage::Patched);

        let validation = self.validator.validate(&report.path, dialect);
        state.enter(&report.path, Stage::Validated);

        report.outcome = if self.accepts(&report.path, &validation) {
            state.enter(&report.path, Stage::Done);
            FileOutcome::Removed { validation }
        } else {
            state.rollback(&report.path)?;
            FileOutcome::RolledBack { validation }
        };
        report.stages = state.trail(&report.path);

        Ok(report)
    }

    /// Report where the hook currently is, without changing anything.
    pub fn status(&self) -> Result<StatusReport> {
        let markers = self.profile.markers()?;
        let legacy = self.profile.legacy_rules()?;
        let selected = self.env.dialect();

        let mut entries = Vec::new();
        for (dialect, path) in ShellDialect::candidates(&self.env.home) {
            let exists = path.exists();
            let content = if exists {
                io::read_text(&path)?
            } else {
                String::new()
            };

            let legacy_blocks = legacy
                .marker_pairs
                .iter()
                .map(|pair| remove_all(&content, pair).1)
                .sum();
            let legacy_definition = legacy
                .definition
                .as_ref()
                .is_some_and(|d| strip_definition(&content, d).is_some());

            entries.push(StatusEntry {
                dialect,
                location: locate(&content, &markers),
                path,
                exists,
                selected: dialect == selected,
                legacy_blocks,
                legacy_definition,
            });
        }

        let hook_file = self.profile.hook_path(&self.env.home);
        Ok(StatusReport {
            entries,
            hook_file_exists: hook_file.exists(),
            hook_file,
        })
    }

    /// Back up `path` unless this run already did.
    fn take_backup(&self, state: &mut RunState, path: &Path) -> Result<Option<PathBuf>> {
        if let Some(existing) = state.backup_for(path) {
            return Ok(Some(existing.path().to_path_buf()));
        }

        let handle = self.backups.backup(path)?;
        let backup = handle.as_ref().map(|h| h.path().to_path_buf());
        if let Some(handle) = handle {
            state.backups.push(handle);
        }
        state.enter(path, Stage::BackedUp);
        Ok(backup)
    }

    fn accepts(&self, path: &Path, validation: &Validation) -> bool {
        let accepted = self.profile.unavailable_validator.accepts(validation);
        match validation {
            Validation::Passed => {}
            Validation::Failed { detail } => {
                tracing::warn!(path = %path.display(), %detail, "Syntax check failed");
            }
            Validation::Unavailable { reason } if accepted => {
                tracing::warn!(path = %path.display(), %reason, "Keeping change without a syntax check");
            }
            Validation::Unavailable { reason } => {
                tracing::warn!(path = %path.display(), %reason, "No syntax checker; rolling back");
            }
        }
        accepted
    }
}

/// Delete the hook file and, if it is left empty, its directory.
fn remove_hook_file(hook_file: &Path) -> bool {
    match io::remove_if_exists(hook_file) {
        Ok(removed) => {
            if let Some(dir) = hook_file.parent() {
                let _ = std::fs::remove_dir(dir);
            }
            removed
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not remove hook file");
            false
        }
    }
}
