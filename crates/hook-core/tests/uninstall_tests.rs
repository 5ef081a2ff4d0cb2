//! Integration tests for the uninstall workflow.

mod common;

use common::{ScriptedValidator, TEMPLATE, default_block, env};
use hook_core::{
    FileOutcome, HookProfile, InstallOptions, Patcher, ShellDialect, Stage, UninstallOptions,
    Validation,
};
use hook_test_utils::TestHome;
use pretty_assertions::assert_eq;

#[test]
fn test_install_then_uninstall_restores_empty_file() {
    let home = TestHome::new();
    home.write(".zshrc", "");
    let profile = HookProfile::default();
    let env = env(&home, "/bin/zsh");
    let validator = ScriptedValidator::passing();
    let patcher = Patcher::new(&profile, &env, &validator);

    patcher.install(TEMPLATE, InstallOptions::default()).unwrap();
    let report = patcher.uninstall(UninstallOptions::default()).unwrap();

    assert_eq!(home.read(".zshrc"), "");
    assert!(!report.nothing_found());
    assert!(report.hook_file_removed);
    assert!(!home.exists(".config/bg-task/bg-task.zsh"));
    assert!(!home.exists(".config/bg-task"));
}

#[test]
fn test_uninstall_concrete_scenario() {
    let home = TestHome::new();
    home.write(".zshrc", &format!("alias ll='ls -la'\n\n{}\n", default_block()));
    let profile = HookProfile::default();
    let env = env(&home, "/bin/zsh");
    let validator = ScriptedValidator::passing();

    let report = Patcher::new(&profile, &env, &validator)
        .uninstall(UninstallOptions::default())
        .unwrap();

    assert_eq!(home.read(".zshrc"), "alias ll='ls -la'\n");
    assert_eq!(
        report.files[0].outcome,
        FileOutcome::Removed {
            validation: Validation::Passed
        }
    );
    assert_eq!(home.backups_of(".zshrc").len(), 1);
}

#[test]
fn test_uninstall_without_block_changes_nothing() {
    let home = TestHome::new();
    home.write(".zshrc", "alias ll='ls -la'\n");
    home.write(".bashrc", "# <<< bg-task end <<<\nexport A=1");
    let profile = HookProfile::default();
    let env = env(&home, "/bin/zsh");
    let validator = ScriptedValidator::passing();

    let report = Patcher::new(&profile, &env, &validator)
        .uninstall(UninstallOptions::default())
        .unwrap();

    assert!(report.nothing_found());
    assert_eq!(home.read(".zshrc"), "alias ll='ls -la'\n");
    assert_eq!(home.read(".bashrc"), "# <<< bg-task end <<<\nexport A=1");
    assert_eq!(report.files[0].outcome, FileOutcome::NothingFound);
    assert_eq!(report.files[1].outcome, FileOutcome::NothingFound);
    assert_eq!(report.files[2].outcome, FileOutcome::Missing);
    assert!(home.backups_of(".zshrc").is_empty());
    assert!(validator.seen().is_empty());
}

#[test]
fn test_rollback_of_one_file_does_not_stop_others() {
    let home = TestHome::new();
    let zsh_content = format!("setopt autocd\n\n{}\n", default_block());
    home.write(".zshrc", &zsh_content);
    home.write(".bashrc", &format!("shopt -s globstar\n\n{}\n", default_block()));
    let profile = HookProfile::default();
    let env = env(&home, "/bin/zsh");
    let validator = ScriptedValidator::passing().with(
        ShellDialect::Zsh,
        Validation::Failed {
            detail: "bad".into(),
        },
    );

    let report = Patcher::new(&profile, &env, &validator)
        .uninstall(UninstallOptions::default())
        .unwrap();

    assert_eq!(home.read(".zshrc"), zsh_content);
    assert_eq!(home.read(".bashrc"), "shopt -s globstar\n");
    assert_eq!(report.rolled_back().count(), 1);
    assert_eq!(report.rolled_back().next().unwrap().dialect, ShellDialect::Zsh);
    assert!(matches!(
        report.files[1].outcome,
        FileOutcome::Removed { .. }
    ));
}

#[test]
fn test_uninstall_removes_legacy_marker_blocks() {
    let home = TestHome::new();
    home.write(
        ".zshrc",
        "a\n\n# >>> bg start >>>\nsource ~/.bg\n# <<< bg end <<<\n",
    );
    let mut profile = HookProfile::default();
    profile.legacy_markers.push(hook_core::profile::MarkerConfig {
        start: "# >>> bg start >>>".into(),
        end: "# <<< bg end <<<".into(),
    });
    let env = env(&home, "/bin/zsh");
    let validator = ScriptedValidator::passing();

    let report = Patcher::new(&profile, &env, &validator)
        .uninstall(UninstallOptions::default())
        .unwrap();

    assert_eq!(home.read(".zshrc"), "a\n");
    assert_eq!(report.files[0].blocks_removed, 1);
}

#[test]
fn test_uninstall_dry_run_touches_nothing() {
    let home = TestHome::new();
    let content = format!("{}\n", default_block());
    home.write(".zshrc", &content);
    home.write(".config/bg-task/bg-task.zsh", TEMPLATE);
    let profile = HookProfile::default();
    let env = env(&home, "/bin/zsh");
    let validator = ScriptedValidator::passing();

    let report = Patcher::new(&profile, &env, &validator)
        .uninstall(UninstallOptions { dry_run: true })
        .unwrap();

    assert_eq!(report.files[0].outcome, FileOutcome::Planned);
    assert_eq!(report.files[0].after, "");
    assert_eq!(home.read(".zshrc"), content);
    assert!(home.exists(".config/bg-task/bg-task.zsh"));
    assert!(home.backups_of(".zshrc").is_empty());
}

#[test]
fn test_uninstall_fish_file() {
    let home = TestHome::new();
    let profile = HookProfile::default();
    let fish_env = env(&home, "/usr/bin/fish");
    let validator = ScriptedValidator::passing();

    Patcher::new(&profile, &fish_env, &validator)
        .install(TEMPLATE, InstallOptions::default())
        .unwrap();
    let report = Patcher::new(&profile, &fish_env, &validator)
        .uninstall(UninstallOptions::default())
        .unwrap();

    assert_eq!(home.read(".config/fish/config.fish"), "");
    assert_eq!(report.files[2].dialect, ShellDialect::Fish);
    assert!(matches!(report.files[2].outcome, FileOutcome::Removed { .. }));
}

#[test]
fn test_uninstall_stages_per_file() {
    let home = TestHome::new();
    home.write(".zshrc", &format!("{}\n", default_block()));
    home.write(".bashrc", "export A=1\n");
    let profile = HookProfile::default();
    let env = env(&home, "/bin/zsh");
    let validator = ScriptedValidator::passing();

    let report = Patcher::new(&profile, &env, &validator)
        .uninstall(UninstallOptions::default())
        .unwrap();

    assert_eq!(
        report.files[0].stages,
        vec![
            Stage::Start,
            Stage::BackedUp,
            Stage::Patched,
            Stage::Validated,
            Stage::Done,
        ]
    );
    assert_eq!(report.files[1].stages, vec![Stage::Start]);
    assert!(report.files[2].stages.is_empty());
}
