//! Shared helpers for hook-core integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use hook_core::{HookEnvironment, ShellDialect, SyntaxValidator, Validation};
use hook_test_utils::TestHome;

pub const START: &str = "# >>> bg-task start >>>";
pub const END: &str = "# <<< bg-task end <<<";
pub const TEMPLATE: &str = "bg() {\n  nohup \"$@\" >/dev/null 2>&1 &\n}\n";

pub fn env(home: &TestHome, shell: &str) -> HookEnvironment {
    HookEnvironment::new(home.path(), Some(shell.to_string()))
}

/// The block install writes for the default profile in a POSIX shell.
pub fn default_block() -> String {
    format!(
        "{START}\n# bg-task: source function\n\
         if [ -f \"$HOME/.config/bg-task/bg-task.zsh\" ]; then\n  \
         source \"$HOME/.config/bg-task/bg-task.zsh\"\n\
         fi\n{END}"
    )
}

/// Validator returning canned outcomes and recording what it saw.
pub struct ScriptedValidator {
    default: Validation,
    per_dialect: HashMap<ShellDialect, Validation>,
    corrupt: bool,
    seen: RefCell<Vec<(ShellDialect, String)>>,
}

impl ScriptedValidator {
    fn returning(default: Validation) -> Self {
        Self {
            default,
            per_dialect: HashMap::new(),
            corrupt: false,
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn passing() -> Self {
        Self::returning(Validation::Passed)
    }

    pub fn failing() -> Self {
        Self::returning(Validation::Failed {
            detail: "parse error near `fi'".into(),
        })
    }

    pub fn unavailable() -> Self {
        Self::returning(Validation::Unavailable {
            reason: "zsh not found on PATH".into(),
        })
    }

    /// Inject a syntax error into the block, then reject the file.
    pub fn corrupting() -> Self {
        Self {
            corrupt: true,
            ..Self::failing()
        }
    }

    pub fn with(mut self, dialect: ShellDialect, validation: Validation) -> Self {
        self.per_dialect.insert(dialect, validation);
        self
    }

    pub fn seen(&self) -> Vec<(ShellDialect, String)> {
        self.seen.borrow().clone()
    }
}

impl SyntaxValidator for ScriptedValidator {
    fn validate(&self, path: &Path, dialect: ShellDialect) -> Validation {
        if self.corrupt {
            let content = fs::read_to_string(path).unwrap();
            fs::write(path, content.replace("\nfi\n", "\nif [ broken\nfi\n")).unwrap();
        }
        let content = fs::read_to_string(path).unwrap_or_default();
        self.seen.borrow_mut().push((dialect, content));

        self.per_dialect
            .get(&dialect)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}
