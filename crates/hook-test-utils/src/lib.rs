//! Shared test utilities for the shell-hook workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`home`] — [`TestHome`], a throwaway home directory with rc-file helpers
//! - [`checker`] — fake `zsh`/`bash`/`fish` executables for syntax checks

pub mod checker;
pub mod home;

pub use checker::FakeChecker;
pub use home::TestHome;
