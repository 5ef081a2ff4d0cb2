//! Block editing for shell-hook.
//!
//! A block is a tool-owned region of a shell startup file bounded by two
//! literal marker lines:
//!
//! ```text
//! # >>> bg-task start >>>
//! if [ -f "$HOME/.config/bg-task/bg-task.zsh" ]; then
//!   source "$HOME/.config/bg-task/bg-task.zsh"
//! fi
//! # <<< bg-task end <<<
//! ```
//!
//! Everything here is a pure text transformation: functions take the current
//! file content and return the new content. Reading, writing, backups and
//! validation live in `hook-core`.
//!
//! - [`markers`] finds a block and classifies malformed marker layouts.
//! - [`writer`] inserts, replaces and removes blocks.
//! - [`legacy`] strips block formats written by older tool versions.

pub mod error;
pub mod legacy;
pub mod markers;
pub mod writer;

pub use error::{Error, Result};
pub use legacy::{AnchoredDefinition, LegacyArtifact, LegacyRules, Migration, strip_legacy};
pub use markers::{Location, MarkerPair, Span, locate};
pub use writer::{BlockChange, Removal, Upsert, remove_all, remove_block, render_block, upsert_block};
