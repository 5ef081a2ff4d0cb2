//! Filesystem layer for shell-hook
//!
//! Provides durable and atomic text I/O for user-owned shell startup files.

pub mod error;
pub mod io;

pub use error::{Error, Result};
