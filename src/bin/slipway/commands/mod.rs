//! Command implementations.

pub mod build;
pub mod clean;
pub mod status;
pub mod verify;

use std::path::PathBuf;

use anyhow::{Context, Result};

/// The invocation root every command operates on.
pub fn invocation_root() -> Result<PathBuf> {
    std::env::current_dir().context("failed to get current directory")
}
