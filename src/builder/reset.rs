//! Workspace reset.
//!
//! Destructive on purpose: any uncommitted state in the work dir or the
//! runtime library directory is lost, which is what guarantees a
//! reproducible build.

use anyhow::Result;

use crate::core::recipe::Layout;
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};

/// Remove prior build state and recreate an empty runtime library dir.
pub fn reset(layout: &Layout) -> Result<()> {
    remove_dir_all_if_exists(&layout.work_dir)?;
    remove_dir_all_if_exists(&layout.lib_dir)?;
    ensure_dir(&layout.lib_dir)?;
    Ok(())
}
