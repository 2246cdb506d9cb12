//! Implementation of `slipway clean`.

use std::path::Path;

use anyhow::Result;

use crate::core::recipe::{Recipe, STATE_DIR};
use crate::util::fs::remove_dir_all_if_exists;
use crate::util::shell::{Shell, Status};

/// Options for the clean command.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Also remove the build record
    pub all: bool,
}

/// Remove build artifacts. Absent paths are a no-op.
pub fn clean(root: &Path, shell: &Shell, opts: &CleanOptions) -> Result<()> {
    let recipe = Recipe::load_or_default(root)?;
    let layout = recipe.layout(root);

    for dir in [&layout.work_dir, &layout.lib_dir] {
        if dir.exists() {
            remove_dir_all_if_exists(dir)?;
            shell.status(Status::Removed, dir.display());
        }
    }

    if opts.all {
        let state_dir = root.join(STATE_DIR);
        if state_dir.exists() {
            remove_dir_all_if_exists(&state_dir)?;
            shell.status(Status::Removed, state_dir.display());
        }
    }

    Ok(())
}
