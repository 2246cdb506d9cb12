//! Implementation of `slipway verify`.

use std::path::Path;

use anyhow::Result;

use crate::builder::probe::probe_module;
use crate::core::recipe::Recipe;
use crate::util::shell::{Shell, Status};

/// Run the import probe against the staged libraries.
///
/// Returns the module's reported version string. A probe failure
/// propagates as [`crate::builder::probe::ProbeError`], which the binary
/// maps to exit code 2.
pub fn verify(root: &Path, shell: &Shell) -> Result<String> {
    let recipe = Recipe::load_or_default(root)?;
    let layout = recipe.layout(root);

    let version = probe_module(
        Path::new(&recipe.python.interpreter),
        &recipe.package.module,
        &layout.lib_dir,
    )?;

    shell.status(
        Status::Verified,
        format!("{} {}", recipe.package.module, version),
    );
    println!("{}", version);

    Ok(version)
}
