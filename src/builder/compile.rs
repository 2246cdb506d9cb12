//! Tool provisioning and binding compilation.
//!
//! Everything here drives `python -m pip`. Dependency resolution is
//! disabled for the binding install: the only native dependency was
//! already staged from the vendor archive, and the binding itself must be
//! compiled from source against it, never taken as a prebuilt wheel.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::builder::env::BuildEnv;
use crate::core::recipe::{Layout, Recipe};
use crate::util::process::ProcessBuilder;

/// Ensure the build front-end and its helper packages are present.
pub fn provision(python: &Path, recipe: &Recipe) -> Result<()> {
    if recipe.python.build_requires.is_empty() {
        return Ok(());
    }

    ProcessBuilder::new(python)
        .args(["-m", "pip", "install", "--upgrade", "--quiet"])
        .args(&recipe.python.build_requires)
        .exec_streaming()
        .context("failed to provision build tooling")
}

/// Uninstall a prior copy of the package.
///
/// Absence is a tolerated no-op; any other uninstall failure is fatal.
pub fn uninstall_prior(python: &Path, package: &str) -> Result<()> {
    let output = ProcessBuilder::new(python)
        .args(["-m", "pip", "uninstall", "-y", package])
        .exec()?;

    if output.status.success() {
        return Ok(());
    }

    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    if is_not_installed(&combined) {
        tracing::debug!("{} was not installed; nothing to uninstall", package);
        return Ok(());
    }

    bail!("failed to uninstall prior {}:\n{}", package, combined.trim());
}

/// pip's phrasing for the tolerated case, across the versions in the wild.
fn is_not_installed(output: &str) -> bool {
    let lower = output.to_lowercase();
    lower.contains("not installed") || lower.contains("no files were found to uninstall")
}

/// Compile and install the binding from the cloned source tree.
pub fn install(python: &Path, recipe: &Recipe, layout: &Layout, env: &BuildEnv) -> Result<()> {
    ProcessBuilder::new(python)
        .args(["-m", "pip", "install", "--no-deps", "--no-cache-dir"])
        .arg("--no-binary")
        .arg(&recipe.package.name)
        .arg(".")
        .cwd(&layout.work_dir)
        .envs(env.vars())
        .exec_streaming()
        .with_context(|| format!("failed to compile {} against the vendor tree", recipe.package.name))
}
