//! Implementation of `slipway build`.
//!
//! The stages run strictly in sequence; each blocks until its external
//! process exits, and the first failure aborts the run.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::builder::{compile, env::BuildEnv, gate, pkgconfig, probe, reset, source, staging, vendor};
use crate::core::platform::{host_platform_tag, resolve_template};
use crate::core::recipe::Recipe;
use crate::core::record::BuildRecord;
use crate::util::fs::remove_dir_all_if_exists;
use crate::util::process::find_executable;
use crate::util::shell::{Shell, Status};

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Bypass the idempotency gate
    pub force: bool,

    /// Keep the cloned source tree after a successful build
    pub keep_work: bool,

    /// Explicit recipe path (defaults to `Slipway.toml` in the root)
    pub recipe_path: Option<PathBuf>,
}

/// What the build did.
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    /// The gate found an intact prior build.
    Skipped(BuildRecord),

    /// A fresh build ran to completion.
    Built(BuildRecord),
}

/// Run the build pipeline rooted at `root`.
pub fn build(root: &Path, shell: &Shell, opts: &BuildOptions) -> Result<BuildOutcome> {
    let recipe = match &opts.recipe_path {
        Some(path) => Recipe::load(path)?,
        None => Recipe::load_or_default(root)?,
    };
    let layout = recipe.layout(root);

    // Idempotency gate: skip only when the artifact itself checks out.
    if !opts.force {
        match gate::evaluate(&recipe, &layout) {
            gate::GateDecision::UpToDate { record } => {
                shell.status(
                    Status::Skipped,
                    format!(
                        "{} {} already built and importable",
                        record.package, record.module_version
                    ),
                );
                return Ok(BuildOutcome::Skipped(record));
            }
            gate::GateDecision::Rebuild { reason } => {
                tracing::info!("rebuilding: {}", reason);
            }
        }
    }

    let python = match find_executable(&recipe.python.interpreter) {
        Some(python) => python,
        None => bail!(
            "python interpreter `{}` not found in PATH",
            recipe.python.interpreter
        ),
    };

    // Workspace reset: destructive, guarantees reproducibility.
    reset::reset(&layout)?;

    shell.status(Status::Cloning, &recipe.upstream.url);
    let commit = source::acquire(&recipe, &layout)?;

    vendor::write_descriptor(&recipe, &layout)?;

    shell.status(
        Status::Provisioning,
        recipe.python.build_requires.join(", "),
    );
    compile::provision(&python, &recipe)?;

    let vendor_url = resolve_template(&recipe.vendor.url_template);
    shell.status(Status::Fetching, &vendor_url);
    vendor::run_fetch_tool(&recipe, &layout, &python)?;
    vendor::validate_layout(&layout.vendor_dir)?;

    let staged = staging::stage_libraries(&layout)?;
    shell.status(
        Status::Staged,
        format!("{} shared objects -> {}", staged.len(), layout.lib_dir.display()),
    );

    let patched = pkgconfig::patch_prefixes(&layout.vendor_dir)?;
    shell.status(Status::Patching, format!("{} package-config files", patched));
    let build_env = BuildEnv::for_vendor(&layout.vendor_dir, &recipe.deploy.rpaths);

    compile::uninstall_prior(&python, &recipe.package.name)?;
    shell.status(Status::Compiling, &recipe.package.name);
    compile::install(&python, &recipe, &layout, &build_env)?;

    // The clone has served its purpose once the binding is installed.
    if !opts.keep_work {
        remove_dir_all_if_exists(&layout.work_dir)?;
    }

    let module_version =
        probe::probe_module(&python, &recipe.package.module, &layout.lib_dir)?;
    shell.status(
        Status::Verified,
        format!("{} {}", recipe.package.module, module_version),
    );

    let record = BuildRecord {
        package: recipe.package.name.clone(),
        module: recipe.package.module.clone(),
        upstream_url: recipe.upstream.url.clone(),
        commit,
        vendor_url,
        platform: host_platform_tag().to_string(),
        fingerprint: recipe.fingerprint(),
        staged_libs: staged,
        module_version,
        ..Default::default()
    }
    .stamp();
    record.save(&layout.record_path)?;

    shell.status(
        Status::Finished,
        format!("{} staged in {}", record.package, layout.lib_dir.display()),
    );

    Ok(BuildOutcome::Built(record))
}
