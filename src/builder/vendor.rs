//! Vendor configuration and fetch.
//!
//! The descriptor is a one-key JSON object naming the platform-templated
//! archive URL. The vendored fetch tool (shipped inside the cloned binding)
//! resolves `{platform}`, downloads, verifies, and unpacks; it is an
//! external collaborator, not reimplemented here.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::recipe::{Layout, Recipe};
use crate::util::fs::write_string;
use crate::util::process::ProcessBuilder;

/// Write the vendor descriptor into the cloned source tree.
///
/// Returns the descriptor's path.
pub fn write_descriptor(recipe: &Recipe, layout: &Layout) -> Result<PathBuf> {
    let path = layout.work_dir.join(&recipe.vendor.descriptor);

    let descriptor = serde_json::json!({ "url": recipe.vendor.url_template });
    let contents = serde_json::to_string_pretty(&descriptor)
        .context("failed to serialize vendor descriptor")?;

    write_string(&path, &contents)?;
    Ok(path)
}

/// Invoke the vendored fetch tool against the descriptor.
///
/// Bad URL, unsupported platform, or checksum mismatch all surface as the
/// tool's own non-zero exit and abort the run.
pub fn run_fetch_tool(recipe: &Recipe, layout: &Layout, python: &Path) -> Result<()> {
    let tool = layout.work_dir.join(&recipe.vendor.fetch_tool);
    if !tool.exists() {
        bail!(
            "fetch tool not found in source tree: {} (expected at {})",
            recipe.vendor.fetch_tool.display(),
            tool.display()
        );
    }

    let descriptor = layout.work_dir.join(&recipe.vendor.descriptor);

    ProcessBuilder::new(python)
        .arg(&tool)
        .arg("--config-file")
        .arg(&descriptor)
        .arg(&layout.vendor_dir)
        .cwd(&layout.work_dir)
        .exec_streaming()
        .context("vendor archive fetch failed")
}

/// Validate the unpacked vendor tree layout.
///
/// The compile stage depends on `include/`, `lib/`, and `lib/pkgconfig/`;
/// checking here turns a malformed archive into a direct diagnostic instead
/// of an opaque downstream compiler error.
pub fn validate_layout(vendor_dir: &Path) -> Result<()> {
    for subtree in ["include", "lib", "lib/pkgconfig"] {
        let path = vendor_dir.join(subtree);
        if !path.is_dir() {
            bail!(
                "malformed vendor archive layout: missing {} under {}",
                subtree,
                vendor_dir.display()
            );
        }
    }
    Ok(())
}
