//! Implementation of `slipway status`.
//!
//! Reports the build record and the gate decision without building
//! anything, so a skip is auditable rather than opaque.

use std::path::Path;

use anyhow::Result;

use crate::builder::gate::{self, GateDecision};
use crate::core::recipe::Recipe;
use crate::core::record::BuildRecord;
use crate::util::shell::Shell;

/// Print the build state for the workspace rooted at `root`.
pub fn status(root: &Path, _shell: &Shell) -> Result<()> {
    let recipe = Recipe::load_or_default(root)?;
    let layout = recipe.layout(root);

    match BuildRecord::load(&layout.record_path) {
        Some(record) => {
            println!("package:   {}", record.package);
            println!(
                "module:    {} ({})",
                record.module,
                if record.module_version.is_empty() {
                    "unknown version"
                } else {
                    &record.module_version
                }
            );
            println!("upstream:  {} @ {}", record.upstream_url, short(&record.commit));
            println!("vendor:    {}", record.vendor_url);
            println!("platform:  {}", record.platform);
            println!("built at:  {}", record.built_at);
            println!("staged:    {}", record.staged_libs.join(", "));
        }
        None => {
            println!("not built: no build record at {}", layout.record_path.display());
        }
    }

    match gate::evaluate(&recipe, &layout) {
        GateDecision::UpToDate { .. } => println!("state:     up to date"),
        GateDecision::Rebuild { reason } => println!("state:     rebuild required ({})", reason),
    }

    Ok(())
}

fn short(commit: &str) -> &str {
    if commit.len() >= 8 {
        &commit[..8]
    } else {
        commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_commit() {
        assert_eq!(short("0123456789abcdef"), "01234567");
        assert_eq!(short("abc"), "abc");
    }
}
