//! Source acquisition.
//!
//! A depth-1 clone of the pinned upstream revision. Network failure is
//! fatal with no retry; the caller re-invokes the whole procedure.

use std::path::Path;

use anyhow::{Context, Result};
use git2::build::RepoBuilder;
use git2::FetchOptions;

use crate::core::recipe::{Layout, Recipe};

/// Shallow-clone the upstream repository into the work dir.
///
/// Returns the resolved commit id for the build record.
pub fn acquire(recipe: &Recipe, layout: &Layout) -> Result<String> {
    clone_shallow(
        &recipe.upstream.url,
        recipe.upstream.reference.as_deref(),
        &layout.work_dir,
    )
}

/// Depth-1 clone of `url` (optionally a specific branch/tag) into `dest`.
pub fn clone_shallow(url: &str, reference: Option<&str>, dest: &Path) -> Result<String> {
    tracing::info!("cloning {} (depth 1)", url);

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    let mut fetch_opts = FetchOptions::new();
    fetch_opts.depth(1);

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_opts);
    if let Some(reference) = reference {
        builder.branch(reference);
    }

    let repo = builder
        .clone(url, dest)
        .with_context(|| format!("failed to clone {}", url))?;

    let commit = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .with_context(|| format!("failed to resolve HEAD of {}", url))?;

    Ok(commit.id().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clone_unreachable_url_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("work");

        let result = clone_shallow(&format!("{}/missing", tmp.path().display()), None, &dest);

        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("failed to clone"));
    }
}
