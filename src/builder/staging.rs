//! Shared-object staging.
//!
//! Copies every `lib*.so[.N…]` from the vendor lib dir into the runtime
//! library directory. Versioned symlink chains are recreated as symlinks;
//! flattening them would break soname resolution at runtime.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::Regex;

use crate::core::recipe::Layout;
use crate::util::fs::{copy_preserving_symlink, ensure_dir, glob_entries};

/// Matches `.so` with an optional dotted version suffix (`.so`, `.so.60`,
/// `.so.60.3.100`).
static SO_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.so(\.\d+)*$").expect("valid shared-object pattern"));

/// Whether a file name looks like a shared object (possibly versioned).
pub fn is_shared_object(name: &str) -> bool {
    SO_SUFFIX.is_match(name)
}

/// Stage all shared objects from the vendor tree into the runtime lib dir.
///
/// Returns the sorted staged file names. Empty staging is fatal: the run
/// is only successful once the runtime library directory holds at least
/// one shared object.
pub fn stage_libraries(layout: &Layout) -> Result<Vec<String>> {
    ensure_dir(&layout.lib_dir)?;

    let candidates = glob_entries(&layout.vendor_dir, &["lib/*.so*".to_string()])?;

    let mut staged = Vec::new();
    for src in &candidates {
        let name = match src.file_name().and_then(|n| n.to_str()) {
            Some(name) if is_shared_object(name) => name.to_string(),
            _ => continue,
        };

        copy_preserving_symlink(src, &layout.lib_dir.join(&name))?;
        staged.push(name);
    }

    if staged.is_empty() {
        bail!(
            "no shared objects found in vendor library directory: {}",
            layout.vendor_dir.join("lib").display()
        );
    }

    staged.sort();
    Ok(staged)
}

/// Check the staging invariant on an existing runtime library directory.
pub fn lib_dir_has_shared_object(lib_dir: &Path) -> bool {
    std::fs::read_dir(lib_dir)
        .map(|entries| {
            entries.flatten().any(|e| {
                e.file_name()
                    .to_str()
                    .map(is_shared_object)
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}
