//! Package-config prefix patching.
//!
//! The vendor archive was built elsewhere and its `.pc` files embed the
//! builder's install prefix. Without rewriting `prefix=` to the local
//! vendor path, pkg-config hands the compiler stale include/link flags.

use std::path::Path;

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

use crate::util::fs::{read_to_string, write_string};

/// Rewrite the `prefix=` line of every `.pc` file under the vendor tree.
///
/// Returns the number of files patched. No `.pc` files at all means the
/// archive layout is unusable, so that is fatal here rather than as an
/// opaque compiler error later.
pub fn patch_prefixes(vendor_dir: &Path) -> Result<usize> {
    let mut patched = 0;

    for entry in WalkDir::new(vendor_dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some("pc")
        {
            continue;
        }

        let contents = read_to_string(path)?;
        let rewritten = rewrite_prefix(&contents, vendor_dir);

        if rewritten != contents {
            write_string(path, &rewritten)
                .with_context(|| format!("failed to patch {}", path.display()))?;
        }
        patched += 1;
        tracing::debug!("patched prefix in {}", path.display());
    }

    if patched == 0 {
        bail!(
            "no package-config files found under {}",
            vendor_dir.display()
        );
    }

    Ok(patched)
}

/// Replace lines beginning with `prefix=`; every other line is untouched.
fn rewrite_prefix(contents: &str, vendor_dir: &Path) -> String {
    let mut out = String::with_capacity(contents.len());

    for line in contents.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };

        if body.starts_with("prefix=") {
            out.push_str(&format!("prefix={}", vendor_dir.display()));
        } else {
            out.push_str(body);
        }
        out.push_str(newline);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SAMPLE_PC: &str = "\
prefix=/build/ffmpeg/install
exec_prefix=${prefix}
libdir=${prefix}/lib
includedir=${prefix}/include

Name: libavcodec
Description: FFmpeg codec library
Version: 60.31.102
Requires: libavutil >= 58.29.100
Libs: -L${libdir} -lavcodec
Cflags: -I${includedir}
";

    #[test]
    fn test_only_prefix_line_changes() {
        let vendor = PathBuf::from("/work/vendor");
        let rewritten = rewrite_prefix(SAMPLE_PC, &vendor);

        let old_lines: Vec<_> = SAMPLE_PC.lines().collect();
        let new_lines: Vec<_> = rewritten.lines().collect();
        assert_eq!(old_lines.len(), new_lines.len());

        for (old, new) in old_lines.iter().zip(&new_lines) {
            if old.starts_with("prefix=") {
                assert_eq!(*new, "prefix=/work/vendor");
            } else {
                assert_eq!(old, new);
            }
        }
        assert!(rewritten.ends_with('\n'));
    }

    #[test]
    fn test_exec_prefix_is_untouched() {
        let rewritten = rewrite_prefix(SAMPLE_PC, &PathBuf::from("/v"));
        assert!(rewritten.contains("exec_prefix=${prefix}"));
    }

    #[test]
    fn test_patch_walks_pkgconfig_tree() {
        let tmp = TempDir::new().unwrap();
        let pc_dir = tmp.path().join("lib/pkgconfig");
        fs::create_dir_all(&pc_dir).unwrap();
        fs::write(pc_dir.join("libavcodec.pc"), SAMPLE_PC).unwrap();
        fs::write(pc_dir.join("libavformat.pc"), SAMPLE_PC).unwrap();
        // Non-pc files are left alone.
        fs::write(pc_dir.join("README"), "prefix=keepme\n").unwrap();

        let patched = patch_prefixes(tmp.path()).unwrap();
        assert_eq!(patched, 2);

        let contents = fs::read_to_string(pc_dir.join("libavcodec.pc")).unwrap();
        assert!(contents.contains(&format!("prefix={}", tmp.path().display())));
        assert_eq!(
            fs::read_to_string(pc_dir.join("README")).unwrap(),
            "prefix=keepme\n"
        );
    }

    #[test]
    fn test_no_pc_files_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("lib/pkgconfig")).unwrap();

        let err = patch_prefixes(tmp.path()).unwrap_err().to_string();
        assert!(err.contains("no package-config files"));
    }
}
