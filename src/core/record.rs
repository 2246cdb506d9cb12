//! Build record I/O.
//!
//! The record replaces the marker-file sentinel some build scripts use: it
//! states what was built, from which commit, against which vendor archive,
//! so a skip decision can be audited with `slipway status`. It is written
//! only after a fully successful run and is never the sole skip signal —
//! the gate re-probes the artifact every time.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Current record format version.
const RECORD_VERSION: u32 = 1;

/// Record of a completed build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
    /// Record format version
    pub version: u32,

    /// Package the front-end installed
    pub package: String,

    /// Importable module name
    pub module: String,

    /// Upstream URL the source was cloned from
    pub upstream_url: String,

    /// Resolved commit id of the clone
    pub commit: String,

    /// Vendor archive URL with `{platform}` resolved
    pub vendor_url: String,

    /// Host platform tag at build time
    pub platform: String,

    /// Recipe fingerprint at build time
    pub fingerprint: String,

    /// File names staged into the runtime library directory
    pub staged_libs: Vec<String>,

    /// Version string the module reported after the build
    pub module_version: String,

    /// Unix timestamp of the successful run
    pub built_at: u64,
}

impl BuildRecord {
    /// Stamp a record with the current time.
    pub fn stamp(mut self) -> Self {
        self.built_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self
    }

    /// Whether this record was written by a compatible slipway.
    pub fn is_compatible(&self) -> bool {
        self.version == RECORD_VERSION
    }

    /// Load a record, returning `None` when the file does not exist.
    ///
    /// A corrupt or incompatible record reads as `None`: the gate then
    /// treats the artifact as unverified and rebuilds, which is always safe.
    pub fn load(path: &Path) -> Option<BuildRecord> {
        let contents = std::fs::read_to_string(path).ok()?;
        let record: BuildRecord = serde_json::from_str(&contents).ok()?;

        if !record.is_compatible() {
            tracing::warn!(
                "ignoring build record with unsupported version {}",
                record.version
            );
            return None;
        }

        Some(record)
    }

    /// Save the record, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create state directory: {}", parent.display())
            })?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("failed to serialize build record")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write build record: {}", path.display()))?;

        Ok(())
    }
}

impl Default for BuildRecord {
    fn default() -> Self {
        BuildRecord {
            version: RECORD_VERSION,
            package: String::new(),
            module: String::new(),
            upstream_url: String::new(),
            commit: String::new(),
            vendor_url: String::new(),
            platform: String::new(),
            fingerprint: String::new(),
            staged_libs: Vec::new(),
            module_version: String::new(),
            built_at: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(BuildRecord::load(&tmp.path().join("record.json")).is_none());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".slipway/record.json");

        let record = BuildRecord {
            package: "av".to_string(),
            module: "av".to_string(),
            commit: "abc123".to_string(),
            staged_libs: vec!["libavcodec.so.60".to_string()],
            ..Default::default()
        }
        .stamp();

        record.save(&path).unwrap();

        let loaded = BuildRecord::load(&path).unwrap();
        assert_eq!(loaded.package, "av");
        assert_eq!(loaded.commit, "abc123");
        assert_eq!(loaded.staged_libs, vec!["libavcodec.so.60"]);
        assert!(loaded.built_at > 0);
    }

    #[test]
    fn test_incompatible_version_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("record.json");

        let mut record = BuildRecord::default();
        record.version = 99;
        record.save(&path).unwrap();

        assert!(BuildRecord::load(&path).is_none());
    }

    #[test]
    fn test_corrupt_record_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("record.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(BuildRecord::load(&path).is_none());
    }
}
