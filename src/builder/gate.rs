//! Idempotency gate.
//!
//! A build is skipped only when the artifact itself checks out: the module
//! imports under the staged library path, the runtime library directory is
//! non-empty, and the recorded recipe fingerprint still matches. A record
//! on its own proves nothing — after a clean checkout the record may
//! survive while the artifact is gone.

use std::path::Path;

use crate::builder::probe;
use crate::builder::staging;
use crate::core::recipe::{Layout, Recipe};
use crate::core::record::BuildRecord;

/// Outcome of the gate check.
#[derive(Debug, Clone)]
pub enum GateDecision {
    /// A prior build is intact; skip everything.
    UpToDate {
        /// The record that was verified
        record: BuildRecord,
    },
    /// A build (or rebuild) is required.
    Rebuild {
        /// Human-readable reason, surfaced by `status` and `build`
        reason: String,
    },
}

impl GateDecision {
    /// Whether the gate allows skipping the build.
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, GateDecision::UpToDate { .. })
    }
}

/// Evaluate the gate for the given recipe and layout.
pub fn evaluate(recipe: &Recipe, layout: &Layout) -> GateDecision {
    evaluate_with(recipe, layout, |interpreter, module, lib_dir| {
        probe::probe_module(Path::new(interpreter), module, lib_dir).map(|_| ())
    })
}

/// Gate evaluation with an injectable import probe.
///
/// The probe spawns an interpreter, so it runs last and only when the
/// cheaper filesystem checks pass.
pub fn evaluate_with<F>(recipe: &Recipe, layout: &Layout, probe_fn: F) -> GateDecision
where
    F: FnOnce(&str, &str, &Path) -> Result<(), probe::ProbeError>,
{
    if !staging::lib_dir_has_shared_object(&layout.lib_dir) {
        return GateDecision::Rebuild {
            reason: "no shared objects in runtime library directory".to_string(),
        };
    }

    let record = match BuildRecord::load(&layout.record_path) {
        Some(record) => record,
        None => {
            return GateDecision::Rebuild {
                reason: "no build record".to_string(),
            }
        }
    };

    if record.fingerprint != recipe.fingerprint() {
        return GateDecision::Rebuild {
            reason: "recipe changed since last build".to_string(),
        };
    }

    if let Err(e) = probe_fn(
        &recipe.python.interpreter,
        &recipe.package.module,
        &layout.lib_dir,
    ) {
        tracing::debug!("gate probe failed: {}", e);
        return GateDecision::Rebuild {
            reason: "module failed to import".to_string(),
        };
    }

    GateDecision::UpToDate { record }
}
