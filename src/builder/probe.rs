//! Import probe.
//!
//! The smoke test for a staged build: import the module under the runtime
//! library search path and report its version string. Probe failures carry
//! their own error type so a "built but broken" artifact exits with a
//! status distinguishable from "never attempted".

use std::path::Path;

use thiserror::Error;

use crate::util::process::ProcessBuilder;

/// Why the import probe failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The interpreter itself could not be run.
    #[error("failed to run interpreter `{interpreter}`: {detail}")]
    Interpreter {
        interpreter: String,
        detail: String,
    },

    /// The module did not import.
    #[error("module `{module}` failed to import: {detail}")]
    ImportFailed { module: String, detail: String },
}

/// Import the module and return its reported version string.
///
/// `LD_LIBRARY_PATH` is extended with the runtime library directory on the
/// child only, mirroring how the deployment runtime resolves the staged
/// shared objects.
pub fn probe_module(
    interpreter: &Path,
    module: &str,
    lib_dir: &Path,
) -> Result<String, ProbeError> {
    let code = format!(
        "import {m}; print(getattr({m}, '__version__', ''))",
        m = module
    );

    let mut search_path = lib_dir.display().to_string();
    if let Ok(existing) = std::env::var("LD_LIBRARY_PATH") {
        if !existing.is_empty() {
            search_path = format!("{}:{}", search_path, existing);
        }
    }

    let output = ProcessBuilder::new(interpreter)
        .arg("-c")
        .arg(&code)
        .env("LD_LIBRARY_PATH", &search_path)
        .exec()
        .map_err(|e| ProbeError::Interpreter {
            interpreter: interpreter.display().to_string(),
            detail: format!("{:#}", e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // The last line is the import error itself, e.g.
        // "ImportError: libavformat.so.60: cannot open shared object file".
        let detail = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("unknown import error")
            .trim()
            .to_string();

        return Err(ProbeError::ImportFailed {
            module: module.to_string(),
            detail,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
