//! Compiler/linker environment for the binding build.
//!
//! The search paths are modeled as an explicit record handed to the
//! compile invocation instead of ambient process state; the orchestrator's
//! own environment is never mutated.

use std::path::Path;

/// Environment record for the downstream compiler toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnv {
    /// Package-config search path (`PKG_CONFIG_PATH`)
    pub pkg_config_path: String,

    /// Compiler include flags (`CFLAGS`)
    pub cflags: String,

    /// Linker search-path and rpath flags (`LDFLAGS`)
    pub ldflags: String,
}

impl BuildEnv {
    /// Assemble the environment for a populated vendor tree.
    ///
    /// Each configured rpath becomes its own `-Wl,-rpath,` entry; the
    /// serverless mount path and an `$ORIGIN`-relative path may both be
    /// present so the extension resolves its libraries locally and after
    /// deployment.
    pub fn for_vendor(vendor_dir: &Path, rpaths: &[String]) -> Self {
        let include = vendor_dir.join("include");
        let lib = vendor_dir.join("lib");
        let pkgconfig = lib.join("pkgconfig");

        let mut ldflags = format!("-L{}", lib.display());
        for rpath in rpaths {
            ldflags.push_str(&format!(" -Wl,-rpath,{}", rpath));
        }

        BuildEnv {
            pkg_config_path: pkgconfig.display().to_string(),
            // The vendor headers routinely trip deprecation warnings in the
            // binding's generated sources.
            cflags: format!("-I{} -Wno-deprecated-declarations", include.display()),
            ldflags,
        }
    }

    /// Variables to set on the child process.
    pub fn vars(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("PKG_CONFIG_PATH", self.pkg_config_path.as_str()),
            ("CFLAGS", self.cflags.as_str()),
            ("LDFLAGS", self.ldflags.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_for_vendor() {
        let vendor = PathBuf::from("/work/vendor");
        let rpaths = vec!["/var/task/lib_native".to_string(), "$ORIGIN".to_string()];

        let env = BuildEnv::for_vendor(&vendor, &rpaths);

        assert_eq!(env.pkg_config_path, "/work/vendor/lib/pkgconfig");
        assert_eq!(
            env.cflags,
            "-I/work/vendor/include -Wno-deprecated-declarations"
        );
        assert_eq!(
            env.ldflags,
            "-L/work/vendor/lib -Wl,-rpath,/var/task/lib_native -Wl,-rpath,$ORIGIN"
        );
    }

    #[test]
    fn test_vars_cover_all_search_paths() {
        let env = BuildEnv::for_vendor(&PathBuf::from("/v"), &[]);
        let keys: Vec<_> = env.vars().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["PKG_CONFIG_PATH", "CFLAGS", "LDFLAGS"]);
    }
}
