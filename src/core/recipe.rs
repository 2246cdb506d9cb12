//! Build recipe configuration.
//!
//! A recipe describes the single documented build: which binding to clone,
//! which vendor archive to point it at, and where the artifacts land.
//! Every field has a default, so a bare `slipway` invocation with no
//! `Slipway.toml` reproduces the stock PyAV/FFmpeg recipe.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::platform::PLATFORM_PLACEHOLDER;
use crate::util::hash::Fingerprint;

/// Default recipe file name in the invocation directory.
pub const RECIPE_FILE: &str = "Slipway.toml";

/// Directory holding slipway's own state (the build record).
pub const STATE_DIR: &str = ".slipway";

/// Build recipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    /// The binding package being built
    pub package: PackageSection,

    /// Upstream source location
    pub upstream: UpstreamSection,

    /// Vendor archive configuration
    pub vendor: VendorSection,

    /// Python front-end configuration
    pub python: PythonSection,

    /// Workspace paths
    pub paths: PathsSection,

    /// Deployment-target settings
    pub deploy: DeploySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageSection {
    /// Name the package manager knows the binding by
    pub name: String,

    /// Importable module name (usually the same)
    pub module: String,
}

impl Default for PackageSection {
    fn default() -> Self {
        PackageSection {
            name: "av".to_string(),
            module: "av".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamSection {
    /// Git URL of the binding project
    pub url: String,

    /// Branch or tag to clone (default branch when absent)
    pub reference: Option<String>,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        UpstreamSection {
            url: "https://github.com/PyAV-Org/PyAV".to_string(),
            reference: Some("v12.3.0".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorSection {
    /// Archive URL template; must contain the literal `{platform}`
    pub url_template: String,

    /// Descriptor file to write, relative to the cloned source tree
    pub descriptor: PathBuf,

    /// Fetch tool, relative to the cloned source tree
    pub fetch_tool: PathBuf,

    /// Vendor directory name inside the work dir
    pub dir_name: String,
}

impl Default for VendorSection {
    fn default() -> Self {
        VendorSection {
            url_template:
                "https://github.com/PyAV-Org/pyav-ffmpeg/releases/download/7.1.0-1/ffmpeg-{platform}.tar.gz"
                    .to_string(),
            descriptor: PathBuf::from("scripts/ffmpeg-custom.json"),
            fetch_tool: PathBuf::from("scripts/fetch-vendor.py"),
            dir_name: "vendor".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonSection {
    /// Interpreter to drive pip and the import probe with
    pub interpreter: String,

    /// Helper packages provisioned before compiling
    pub build_requires: Vec<String>,
}

impl Default for PythonSection {
    fn default() -> Self {
        PythonSection {
            interpreter: "python3".to_string(),
            build_requires: vec![
                "pip".to_string(),
                "setuptools".to_string(),
                "cython".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Ephemeral clone of the upstream tree
    pub work_dir: PathBuf,

    /// Runtime library directory, the one artifact that survives a run
    pub lib_dir: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        PathsSection {
            work_dir: PathBuf::from("build/binding-src"),
            lib_dir: PathBuf::from("lib_native"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploySection {
    /// Runtime search paths baked into the compiled extension.
    ///
    /// Both the serverless mount point and an `$ORIGIN`-relative entry may
    /// be present at once, so the binary resolves its libraries locally and
    /// after deployment.
    pub rpaths: Vec<String>,
}

impl Default for DeploySection {
    fn default() -> Self {
        DeploySection {
            rpaths: vec!["/var/task/lib_native".to_string(), "$ORIGIN".to_string()],
        }
    }
}

impl Recipe {
    /// Load a recipe from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read recipe: {}", path.display()))?;

        let recipe: Recipe = toml::from_str(&contents)
            .with_context(|| format!("failed to parse recipe: {}", path.display()))?;

        recipe.validate()?;
        Ok(recipe)
    }

    /// Load the recipe from `root`, falling back to defaults when absent.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = root.join(RECIPE_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            let recipe = Recipe::default();
            recipe.validate()?;
            Ok(recipe)
        }
    }

    /// Validate the recipe before any network or filesystem work.
    pub fn validate(&self) -> Result<()> {
        if self.package.name.is_empty() || self.package.module.is_empty() {
            bail!("recipe: package name and module must be non-empty");
        }

        Url::parse(&self.upstream.url)
            .with_context(|| format!("recipe: invalid upstream url `{}`", self.upstream.url))?;

        if !self.vendor.url_template.contains(PLATFORM_PLACEHOLDER) {
            bail!(
                "recipe: vendor url template must contain the literal `{}`: {}",
                PLATFORM_PLACEHOLDER,
                self.vendor.url_template
            );
        }

        if self.vendor.descriptor.is_absolute() || self.vendor.fetch_tool.is_absolute() {
            bail!("recipe: vendor descriptor and fetch tool must be relative to the source tree");
        }

        Ok(())
    }

    /// Resolve workspace paths against the invocation root.
    pub fn layout(&self, root: &Path) -> Layout {
        let work_dir = root.join(&self.paths.work_dir);
        let vendor_dir = work_dir.join(&self.vendor.dir_name);
        Layout {
            lib_dir: root.join(&self.paths.lib_dir),
            record_path: root.join(STATE_DIR).join("record.json"),
            work_dir,
            vendor_dir,
        }
    }

    /// Fingerprint of the resolution-affecting fields.
    ///
    /// Content-based, so a recipe edit invalidates a prior build even when
    /// file timestamps lie (git checkout, unzip, clock skew).
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        fp.update_str(&self.package.name)
            .update_str(&self.package.module)
            .update_str(&self.upstream.url)
            .update_opt(self.upstream.reference.as_deref())
            .update_str(&self.vendor.url_template)
            .update_str(&self.vendor.dir_name)
            .update_str(&self.paths.lib_dir.to_string_lossy())
            .update_strs(self.deploy.rpaths.iter().map(|s| s.as_str()));
        fp.finish()
    }
}

/// Absolute workspace paths derived from a recipe.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Ephemeral upstream clone
    pub work_dir: PathBuf,

    /// Vendor tree inside the work dir
    pub vendor_dir: PathBuf,

    /// Runtime library directory
    pub lib_dir: PathBuf,

    /// Build record location
    pub record_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_recipe_is_valid() {
        Recipe::default().validate().unwrap();
    }

    #[test]
    fn test_load_or_default_without_file() {
        let tmp = TempDir::new().unwrap();
        let recipe = Recipe::load_or_default(tmp.path()).unwrap();
        assert_eq!(recipe.package.name, "av");
        assert_eq!(recipe.python.interpreter, "python3");
    }

    #[test]
    fn test_load_partial_recipe() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(RECIPE_FILE),
            r#"
[package]
name = "mybinding"
module = "mybinding"

[vendor]
url_template = "https://example.com/native-{platform}.tar.gz"
"#,
        )
        .unwrap();

        let recipe = Recipe::load_or_default(tmp.path()).unwrap();
        assert_eq!(recipe.package.name, "mybinding");
        // Unspecified sections keep their defaults.
        assert_eq!(recipe.vendor.dir_name, "vendor");
        assert_eq!(recipe.deploy.rpaths.len(), 2);
    }

    #[test]
    fn test_template_without_placeholder_is_rejected() {
        let mut recipe = Recipe::default();
        recipe.vendor.url_template = "https://example.com/ffmpeg-linux.tar.gz".to_string();

        let err = recipe.validate().unwrap_err().to_string();
        assert!(err.contains("{platform}"));
    }

    #[test]
    fn test_invalid_upstream_url_is_rejected() {
        let mut recipe = Recipe::default();
        recipe.upstream.url = "not a url".to_string();
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_fingerprint_tracks_resolution_fields() {
        let base = Recipe::default();
        let mut changed = Recipe::default();
        changed.vendor.url_template =
            "https://example.com/other-{platform}.tar.gz".to_string();

        assert_ne!(base.fingerprint(), changed.fingerprint());
        assert_eq!(base.fingerprint(), Recipe::default().fingerprint());
    }

    #[test]
    fn test_layout_paths() {
        let recipe = Recipe::default();
        let layout = recipe.layout(Path::new("/srv/app"));

        assert_eq!(layout.work_dir, Path::new("/srv/app/build/binding-src"));
        assert_eq!(
            layout.vendor_dir,
            Path::new("/srv/app/build/binding-src/vendor")
        );
        assert_eq!(layout.lib_dir, Path::new("/srv/app/lib_native"));
        assert_eq!(
            layout.record_path,
            Path::new("/srv/app/.slipway/record.json")
        );
    }
}
