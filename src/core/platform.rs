//! Host platform detection for vendor archive templates.
//!
//! Vendor archives are published per platform under tags like
//! `manylinux_x86_64` or `macosx_arm64`. The fetch tool resolves the
//! `{platform}` placeholder itself; this tag is recorded in the build
//! record so a skip decision is auditable.

/// The literal placeholder a vendor URL template must contain.
pub const PLATFORM_PLACEHOLDER: &str = "{platform}";

/// Detect the host platform tag.
pub fn host_platform_tag() -> &'static str {
    if cfg!(target_os = "linux") {
        if cfg!(target_arch = "aarch64") {
            "manylinux_aarch64"
        } else {
            "manylinux_x86_64"
        }
    } else if cfg!(target_os = "macos") {
        if cfg!(target_arch = "aarch64") {
            "macosx_arm64"
        } else {
            "macosx_x86_64"
        }
    } else if cfg!(target_os = "windows") {
        "win64"
    } else {
        "unknown"
    }
}

/// Substitute the `{platform}` placeholder in a URL template.
pub fn resolve_template(template: &str) -> String {
    template.replace(PLATFORM_PLACEHOLDER, host_platform_tag())
}
