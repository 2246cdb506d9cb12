//! Core data model: recipe, build record, platform tag.

pub mod platform;
pub mod recipe;
pub mod record;

pub use platform::host_platform_tag;
pub use recipe::{Layout, Recipe};
pub use record::BuildRecord;
