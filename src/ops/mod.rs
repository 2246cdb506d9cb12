//! High-level operations.
//!
//! This module contains the implementation of Slipway commands.

pub mod build;
pub mod clean;
pub mod status;
pub mod verify;

pub use build::{build, BuildOptions, BuildOutcome};
pub use clean::{clean, CleanOptions};
pub use status::status;
pub use verify::verify;
