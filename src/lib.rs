//! Slipway - a deterministic build orchestrator for serverless native bindings
//!
//! This crate provides the core library functionality for Slipway: it clones
//! a Python multimedia binding, points it at a prebuilt native media library,
//! compiles the binding against it, and stages the resulting shared objects
//! for a serverless runtime.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::{platform::host_platform_tag, recipe::Recipe, record::BuildRecord};

pub use crate::builder::env::BuildEnv;
pub use crate::builder::probe::ProbeError;
pub use crate::ops::build::{build, BuildOptions, BuildOutcome};
