//! The build pipeline.
//!
//! Each stage of the orchestration lives in its own module; `ops::build`
//! sequences them. Stages are strictly sequential and fail-fast: the first
//! error aborts the run.

pub mod compile;
pub mod env;
pub mod gate;
pub mod pkgconfig;
pub mod probe;
pub mod reset;
pub mod source;
pub mod staging;
pub mod vendor;

pub use env::BuildEnv;
pub use gate::GateDecision;
pub use probe::ProbeError;
