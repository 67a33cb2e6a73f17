//! Validation engine module.
//!
//! Provides rule orchestration and report assembly.

pub mod orchestrator;
pub mod result;
