//! Validation engine module.
//!
//! Provides rule execution and result aggregation.

pub mod orchestrator;
pub mod result;
