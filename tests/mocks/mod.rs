//! Mock implementations for testing without a real toolchain.
//!
//! This module provides a configurable command runner that can simulate
//! installed, missing, misbehaving, and hanging tools.

pub mod platform;

pub use platform::*;
