//! Platform abstraction layer.
//!
//! Provides consistent interfaces for:
//! - Loading text artifacts and discovering content files
//! - Locating tools on PATH and running them under a timeout

pub mod fs;
pub mod process;
