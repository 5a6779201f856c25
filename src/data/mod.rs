//! Data module for site-preflight
//!
//! Contains the fixed requirement tables the rules check against.

pub mod requirements;
