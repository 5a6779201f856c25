//! Integration tests for site-preflight.
//!
//! These tests drive the validators end to end against on-disk fixtures and
//! a mock toolchain.

pub mod cli_tests;
pub mod config_tests;
pub mod output_tests;
