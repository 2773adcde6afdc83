#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared helpers for the vcpu workspace.
//!
//! - `Colors`: ANSI palette used by disassembly and trace output
//! - `init_logging`: `tracing` subscriber setup for binaries

mod colors;
mod logging;

#[cfg(test)]
mod colors_tests;

pub use colors::Colors;
pub use logging::{DEFAULT_FILTER, init_logging};
