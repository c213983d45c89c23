//! Common test utilities for texview binary tests.
//!
//! - `TestEnv`: isolated project and config directories plus CLI helpers
//! - `PreviewProcess`: a running `texview --json` with its event stream
//! - `fixtures`: minimal PDF bytes, LaTeX sources and stand-in compilers

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
