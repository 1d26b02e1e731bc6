//! Common test utilities for Edgeship CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project and config directories
//! - Fixtures: Reusable manifest content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
