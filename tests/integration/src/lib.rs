//! Integration test utilities for the legal marketplace API
//!
//! Spawns the full server on a local port and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
