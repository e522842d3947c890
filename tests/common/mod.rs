//! Common test utilities and helpers
//!
//! Scratch tsrc workspaces and a preconfigured `wtsrc` command for the
//! binary-level tests.

#![allow(dead_code)]

pub mod test_fixtures;

pub use test_fixtures::TestWorkspace;
