//! Testing utilities for assetflow hosts and tables.
//!
//! This module provides:
//! - Context snapshot fixtures for common page setups
//! - A style registry that counts scans
//! - Assertions for the resolution invariants

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{
    assert_dependencies_satisfied, assert_exactly_one_side, assert_unique_handles,
};
pub use fixtures::{ContextFixture, TestResolver};
pub use mocks::CountingStyleRegistry;
