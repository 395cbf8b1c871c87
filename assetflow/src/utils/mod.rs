//! Graph utilities shared by table validation and resolution.

pub mod validation;

pub use validation::{dedupe_by_handle, find_cycle, order_by_dependencies, verify_dependency_order};
