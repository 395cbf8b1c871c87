//! Assertions for resolution invariants.

use crate::core::Resolution;
use crate::table::DecisionTable;
use std::collections::HashSet;

/// Asserts that no handle appears twice.
pub fn assert_unique_handles(resolution: &Resolution) {
    let mut seen = HashSet::new();
    for handle in resolution.handles() {
        assert!(seen.insert(handle), "Duplicate handle '{handle}' in resolution");
    }
}

/// Asserts that every dependency is earlier in the output or host-provided.
pub fn assert_dependencies_satisfied(resolution: &Resolution, table: &DecisionTable) {
    let mut emitted = HashSet::new();
    for asset in &resolution.assets {
        for dep in &asset.dependencies {
            assert!(
                emitted.contains(dep.as_str()) || table.is_host_handle(dep),
                "'{}' depends on '{}', which is neither earlier in the output nor host-provided",
                asset.handle,
                dep
            );
        }
        emitted.insert(asset.handle.as_str());
    }
}

/// Asserts that exactly one of two handle sets is fully present and the
/// other fully absent.
pub fn assert_exactly_one_side(resolution: &Resolution, standard: &[&str], alternate: &[&str]) {
    let has_all = |side: &[&str]| side.iter().all(|h| resolution.contains(h));
    let has_none = |side: &[&str]| side.iter().all(|h| !resolution.contains(h));

    let standard_only = has_all(standard) && has_none(alternate);
    let alternate_only = has_all(alternate) && has_none(standard);
    assert!(
        standard_only || alternate_only,
        "Expected exactly one of {standard:?} / {alternate:?}, got {:?}",
        resolution.handles()
    );
}
