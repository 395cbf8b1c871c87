//! Dependency-graph utilities for asset lists and decision tables.
//!
//! Ordering is deterministic: nodes are visited in list order and
//! dependencies in declaration order, so two runs over the same input always
//! agree.

use crate::core::AssetDescriptor;
use crate::errors::{CycleDetectedError, UnresolvedDependencyError};
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

/// Finds a dependency cycle in a handle graph.
///
/// Returns the cycle path with the first handle repeated at the end.
/// Dependencies absent from the graph are treated as leaves.
#[must_use]
pub fn find_cycle(graph: &BTreeMap<String, Vec<String>>) -> Option<Vec<String>> {
    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();
    let mut path = Vec::new();

    fn dfs<'a>(
        node: &'a str,
        graph: &'a BTreeMap<String, Vec<String>>,
        visited: &mut HashSet<&'a str>,
        in_stack: &mut HashSet<&'a str>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        if in_stack.contains(node) {
            let start = path.iter().position(|n| *n == node).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(|n| (*n).to_string()).collect();
            cycle.push(node.to_string());
            return Some(cycle);
        }
        if !visited.insert(node) {
            return None;
        }

        in_stack.insert(node);
        path.push(node);

        if let Some(deps) = graph.get(node) {
            for dep in deps {
                if let Some(cycle) = dfs(dep, graph, visited, in_stack, path) {
                    return Some(cycle);
                }
            }
        }

        path.pop();
        in_stack.remove(node);
        None
    }

    graph
        .keys()
        .find_map(|node| dfs(node, graph, &mut visited, &mut in_stack, &mut path))
}

/// Removes later descriptors whose handle was already seen.
///
/// Returns the kept descriptors in their original order and the handles of
/// the dropped duplicates.
#[must_use]
pub fn dedupe_by_handle(assets: Vec<AssetDescriptor>) -> (Vec<AssetDescriptor>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(assets.len());
    let mut dropped = Vec::new();

    for asset in assets {
        if seen.contains(&asset.handle) {
            dropped.push(asset.handle);
        } else {
            seen.insert(asset.handle.clone());
            kept.push(asset);
        }
    }

    (kept, dropped)
}

/// Stable topological sort of resolved assets.
///
/// Each asset is emitted after every dependency that is itself in the list.
/// Assets without such constraints keep their relative order. Dependencies
/// outside the list are ignored here; [`verify_dependency_order`] checks them.
///
/// # Errors
///
/// Returns an error if the in-list dependencies form a cycle.
pub fn order_by_dependencies(
    assets: Vec<AssetDescriptor>,
) -> Result<Vec<AssetDescriptor>, CycleDetectedError> {
    let order = {
        let index: HashMap<&str, usize> = assets
            .iter()
            .enumerate()
            .map(|(i, a)| (a.handle.as_str(), i))
            .collect();
        let mut state = vec![Visit::Unvisited; assets.len()];
        let mut order = Vec::with_capacity(assets.len());
        let mut path = Vec::new();

        fn visit(
            node: usize,
            assets: &[AssetDescriptor],
            index: &HashMap<&str, usize>,
            state: &mut [Visit],
            path: &mut Vec<usize>,
            order: &mut Vec<usize>,
        ) -> Result<(), Vec<String>> {
            match state[node] {
                Visit::Done => return Ok(()),
                Visit::InProgress => {
                    let start = path.iter().position(|n| *n == node).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        path[start..].iter().map(|i| assets[*i].handle.clone()).collect();
                    cycle.push(assets[node].handle.clone());
                    return Err(cycle);
                }
                Visit::Unvisited => {}
            }

            state[node] = Visit::InProgress;
            path.push(node);

            for dep in &assets[node].dependencies {
                if let Some(&next) = index.get(dep.as_str()) {
                    visit(next, assets, index, state, path, order)?;
                }
            }

            path.pop();
            state[node] = Visit::Done;
            order.push(node);
            Ok(())
        }

        for node in 0..assets.len() {
            visit(node, &assets, &index, &mut state, &mut path, &mut order)
                .map_err(CycleDetectedError::new)?;
        }
        order
    };

    let mut slots: Vec<Option<AssetDescriptor>> = assets.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
}

/// Checks that every dependency is either earlier in the list or provided by
/// the host.
///
/// # Errors
///
/// Returns the first offending asset and dependency.
pub fn verify_dependency_order(
    assets: &[AssetDescriptor],
    is_host_handle: impl Fn(&str) -> bool,
) -> Result<(), UnresolvedDependencyError> {
    let mut emitted: HashSet<&str> = HashSet::with_capacity(assets.len());

    for asset in assets {
        for dep in &asset.dependencies {
            if !emitted.contains(dep.as_str()) && !is_host_handle(dep) {
                return Err(UnresolvedDependencyError::new(&asset.handle, dep));
            }
        }
        emitted.insert(&asset.handle);
    }

    Ok(())
}
