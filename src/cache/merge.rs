//! Stability-aware recursive merge of scan results into the plugin cache
//!
//! Fresh scan data overrides cached values key by key, descending into
//! nested objects. A node may name some of its own keys under
//! `unstable-values`; those keys keep their cached value whatever the scan
//! says. The marker only protects siblings in the node that carries it.
//! Nothing present only in the cache is ever removed.

use super::normalize::NormalizeRules;
use super::PluginCache;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::trace;

/// Reserved key listing the sibling keys that scans must not overwrite
pub const UNSTABLE_VALUES_KEY: &str = "unstable-values";

/// Result of merging a scan into a cache
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// The merged cache
    pub merged: PluginCache,

    /// Whether any key at any depth was written
    ///
    /// Writing a value equal to the cached one still counts.
    pub modified: bool,
}

/// Merge `incoming` over `existing`, leaving both untouched
pub fn merge(
    existing: &PluginCache,
    incoming: &PluginCache,
    rules: &NormalizeRules,
) -> MergeOutcome {
    let mut merged = existing.clone();
    let modified = merge_node(&mut merged, incoming, rules);
    MergeOutcome { merged, modified }
}

/// Keys protected by the node's `unstable-values` marker
///
/// The marker is either a single key name or a list of them. Anything else
/// protects nothing.
pub fn unstable_keys(node: &PluginCache) -> HashSet<String> {
    match node.get(UNSTABLE_VALUES_KEY) {
        Some(Value::String(key)) => HashSet::from([key.clone()]),
        Some(Value::Array(keys)) => keys
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => HashSet::new(),
    }
}

fn merge_node(node: &mut PluginCache, incoming: &PluginCache, rules: &NormalizeRules) -> bool {
    // Taken before any write so a scanned marker only applies next run
    let unstable = unstable_keys(node);
    let mut modified = false;

    for (key, value) in incoming {
        match value {
            Value::Object(incoming_child) => {
                let child = node
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !child.is_object() {
                    *child = Value::Object(Map::new());
                }
                if let Value::Object(child) = child {
                    modified |= merge_node(child, incoming_child, rules);
                }
            }
            _ if unstable.contains(key) => {
                trace!("Keeping unstable value {}", key);
            }
            _ => {
                node.insert(key.clone(), rules.normalize(key, value.clone()));
                modified = true;
            }
        }
    }

    modified
}
