//! Plugin documentation cache
//!
//! The cache maps a plugin name to the metadata the scanner reported for
//! it (elements, pads, properties, ...). It is persisted as JSON next to
//! the documentation sources and merged with every fresh scan.
//!
//! # Stability
//!
//! | Marker | Effect |
//! |--------|--------|
//! | none | scanned values replace cached ones |
//! | `unstable-values: "key"` | `key` in that node keeps its cached value |
//! | `unstable-values: ["a", "b"]` | same, for each listed key |

pub mod merge;
pub mod normalize;
pub mod store;

pub use merge::{merge, unstable_keys, MergeOutcome, UNSTABLE_VALUES_KEY};
pub use normalize::{NormalizeRules, Normalizer};
pub use store::{load_or_empty, load_ordered, to_indented_json, to_sorted_json, write_sorted};

/// Plugin name → metadata, in file order
pub type PluginCache = serde_json::Map<String, serde_json::Value>;
