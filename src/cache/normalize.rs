//! Value normalization applied to scanned values before they are stored
//!
//! Some scanned values differ between builds without meaning anything
//! different (the `package` string carries the release channel, for
//! example). Rules are looked up by key so new ones can be added without
//! touching the merge itself.

use crate::config::NormalizeRuleConfig;
use serde_json::Value;
use std::collections::HashMap;

/// A single normalization applied to a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalizer {
    /// Remove the first matching trailing suffix from a string value
    StripSuffix(Vec<String>),
}

impl Normalizer {
    /// Apply the normalization; values of other types are returned as-is
    pub fn apply(&self, value: Value) -> Value {
        match (self, value) {
            (Self::StripSuffix(suffixes), Value::String(text)) => {
                let stripped = suffixes
                    .iter()
                    .find_map(|suffix| text.strip_suffix(suffix.as_str()))
                    .map(str::to_string);
                Value::String(stripped.unwrap_or(text))
            }
            (_, other) => other,
        }
    }
}

/// Table of key → normalizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeRules {
    rules: HashMap<String, Normalizer>,
}

impl NormalizeRules {
    /// An empty rule table: every value is stored verbatim
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Add or replace the rule for `key`
    pub fn with_rule(mut self, key: impl Into<String>, normalizer: Normalizer) -> Self {
        self.rules.insert(key.into(), normalizer);
        self
    }

    /// Build the table from configuration entries
    pub fn from_config(rules: &[NormalizeRuleConfig]) -> Self {
        rules.iter().fold(Self::empty(), |table, rule| {
            table.with_rule(
                rule.key.clone(),
                Normalizer::StripSuffix(rule.strip_suffixes.clone()),
            )
        })
    }

    /// Normalize `value` about to be stored under `key`
    pub fn normalize(&self, key: &str, value: Value) -> Value {
        match self.rules.get(key) {
            Some(normalizer) => normalizer.apply(value),
            None => value,
        }
    }
}

impl Default for NormalizeRules {
    fn default() -> Self {
        Self::from_config(&[NormalizeRuleConfig::package()])
    }
}
