/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Per-build session state.
//!
//! A build owns exactly one [`BuildState`]. Directive handlers write to the
//! registry while documents are read. The resolution pass reads the registry
//! and grows the seen-sets. Nothing here is shared between builds.

use crate::definition::Definition;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Terms registered during a build, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermRegistry {
    terms: IndexMap<String, Definition>,
}

impl TermRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a term. Re-registering a key replaces its definition but keeps
    /// its position in iteration order.
    pub fn register(&mut self, key: &str, definition: Definition) -> Option<Definition> {
        self.terms.insert(key.to_string(), definition)
    }

    pub fn get(&self, key: &str) -> Option<&Definition> {
        self.terms.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.terms.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Union with another registry; keys from `other` overwrite ours.
    pub fn merge(&mut self, other: TermRegistry) {
        self.terms.extend(other.terms);
    }
}

/// Keys already expanded to their long form. Insert-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenKeys {
    keys: IndexSet<String>,
}

impl SeenKeys {
    /// Mark `key` as seen. Returns `true` if it was not seen before.
    pub fn insert(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.to_string())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

/// Everything a build session carries across documents.
#[derive(Debug, Clone, Default)]
pub struct BuildState {
    pub registry: TermRegistry,
    /// Abbreviations already rendered in long form.
    pub abbreviations: SeenKeys,
    /// Citation keys already cited through `fcite`.
    pub citations: SeenKeys,
}

impl BuildState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(short: &str) -> Definition {
        Definition {
            short: Some(short.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_reregister_keeps_position() {
        let mut registry = TermRegistry::new();
        registry.register("a", def("A"));
        registry.register("b", def("B"));
        registry.register("a", def("A2"));

        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        let short = registry.get("a").and_then(|d| d.short.as_deref());
        assert_eq!(short, Some("A2"));
    }

    #[test]
    fn test_merge_is_last_writer_wins() {
        let mut left = TermRegistry::new();
        left.register("a", def("left"));
        left.register("b", def("B"));

        let mut right = TermRegistry::new();
        right.register("a", def("right"));
        right.register("c", def("C"));

        left.merge(right);
        assert_eq!(left.len(), 3);
        let short = left.get("a").and_then(|d| d.short.as_deref());
        assert_eq!(short, Some("right"));
    }

    #[test]
    fn test_seen_keys_insert_once() {
        let mut seen = SeenKeys::default();
        assert!(seen.insert("AI"));
        assert!(!seen.insert("AI"));
        assert!(seen.contains("AI"));
        assert_eq!(seen.len(), 1);
    }
}
