//! Version vectors for causality tracking between offline clients.
//!
//! Each node (a browser session, a device, the server) keeps a counter that
//! it bumps whenever it produces a new state of a record. Comparing two
//! vectors tells whether one state causally follows the other or whether
//! they were produced concurrently and need reconciliation.
//!
//! Missing entries are read as `0`, so `{a: 0}` and `{}` compare equal.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Causality relationship between two version vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CausalOrder {
    /// First vector happened before second.
    Before,
    /// First vector happened after second.
    After,
    /// Vectors are concurrent (neither happened before the other).
    Concurrent,
    /// Vectors are identical.
    Equal,
}

/// A mapping from node id to a monotonically increasing counter.
///
/// Serializes as a plain JSON object, e.g. `{"bridge-pc": 4, "server": 7}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionVector {
    counters: BTreeMap<String, u64>,
}

impl VersionVector {
    /// Creates a new empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            counters: BTreeMap::new(),
        }
    }

    /// Returns the counter for a node (0 if not present).
    #[must_use]
    pub fn get(&self, node: &str) -> u64 {
        self.counters.get(node).copied().unwrap_or(0)
    }

    /// Returns all nodes and their counters, ordered by node id.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counters.iter().map(|(node, &n)| (node.as_str(), n))
    }

    /// Returns the number of nodes in the vector.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Returns true if the vector has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Increments the counter for a node and returns the new value.
    pub fn increment(&mut self, node: impl Into<String>) -> u64 {
        let entry = self.counters.entry(node.into()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }

    /// Raises the counter for a node to `counter`.
    ///
    /// Lower values are ignored; counters never go backwards.
    pub fn update(&mut self, node: impl Into<String>, counter: u64) {
        let entry = self.counters.entry(node.into()).or_insert(0);
        if counter > *entry {
            *entry = counter;
        }
    }

    /// Merges another vector into this one, keeping the per-node maximum.
    pub fn merge(&mut self, other: &Self) {
        for (node, &counter) in &other.counters {
            let entry = self.counters.entry(node.clone()).or_insert(0);
            if counter > *entry {
                *entry = counter;
            }
        }
    }

    /// Creates a new vector that is the merge of this and another.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Compares this vector with another to determine causal ordering.
    #[must_use]
    pub fn compare(&self, other: &Self) -> CausalOrder {
        let mut self_ge = true;
        let mut other_ge = true;

        let all_nodes: BTreeSet<&str> = self
            .counters
            .keys()
            .chain(other.counters.keys())
            .map(String::as_str)
            .collect();

        for node in all_nodes {
            let mine = self.get(node);
            let theirs = other.get(node);

            if mine < theirs {
                self_ge = false;
            }
            if theirs < mine {
                other_ge = false;
            }
        }

        match (self_ge, other_ge) {
            (true, true) => CausalOrder::Equal,
            (true, false) => CausalOrder::After,
            (false, true) => CausalOrder::Before,
            (false, false) => CausalOrder::Concurrent,
        }
    }

    /// Returns true if every counter here is >= the other's and at least
    /// one is strictly greater. Never true for equal vectors.
    #[must_use]
    pub fn dominates(&self, other: &Self) -> bool {
        self.compare(other) == CausalOrder::After
    }

    /// Returns true if neither vector dominates the other.
    ///
    /// Equal vectors are concurrent under this definition.
    #[must_use]
    pub fn is_concurrent(&self, other: &Self) -> bool {
        !self.dominates(other) && !other.dominates(self)
    }
}

impl PartialEq for VersionVector {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == CausalOrder::Equal
    }
}

impl Eq for VersionVector {}

impl<K: Into<String>> FromIterator<(K, u64)> for VersionVector {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut vector = Self::new();
        for (node, counter) in iter {
            vector.update(node, counter);
        }
        vector
    }
}

/// Per-node maximum of two vectors. Nodes present in only one input pass
/// through unchanged.
#[must_use]
pub fn merge_version_vectors(v1: &VersionVector, v2: &VersionVector) -> VersionVector {
    v1.merged(v2)
}

/// See [`VersionVector::dominates`].
#[must_use]
pub fn dominates(v1: &VersionVector, v2: &VersionVector) -> bool {
    v1.dominates(v2)
}

/// See [`VersionVector::is_concurrent`].
#[must_use]
pub fn is_concurrent(v1: &VersionVector, v2: &VersionVector) -> bool {
    v1.is_concurrent(v2)
}
