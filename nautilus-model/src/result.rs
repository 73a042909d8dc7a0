use crate::{ConflictStrategy, VersionedRecord};
use serde::{Deserialize, Serialize};

/// Outcome of reconciling two copies of a record.
///
/// `data` is always usable: when `resolved` is false it holds a provisional,
/// local-preferring value and `conflicts` lists the fields a person still
/// has to decide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictResult {
    pub resolved: bool,
    pub data: VersionedRecord,
    pub strategy: ConflictStrategy,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<String>,
}

impl ConflictResult {
    /// A fully resolved outcome.
    #[must_use]
    pub fn resolved(data: VersionedRecord, strategy: ConflictStrategy) -> Self {
        Self {
            resolved: true,
            data,
            strategy,
            conflicts: Vec::new(),
        }
    }

    /// An outcome that is resolved iff `conflicts` is empty.
    #[must_use]
    pub fn with_conflicts(
        data: VersionedRecord,
        strategy: ConflictStrategy,
        conflicts: Vec<String>,
    ) -> Self {
        Self {
            resolved: conflicts.is_empty(),
            data,
            strategy,
            conflicts,
        }
    }

    /// An outcome left for a person to decide, regardless of `conflicts`.
    #[must_use]
    pub fn unresolved(
        data: VersionedRecord,
        strategy: ConflictStrategy,
        conflicts: Vec<String>,
    ) -> Self {
        Self {
            resolved: false,
            data,
            strategy,
            conflicts,
        }
    }

    /// Returns true if `field` was left for manual resolution.
    #[must_use]
    pub fn is_conflicted(&self, field: &str) -> bool {
        self.conflicts.iter().any(|f| f == field)
    }
}
