//! In-memory index of conflicts waiting for a person to decide.
//!
//! Keyed by record id; adding a conflict for an id that is already pending
//! replaces it. Nothing is persisted on its own: a restart loses every
//! pending entry unless the caller saved them with
//! [`ConflictStore::save_to`].

use crate::error::SyncResult;
use crate::resolver::resolve_conflict;
use crate::storage::{load_json, save_json, KeyValueStore};
use nautilus_model::{ConflictConfig, ConflictResult, ConflictStrategy, VersionedRecord};
use nautilus_types::{now_millis, Millis};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// A conflict waiting for manual resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingConflict {
    pub id: String,
    pub local: VersionedRecord,
    pub remote: VersionedRecord,
    /// When the conflict was recorded, epoch milliseconds.
    pub detected_at: Millis,
    /// Fields whose values differ between the two copies.
    pub conflicts: Vec<String>,
}

/// Pending conflicts keyed by record id.
#[derive(Debug, Default)]
pub struct ConflictStore {
    pending: HashMap<String, PendingConflict>,
}

impl ConflictStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a conflict, returning the one it replaced.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        local: VersionedRecord,
        remote: VersionedRecord,
    ) -> Option<PendingConflict> {
        self.add_at(id, local, remote, now_millis())
    }

    /// [`add`](Self::add) with an explicit detection time.
    pub fn add_at(
        &mut self,
        id: impl Into<String>,
        local: VersionedRecord,
        remote: VersionedRecord,
        detected_at: Millis,
    ) -> Option<PendingConflict> {
        let id = id.into();
        let conflicts = local.differing_fields(&remote);
        debug!(record_id = %id, fields = conflicts.len(), "Conflict queued for manual resolution");
        self.pending.insert(
            id.clone(),
            PendingConflict {
                id,
                local,
                remote,
                detected_at,
                conflicts,
            },
        )
    }

    /// Returns the pending conflict for `id`.
    pub fn get(&self, id: &str) -> Option<&PendingConflict> {
        self.pending.get(id)
    }

    /// Removes and returns the pending conflict for `id`.
    pub fn resolve(&mut self, id: &str) -> Option<PendingConflict> {
        self.pending.remove(id)
    }

    /// Runs the resolver on a pending conflict with `strategy`.
    ///
    /// The entry is removed only if the outcome is fully resolved, so a
    /// `manual` or partially manual merge leaves it in place. Returns `None`
    /// if nothing is pending for `id`.
    pub fn resolve_with(
        &mut self,
        id: &str,
        strategy: ConflictStrategy,
        config: &ConflictConfig,
    ) -> SyncResult<Option<ConflictResult>> {
        let Some(entry) = self.pending.get(id) else {
            return Ok(None);
        };
        let config = ConflictConfig {
            default_strategy: strategy,
            ..config.clone()
        };
        let result = resolve_conflict(&entry.local, &entry.remote, &config)?;
        if result.resolved {
            self.pending.remove(id);
            info!(record_id = %id, strategy = %strategy, "Pending conflict resolved");
        }
        Ok(Some(result))
    }

    /// All pending conflicts, oldest first (ties ordered by id).
    pub fn pending(&self) -> Vec<&PendingConflict> {
        let mut entries: Vec<&PendingConflict> = self.pending.values().collect();
        entries.sort_by(|a, b| a.detected_at.cmp(&b.detected_at).then_with(|| a.id.cmp(&b.id)));
        entries
    }

    /// Drops every pending conflict.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of pending conflicts.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Writes all pending conflicts under `key` as a JSON array.
    pub fn save_to(&self, store: &dyn KeyValueStore, key: &str) -> SyncResult<()> {
        save_json(store, key, &self.pending())
    }

    /// Rebuilds a store from what [`save_to`](Self::save_to) wrote. A missing
    /// key yields an empty store.
    pub fn load_from(store: &dyn KeyValueStore, key: &str) -> SyncResult<Self> {
        let entries: Vec<PendingConflict> = load_json(store, key)?.unwrap_or_default();
        let pending = entries
            .into_iter()
            .map(|entry| (entry.id.clone(), entry))
            .collect();
        Ok(Self { pending })
    }
}
