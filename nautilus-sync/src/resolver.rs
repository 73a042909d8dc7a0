//! Conflict resolver - reconciles a local and a remote copy of a record.
//!
//! Everything here is pure: no storage, no network, no shared state, and
//! neither input is mutated. The orchestrator that fetched the remote copy
//! decides what to do with the result.
//!
//! Version rule: every automatic strategy except `server-wins` produces
//! `max(local.version, remote.version) + 1`. `server-wins` hands back the
//! server copy untouched, and `manual` hands back the local copy untouched.

use crate::error::{SyncError, SyncResult};
use nautilus_model::{ConflictConfig, ConflictResult, ConflictStrategy, VersionedRecord};
use nautilus_types::{now_millis, Millis};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub use nautilus_crdt::{dominates, is_concurrent, merge_version_vectors, VersionVector};

/// Reconciles two copies of a record, stamping merges with the current time.
pub fn resolve_conflict(
    local: &VersionedRecord,
    remote: &VersionedRecord,
    config: &ConflictConfig,
) -> SyncResult<ConflictResult> {
    resolve_conflict_at(local, remote, config, now_millis())
}

/// Reconciles two copies of a record with an explicit resolution time.
///
/// `now` becomes `updatedAt` of merged records.
pub fn resolve_conflict_at(
    local: &VersionedRecord,
    remote: &VersionedRecord,
    config: &ConflictConfig,
    now: Millis,
) -> SyncResult<ConflictResult> {
    let ids_match = local.id == remote.id;
    if !ids_match {
        if config.strict_ids {
            return Err(SyncError::IdMismatch {
                local: local.id.clone(),
                remote: remote.id.clone(),
            });
        }
        warn!(
            local_id = %local.id,
            remote_id = %remote.id,
            "Resolving records with different ids, keeping the local id"
        );
    }

    let strategy = config.default_strategy;
    let mut result = match strategy {
        ConflictStrategy::ServerWins => ConflictResult::resolved(remote.clone(), strategy),
        ConflictStrategy::ClientWins => {
            let mut data = local.clone();
            data.version = next_version(local, remote)?;
            ConflictResult::resolved(data, strategy)
        }
        ConflictStrategy::LastWriteWins => {
            let mut data = newer(local, remote).clone();
            data.version = next_version(local, remote)?;
            ConflictResult::resolved(data, strategy)
        }
        ConflictStrategy::Merge => merge_fields(local, remote, config, now)?,
        ConflictStrategy::Manual => {
            ConflictResult::unresolved(local.clone(), strategy, local.differing_fields(remote))
        }
    };

    if !ids_match {
        result.data.id = local.id.clone();
    }

    debug!(
        record_id = %local.id,
        strategy = %strategy,
        resolved = result.resolved,
        conflicts = result.conflicts.len(),
        version = result.data.version,
        "Resolved record conflict"
    );
    Ok(result)
}

/// `max(local.version, remote.version) + 1`.
fn next_version(local: &VersionedRecord, remote: &VersionedRecord) -> SyncResult<u64> {
    let version = local.version.max(remote.version);
    version
        .checked_add(1)
        .ok_or(SyncError::VersionOverflow { version })
}

/// The copy with the later `updatedAt`. Ties go to the server copy.
fn newer<'a>(local: &'a VersionedRecord, remote: &'a VersionedRecord) -> &'a VersionedRecord {
    if local.updated_at > remote.updated_at {
        local
    } else {
        remote
    }
}

fn merge_fields(
    local: &VersionedRecord,
    remote: &VersionedRecord,
    config: &ConflictConfig,
    now: Millis,
) -> SyncResult<ConflictResult> {
    let mut fields = Map::new();
    let mut conflicts = Vec::new();

    for name in local.field_union(remote) {
        let mine = local.get(name);
        let theirs = remote.get(name);

        // A side that lacks the field never removes it; the other side's
        // value is used instead.
        let value = match (mine, theirs) {
            (Some(a), Some(b)) if a == b => mine,
            _ => match config.strategy_for(name) {
                ConflictStrategy::ServerWins => theirs.or(mine),
                ConflictStrategy::ClientWins => mine.or(theirs),
                ConflictStrategy::Manual => {
                    conflicts.push(name.to_owned());
                    mine.or(theirs)
                }
                ConflictStrategy::LastWriteWins | ConflictStrategy::Merge => {
                    if local.updated_at > remote.updated_at {
                        mine.or(theirs)
                    } else {
                        theirs.or(mine)
                    }
                }
            },
        };

        if let Some(value) = value {
            fields.insert(name.to_owned(), Value::clone(value));
        }
    }

    let data = VersionedRecord {
        id: local.id.clone(),
        version: next_version(local, remote)?,
        updated_at: now,
        created_at: earliest(local.created_at.as_ref(), remote.created_at.as_ref()),
        fields,
    };
    Ok(ConflictResult::with_conflicts(
        data,
        ConflictStrategy::Merge,
        conflicts,
    ))
}

/// The earlier of two creation times when both are epoch milliseconds.
/// Any other shape is carried through, preferring the local value.
fn earliest(local: Option<&Value>, remote: Option<&Value>) -> Option<Value> {
    let chosen = match (local, remote) {
        (Some(a), Some(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) if y < x => b,
            _ => a,
        },
        (a, b) => a.or(b)?,
    };
    Some(chosen.clone())
}
