//! Offline sync conflict resolution for Nautilus One.
//!
//! When a client that edited records offline reconnects, the sync
//! orchestrator fetches the server copy of each touched record and asks this
//! crate how to reconcile the two.
//!
//! ## Components
//!
//! - **Resolver**: [`resolve_conflict`] applies one of five strategies
//!   (`server-wins`, `client-wins`, `last-write-wins`, `merge`, `manual`)
//!   and never performs I/O
//! - **Version vectors**: [`merge_version_vectors`], [`dominates`] and
//!   [`is_concurrent`] for causality checks that do not trust wall clocks
//! - **Conflict store**: [`ConflictStore`] keeps conflicts that need a
//!   person, in memory, keyed by record id
//! - **Storage**: [`KeyValueStore`] is the browser-storage collaborator the
//!   caller can use to persist pending conflicts
//!
//! # Example
//!
//! ```
//! use nautilus_model::{ConflictConfig, ConflictStrategy, VersionedRecord};
//! use nautilus_sync::resolve_conflict;
//!
//! let local = VersionedRecord::new("a", 2, 100).with_field("title", "X");
//! let remote = VersionedRecord::new("a", 3, 200).with_field("title", "Y");
//! let config = ConflictConfig::new(ConflictStrategy::LastWriteWins);
//!
//! let result = resolve_conflict(&local, &remote, &config).unwrap();
//! assert_eq!(result.data.get_str("title"), Some("Y"));
//! assert_eq!(result.data.version, 4);
//! ```

pub mod conflict_store;
mod error;
pub mod resolver;
pub mod storage;

pub use conflict_store::{ConflictStore, PendingConflict};
pub use error::{SyncError, SyncResult};
pub use resolver::{
    dominates, is_concurrent, merge_version_vectors, resolve_conflict, resolve_conflict_at,
    VersionVector,
};
pub use storage::{load_json, save_json, KeyValueStore, MemoryStore};
