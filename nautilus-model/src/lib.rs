//! Record model for Nautilus One offline sync.
//!
//! Defines the types shared between the conflict resolver and its callers:
//! - [`VersionedRecord`]: a record with an explicit version counter,
//!   last-modified time and an open-ended bag of fields
//! - [`ConflictStrategy`]: the named policy used to reconcile two copies
//! - [`ConflictConfig`]: top-level strategy plus per-field overrides
//! - [`ConflictResult`]: the reconciled record and what happened
//!
//! The JSON shapes match what the web client keeps in browser storage, so
//! records can be round-tripped through `serde_json` unchanged.

mod record;
mod result;
mod strategy;

pub use record::{is_metadata_field, VersionedRecord, METADATA_FIELDS};
pub use result::ConflictResult;
pub use strategy::{ConflictConfig, ConflictStrategy, UnknownStrategy};
