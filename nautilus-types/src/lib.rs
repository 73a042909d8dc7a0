//! Core type definitions for Nautilus One.
//!
//! This crate defines the small set of primitives shared by the bridge and
//! sync crates:
//! - Event identifiers (UUID v7)
//! - Wall-clock milliseconds since the Unix epoch
//!
//! Domain records (vessels, crew, audits, documents) are plain JSON at this
//! layer and belong to the application, not here.

mod ids;
mod timestamp;

pub use ids::EventId;
pub use timestamp::{now_millis, Millis};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
