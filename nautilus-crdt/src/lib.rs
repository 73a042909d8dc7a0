//! Causality primitives for Nautilus One offline sync.
//!
//! - [`VersionVector`]: per-node counters for ordering record states
//!   without trusting wall clocks
//! - [`CausalOrder`]: result of comparing two vectors
//!
//! Merging version vectors satisfies the usual CRDT laws:
//! - **Commutative**: merge(a, b) == merge(b, a)
//! - **Associative**: merge(merge(a, b), c) == merge(a, merge(b, c))
//! - **Idempotent**: merge(a, a) == a

mod version_vector;

pub use version_vector::{
    dominates, is_concurrent, merge_version_vectors, CausalOrder, VersionVector,
};
