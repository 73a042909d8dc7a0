//! Wall-clock time in epoch milliseconds.
//!
//! Every timestamp in the bus and the record model is an `i64` count of
//! milliseconds since the Unix epoch, the same unit the web client and the
//! backend exchange.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub type Millis = i64;

/// Returns the current wall-clock time in milliseconds.
///
/// A clock set before the epoch reads as `0` rather than failing.
#[must_use]
pub fn now_millis() -> Millis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
