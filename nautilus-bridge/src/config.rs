use serde::{Deserialize, Serialize};

/// Number of events kept in history unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 500;

/// Configuration for a [`BridgeLink`](crate::BridgeLink).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Most recent events kept for [`history`](crate::BridgeLink::history).
    /// `0` disables history.
    pub history_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}
