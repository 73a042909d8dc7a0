use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// How two divergent copies of a record are reconciled.
///
/// On the wire each strategy is a kebab-case string. Deserialization is
/// lenient: an unrecognized name becomes [`ConflictStrategy::ServerWins`].
/// [`FromStr`] is strict and reports the unknown name instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ConflictStrategy {
    /// The server copy is taken verbatim.
    #[default]
    ServerWins,
    /// The local copy is kept, with a bumped version.
    ClientWins,
    /// The copy with the later `updatedAt` is taken whole.
    LastWriteWins,
    /// Fields are reconciled one by one.
    Merge,
    /// Nothing is reconciled; differences go to a human.
    Manual,
}

impl ConflictStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::ServerWins,
        Self::ClientWins,
        Self::LastWriteWins,
        Self::Merge,
        Self::Manual,
    ];

    /// The wire name, e.g. `"last-write-wins"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ServerWins => "server-wins",
            Self::ClientWins => "client-wins",
            Self::LastWriteWins => "last-write-wins",
            Self::Merge => "merge",
            Self::Manual => "manual",
        }
    }

    /// Parses a wire name, falling back to `ServerWins` for unknown names.
    #[must_use]
    pub fn from_name_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: UnknownStrategy| {
            warn!(strategy = %err.0, "Unknown conflict strategy, falling back to server-wins");
            Self::ServerWins
        })
    }
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`ConflictStrategy::from_str`] for a name it does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown conflict strategy: {0}")]
pub struct UnknownStrategy(pub String);

impl FromStr for ConflictStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

impl From<String> for ConflictStrategy {
    fn from(name: String) -> Self {
        Self::from_name_lenient(&name)
    }
}

impl From<ConflictStrategy> for &'static str {
    fn from(strategy: ConflictStrategy) -> Self {
        strategy.as_str()
    }
}

/// Caller-chosen policy for one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConflictConfig {
    /// Strategy for the record as a whole.
    pub default_strategy: ConflictStrategy,
    /// Per-field overrides, consulted only when `default_strategy` is
    /// [`ConflictStrategy::Merge`].
    pub field_strategies: BTreeMap<String, ConflictStrategy>,
    /// Reject records whose ids differ instead of resolving them anyway.
    /// Defaults to on in debug builds and off in release builds.
    pub strict_ids: bool,
}

impl ConflictConfig {
    /// Creates a config with the given top-level strategy.
    #[must_use]
    pub fn new(default_strategy: ConflictStrategy) -> Self {
        Self {
            default_strategy,
            ..Self::default()
        }
    }

    /// Adds a per-field override.
    #[must_use]
    pub fn with_field_strategy(
        mut self,
        field: impl Into<String>,
        strategy: ConflictStrategy,
    ) -> Self {
        self.field_strategies.insert(field.into(), strategy);
        self
    }

    /// Sets [`strict_ids`](Self::strict_ids).
    #[must_use]
    pub fn with_strict_ids(mut self, strict_ids: bool) -> Self {
        self.strict_ids = strict_ids;
        self
    }

    /// Strategy for a single differing field under merge.
    ///
    /// Fields without an override use last-write-wins. A `merge` override
    /// has no finer granularity to descend into and also means
    /// last-write-wins.
    #[must_use]
    pub fn strategy_for(&self, field: &str) -> ConflictStrategy {
        match self.field_strategies.get(field) {
            Some(ConflictStrategy::Merge) | None => ConflictStrategy::LastWriteWins,
            Some(strategy) => *strategy,
        }
    }
}

impl Default for ConflictConfig {
    fn default() -> Self {
        Self {
            default_strategy: ConflictStrategy::default(),
            field_strategies: BTreeMap::new(),
            strict_ids: cfg!(debug_assertions),
        }
    }
}
