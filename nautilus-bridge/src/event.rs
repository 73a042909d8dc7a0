//! Event types carried by the bridge.
//!
//! Each event is immutable once created and carries the name of the module
//! that emitted it. Payloads are plain JSON; call sites that know the shape
//! decode them with [`BusEvent::data_as`].

use nautilus_types::{now_millis, EventId, Millis};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Name of an event.
///
/// The known names cover the notifications the modules exchange today.
/// Anything else is carried as [`EventType::Custom`], so new names need no
/// change here. Parsing a known name always yields its named variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// `telemetry:log`
    TelemetryLog,
    /// `vessel:updated`
    VesselUpdated,
    /// `crew:updated`
    CrewUpdated,
    /// `audit:created`
    AuditCreated,
    /// `audit:completed`
    AuditCompleted,
    /// `document:uploaded`
    DocumentUploaded,
    /// `alert:raised`
    AlertRaised,
    /// `insight:generated`
    InsightGenerated,
    /// `sync:started`
    SyncStarted,
    /// `sync:completed`
    SyncCompleted,
    /// `sync:conflict`
    SyncConflict,
    /// Any other name.
    Custom(String),
}

impl EventType {
    /// Every named variant.
    pub const KNOWN: [Self; 11] = [
        Self::TelemetryLog,
        Self::VesselUpdated,
        Self::CrewUpdated,
        Self::AuditCreated,
        Self::AuditCompleted,
        Self::DocumentUploaded,
        Self::AlertRaised,
        Self::InsightGenerated,
        Self::SyncStarted,
        Self::SyncCompleted,
        Self::SyncConflict,
    ];

    /// The event name, e.g. `"telemetry:log"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::TelemetryLog => "telemetry:log",
            Self::VesselUpdated => "vessel:updated",
            Self::CrewUpdated => "crew:updated",
            Self::AuditCreated => "audit:created",
            Self::AuditCompleted => "audit:completed",
            Self::DocumentUploaded => "document:uploaded",
            Self::AlertRaised => "alert:raised",
            Self::InsightGenerated => "insight:generated",
            Self::SyncStarted => "sync:started",
            Self::SyncCompleted => "sync:completed",
            Self::SyncConflict => "sync:conflict",
            Self::Custom(name) => name,
        }
    }

    /// Returns true for names outside the known set.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EventType {
    fn from(name: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|known| known.as_str() == name)
            .unwrap_or_else(|| Self::Custom(name.to_string()))
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Custom(_) => Self::Custom(name),
            known => known,
        }
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// A single notification on the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusEvent {
    /// Unique per emission.
    pub id: EventId,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Name of the emitting module.
    pub source: String,
    pub data: Value,
    /// Creation time, epoch milliseconds.
    pub timestamp: Millis,
}

impl BusEvent {
    /// Creates an event stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(event_type: EventType, source: impl Into<String>, data: Value) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            source: source.into(),
            data,
            timestamp: now_millis(),
        }
    }

    /// Decodes the payload into a typed value.
    pub fn data_as<T: DeserializeOwned>(&self) -> nautilus_types::Result<T> {
        Ok(T::deserialize(&self.data)?)
    }
}
