//! BridgeLink: the in-process event bus for Nautilus One.
//!
//! Modules (fleet, crew, audits, documents, insights, sync) notify each
//! other through a [`BridgeLink`] instead of calling one another directly.
//!
//! - Dispatch is synchronous: every handler subscribed to an event type
//!   runs, in subscription order, before [`BridgeLink::emit`] returns.
//! - A failing or panicking handler is logged and counted; it never stops
//!   sibling handlers and never reaches the emitter.
//! - The last [`BridgeConfig::history_capacity`] events (500 by default)
//!   are kept for diagnostics and replay.
//!
//! A `BridgeLink` is a cheap handle: construct one at startup and clone it
//! into the modules that need it.
//!
//! # Example
//!
//! ```
//! use nautilus_bridge::{BridgeLink, EventType};
//! use serde_json::json;
//!
//! let bridge = BridgeLink::new();
//! let sub = bridge.on(EventType::TelemetryLog, |event| {
//!     assert_eq!(event.source, "ModuleX");
//! });
//!
//! bridge.emit(EventType::TelemetryLog, "ModuleX", json!({ "n": 1 }));
//! assert_eq!(bridge.stats().total_events, 1);
//! sub.unsubscribe();
//! ```

mod bus;
mod config;
mod event;
mod history;

pub use bus::{BridgeLink, BridgeStats, Subscription};
pub use config::{BridgeConfig, DEFAULT_HISTORY_CAPACITY};
pub use event::{BusEvent, EventType};
