//! The bridge itself: subscription registry, dispatch and history.
//!
//! Registry and history sit behind one mutex. The mutex is released before
//! any handler runs, so a handler may subscribe, unsubscribe or emit
//! (nested dispatch) without deadlocking. A handler that re-emits its own
//! event type unconditionally recurses without bound; avoiding that is the
//! handler's job.

use crate::config::BridgeConfig;
use crate::event::{BusEvent, EventType};
use crate::history::EventHistory;
use nautilus_types::EventId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, warn};

type Handler = Arc<dyn Fn(&BusEvent) -> anyhow::Result<()> + Send + Sync>;

struct Listener {
    id: u64,
    handler: Handler,
}

struct Registry {
    next_listener_id: u64,
    /// Keyed by event name; each list is in subscription order.
    listeners: HashMap<String, Vec<Listener>>,
    history: EventHistory,
    total_events: u64,
    handler_failures: u64,
}

impl Registry {
    fn active_listeners(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }
}

/// Counters describing a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeStats {
    /// Live subscriptions across all event types.
    pub active_listeners: usize,
    /// Emissions since the bridge was created. Not reset by
    /// [`BridgeLink::clear_history`].
    pub total_events: u64,
    /// Handler invocations that returned an error or panicked.
    pub handler_failures: u64,
    /// Events currently held in history.
    pub history_len: usize,
}

/// In-process publish/subscribe hub.
///
/// Clones share the same registry and history.
#[derive(Clone)]
pub struct BridgeLink {
    registry: Arc<Mutex<Registry>>,
}

impl BridgeLink {
    /// Creates a bridge with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    /// Creates a bridge with a custom configuration.
    #[must_use]
    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_listener_id: 0,
                listeners: HashMap::new(),
                history: EventHistory::new(config.history_capacity),
                total_events: 0,
                handler_failures: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        lock_registry(&self.registry)
    }

    /// Subscribes `handler` to `event_type`.
    ///
    /// The handler runs for every later emission of that type until the
    /// returned [`Subscription`] is unsubscribed. Dropping the subscription
    /// does not unsubscribe.
    pub fn on<F>(&self, event_type: impl Into<EventType>, handler: F) -> Subscription
    where
        F: Fn(&BusEvent) + Send + Sync + 'static,
    {
        self.subscribe(
            event_type.into(),
            Arc::new(move |event: &BusEvent| -> anyhow::Result<()> {
                handler(event);
                Ok(())
            }),
        )
    }

    /// Subscribes a handler that can fail.
    ///
    /// Errors are logged and counted in [`BridgeStats::handler_failures`];
    /// they are never returned to the emitter.
    pub fn on_fallible<F>(&self, event_type: impl Into<EventType>, handler: F) -> Subscription
    where
        F: Fn(&BusEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe(event_type.into(), Arc::new(handler))
    }

    fn subscribe(&self, event_type: EventType, handler: Handler) -> Subscription {
        let mut registry = self.lock();
        let id = registry.next_listener_id;
        registry.next_listener_id += 1;
        registry
            .listeners
            .entry(event_type.as_str().to_string())
            .or_default()
            .push(Listener { id, handler });
        debug!(event_type = %event_type, listener_id = id, "Bridge subscription added");

        Subscription {
            registry: Arc::downgrade(&self.registry),
            event_type,
            id,
        }
    }

    /// Emits an event to every handler subscribed to `event_type`, then
    /// records it in history.
    ///
    /// Handlers run synchronously, in subscription order, against the set
    /// of subscriptions that existed when `emit` was called. This never
    /// fails: handler errors and panics are logged and counted.
    pub fn emit(
        &self,
        event_type: impl Into<EventType>,
        source: impl Into<String>,
        data: impl Into<Value>,
    ) -> EventId {
        let event = BusEvent::new(event_type.into(), source, data.into());

        let handlers: Vec<Handler> = {
            let registry = self.lock();
            registry
                .listeners
                .get(event.event_type.as_str())
                .map(|listeners| listeners.iter().map(|l| Arc::clone(&l.handler)).collect())
                .unwrap_or_default()
        };

        let mut failures = 0;
        for handler in &handlers {
            if let Err(reason) = invoke(handler, &event) {
                failures += 1;
                warn!(
                    event_type = %event.event_type,
                    source = %event.source,
                    event_id = %event.id,
                    error = %reason,
                    "Bridge handler failed"
                );
            }
        }

        let id = event.id;
        let mut registry = self.lock();
        registry.total_events += 1;
        registry.handler_failures += failures;
        registry.history.push(event);
        id
    }

    /// Serializes `data` and emits it.
    ///
    /// Returns `None`, logging the error, if `data` cannot be represented as
    /// JSON; nothing is dispatched or recorded in that case.
    pub fn emit_typed<T: Serialize + ?Sized>(
        &self,
        event_type: impl Into<EventType>,
        source: impl Into<String>,
        data: &T,
    ) -> Option<EventId> {
        let event_type = event_type.into();
        match serde_json::to_value(data) {
            Ok(value) => Some(self.emit(event_type, source, value)),
            Err(err) => {
                warn!(event_type = %event_type, error = %err, "Bridge payload not serializable, event dropped");
                None
            }
        }
    }

    /// Up to `limit` recent events (all retained events when `None`), most
    /// recent first.
    ///
    /// Events are recorded when their dispatch completes, so the order is by
    /// completion: an event emitted from inside a handler is recorded before
    /// the event whose handler emitted it, and appears after it here.
    #[must_use]
    pub fn history(&self, limit: Option<usize>) -> Vec<BusEvent> {
        self.lock().history.recent(limit)
    }

    /// Empties history. Subscriptions and counters are unaffected.
    pub fn clear_history(&self) {
        self.lock().history.clear();
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> BridgeStats {
        let registry = self.lock();
        BridgeStats {
            active_listeners: registry.active_listeners(),
            total_events: registry.total_events,
            handler_failures: registry.handler_failures,
            history_len: registry.history.len(),
        }
    }

    /// Live subscriptions for one event type.
    #[must_use]
    pub fn listener_count(&self, event_type: &EventType) -> usize {
        self.lock()
            .listeners
            .get(event_type.as_str())
            .map_or(0, Vec::len)
    }
}

impl Default for BridgeLink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BridgeLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeLink")
            .field("stats", &self.stats())
            .finish()
    }
}

/// Handle for one registration made with [`BridgeLink::on`].
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    event_type: EventType,
    id: u64,
}

impl Subscription {
    /// The event type this subscription listens to.
    #[must_use]
    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// Removes exactly this registration.
    ///
    /// Returns true on the call that removed it; later calls, or calls after
    /// the bridge is gone, are no-ops returning false.
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = lock_registry(&registry);
        let name = self.event_type.as_str();
        let Some(listeners) = registry.listeners.get_mut(name) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|l| l.id != self.id);
        let removed = listeners.len() != before;
        if listeners.is_empty() {
            registry.listeners.remove(name);
        }
        if removed {
            debug!(event_type = %self.event_type, listener_id = self.id, "Bridge subscription removed");
        }
        removed
    }

    /// Returns true until this registration is removed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let registry = lock_registry(&registry);
        registry
            .listeners
            .get(self.event_type.as_str())
            .is_some_and(|listeners| listeners.iter().any(|l| l.id == self.id))
    }
}

/// Registry state stays consistent across a panic (no handler runs under
/// the lock), so a poisoned lock is recovered rather than propagated.
fn lock_registry(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs one handler, turning errors and panics into a message.
fn invoke(handler: &Handler, event: &BusEvent) -> Result<(), String> {
    match catch_unwind(AssertUnwindSafe(|| handler(event))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(format!("{err:#}")),
        Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
