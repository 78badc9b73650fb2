// src/events/bus/event_bus.rs
//
// Core event bus implementation.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - handlers execute immediately in subscription order
// 2. Observable - recent emissions are kept in a bounded log for debugging
// 3. Type-safe - events are strongly typed

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use crate::events::types::DomainEvent;

/// Type-erased event handler function
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// Emissions kept in the in-memory log; older entries are dropped first
pub const MAX_EVENT_LOG_ENTRIES: usize = 1000;

/// The Event Bus
///
/// Services emit events after a successful write; anything interested
/// subscribes by event type. Handlers run on the emitting thread, in the
/// order they subscribed, and a panicking handler does not stop the rest.
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
}

/// A recorded emission
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Subscribe to a specific event type
    ///
    /// Example:
    /// ```ignore
    /// bus.subscribe::<ApplicationAccepted, _>(|event| {
    ///     log::info!("walker {} selected", event.walker_id);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();

        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        handlers.entry(type_id).or_default().push(wrapped);
    }

    /// Emit an event to every subscriber of its type
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let type_id = TypeId::of::<E>();
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let event_handlers = handlers.get(&type_id);

        let log_entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count: event_handlers.map(|h| h.len()).unwrap_or(0),
        };

        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            log_entry.event_type,
            log_entry.event_id,
            log_entry.handler_count
        );

        {
            let mut event_log = self.event_log.write().unwrap_or_else(PoisonError::into_inner);
            if event_log.len() == MAX_EVENT_LOG_ENTRIES {
                event_log.pop_front();
            }
            event_log.push_back(log_entry);
        }

        if let Some(handlers) = event_handlers {
            for (idx, handler) in handlers.iter().enumerate() {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    handler(&event as &dyn Any);
                }));

                if let Err(e) = result {
                    log::error!(
                        "Handler {} for {} panicked: {:?}",
                        idx,
                        event.event_type(),
                        e
                    );
                }
            }
        }
    }

    /// The most recent emissions, oldest first. A debugging aid, not an audit trail.
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn clear_event_log(&self) {
        self.event_log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of subscribers for a specific event type
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let type_id = TypeId::of::<E>();
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        handlers.get(&type_id).map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Clones share the same handlers and log
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            event_log: Arc::clone(&self.event_log),
        }
    }
}
