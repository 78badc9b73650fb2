// src/events/mod.rs
//
// Internal Event System - Public API
//
// The EventHandler type alias stays private to the bus module

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry};

pub use types::{
    // Applications
    ApplicationAccepted,
    ApplicationRejected,
    ApplicationSubmitted,
    // Dogs
    DogAdded,
    DogRemoved,
    DogUpdated,
    DomainEvent,
    // Users
    UserRegistered,
    // Walk requests
    WalkRequestCancelled,
    WalkRequestCompleted,
    WalkRequestDeleted,
    WalkRequestPosted,
};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
