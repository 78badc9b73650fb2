// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserType;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// USER EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_type: UserType,
}

impl UserRegistered {
    pub fn new(user_id: Uuid, user_type: UserType) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            user_type,
        }
    }
}

impl DomainEvent for UserRegistered {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserRegistered" }
}

// ============================================================================
// DOG EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DogAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub dog_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
}

impl DogAdded {
    pub fn new(dog_id: Uuid, owner_id: Uuid, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            dog_id,
            owner_id,
            name,
        }
    }
}

impl DomainEvent for DogAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "DogAdded" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DogUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub dog_id: Uuid,
}

impl DogUpdated {
    pub fn new(dog_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            dog_id,
        }
    }
}

impl DomainEvent for DogUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "DogUpdated" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DogRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub dog_id: Uuid,
    pub owner_id: Uuid,
}

impl DogRemoved {
    pub fn new(dog_id: Uuid, owner_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            dog_id,
            owner_id,
        }
    }
}

impl DomainEvent for DogRemoved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "DogRemoved" }
}

// ============================================================================
// WALK REQUEST EVENTS
// ============================================================================

/// Emitted when an owner posts a new walk request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkRequestPosted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub walk_request_id: Uuid,
    pub owner_id: Uuid,
    pub dog_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
}

impl WalkRequestPosted {
    pub fn new(
        walk_request_id: Uuid,
        owner_id: Uuid,
        dog_id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            walk_request_id,
            owner_id,
            dog_id,
            scheduled_at,
        }
    }
}

impl DomainEvent for WalkRequestPosted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "WalkRequestPosted" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkRequestCancelled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub walk_request_id: Uuid,
    pub rejected_applications: usize,
}

impl WalkRequestCancelled {
    pub fn new(walk_request_id: Uuid, rejected_applications: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            walk_request_id,
            rejected_applications,
        }
    }
}

impl DomainEvent for WalkRequestCancelled {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "WalkRequestCancelled" }
}

/// The request row is gone; applications that referenced it are kept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkRequestDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub walk_request_id: Uuid,
    pub owner_id: Uuid,
}

impl WalkRequestDeleted {
    pub fn new(walk_request_id: Uuid, owner_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            walk_request_id,
            owner_id,
        }
    }
}

impl DomainEvent for WalkRequestDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "WalkRequestDeleted" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkRequestCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub walk_request_id: Uuid,
    pub walker_id: Option<Uuid>,
}

impl WalkRequestCompleted {
    pub fn new(walk_request_id: Uuid, walker_id: Option<Uuid>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            walk_request_id,
            walker_id,
        }
    }
}

impl DomainEvent for WalkRequestCompleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "WalkRequestCompleted" }
}

// ============================================================================
// WALK APPLICATION EVENTS
// ============================================================================

/// Emitted when a walker applies to a walk request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSubmitted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub application_id: Uuid,
    pub walk_request_id: Uuid,
    pub walker_id: Uuid,
    pub owner_id: Uuid,
}

impl ApplicationSubmitted {
    pub fn new(
        application_id: Uuid,
        walk_request_id: Uuid,
        walker_id: Uuid,
        owner_id: Uuid,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            application_id,
            walk_request_id,
            walker_id,
            owner_id,
        }
    }
}

impl DomainEvent for ApplicationSubmitted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ApplicationSubmitted" }
}

/// Emitted when an owner accepts an application (and thereby selects the walker)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationAccepted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub application_id: Uuid,
    pub walk_request_id: Uuid,
    pub walker_id: Uuid,
    pub rejected_applications: usize,
}

impl ApplicationAccepted {
    pub fn new(
        application_id: Uuid,
        walk_request_id: Uuid,
        walker_id: Uuid,
        rejected_applications: usize,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            application_id,
            walk_request_id,
            walker_id,
            rejected_applications,
        }
    }
}

impl DomainEvent for ApplicationAccepted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ApplicationAccepted" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRejected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub application_id: Uuid,
    pub walk_request_id: Uuid,
}

impl ApplicationRejected {
    pub fn new(application_id: Uuid, walk_request_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            application_id,
            walk_request_id,
        }
    }
}

impl DomainEvent for ApplicationRejected {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ApplicationRejected" }
}
