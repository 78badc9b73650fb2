// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod dog;
pub mod notification;
pub mod user;
pub mod walk_application;
pub mod walk_request;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Users
pub use user::{validate_user, UserProfile, UserType};

// Dogs
pub use dog::{validate_dog, Dog, DogSize};

// Walk Requests
pub use walk_request::{validate_walk_request, WalkRequest, WalkRequestStatus};

// Walk Applications
pub use walk_application::{validate_walk_application, WalkApplication, WalkApplicationStatus};

// Notifications (derived, never persisted)
pub use notification::{NotificationItem, NotificationType};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
