// src/lib.rs
// PawPal - Dog walking marketplace backend
//
// Architecture:
// - Domain-centric: business rules live in domain entities and invariants
// - Event-driven: services emit domain events after successful writes
// - Explicit: the current user is always passed in, never read from ambient state
// - Notifications are derived on demand and never stored

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_dog,
    validate_user,
    validate_walk_application,
    validate_walk_request,
    // Dogs
    Dog,
    DogSize,
    DomainError,
    // Notifications
    NotificationItem,
    NotificationType,
    // Users
    UserProfile,
    UserType,
    // Applications
    WalkApplication,
    WalkApplicationStatus,
    // Walk requests
    WalkRequest,
    WalkRequestStatus,
};

// ============================================================================
// PUBLIC API - Errors, Config, Database
// ============================================================================

pub use config::AppConfig;
pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use error::{AppError, AppResult, JoinMiss};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{create_event_bus, DomainEvent, EventBus, EventLogEntry};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    DogRepository,
    SqliteDogRepository,
    SqliteUserRepository,
    SqliteWalkApplicationRepository,
    SqliteWalkRequestRepository,
    UserRepository,
    WalkApplicationQuery,
    WalkApplicationRepository,
    WalkRequestQuery,
    WalkRequestRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AddDogRequest,
    DogService,
    NotificationAggregator,
    PostWalkRequest,
    RegisterUserRequest,
    UpdateDogRequest,
    UserService,
    WalkApplicationService,
    WalkRequestService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

pub use application::commands;
pub use application::dto;
