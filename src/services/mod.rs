// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod dog_service;
pub mod notification_service;
pub mod user_service;
pub mod walk_application_service;
pub mod walk_request_service;

#[cfg(test)]
mod notification_service_tests;

// Re-export all services and their types
pub use user_service::{
    RegisterUserRequest,
    UserService,
};

pub use dog_service::{
    AddDogRequest,
    DogService,
    UpdateDogRequest,
};

pub use walk_request_service::{
    PostWalkRequest,
    WalkRequestService,
};

pub use walk_application_service::WalkApplicationService;

pub use notification_service::{sort_newest_first, NotificationAggregator};
