// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - Explicit SQL only
// - Every SQLite call runs on the blocking pool

mod mapping;

pub mod dog_repository;
pub mod user_repository;
pub mod walk_application_repository;
pub mod walk_request_repository;

pub use dog_repository::{DogRepository, SqliteDogRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
pub use walk_application_repository::{
    SqliteWalkApplicationRepository, WalkApplicationQuery, WalkApplicationRepository,
};
pub use walk_request_repository::{SqliteWalkRequestRepository, WalkRequestQuery, WalkRequestRepository};

#[cfg(test)]
pub use dog_repository::MockDogRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use walk_application_repository::MockWalkApplicationRepository;
#[cfg(test)]
pub use walk_request_repository::MockWalkRequestRepository;
