// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::events::EventBus;
use crate::repositories::{
    SqliteDogRepository, SqliteUserRepository, SqliteWalkApplicationRepository,
    SqliteWalkRequestRepository,
};
use crate::services::{
    DogService, NotificationAggregator, UserService, WalkApplicationService, WalkRequestService,
};

/// Shared application state handed to every command.
/// All fields are Arc-wrapped so commands can run concurrently.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub user_service: Arc<UserService>,
    pub dog_service: Arc<DogService>,
    pub walk_request_service: Arc<WalkRequestService>,
    pub walk_application_service: Arc<WalkApplicationService>,
    pub notifications: Arc<NotificationAggregator>,
}

impl AppState {
    /// Wire repositories and services over one connection pool
    pub fn new(pool: Arc<ConnectionPool>, event_bus: Arc<EventBus>) -> Self {
        let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
        let dog_repo = Arc::new(SqliteDogRepository::new(pool.clone()));
        let walk_request_repo = Arc::new(SqliteWalkRequestRepository::new(pool.clone()));
        let application_repo = Arc::new(SqliteWalkApplicationRepository::new(pool));

        let user_service = Arc::new(UserService::new(user_repo.clone(), event_bus.clone()));
        let dog_service = Arc::new(DogService::new(
            dog_repo.clone(),
            user_repo.clone(),
            event_bus.clone(),
        ));
        let walk_request_service = Arc::new(WalkRequestService::new(
            walk_request_repo.clone(),
            application_repo.clone(),
            dog_repo,
            user_repo.clone(),
            event_bus.clone(),
        ));
        let walk_application_service = Arc::new(WalkApplicationService::new(
            application_repo.clone(),
            walk_request_repo.clone(),
            user_repo.clone(),
            event_bus.clone(),
        ));
        let notifications = Arc::new(NotificationAggregator::new(
            user_repo,
            walk_request_repo,
            application_repo,
        ));

        Self {
            event_bus,
            user_service,
            dog_service,
            walk_request_service,
            walk_application_service,
            notifications,
        }
    }
}
