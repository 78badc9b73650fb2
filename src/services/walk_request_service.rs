// src/services/walk_request_service.rs
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::UserType;
use crate::domain::walk_request::{validate_walk_request, WalkRequest, WalkRequestStatus};
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, WalkRequestCancelled, WalkRequestCompleted, WalkRequestDeleted, WalkRequestPosted,
};
use crate::repositories::{
    DogRepository, UserRepository, WalkApplicationRepository, WalkRequestQuery,
    WalkRequestRepository,
};
use crate::services::user_service::UserService;

#[derive(Debug, Clone)]
pub struct PostWalkRequest {
    pub owner_id: Uuid,
    pub dog_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub location: String,
    pub notes: Option<String>,
}

pub struct WalkRequestService {
    walk_request_repo: Arc<dyn WalkRequestRepository>,
    application_repo: Arc<dyn WalkApplicationRepository>,
    dog_repo: Arc<dyn DogRepository>,
    user_repo: Arc<dyn UserRepository>,
    event_bus: Arc<EventBus>,
}

impl WalkRequestService {
    pub fn new(
        walk_request_repo: Arc<dyn WalkRequestRepository>,
        application_repo: Arc<dyn WalkApplicationRepository>,
        dog_repo: Arc<dyn DogRepository>,
        user_repo: Arc<dyn UserRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            walk_request_repo,
            application_repo,
            dog_repo,
            user_repo,
            event_bus,
        }
    }

    /// Post a new walk for one of the owner's dogs
    pub async fn post_request(&self, input: PostWalkRequest) -> AppResult<WalkRequest> {
        UserService::require_role(self.user_repo.as_ref(), input.owner_id, UserType::DogOwner)
            .await?;

        let dog = self
            .dog_repo
            .get_by_id(input.dog_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if dog.owner_id != input.owner_id {
            return Err(AppError::Forbidden(format!(
                "Dog {} does not belong to user {}",
                dog.id, input.owner_id
            )));
        }

        let mut request = WalkRequest::new(
            input.owner_id,
            dog.id,
            input.scheduled_at,
            input.duration_minutes,
            input.location.trim().to_string(),
        );
        request.notes = input.notes;

        validate_walk_request(&request).map_err(AppError::Domain)?;
        self.walk_request_repo.save(&request).await?;
        log::info!("Walk request {} posted for dog {}", request.id, dog.name);

        self.event_bus.emit(WalkRequestPosted::new(
            request.id,
            request.owner_id,
            request.dog_id,
            request.scheduled_at,
        ));
        Ok(request)
    }

    pub async fn get_request(&self, request_id: Uuid) -> AppResult<Option<WalkRequest>> {
        self.walk_request_repo.get_by_id(request_id).await
    }

    /// All of an owner's requests, newest first
    pub async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<WalkRequest>> {
        let mut requests = self
            .walk_request_repo
            .query(WalkRequestQuery::by_owner(owner_id))
            .await?;
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    /// Pending requests walkers can apply to, soonest walk first
    pub async fn list_open(&self) -> AppResult<Vec<WalkRequest>> {
        let mut requests = self
            .walk_request_repo
            .query(WalkRequestQuery::default().with_status(WalkRequestStatus::Pending))
            .await?;
        requests.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at));
        Ok(requests)
    }

    /// Cancel a request; pending applications to it are rejected in the same write
    pub async fn cancel_request(&self, owner_id: Uuid, request_id: Uuid) -> AppResult<WalkRequest> {
        let mut request = self.owned_request(owner_id, request_id).await?;
        let previous = request.status;
        request.cancel().map_err(AppError::Domain)?;

        let rejected = self
            .application_repo
            .commit_cancellation(request.clone(), previous)
            .await?
            .ok_or_else(|| {
                AppError::Domain(DomainError::InvalidStateTransition(format!(
                    "Walk request {} changed while it was being cancelled",
                    request.id
                )))
            })?;

        self.event_bus
            .emit(WalkRequestCancelled::new(request.id, rejected));
        Ok(request)
    }

    /// Remove a request outright. Applications to it are left in place and
    /// drop out of notification feeds.
    pub async fn delete_request(&self, owner_id: Uuid, request_id: Uuid) -> AppResult<()> {
        let request = self.owned_request(owner_id, request_id).await?;
        self.walk_request_repo.delete(request.id).await?;
        log::info!("Walk request {} deleted by {}", request.id, owner_id);

        self.event_bus
            .emit(WalkRequestDeleted::new(request.id, owner_id));
        Ok(())
    }

    /// Mark an accepted walk as done
    pub async fn complete_request(
        &self,
        owner_id: Uuid,
        request_id: Uuid,
    ) -> AppResult<WalkRequest> {
        let mut request = self.owned_request(owner_id, request_id).await?;
        request.complete().map_err(AppError::Domain)?;

        self.walk_request_repo.save(&request).await?;

        self.event_bus
            .emit(WalkRequestCompleted::new(request.id, request.walker_id));
        Ok(request)
    }

    async fn owned_request(&self, owner_id: Uuid, request_id: Uuid) -> AppResult<WalkRequest> {
        let request = self
            .walk_request_repo
            .get_by_id(request_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if request.owner_id != owner_id {
            return Err(AppError::Forbidden(format!(
                "Walk request {} does not belong to user {}",
                request_id, owner_id
            )));
        }
        Ok(request)
    }
}
