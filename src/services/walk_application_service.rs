// src/services/walk_application_service.rs
//
// Walkers apply to open requests; owners pick exactly one of them.
// Accepting an application rejects every other pending application to the
// same request and moves the request to accepted, all in one transaction.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::UserType;
use crate::domain::walk_application::{
    validate_walk_application, WalkApplication,
};
use crate::domain::walk_request::WalkRequest;
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::events::{ApplicationAccepted, ApplicationRejected, ApplicationSubmitted, EventBus};
use crate::repositories::{
    UserRepository, WalkApplicationQuery, WalkApplicationRepository, WalkRequestRepository,
};
use crate::services::user_service::UserService;

pub struct WalkApplicationService {
    application_repo: Arc<dyn WalkApplicationRepository>,
    walk_request_repo: Arc<dyn WalkRequestRepository>,
    user_repo: Arc<dyn UserRepository>,
    event_bus: Arc<EventBus>,
}

impl WalkApplicationService {
    pub fn new(
        application_repo: Arc<dyn WalkApplicationRepository>,
        walk_request_repo: Arc<dyn WalkRequestRepository>,
        user_repo: Arc<dyn UserRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            application_repo,
            walk_request_repo,
            user_repo,
            event_bus,
        }
    }

    pub async fn apply(
        &self,
        walker_id: Uuid,
        request_id: Uuid,
        message: Option<String>,
    ) -> AppResult<WalkApplication> {
        UserService::require_role(self.user_repo.as_ref(), walker_id, UserType::Walker).await?;

        let request = self.load_request(request_id).await?;
        if !request.is_open() {
            return Err(closed_request_error(&request));
        }

        let already_applied = self
            .application_repo
            .query(WalkApplicationQuery::by_request(request.id))
            .await?
            .iter()
            .any(|a| a.walker_id == walker_id);
        if already_applied {
            return Err(already_applied_error(walker_id, request.id));
        }

        let message = message.map(|m| m.trim().to_string()).filter(|m| !m.is_empty());
        let application = WalkApplication::new(request.id, request.owner_id, walker_id, message);
        validate_walk_application(&application).map_err(AppError::Domain)?;

        // The request may have closed, or the walker applied from another
        // session, since the checks above
        let inserted = self.application_repo.create(&application).await.map_err(|e| {
            if e.is_constraint_violation() {
                already_applied_error(walker_id, request.id)
            } else {
                e
            }
        })?;
        if !inserted {
            return Err(closed_request_error(&request));
        }

        self.event_bus.emit(ApplicationSubmitted::new(
            application.id,
            application.walk_request_id,
            application.walker_id,
            application.owner_id,
        ));
        Ok(application)
    }

    /// Select this application's walker for the request
    pub async fn accept(&self, owner_id: Uuid, application_id: Uuid) -> AppResult<WalkApplication> {
        let (mut application, mut request) =
            self.owned_application(owner_id, application_id).await?;

        application.accept().map_err(AppError::Domain)?;
        request
            .select_walker(application.walker_id)
            .map_err(AppError::Domain)?;

        let rejected_count = self
            .application_repo
            .commit_acceptance(application.clone(), request.clone())
            .await?
            .ok_or_else(|| {
                AppError::Domain(DomainError::InvalidStateTransition(format!(
                    "Walk request {} or application {} was already decided",
                    request.id, application.id
                )))
            })?;
        log::info!(
            "Walker {} selected for request {} ({} other applications rejected)",
            application.walker_id,
            request.id,
            rejected_count
        );

        self.event_bus.emit(ApplicationAccepted::new(
            application.id,
            request.id,
            application.walker_id,
            rejected_count,
        ));
        Ok(application)
    }

    pub async fn reject(&self, owner_id: Uuid, application_id: Uuid) -> AppResult<WalkApplication> {
        let (mut application, _) = self.owned_application(owner_id, application_id).await?;
        application.reject().map_err(AppError::Domain)?;

        if !self.application_repo.record_decision(&application).await? {
            return Err(AppError::Domain(DomainError::InvalidStateTransition(format!(
                "Application {} was already decided",
                application.id
            ))));
        }

        self.event_bus.emit(ApplicationRejected::new(
            application.id,
            application.walk_request_id,
        ));
        Ok(application)
    }

    /// Applications to a request, oldest first
    pub async fn list_for_request(&self, request_id: Uuid) -> AppResult<Vec<WalkApplication>> {
        let mut applications = self
            .application_repo
            .query(WalkApplicationQuery::by_request(request_id))
            .await?;
        applications.sort_by_key(|a| a.created_at);
        Ok(applications)
    }

    pub async fn list_for_walker(&self, walker_id: Uuid) -> AppResult<Vec<WalkApplication>> {
        self.application_repo
            .query(WalkApplicationQuery::by_walker(walker_id))
            .await
    }

    async fn load_request(&self, request_id: Uuid) -> AppResult<WalkRequest> {
        self.walk_request_repo
            .get_by_id(request_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn owned_application(
        &self,
        owner_id: Uuid,
        application_id: Uuid,
    ) -> AppResult<(WalkApplication, WalkRequest)> {
        let application = self
            .application_repo
            .get_by_id(application_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let request = self.load_request(application.walk_request_id).await?;

        if request.owner_id != owner_id {
            return Err(AppError::Forbidden(format!(
                "Application {} is not for a request of user {}",
                application_id, owner_id
            )));
        }
        Ok((application, request))
    }
}

fn closed_request_error(request: &WalkRequest) -> AppError {
    AppError::Domain(DomainError::InvalidStateTransition(format!(
        "Walk request {} is {} and no longer takes applications",
        request.id, request.status
    )))
}

fn already_applied_error(walker_id: Uuid, request_id: Uuid) -> AppError {
    AppError::Domain(DomainError::InvalidStateTransition(format!(
        "Walker {} already applied to {}",
        walker_id, request_id
    )))
}
