// src/services/notification_service.rs
//
// Notification feed aggregation.
//
// The feed is never stored. Every call re-reads walk requests and walk
// applications for the caller, joins them with the parent request and the
// counterpart's profile, and returns the items newest first.
//
// FAILURE POLICY:
// - A failed bulk query aborts the whole call with BackendUnavailable
// - A missing parent request drops that single item
// - A missing profile only downgrades the message to generic text

use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::notification::{
    application_accepted_message, new_application_message, walker_selected_message,
};
use crate::domain::user::{UserProfile, UserType};
use crate::domain::walk_application::{WalkApplication, WalkApplicationStatus};
use crate::domain::walk_request::{WalkRequest, WalkRequestStatus};
use crate::domain::{NotificationItem, NotificationType};
use crate::error::{AppError, AppResult, JoinMiss};
use crate::repositories::{
    UserRepository, WalkApplicationQuery, WalkApplicationRepository, WalkRequestQuery,
    WalkRequestRepository,
};

pub struct NotificationAggregator {
    user_repo: Arc<dyn UserRepository>,
    walk_request_repo: Arc<dyn WalkRequestRepository>,
    application_repo: Arc<dyn WalkApplicationRepository>,
}

impl NotificationAggregator {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        walk_request_repo: Arc<dyn WalkRequestRepository>,
        application_repo: Arc<dyn WalkApplicationRepository>,
    ) -> Self {
        Self {
            user_repo,
            walk_request_repo,
            application_repo,
        }
    }

    /// Build the feed for `current_user` acting as `role`.
    ///
    /// No identity means no feed. The result is sorted newest first; items
    /// with equal timestamps keep the order they were produced in.
    pub async fn aggregate(
        &self,
        current_user: Option<Uuid>,
        role: UserType,
    ) -> AppResult<Vec<NotificationItem>> {
        let Some(user_id) = current_user else {
            return Ok(Vec::new());
        };

        let mut items = match role {
            UserType::DogOwner => self.owner_feed(user_id).await?,
            UserType::Walker => self.walker_feed(user_id).await?,
        };

        sort_newest_first(&mut items);
        log::debug!(
            "Aggregated {} notifications for {} ({})",
            items.len(),
            user_id,
            role
        );
        Ok(items)
    }

    /// Same as `aggregate`, taking the role from the user's stored profile.
    /// Unknown users get an empty feed.
    pub async fn aggregate_for(&self, user_id: Uuid) -> AppResult<Vec<NotificationItem>> {
        let profile = self
            .user_repo
            .get_by_id(user_id)
            .await
            .map_err(|e| unavailable("users", e))?;

        match profile {
            Some(profile) => self.aggregate(Some(profile.id), profile.user_type).await,
            None => Ok(Vec::new()),
        }
    }

    // ------------------------------------------------------------------
    // Owner branch
    // ------------------------------------------------------------------

    /// Walkers selected for the owner's requests, plus pending applications
    /// to them. Both bulk queries run before any join so that a backend
    /// failure never yields half a feed.
    pub async fn owner_feed(&self, owner_id: Uuid) -> AppResult<Vec<NotificationItem>> {
        let accepted_requests = self
            .walk_request_repo
            .query(WalkRequestQuery::by_owner(owner_id).with_status(WalkRequestStatus::Accepted))
            .await
            .map_err(|e| unavailable("walk_requests", e))?;

        let pending_applications = self
            .application_repo
            .query(
                WalkApplicationQuery::by_owner(owner_id)
                    .with_status(WalkApplicationStatus::Pending),
            )
            .await
            .map_err(|e| unavailable("walk_applications", e))?;

        let mut items = self.walker_selected_items(accepted_requests).await;
        items.extend(self.new_application_items(pending_applications).await);
        Ok(items)
    }

    async fn walker_selected_items(&self, requests: Vec<WalkRequest>) -> Vec<NotificationItem> {
        let lookups = requests
            .into_iter()
            .filter_map(|request| match request.walker_id {
                Some(walker_id) if !walker_id.is_nil() => Some((request, walker_id)),
                _ => None,
            })
            .map(|(request, walker_id)| self.walker_selected_item(request, walker_id));

        join_all(lookups).await
    }

    async fn walker_selected_item(
        &self,
        request: WalkRequest,
        walker_id: Uuid,
    ) -> NotificationItem {
        let walker = self.lookup_profile(walker_id).await;
        let (id, timestamp) = (request.id, request.updated_at);

        NotificationItem::new(
            id,
            NotificationType::WalkerSelected,
            walker_selected_message(&walker),
            request,
            timestamp,
        )
    }

    async fn new_application_items(
        &self,
        applications: Vec<WalkApplication>,
    ) -> Vec<NotificationItem> {
        let lookups = applications
            .into_iter()
            .map(|application| self.new_application_item(application));

        join_all(lookups).await.into_iter().flatten().collect()
    }

    async fn new_application_item(
        &self,
        application: WalkApplication,
    ) -> Option<NotificationItem> {
        let (request, walker) = futures::join!(
            self.lookup_request(application.walk_request_id),
            self.lookup_profile(application.walker_id),
        );
        let request = drop_on_miss(&application, request)?;

        Some(NotificationItem::new(
            application.id,
            NotificationType::NewApplication,
            new_application_message(&walker),
            request,
            application.created_at.unwrap_or_else(Utc::now),
        ))
    }

    // ------------------------------------------------------------------
    // Walker branch
    // ------------------------------------------------------------------

    /// Applications of this walker that an owner accepted
    pub async fn walker_feed(&self, walker_id: Uuid) -> AppResult<Vec<NotificationItem>> {
        let accepted_applications = self
            .application_repo
            .query(
                WalkApplicationQuery::by_walker(walker_id)
                    .with_status(WalkApplicationStatus::Accepted),
            )
            .await
            .map_err(|e| unavailable("walk_applications", e))?;

        let lookups = accepted_applications
            .into_iter()
            .map(|application| self.application_accepted_item(application));

        Ok(join_all(lookups).await.into_iter().flatten().collect())
    }

    async fn application_accepted_item(
        &self,
        application: WalkApplication,
    ) -> Option<NotificationItem> {
        let request = self.lookup_request(application.walk_request_id).await;
        let request = drop_on_miss(&application, request)?;
        let owner = self.lookup_profile(request.owner_id).await;
        let timestamp = request.updated_at;

        Some(NotificationItem::new(
            application.id,
            NotificationType::ApplicationAccepted,
            application_accepted_message(&owner),
            request,
            timestamp,
        ))
    }

    // ------------------------------------------------------------------
    // Point lookups
    // ------------------------------------------------------------------

    async fn lookup_profile(&self, user_id: Uuid) -> Result<UserProfile, JoinMiss> {
        let result = JoinMiss::from_lookup(self.user_repo.get_by_id(user_id).await);
        if let Err(miss) = &result {
            log_miss("profile", user_id, miss);
        }
        result
    }

    async fn lookup_request(&self, request_id: Uuid) -> Result<WalkRequest, JoinMiss> {
        JoinMiss::from_lookup(self.walk_request_repo.get_by_id(request_id).await)
    }
}

fn drop_on_miss(
    application: &WalkApplication,
    request: Result<WalkRequest, JoinMiss>,
) -> Option<WalkRequest> {
    match request {
        Ok(request) => Some(request),
        Err(miss) => {
            log_miss("walk request", application.walk_request_id, &miss);
            log::debug!("Dropping notification for application {}", application.id);
            None
        }
    }
}

/// Newest first; `sort_by` is stable so ties keep production order
pub fn sort_newest_first(items: &mut [NotificationItem]) {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

fn unavailable(collection: &str, error: AppError) -> AppError {
    log::warn!("Query on {} failed: {}", collection, error);
    AppError::BackendUnavailable(format!("{}: {}", collection, error))
}

fn log_miss(what: &str, id: Uuid, miss: &JoinMiss) {
    match miss {
        JoinMiss::NotFound => log::debug!("No {} found for {}", what, id),
        JoinMiss::Failed(reason) => log::warn!("Lookup of {} {} failed: {}", what, id, reason),
    }
}
