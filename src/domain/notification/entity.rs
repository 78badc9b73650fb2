use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::walk_request::WalkRequest;

/// One entry of a user's notification feed
///
/// Derived on every aggregation run and never persisted. The id is borrowed
/// from the source record: the walk request for `WalkerSelected`, the
/// application for the other kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub related_walk_request: WalkRequest,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationType {
    /// Owner side: a walker was picked for one of their requests
    WalkerSelected,
    /// Owner side: a walker applied to one of their requests
    NewApplication,
    /// Walker side: an owner accepted their application
    ApplicationAccepted,
}

impl NotificationType {
    pub fn title(&self) -> &'static str {
        match self {
            NotificationType::WalkerSelected => "Walker Selected",
            NotificationType::NewApplication => "New Application",
            NotificationType::ApplicationAccepted => "Application Accepted",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::WalkerSelected => "walkerSelected",
            NotificationType::NewApplication => "newApplication",
            NotificationType::ApplicationAccepted => "applicationAccepted",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl NotificationItem {
    pub fn new(
        id: Uuid,
        kind: NotificationType,
        message: String,
        related_walk_request: WalkRequest,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            title: kind.title().to_string(),
            message,
            related_walk_request,
            timestamp,
        }
    }
}
