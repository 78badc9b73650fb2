use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// A dog owner's posting looking for someone to walk one of their dogs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkRequest {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub dog_id: Uuid,

    /// Selected walker; set when an application is accepted
    pub walker_id: Option<Uuid>,

    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub location: String,
    pub notes: Option<String>,
    pub status: WalkRequestStatus,
    pub created_at: DateTime<Utc>,

    /// Bumped on every state change
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkRequestStatus {
    Pending,
    Accepted,
    Completed,
    Cancelled,
}

impl WalkRequest {
    pub fn new(
        owner_id: Uuid,
        dog_id: Uuid,
        scheduled_at: DateTime<Utc>,
        duration_minutes: u32,
        location: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            dog_id,
            walker_id: None,
            scheduled_at,
            duration_minutes,
            location,
            notes: None,
            status: WalkRequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// pending -> accepted, recording the chosen walker
    pub fn select_walker(&mut self, walker_id: Uuid) -> DomainResult<()> {
        self.transition(WalkRequestStatus::Accepted)?;
        self.walker_id = Some(walker_id);
        Ok(())
    }

    /// pending | accepted -> cancelled
    pub fn cancel(&mut self) -> DomainResult<()> {
        self.transition(WalkRequestStatus::Cancelled)
    }

    /// accepted -> completed
    pub fn complete(&mut self) -> DomainResult<()> {
        self.transition(WalkRequestStatus::Completed)
    }

    pub fn is_open(&self) -> bool {
        self.status == WalkRequestStatus::Pending
    }

    fn transition(&mut self, to: WalkRequestStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(to) {
            return Err(DomainError::InvalidStateTransition(format!(
                "Walk request {} cannot go from {} to {}",
                self.id, self.status, to
            )));
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl WalkRequestStatus {
    pub fn can_transition_to(&self, to: WalkRequestStatus) -> bool {
        use WalkRequestStatus::*;
        matches!(
            (self, to),
            (Pending, Accepted) | (Pending, Cancelled) | (Accepted, Cancelled) | (Accepted, Completed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WalkRequestStatus::Pending => "pending",
            WalkRequestStatus::Accepted => "accepted",
            WalkRequestStatus::Completed => "completed",
            WalkRequestStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for WalkRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WalkRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WalkRequestStatus::Pending),
            "accepted" => Ok(WalkRequestStatus::Accepted),
            "completed" => Ok(WalkRequestStatus::Completed),
            "cancelled" => Ok(WalkRequestStatus::Cancelled),
            other => Err(format!("Unknown walk request status '{}'", other)),
        }
    }
}
