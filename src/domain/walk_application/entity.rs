use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// A walker's bid to take a specific walk request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkApplication {
    pub id: Uuid,
    pub walk_request_id: Uuid,

    /// Copied from the request so owners can query their inbox directly
    pub owner_id: Uuid,

    pub walker_id: Uuid,
    pub message: Option<String>,
    pub status: WalkApplicationStatus,

    /// Older records may lack a creation time
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl WalkApplication {
    pub fn new(walk_request_id: Uuid, owner_id: Uuid, walker_id: Uuid, message: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            walk_request_id,
            owner_id,
            walker_id,
            message,
            status: WalkApplicationStatus::Pending,
            created_at: Some(Utc::now()),
        }
    }

    pub fn accept(&mut self) -> DomainResult<()> {
        self.decide(WalkApplicationStatus::Accepted)
    }

    pub fn reject(&mut self) -> DomainResult<()> {
        self.decide(WalkApplicationStatus::Rejected)
    }

    pub fn is_pending(&self) -> bool {
        self.status == WalkApplicationStatus::Pending
    }

    /// Applications are decided exactly once
    fn decide(&mut self, to: WalkApplicationStatus) -> DomainResult<()> {
        if !self.is_pending() {
            return Err(DomainError::InvalidStateTransition(format!(
                "Application {} is already {}",
                self.id, self.status
            )));
        }
        self.status = to;
        Ok(())
    }
}

impl WalkApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalkApplicationStatus::Pending => "pending",
            WalkApplicationStatus::Accepted => "accepted",
            WalkApplicationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for WalkApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WalkApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WalkApplicationStatus::Pending),
            "accepted" => Ok(WalkApplicationStatus::Accepted),
            "rejected" => Ok(WalkApplicationStatus::Rejected),
            other => Err(format!("Unknown application status '{}'", other)),
        }
    }
}
