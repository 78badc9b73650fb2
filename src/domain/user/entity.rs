use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public profile of a registered user
/// Identity and credentials live with the auth provider; this is only what
/// the rest of the app needs to render names and branch on role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

/// Which side of the marketplace a user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserType {
    DogOwner,
    Walker,
}

impl UserProfile {
    pub fn new(full_name: String, email: String, user_type: UserType) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name,
            email,
            user_type,
            created_at: Utc::now(),
        }
    }

    /// Name suitable for display, or None when the profile has no usable name
    pub fn display_name(&self) -> Option<&str> {
        let name = self.full_name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::DogOwner => "dogOwner",
            UserType::Walker => "walker",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dogOwner" | "dog_owner" | "owner" => Ok(UserType::DogOwner),
            "walker" => Ok(UserType::Walker),
            other => Err(format!("Unknown user type '{}'", other)),
        }
    }
}
