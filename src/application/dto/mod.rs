// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// PRINCIPLES:
// - DTOs are caller-friendly, serializable structs
// - Ids and timestamps travel as strings (UUID / RFC 3339)
// - Conversion FROM domain entities only; input DTOs are parsed in commands

use serde::{Deserialize, Serialize};

use crate::domain::{Dog, NotificationItem, UserProfile, WalkApplication, WalkRequest};

// ============================================================================
// USER DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub user_type: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserDto {
    pub full_name: String,
    pub email: String,
    pub user_type: String, // "dogOwner" or "walker"
}

// ============================================================================
// DOG DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DogDto {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub breed: String,
    pub age_years: u32,
    pub size: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDogDto {
    pub owner_id: String,
    pub name: String,
    pub breed: String,
    pub age_years: u32,
    pub size: String,
    pub notes: Option<String>,
}

// ============================================================================
// WALK REQUEST DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkRequestDto {
    pub id: String,
    pub owner_id: String,
    pub dog_id: String,
    pub walker_id: Option<String>,
    pub scheduled_at: String,
    pub duration_minutes: u32,
    pub location: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWalkRequestDto {
    pub owner_id: String,
    pub dog_id: String,
    pub scheduled_at: String,
    pub duration_minutes: u32,
    pub location: String,
    pub notes: Option<String>,
}

// ============================================================================
// WALK APPLICATION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkApplicationDto {
    pub id: String,
    pub walk_request_id: String,
    pub owner_id: String,
    pub walker_id: String,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Option<String>,
}

// ============================================================================
// NOTIFICATION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_walk_request: WalkRequestDto,
    pub timestamp: String,
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<UserProfile> for UserDto {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name,
            email: user.email,
            user_type: user.user_type.to_string(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

impl From<Dog> for DogDto {
    fn from(dog: Dog) -> Self {
        Self {
            id: dog.id.to_string(),
            owner_id: dog.owner_id.to_string(),
            name: dog.name,
            breed: dog.breed,
            age_years: dog.age_years,
            size: dog.size.to_string(),
            notes: dog.notes,
            created_at: dog.created_at.to_rfc3339(),
            updated_at: dog.updated_at.to_rfc3339(),
        }
    }
}

impl From<WalkRequest> for WalkRequestDto {
    fn from(request: WalkRequest) -> Self {
        Self {
            id: request.id.to_string(),
            owner_id: request.owner_id.to_string(),
            dog_id: request.dog_id.to_string(),
            walker_id: request.walker_id.map(|w| w.to_string()),
            scheduled_at: request.scheduled_at.to_rfc3339(),
            duration_minutes: request.duration_minutes,
            location: request.location,
            notes: request.notes,
            status: request.status.to_string(),
            created_at: request.created_at.to_rfc3339(),
            updated_at: request.updated_at.to_rfc3339(),
        }
    }
}

impl From<WalkApplication> for WalkApplicationDto {
    fn from(application: WalkApplication) -> Self {
        Self {
            id: application.id.to_string(),
            walk_request_id: application.walk_request_id.to_string(),
            owner_id: application.owner_id.to_string(),
            walker_id: application.walker_id.to_string(),
            message: application.message,
            status: application.status.to_string(),
            created_at: application.created_at.map(|d| d.to_rfc3339()),
        }
    }
}

impl From<NotificationItem> for NotificationDto {
    fn from(item: NotificationItem) -> Self {
        Self {
            id: item.id.to_string(),
            kind: item.kind.to_string(),
            title: item.title,
            message: item.message,
            related_walk_request: WalkRequestDto::from(item.related_walk_request),
            timestamp: item.timestamp.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationType;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_notification_dto_uses_wire_names() {
        let request = WalkRequest::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now(), 30, "Park".into());
        let item = NotificationItem::new(
            request.id,
            NotificationType::WalkerSelected,
            "Walt has been selected for your walk request".into(),
            request,
            Utc::now(),
        );

        let json = serde_json::to_value(NotificationDto::from(item)).unwrap();
        assert_eq!(json["type"], "walkerSelected");
        assert_eq!(json["title"], "Walker Selected");
        assert_eq!(json["relatedWalkRequest"]["status"], "pending");
        assert!(json["relatedWalkRequest"]["walkerId"].is_null());
    }
}
