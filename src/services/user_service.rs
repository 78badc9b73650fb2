// src/services/user_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::{validate_user, UserProfile, UserType};
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, UserRegistered};
use crate::repositories::UserRepository;

#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub full_name: String,
    pub email: String,
    pub user_type: UserType,
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    event_bus: Arc<EventBus>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, event_bus: Arc<EventBus>) -> Self {
        Self { user_repo, event_bus }
    }

    pub async fn register(&self, request: RegisterUserRequest) -> AppResult<UserProfile> {
        let user = UserProfile::new(
            request.full_name.trim().to_string(),
            request.email.trim().to_string(),
            request.user_type,
        );
        validate_user(&user).map_err(AppError::Domain)?;

        if self.user_repo.get_by_email(&user.email).await?.is_some() {
            return Err(AppError::Domain(DomainError::InvariantViolation(format!(
                "Email {} is already registered",
                user.email
            ))));
        }

        self.user_repo.save(&user).await?;
        log::info!("Registered {} {}", user.user_type, user.id);

        self.event_bus
            .emit(UserRegistered::new(user.id, user.user_type));
        Ok(user)
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        self.user_repo.get_by_id(user_id).await
    }

    pub async fn list_by_type(&self, user_type: UserType) -> AppResult<Vec<UserProfile>> {
        self.user_repo.list_by_type(user_type).await
    }

    /// Load a user and check it has the expected role
    pub(crate) async fn require_role(
        user_repo: &dyn UserRepository,
        user_id: Uuid,
        role: UserType,
    ) -> AppResult<UserProfile> {
        let user = user_repo.get_by_id(user_id).await?.ok_or(AppError::NotFound)?;
        if user.user_type != role {
            return Err(AppError::Forbidden(format!(
                "User {} is a {}, expected {}",
                user_id, user.user_type, role
            )));
        }
        Ok(user)
    }
}
