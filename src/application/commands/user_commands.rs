// src/application/commands/user_commands.rs

use crate::application::commands::{parse_enum, parse_id};
use crate::application::dto::*;
use crate::application::error_handling::{ErrorResponse, ToErrorResponse};
use crate::application::state::AppState;
use crate::domain::UserType;
use crate::services::RegisterUserRequest;

/// Register a new dog owner or walker
pub async fn register_user(dto: RegisterUserDto, state: &AppState) -> Result<UserDto, String> {
    let user_type: UserType = parse_enum("user type", &dto.user_type)?;

    let user = state
        .user_service
        .register(RegisterUserRequest {
            full_name: dto.full_name,
            email: dto.email,
            user_type,
        })
        .await
        .to_error_response()?;

    Ok(UserDto::from(user))
}

pub async fn get_user(user_id: &str, state: &AppState) -> Result<UserDto, String> {
    let id = parse_id("user id", user_id)?;

    state
        .user_service
        .get_profile(id)
        .await
        .to_error_response()?
        .map(UserDto::from)
        .ok_or_else(|| ErrorResponse::not_found("User").to_json())
}

/// List all users of one type, by name
pub async fn list_users(user_type: &str, state: &AppState) -> Result<Vec<UserDto>, String> {
    let user_type: UserType = parse_enum("user type", user_type)?;

    let users = state
        .user_service
        .list_by_type(user_type)
        .await
        .to_error_response()?;

    Ok(users.into_iter().map(UserDto::from).collect())
}
