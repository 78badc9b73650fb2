// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between callers and services
// - Commands accept DTOs / raw ids, return DTOs
// - Errors leave as serialized ErrorResponse JSON
// - Commands NEVER contain business logic

pub mod dog_commands;
pub mod notification_commands;
pub mod user_commands;
pub mod walk_commands;

pub use dog_commands::*;
pub use notification_commands::*;
pub use user_commands::*;
pub use walk_commands::*;

use std::str::FromStr;
use uuid::Uuid;

use crate::application::error_handling::ErrorResponse;

pub(crate) fn parse_id(field: &str, value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim())
        .map_err(|e| ErrorResponse::validation(format!("Invalid {}: {}", field, e)).to_json())
}

pub(crate) fn parse_enum<T>(field: &str, value: &str) -> Result<T, String>
where
    T: FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| ErrorResponse::validation(format!("Invalid {}: {}", field, e)).to_json())
}
