// src/application/commands/notification_commands.rs

use crate::application::commands::parse_id;
use crate::application::dto::NotificationDto;
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;

/// Notification feed for a user, newest first.
///
/// The role comes from the stored profile; unknown users get an empty feed.
pub async fn list_notifications(
    user_id: &str,
    state: &AppState,
) -> Result<Vec<NotificationDto>, String> {
    let user_id = parse_id("user id", user_id)?;

    let items = state
        .notifications
        .aggregate_for(user_id)
        .await
        .to_error_response()?;

    Ok(items.into_iter().map(NotificationDto::from).collect())
}
