// src/application/commands/walk_commands.rs
//
// Walk requests and the applications walkers send to them

use chrono::{DateTime, Utc};

use crate::application::commands::parse_id;
use crate::application::dto::*;
use crate::application::error_handling::{ErrorResponse, ToErrorResponse};
use crate::application::state::AppState;
use crate::services::PostWalkRequest;

// ============================================================================
// WALK REQUESTS
// ============================================================================

pub async fn post_walk_request(
    dto: PostWalkRequestDto,
    state: &AppState,
) -> Result<WalkRequestDto, String> {
    let owner_id = parse_id("owner id", &dto.owner_id)?;
    let dog_id = parse_id("dog id", &dto.dog_id)?;
    let scheduled_at = DateTime::parse_from_rfc3339(dto.scheduled_at.trim())
        .map_err(|e| ErrorResponse::validation(format!("Invalid scheduled time: {}", e)).to_json())?
        .with_timezone(&Utc);

    let request = state
        .walk_request_service
        .post_request(PostWalkRequest {
            owner_id,
            dog_id,
            scheduled_at,
            duration_minutes: dto.duration_minutes,
            location: dto.location,
            notes: dto.notes,
        })
        .await
        .to_error_response()?;

    Ok(WalkRequestDto::from(request))
}

pub async fn get_walk_request(request_id: &str, state: &AppState) -> Result<WalkRequestDto, String> {
    let id = parse_id("walk request id", request_id)?;

    state
        .walk_request_service
        .get_request(id)
        .await
        .to_error_response()?
        .map(WalkRequestDto::from)
        .ok_or_else(|| ErrorResponse::not_found("Walk request").to_json())
}

pub async fn list_owner_walk_requests(
    owner_id: &str,
    state: &AppState,
) -> Result<Vec<WalkRequestDto>, String> {
    let owner_id = parse_id("owner id", owner_id)?;

    let requests = state
        .walk_request_service
        .list_for_owner(owner_id)
        .await
        .to_error_response()?;

    Ok(requests.into_iter().map(WalkRequestDto::from).collect())
}

/// Requests still looking for a walker, soonest first
pub async fn list_open_walk_requests(state: &AppState) -> Result<Vec<WalkRequestDto>, String> {
    let requests = state
        .walk_request_service
        .list_open()
        .await
        .to_error_response()?;

    Ok(requests.into_iter().map(WalkRequestDto::from).collect())
}

pub async fn cancel_walk_request(
    owner_id: &str,
    request_id: &str,
    state: &AppState,
) -> Result<WalkRequestDto, String> {
    let owner_id = parse_id("owner id", owner_id)?;
    let request_id = parse_id("walk request id", request_id)?;

    let request = state
        .walk_request_service
        .cancel_request(owner_id, request_id)
        .await
        .to_error_response()?;

    Ok(WalkRequestDto::from(request))
}

pub async fn delete_walk_request(
    owner_id: &str,
    request_id: &str,
    state: &AppState,
) -> Result<(), String> {
    let owner_id = parse_id("owner id", owner_id)?;
    let request_id = parse_id("walk request id", request_id)?;

    state
        .walk_request_service
        .delete_request(owner_id, request_id)
        .await
        .to_error_response()
}

pub async fn complete_walk_request(
    owner_id: &str,
    request_id: &str,
    state: &AppState,
) -> Result<WalkRequestDto, String> {
    let owner_id = parse_id("owner id", owner_id)?;
    let request_id = parse_id("walk request id", request_id)?;

    let request = state
        .walk_request_service
        .complete_request(owner_id, request_id)
        .await
        .to_error_response()?;

    Ok(WalkRequestDto::from(request))
}

// ============================================================================
// APPLICATIONS
// ============================================================================

pub async fn apply_for_walk(
    walker_id: &str,
    request_id: &str,
    message: Option<String>,
    state: &AppState,
) -> Result<WalkApplicationDto, String> {
    let walker_id = parse_id("walker id", walker_id)?;
    let request_id = parse_id("walk request id", request_id)?;

    let application = state
        .walk_application_service
        .apply(walker_id, request_id, message)
        .await
        .to_error_response()?;

    Ok(WalkApplicationDto::from(application))
}

pub async fn accept_application(
    owner_id: &str,
    application_id: &str,
    state: &AppState,
) -> Result<WalkApplicationDto, String> {
    let owner_id = parse_id("owner id", owner_id)?;
    let application_id = parse_id("application id", application_id)?;

    let application = state
        .walk_application_service
        .accept(owner_id, application_id)
        .await
        .to_error_response()?;

    Ok(WalkApplicationDto::from(application))
}

pub async fn reject_application(
    owner_id: &str,
    application_id: &str,
    state: &AppState,
) -> Result<WalkApplicationDto, String> {
    let owner_id = parse_id("owner id", owner_id)?;
    let application_id = parse_id("application id", application_id)?;

    let application = state
        .walk_application_service
        .reject(owner_id, application_id)
        .await
        .to_error_response()?;

    Ok(WalkApplicationDto::from(application))
}

pub async fn list_request_applications(
    request_id: &str,
    state: &AppState,
) -> Result<Vec<WalkApplicationDto>, String> {
    let request_id = parse_id("walk request id", request_id)?;

    let applications = state
        .walk_application_service
        .list_for_request(request_id)
        .await
        .to_error_response()?;

    Ok(applications.into_iter().map(WalkApplicationDto::from).collect())
}

pub async fn list_walker_applications(
    walker_id: &str,
    state: &AppState,
) -> Result<Vec<WalkApplicationDto>, String> {
    let walker_id = parse_id("walker id", walker_id)?;

    let applications = state
        .walk_application_service
        .list_for_walker(walker_id)
        .await
        .to_error_response()?;

    Ok(applications.into_iter().map(WalkApplicationDto::from).collect())
}
