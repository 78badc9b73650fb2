use super::entity::{WalkRequest, WalkRequestStatus};
use crate::domain::{DomainError, DomainResult};

/// Longest walk that can be requested, in minutes
pub const MAX_WALK_MINUTES: u32 = 480;

/// Validates all WalkRequest invariants
pub fn validate_walk_request(request: &WalkRequest) -> DomainResult<()> {
    validate_duration(request.duration_minutes)?;
    if request.location.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Walk location cannot be empty".to_string(),
        ));
    }
    validate_walker_assignment(request)?;
    Ok(())
}

fn validate_duration(minutes: u32) -> DomainResult<()> {
    if minutes == 0 || minutes > MAX_WALK_MINUTES {
        return Err(DomainError::InvariantViolation(format!(
            "Walk duration must be between 1 and {} minutes, got {}",
            MAX_WALK_MINUTES, minutes
        )));
    }
    Ok(())
}

/// Accepted and completed walks always have a walker
fn validate_walker_assignment(request: &WalkRequest) -> DomainResult<()> {
    let needs_walker = matches!(
        request.status,
        WalkRequestStatus::Accepted | WalkRequestStatus::Completed
    );
    if needs_walker && request.walker_id.is_none() {
        return Err(DomainError::InvariantViolation(format!(
            "Walk request in state {} has no walker",
            request.status
        )));
    }
    Ok(())
}
