use super::entity::WalkApplication;
use crate::domain::{DomainError, DomainResult};

/// Validates all WalkApplication invariants
pub fn validate_walk_application(application: &WalkApplication) -> DomainResult<()> {
    if application.walker_id == application.owner_id {
        return Err(DomainError::InvariantViolation(
            "Owners cannot apply to their own walk requests".to_string(),
        ));
    }
    Ok(())
}
