use super::entity::UserProfile;
use crate::domain::{DomainError, DomainResult};

/// Validates all UserProfile invariants
pub fn validate_user(user: &UserProfile) -> DomainResult<()> {
    if user.full_name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Full name cannot be empty".to_string(),
        ));
    }
    validate_email(&user.email)?;
    Ok(())
}

/// Only a shape check; the auth provider owns real verification
fn validate_email(email: &str) -> DomainResult<()> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(DomainError::InvariantViolation(format!(
            "Invalid email address '{}'",
            email
        ))),
    }
}
