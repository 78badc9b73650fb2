use super::entity::Dog;
use crate::domain::{DomainError, DomainResult};

/// Oldest age accepted for a dog profile
pub const MAX_DOG_AGE_YEARS: u32 = 30;

/// Validates all Dog invariants
pub fn validate_dog(dog: &Dog) -> DomainResult<()> {
    if dog.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Dog name cannot be empty".to_string(),
        ));
    }
    if dog.age_years > MAX_DOG_AGE_YEARS {
        return Err(DomainError::InvariantViolation(format!(
            "Dog age {} exceeds {} years",
            dog.age_years, MAX_DOG_AGE_YEARS
        )));
    }
    Ok(())
}
