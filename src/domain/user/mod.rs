pub mod entity;
pub mod invariants;

pub use entity::{UserProfile, UserType};
pub use invariants::validate_user;
