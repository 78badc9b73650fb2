pub mod entity;
pub mod invariants;

pub use entity::{WalkRequest, WalkRequestStatus};
pub use invariants::validate_walk_request;
