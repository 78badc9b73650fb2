pub mod entity;
pub mod invariants;

pub use entity::{WalkApplication, WalkApplicationStatus};
pub use invariants::validate_walk_application;
