pub mod entity;
pub mod invariants;

pub use entity::{Dog, DogSize};
pub use invariants::validate_dog;
