// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between callers (CLI) and services
// - Translates between DTOs and domain entities
// - Maps every AppError into a serializable ErrorResponse

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
