// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - This layer sits ABOVE the services
// - It provides the boundary between HTTP clients and the services
// - It translates between DTOs and domain entities
// - It maps every error to a status code in one place

pub mod dto;
pub mod error_handling;
pub mod handlers;
pub mod router;
pub mod state;


pub use error_handling::{ErrorResponse, ErrorType};
pub use router::build_router;
pub use state::AppState;
