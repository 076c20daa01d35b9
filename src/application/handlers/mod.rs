// src/application/handlers/mod.rs
//
// HTTP handlers
//
// RULES:
// - Accept DTOs
// - Call services on the blocking pool
// - Return DTOs
// - Never contain business logic

pub mod catalog_handlers;
pub mod film_handlers;
pub mod health_handlers;
pub mod user_handlers;

use crate::application::error_handling::ErrorResponse;
use crate::error::{AppError, AppResult};

/// Run a synchronous service call on tokio's blocking pool
pub(crate) async fn run_blocking<T, F>(call: F) -> Result<T, ErrorResponse>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| AppError::Other(format!("blocking task failed: {}", e)))?;

    Ok(result?)
}
