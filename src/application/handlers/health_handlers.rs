// src/application/handlers/health_handlers.rs

use axum::extract::State;
use axum::Json;

use super::run_blocking;
use crate::application::dto::HealthDto;
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::db::{get_connection, get_database_stats};

/// GET /health
///
/// Reports the storage backend; for SQLite also checks a connection can be
/// taken from the pool and returns row counts.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthDto>, ErrorResponse> {
    let database = match state.pool.clone() {
        Some(pool) => Some(
            run_blocking(move || {
                let conn = get_connection(&pool)?;
                get_database_stats(&conn)
            })
            .await?,
        ),
        None => None,
    };

    Ok(Json(HealthDto {
        status: "ok",
        storage: state.storage,
        database,
    }))
}
