// src/application/handlers/catalog_handlers.rs

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;

use super::run_blocking;
use crate::application::dto::{GenreDto, MpaDto};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;

/// GET /genres
pub async fn list_genres(State(state): State<AppState>) -> Result<Json<Vec<GenreDto>>, ErrorResponse> {
    let genres = run_blocking(move || state.catalog_service.find_all_genres()).await?;
    Ok(Json(genres.into_iter().map(GenreDto::from).collect()))
}

/// GET /genres/{id}
pub async fn get_genre(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<GenreDto>, ErrorResponse> {
    let Path(id) = path?;
    let genre = run_blocking(move || state.catalog_service.find_genre_by_id(id)).await?;
    Ok(Json(genre.into()))
}

/// GET /mpa
pub async fn list_mpa(State(state): State<AppState>) -> Result<Json<Vec<MpaDto>>, ErrorResponse> {
    let ratings = run_blocking(move || state.catalog_service.find_all_mpa()).await?;
    Ok(Json(ratings.into_iter().map(MpaDto::from).collect()))
}

/// GET /mpa/{id}
pub async fn get_mpa(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MpaDto>, ErrorResponse> {
    let Path(id) = path?;
    let mpa = run_blocking(move || state.catalog_service.find_mpa_by_id(id)).await?;
    Ok(Json(mpa.into()))
}
