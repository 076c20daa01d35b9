// src/application/handlers/film_handlers.rs

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::run_blocking;
use crate::application::dto::{FilmDto, FilmRequest, PopularQuery};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::DEFAULT_POPULAR_COUNT;

/// GET /films
pub async fn list_films(State(state): State<AppState>) -> Result<Json<Vec<FilmDto>>, ErrorResponse> {
    let films = run_blocking(move || state.film_service.list_films()).await?;
    Ok(Json(films.into_iter().map(FilmDto::from).collect()))
}

/// GET /films/{id}
pub async fn get_film(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<FilmDto>, ErrorResponse> {
    let Path(id) = path?;
    let film = run_blocking(move || state.film_service.get_film(id)).await?;
    Ok(Json(film.into()))
}

/// POST /films
pub async fn create_film(
    State(state): State<AppState>,
    payload: Result<Json<FilmRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FilmDto>), ErrorResponse> {
    let Json(request) = payload?;
    let film = run_blocking(move || state.film_service.create_film(request.into())).await?;
    Ok((StatusCode::CREATED, Json(film.into())))
}

/// PUT /films
pub async fn update_film(
    State(state): State<AppState>,
    payload: Result<Json<FilmRequest>, JsonRejection>,
) -> Result<Json<FilmDto>, ErrorResponse> {
    let Json(request) = payload?;
    let film = run_blocking(move || state.film_service.update_film(request.into())).await?;
    Ok(Json(film.into()))
}

/// PUT /films/{id}/like/{userId}
pub async fn add_like(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, ErrorResponse> {
    let Path((film_id, user_id)) = path?;
    run_blocking(move || state.film_service.add_like(film_id, user_id)).await?;
    Ok(StatusCode::OK)
}

/// DELETE /films/{id}/like/{userId}
pub async fn remove_like(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, ErrorResponse> {
    let Path((film_id, user_id)) = path?;
    run_blocking(move || state.film_service.remove_like(film_id, user_id)).await?;
    Ok(StatusCode::OK)
}

/// GET /films/popular?count=N
pub async fn popular_films(
    State(state): State<AppState>,
    query: Result<Query<PopularQuery>, QueryRejection>,
) -> Result<Json<Vec<FilmDto>>, ErrorResponse> {
    let Query(query) = query?;
    let count = query.count.unwrap_or(DEFAULT_POPULAR_COUNT);

    let films = run_blocking(move || state.film_service.find_popular_films(count)).await?;
    Ok(Json(films.into_iter().map(FilmDto::from).collect()))
}
