// src/application/handlers/user_handlers.rs

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::run_blocking;
use crate::application::dto::{FriendEdgeDto, UserDto, UserRequest};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserDto>>, ErrorResponse> {
    let users = run_blocking(move || state.user_service.list_users()).await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserDto>, ErrorResponse> {
    let Path(id) = path?;
    let user = run_blocking(move || state.user_service.get_user(id)).await?;
    Ok(Json(user.into()))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), ErrorResponse> {
    let Json(request) = payload?;
    let user = run_blocking(move || state.user_service.create_user(request.into())).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /users
pub async fn update_user(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<UserDto>, ErrorResponse> {
    let Json(request) = payload?;
    let user = run_blocking(move || state.user_service.update_user(request.into())).await?;
    Ok(Json(user.into()))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ErrorResponse> {
    let Path(id) = path?;
    run_blocking(move || state.user_service.delete_user(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /users/{id}/friends/{friendId}
pub async fn add_friend(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, ErrorResponse> {
    let Path((user_id, friend_id)) = path?;
    run_blocking(move || state.user_service.add_friend(user_id, friend_id)).await?;
    Ok(StatusCode::OK)
}

/// PUT /users/{id}/friends/{friendId}/confirm
pub async fn accept_friend(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, ErrorResponse> {
    let Path((user_id, friend_id)) = path?;
    run_blocking(move || state.user_service.accept_friend(user_id, friend_id)).await?;
    Ok(StatusCode::OK)
}

/// DELETE /users/{id}/friends/{friendId}
pub async fn delete_friend(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, ErrorResponse> {
    let Path((user_id, friend_id)) = path?;
    run_blocking(move || state.user_service.delete_friend(user_id, friend_id)).await?;
    Ok(StatusCode::OK)
}

/// GET /users/{id}/friends
pub async fn list_friends(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<UserDto>>, ErrorResponse> {
    let Path(id) = path?;
    let friends = run_blocking(move || state.user_service.find_all_friends(id)).await?;
    Ok(Json(friends.into_iter().map(UserDto::from).collect()))
}

/// GET /users/{id}/friendships
pub async fn list_friend_edges(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<FriendEdgeDto>>, ErrorResponse> {
    let Path(id) = path?;
    let edges = run_blocking(move || state.user_service.find_friend_edges(id)).await?;
    Ok(Json(edges.into_iter().map(FriendEdgeDto::from).collect()))
}

/// GET /users/{id}/friends/common/{otherId}
pub async fn common_friends(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<Vec<UserDto>>, ErrorResponse> {
    let Path((user_id, other_id)) = path?;
    let friends =
        run_blocking(move || state.user_service.find_mutual_friends(user_id, other_id)).await?;
    Ok(Json(friends.into_iter().map(UserDto::from).collect()))
}
