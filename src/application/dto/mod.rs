// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are the JSON shapes of the HTTP API (camelCase)
// - Response DTOs convert FROM domain entities
// - Request DTOs convert INTO drafts; validation stays in the domain

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::DatabaseStats;
use crate::domain::{Film, FilmDraft, FriendEdge, Genre, Mpa, User, UserDraft};

// ============================================================================
// REFERENCE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MpaDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
}

/// Reference by id as sent by clients; a `name` is accepted and ignored
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdRef {
    pub id: i32,
}

impl From<Mpa> for MpaDto {
    fn from(mpa: Mpa) -> Self {
        Self {
            id: mpa.id,
            name: mpa.name,
        }
    }
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

// ============================================================================
// FILM DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32,
    pub mpa: MpaDto,
    pub genres: Vec<GenreDto>,
    pub likes: Vec<i64>,
}

/// Body of `POST /films` and `PUT /films`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<i64>,
    pub mpa: Option<IdRef>,
    pub genres: Option<Vec<IdRef>>,
}

impl From<Film> for FilmDto {
    fn from(film: Film) -> Self {
        Self {
            id: film.id,
            name: film.name,
            description: film.description,
            release_date: film.release_date,
            duration: film.duration,
            mpa: film.mpa.into(),
            genres: film.genres.into_iter().map(GenreDto::from).collect(),
            likes: film.likes.into_iter().collect(),
        }
    }
}

impl From<FilmRequest> for FilmDraft {
    fn from(request: FilmRequest) -> Self {
        Self {
            id: request.id,
            name: request.name,
            description: request.description,
            release_date: request.release_date,
            duration: request.duration,
            mpa_id: request.mpa.map(|mpa| mpa.id),
            genre_ids: request
                .genres
                .map(|genres| genres.into_iter().map(|g| g.id).collect()),
        }
    }
}

/// Query string of `GET /films/popular`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopularQuery {
    pub count: Option<i64>,
}

// ============================================================================
// USER DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
}

/// Body of `POST /users` and `PUT /users`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRequest {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendEdgeDto {
    pub user_id: i64,
    pub friend_id: i64,
    pub confirmed: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            login: user.login,
            name: user.name,
            birthday: user.birthday,
        }
    }
}

impl From<UserRequest> for UserDraft {
    fn from(request: UserRequest) -> Self {
        Self {
            id: request.id,
            email: request.email,
            login: request.login,
            name: request.name,
            birthday: request.birthday,
        }
    }
}

impl From<FriendEdge> for FriendEdgeDto {
    fn from(edge: FriendEdge) -> Self {
        Self {
            user_id: edge.user_id,
            friend_id: edge.friend_id,
            confirmed: edge.confirmed,
        }
    }
}

// ============================================================================
// HEALTH DTO
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: &'static str,
    pub storage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseStats>,
}
