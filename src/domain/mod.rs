// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod film;
pub mod friendship;
pub mod ranking;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Reference data
pub use catalog::{normalize_genres, Genre, Mpa};

// Film Domain
pub use film::{
    merge_film, validate_film_update, validate_new_film, CheckedFilm, Film, FilmDraft, FilmId,
    FilmPatch, NewFilm,
};

// User Domain
pub use user::{
    emails_match, ensure_email_available, merge_user, validate_new_user, validate_user_update,
    NewUser, User, UserDraft, UserId, UserPatch,
};

// Relationships
pub use friendship::{mutual_friends, validate_friend_request, FriendEdge};

// Popularity
pub use ranking::{rank_by_likes, validate_popular_count, DEFAULT_POPULAR_COUNT};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed or out-of-range input
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness rule was violated (email, like)
    #[error("{0}")]
    Duplicate(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Blank means empty or whitespace only
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
