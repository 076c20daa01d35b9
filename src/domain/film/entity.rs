use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::catalog::{Genre, Mpa};
use crate::domain::user::UserId;

/// Synthetic film identifier assigned by storage
pub type FilmId = i64;

/// A catalogued film
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    /// Assigned on creation, immutable afterwards
    pub id: FilmId,

    pub name: String,

    /// At most 200 characters, may be empty
    pub description: String,

    /// Never earlier than the first public film screening
    pub release_date: NaiveDate,

    /// Duration in minutes
    pub duration: u32,

    pub mpa: Mpa,

    /// Ordered by genre id, no duplicates
    pub genres: Vec<Genre>,

    /// Ids of users who liked this film
    pub likes: BTreeSet<UserId>,
}

/// Film fields as they arrive from a caller, before any validation.
///
/// Used for both create and update: on update, blank or absent fields
/// inherit the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmDraft {
    pub id: Option<FilmId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<i64>,
    pub mpa_id: Option<i32>,
    pub genre_ids: Option<Vec<i32>>,
}

/// A validated film with resolved references, waiting for an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFilm {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32,
    pub mpa: Mpa,
    pub genres: Vec<Genre>,
}

/// Resolved update values; `None` means "keep the stored value"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<u32>,
    pub mpa: Option<Mpa>,
    pub genres: Option<Vec<Genre>>,
}

impl Film {
    /// Attach a storage-assigned id to a validated film
    pub fn from_new(id: FilmId, new_film: NewFilm) -> Self {
        Self {
            id,
            name: new_film.name,
            description: new_film.description,
            release_date: new_film.release_date,
            duration: new_film.duration,
            mpa: new_film.mpa,
            genres: new_film.genres,
            likes: BTreeSet::new(),
        }
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn genre_ids(&self) -> Vec<i32> {
        self.genres.iter().map(|g| g.id).collect()
    }
}
