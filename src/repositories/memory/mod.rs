// src/repositories/memory/mod.rs
//
// Non-persistent storage
//
// All tables live behind one RwLock inside an injected MemoryStore.
// Uniqueness checks and inserts happen under the same write guard, so they
// are atomic with respect to concurrent callers. Ids come from per-table
// counters that only ever increase.

mod memory_catalog_repository;
mod memory_film_repository;
mod memory_user_repository;

pub use memory_catalog_repository::{InMemoryGenreRepository, InMemoryMpaRepository};
pub use memory_film_repository::InMemoryFilmRepository;
pub use memory_user_repository::InMemoryUserRepository;

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{Film, FilmId, Genre, Mpa, User, UserId};
use crate::error::{AppError, AppResult};

/// Stored film row; references are kept as ids and resolved on read
#[derive(Debug, Clone)]
pub(crate) struct FilmRecord {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32,
    pub mpa_id: i32,
    pub genre_ids: BTreeSet<i32>,
    pub likes: BTreeSet<UserId>,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryTables {
    pub films: BTreeMap<FilmId, FilmRecord>,
    pub users: BTreeMap<UserId, User>,
    /// (user_id, friend_id) -> confirmed
    pub friends: BTreeMap<(UserId, UserId), bool>,
    pub ratings: BTreeMap<i32, Mpa>,
    pub genres: BTreeMap<i32, Genre>,
    last_film_id: FilmId,
    last_user_id: UserId,
}

impl MemoryTables {
    pub fn next_film_id(&mut self) -> FilmId {
        self.last_film_id += 1;
        self.last_film_id
    }

    pub fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        self.last_user_id
    }

    /// Resolve a stored row into a full film
    pub fn film(&self, id: FilmId, record: &FilmRecord) -> AppResult<Film> {
        let mpa = self.ratings.get(&record.mpa_id).cloned().ok_or_else(|| {
            AppError::Other(format!("film {} references missing rating {}", id, record.mpa_id))
        })?;

        let genres = record
            .genre_ids
            .iter()
            .map(|genre_id| {
                self.genres.get(genre_id).cloned().ok_or_else(|| {
                    AppError::Other(format!("film {} references missing genre {}", id, genre_id))
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Film {
            id,
            name: record.name.clone(),
            description: record.description.clone(),
            release_date: record.release_date,
            duration: record.duration,
            mpa,
            genres,
            likes: record.likes.clone(),
        })
    }

    /// Same check the relational store gets from its foreign keys
    pub fn check_references(&self, mpa_id: i32, genres: &[Genre]) -> AppResult<()> {
        let known = self.ratings.contains_key(&mpa_id)
            && genres.iter().all(|g| self.genres.contains_key(&g.id));
        if !known {
            return Err(AppError::validation("unknown rating or genre"));
        }
        Ok(())
    }
}

/// Shared in-memory tables, seeded with the standard reference data
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<MemoryTables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let tables = MemoryTables {
            ratings: Mpa::standard_ratings()
                .into_iter()
                .map(|mpa| (mpa.id, mpa))
                .collect(),
            genres: Genre::standard_genres()
                .into_iter()
                .map(|genre| (genre.id, genre))
                .collect(),
            ..MemoryTables::default()
        };

        Self {
            tables: RwLock::new(tables),
        }
    }

    pub(crate) fn read(&self) -> AppResult<RwLockReadGuard<'_, MemoryTables>> {
        self.tables
            .read()
            .map_err(|_| AppError::Other("memory store lock poisoned".to_string()))
    }

    pub(crate) fn write(&self) -> AppResult<RwLockWriteGuard<'_, MemoryTables>> {
        self.tables
            .write()
            .map_err(|_| AppError::Other("memory store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_seeded() {
        let store = MemoryStore::new();
        let tables = store.read().unwrap();
        assert_eq!(tables.ratings.len(), 5);
        assert_eq!(tables.genres.len(), 6);
        assert!(tables.films.is_empty());
    }

    #[test]
    fn test_ids_are_monotonic() {
        let store = MemoryStore::new();
        let mut tables = store.write().unwrap();
        assert_eq!(tables.next_film_id(), 1);
        assert_eq!(tables.next_film_id(), 2);
        assert_eq!(tables.next_user_id(), 1);
    }

    #[test]
    fn test_reference_check() {
        let store = MemoryStore::new();
        let tables = store.read().unwrap();
        assert!(tables.check_references(1, &[Genre::new(2, "Drama")]).is_ok());
        assert!(tables.check_references(9, &[]).is_err());
        assert!(tables.check_references(1, &[Genre::new(42, "Missing")]).is_err());
    }
}
