// src/repositories/memory/memory_catalog_repository.rs

use std::sync::Arc;

use super::MemoryStore;
use crate::domain::{Genre, Mpa};
use crate::error::AppResult;
use crate::repositories::{GenreRepository, MpaRepository};

pub struct InMemoryGenreRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryGenreRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl GenreRepository for InMemoryGenreRepository {
    fn find_all_genres(&self) -> AppResult<Vec<Genre>> {
        Ok(self.store.read()?.genres.values().cloned().collect())
    }

    fn find_genre_by_id(&self, id: i32) -> AppResult<Option<Genre>> {
        Ok(self.store.read()?.genres.get(&id).cloned())
    }
}

pub struct InMemoryMpaRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryMpaRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl MpaRepository for InMemoryMpaRepository {
    fn find_all_mpa(&self) -> AppResult<Vec<Mpa>> {
        Ok(self.store.read()?.ratings.values().cloned().collect())
    }

    fn find_mpa_by_id(&self, id: i32) -> AppResult<Option<Mpa>> {
        Ok(self.store.read()?.ratings.get(&id).cloned())
    }
}
