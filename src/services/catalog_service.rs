// src/services/catalog_service.rs
//
// Read-only access to the rating and genre reference tables

use crate::domain::{Genre, Mpa};
use crate::error::{AppError, AppResult};
use crate::repositories::{GenreRepository, MpaRepository};
use std::sync::Arc;

pub struct CatalogService {
    genre_repo: Arc<dyn GenreRepository>,
    mpa_repo: Arc<dyn MpaRepository>,
}

impl CatalogService {
    pub fn new(genre_repo: Arc<dyn GenreRepository>, mpa_repo: Arc<dyn MpaRepository>) -> Self {
        Self {
            genre_repo,
            mpa_repo,
        }
    }

    pub fn find_all_genres(&self) -> AppResult<Vec<Genre>> {
        self.genre_repo.find_all_genres()
    }

    pub fn find_genre_by_id(&self, id: i32) -> AppResult<Genre> {
        self.genre_repo
            .find_genre_by_id(id)?
            .ok_or_else(|| AppError::not_found(format!("genre {} not found", id)))
    }

    pub fn find_all_mpa(&self) -> AppResult<Vec<Mpa>> {
        self.mpa_repo.find_all_mpa()
    }

    pub fn find_mpa_by_id(&self, id: i32) -> AppResult<Mpa> {
        self.mpa_repo
            .find_mpa_by_id(id)?
            .ok_or_else(|| AppError::not_found(format!("rating {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::repositories::{
        InMemoryGenreRepository, InMemoryMpaRepository, MemoryStore, MockGenreRepository,
        MockMpaRepository,
    };

    fn service() -> CatalogService {
        let store = Arc::new(MemoryStore::new());
        CatalogService::new(
            Arc::new(InMemoryGenreRepository::new(store.clone())),
            Arc::new(InMemoryMpaRepository::new(store)),
        )
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = service();
        assert_eq!(catalog.find_genre_by_id(3).unwrap().name, "Cartoon");
        assert_eq!(catalog.find_mpa_by_id(5).unwrap().name, "NC-17");
        assert_eq!(catalog.find_all_genres().unwrap().len(), 6);
        assert_eq!(catalog.find_all_mpa().unwrap().len(), 5);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let catalog = service();
        assert!(matches!(
            catalog.find_genre_by_id(7).unwrap_err().domain(),
            Some(DomainError::NotFound(_))
        ));
        assert!(matches!(
            catalog.find_mpa_by_id(-1).unwrap_err().domain(),
            Some(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_storage_failure_propagates() {
        let mut genres = MockGenreRepository::new();
        genres
            .expect_find_all_genres()
            .returning(|| Err(AppError::Pool("timed out".to_string())));

        let catalog = CatalogService::new(Arc::new(genres), Arc::new(MockMpaRepository::new()));
        assert!(matches!(catalog.find_all_genres(), Err(AppError::Pool(_))));
    }
}
