// src/repositories/memory/memory_film_repository.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{FilmRecord, MemoryStore};
use crate::domain::{merge_film, rank_by_likes, Film, FilmId, FilmPatch, NewFilm, UserId};
use crate::error::{AppError, AppResult};
use crate::repositories::FilmRepository;

pub struct InMemoryFilmRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryFilmRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl FilmRepository for InMemoryFilmRepository {
    fn create_film(&self, film: &NewFilm) -> AppResult<Film> {
        let mut tables = self.store.write()?;
        tables.check_references(film.mpa.id, &film.genres)?;

        let id = tables.next_film_id();
        let record = FilmRecord {
            name: film.name.clone(),
            description: film.description.clone(),
            release_date: film.release_date,
            duration: film.duration,
            mpa_id: film.mpa.id,
            genre_ids: film.genres.iter().map(|g| g.id).collect(),
            likes: BTreeSet::new(),
        };
        let created = tables.film(id, &record)?;
        tables.films.insert(id, record);

        log::debug!("film {} inserted", id);
        Ok(created)
    }

    fn update_film(&self, id: FilmId, patch: &FilmPatch) -> AppResult<Film> {
        let mut tables = self.store.write()?;
        let stored = match tables.films.get(&id) {
            Some(record) => tables.film(id, record)?,
            None => return Err(AppError::not_found(format!("film {} not found", id))),
        };

        let film = merge_film(&stored, patch.clone());
        tables.check_references(film.mpa.id, &film.genres)?;

        let record = FilmRecord {
            name: film.name.clone(),
            description: film.description.clone(),
            release_date: film.release_date,
            duration: film.duration,
            mpa_id: film.mpa.id,
            genre_ids: film.genres.iter().map(|g| g.id).collect(),
            likes: film.likes.clone(),
        };
        let updated = tables.film(id, &record)?;
        tables.films.insert(id, record);
        Ok(updated)
    }

    fn find_film_by_id(&self, id: FilmId) -> AppResult<Option<Film>> {
        let tables = self.store.read()?;
        tables
            .films
            .get(&id)
            .map(|record| tables.film(id, record))
            .transpose()
    }

    fn find_all_films(&self) -> AppResult<Vec<Film>> {
        let tables = self.store.read()?;
        tables
            .films
            .iter()
            .map(|(id, record)| tables.film(*id, record))
            .collect()
    }

    fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        let mut tables = self.store.write()?;
        if !tables.users.contains_key(&user_id) {
            return Err(AppError::not_found(format!(
                "film {} or user {} not found",
                film_id, user_id
            )));
        }

        let record = tables.films.get_mut(&film_id).ok_or_else(|| {
            AppError::not_found(format!("film {} or user {} not found", film_id, user_id))
        })?;

        if !record.likes.insert(user_id) {
            return Err(AppError::duplicate("like already exists"));
        }
        Ok(())
    }

    fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool> {
        let mut tables = self.store.write()?;
        Ok(tables
            .films
            .get_mut(&film_id)
            .map(|record| record.likes.remove(&user_id))
            .unwrap_or(false))
    }

    fn find_popular_films(&self, count: usize) -> AppResult<Vec<Film>> {
        let films = self.find_all_films()?;
        Ok(rank_by_likes(films, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, Genre, Mpa, NewUser, User};
    use chrono::NaiveDate;

    fn new_film(name: &str, genres: Vec<Genre>) -> NewFilm {
        NewFilm {
            name: name.to_string(),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
            duration: 136,
            mpa: Mpa::new(4, "R"),
            genres,
        }
    }

    fn insert_user(store: &MemoryStore, id: UserId) {
        let mut tables = store.write().unwrap();
        let user = User::from_new(
            id,
            NewUser {
                email: format!("u{}@example.com", id),
                login: format!("u{}", id),
                name: format!("u{}", id),
                birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            },
        );
        tables.users.insert(id, user);
    }

    #[test]
    fn test_create_resolves_reference_names() {
        let store = Arc::new(MemoryStore::new());
        let repo = InMemoryFilmRepository::new(store);

        let created = repo
            .create_film(&new_film("The Matrix", vec![Genre::new(6, "")]))
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.genres, vec![Genre::new(6, "Action")]);
        assert_eq!(repo.find_film_by_id(1).unwrap(), Some(created));
    }

    #[test]
    fn test_create_with_unknown_genre_fails() {
        let repo = InMemoryFilmRepository::new(Arc::new(MemoryStore::new()));
        let err = repo
            .create_film(&new_film("Bad", vec![Genre::new(99, "Nope")]))
            .unwrap_err();
        assert!(matches!(err.domain(), Some(DomainError::Validation(_))));
        assert!(repo.find_all_films().unwrap().is_empty());
    }

    #[test]
    fn test_like_lifecycle() {
        let store = Arc::new(MemoryStore::new());
        let repo = InMemoryFilmRepository::new(store.clone());
        let film = repo.create_film(&new_film("Heat", vec![])).unwrap();
        insert_user(&store, 7);

        repo.add_like(film.id, 7).unwrap();
        assert!(matches!(
            repo.add_like(film.id, 7).unwrap_err().domain(),
            Some(DomainError::Duplicate(_))
        ));
        assert!(matches!(
            repo.add_like(film.id, 8).unwrap_err().domain(),
            Some(DomainError::NotFound(_))
        ));

        assert!(repo.remove_like(film.id, 7).unwrap());
        assert!(!repo.remove_like(film.id, 7).unwrap());
    }

    #[test]
    fn test_update_keeps_likes() {
        let store = Arc::new(MemoryStore::new());
        let repo = InMemoryFilmRepository::new(store.clone());
        let film = repo.create_film(&new_film("Alien", vec![])).unwrap();
        insert_user(&store, 1);
        repo.add_like(film.id, 1).unwrap();

        let patch = FilmPatch {
            name: Some("Aliens".to_string()),
            ..FilmPatch::default()
        };
        let updated = repo.update_film(film.id, &patch).unwrap();
        assert_eq!(updated.name, "Aliens");
        assert_eq!(updated.like_count(), 1);

        assert!(matches!(
            repo.update_film(40, &patch).unwrap_err().domain(),
            Some(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_with_unknown_genre_leaves_film_alone() {
        let repo = InMemoryFilmRepository::new(Arc::new(MemoryStore::new()));
        let film = repo.create_film(&new_film("Heat", vec![])).unwrap();

        let patch = FilmPatch {
            duration: Some(10),
            genres: Some(vec![Genre::new(77, "Nope")]),
            ..FilmPatch::default()
        };
        assert!(repo.update_film(film.id, &patch).is_err());
        assert_eq!(repo.find_film_by_id(film.id).unwrap(), Some(film));
    }

    #[test]
    fn test_concurrent_likes_for_one_pair_succeed_once() {
        let store = Arc::new(MemoryStore::new());
        let repo = Arc::new(InMemoryFilmRepository::new(store.clone()));
        let film = repo.create_film(&new_film("Heat", vec![])).unwrap();
        insert_user(&store, 3);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                std::thread::spawn(move || repo.add_like(film.id, 3))
            })
            .collect();
        let results: Vec<AppResult<()>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e.domain(), Some(DomainError::Duplicate(_)))));
        assert_eq!(repo.find_film_by_id(film.id).unwrap().unwrap().like_count(), 1);
    }
}
