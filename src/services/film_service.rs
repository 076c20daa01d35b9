// src/services/film_service.rs
use crate::domain::{
    normalize_genres, validate_film_update, validate_new_film, validate_popular_count, Film,
    FilmDraft, FilmId, Genre, Mpa, UserId,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{FilmRepository, GenreRepository, MpaRepository, UserRepository};
use std::sync::Arc;

pub struct FilmService {
    film_repo: Arc<dyn FilmRepository>,
    user_repo: Arc<dyn UserRepository>,
    mpa_repo: Arc<dyn MpaRepository>,
    genre_repo: Arc<dyn GenreRepository>,
}

impl FilmService {
    pub fn new(
        film_repo: Arc<dyn FilmRepository>,
        user_repo: Arc<dyn UserRepository>,
        mpa_repo: Arc<dyn MpaRepository>,
        genre_repo: Arc<dyn GenreRepository>,
    ) -> Self {
        Self {
            film_repo,
            user_repo,
            mpa_repo,
            genre_repo,
        }
    }

    pub fn create_film(&self, draft: FilmDraft) -> AppResult<Film> {
        let checked = validate_new_film(&draft).map_err(|e| {
            log::warn!("film rejected: {}", e);
            AppError::Domain(e)
        })?;

        let mpa = self.resolve_mpa(checked.mpa_id)?;
        let genres = self.resolve_genres(&checked.genre_ids)?;
        let film = self
            .film_repo
            .create_film(&checked.into_new_film(mpa, genres))?;

        log::info!("film {} created: {}", film.id, film.name);
        Ok(film)
    }

    /// Blank or absent fields keep their stored values; the merge runs
    /// inside the repository write
    pub fn update_film(&self, draft: FilmDraft) -> AppResult<Film> {
        let id = draft
            .id
            .ok_or_else(|| AppError::not_found("film id required"))?;
        self.get_film(id)?;

        let mut patch = validate_film_update(&draft).map_err(|e| {
            log::warn!("film {} update rejected: {}", id, e);
            AppError::Domain(e)
        })?;
        patch.mpa = draft.mpa_id.map(|mpa_id| self.resolve_mpa(mpa_id)).transpose()?;
        patch.genres = draft
            .genre_ids
            .as_deref()
            .map(|genre_ids| self.resolve_genres(genre_ids))
            .transpose()?;

        let film = self.film_repo.update_film(id, &patch)?;

        log::info!("film {} updated", film.id);
        Ok(film)
    }

    pub fn get_film(&self, id: FilmId) -> AppResult<Film> {
        self.film_repo
            .find_film_by_id(id)?
            .ok_or_else(|| AppError::not_found(format!("film {} not found", id)))
    }

    pub fn list_films(&self) -> AppResult<Vec<Film>> {
        self.film_repo.find_all_films()
    }

    pub fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        self.ensure_film_and_user(film_id, user_id)?;
        self.film_repo.add_like(film_id, user_id)?;

        log::info!("user {} liked film {}", user_id, film_id);
        Ok(())
    }

    /// Removing a like that does not exist succeeds
    pub fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        self.ensure_film_and_user(film_id, user_id)?;

        if self.film_repo.remove_like(film_id, user_id)? {
            log::info!("user {} unliked film {}", user_id, film_id);
        } else {
            log::debug!("user {} had no like on film {}", user_id, film_id);
        }
        Ok(())
    }

    pub fn find_popular_films(&self, count: i64) -> AppResult<Vec<Film>> {
        let count = validate_popular_count(count)?;
        self.film_repo.find_popular_films(count)
    }

    fn ensure_film_and_user(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        if self.film_repo.find_film_by_id(film_id)?.is_none() {
            return Err(AppError::not_found(format!("film {} not found", film_id)));
        }
        if self.user_repo.find_user_by_id(user_id)?.is_none() {
            return Err(AppError::not_found(format!("user {} not found", user_id)));
        }
        Ok(())
    }

    fn resolve_mpa(&self, mpa_id: i32) -> AppResult<Mpa> {
        self.mpa_repo
            .find_mpa_by_id(mpa_id)?
            .ok_or_else(|| AppError::validation("unknown rating"))
    }

    /// Look up every genre id; the result is ordered and free of repeats
    fn resolve_genres(&self, genre_ids: &[i32]) -> AppResult<Vec<Genre>> {
        let genres = genre_ids
            .iter()
            .map(|id| {
                self.genre_repo
                    .find_genre_by_id(*id)?
                    .ok_or_else(|| AppError::validation("unknown genre"))
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(normalize_genres(genres))
    }
}
