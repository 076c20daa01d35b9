// src/repositories/film_repository.rs
//
// Film persistence: films, their genre links and likes

use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::{date_from_sql, date_to_sql, is_foreign_key_violation, is_unique_violation};
use crate::db::ConnectionPool;
use crate::domain::{merge_film, Film, FilmId, FilmPatch, Genre, Mpa, NewFilm, UserId};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait FilmRepository: Send + Sync {
    /// Insert a film with its genre links and return it with its new id
    fn create_film(&self, film: &NewFilm) -> AppResult<Film>;

    /// Merge `patch` into the stored film and write it back as one step.
    /// Supplied genres replace the stored links; likes are untouched.
    fn update_film(&self, id: FilmId, patch: &FilmPatch) -> AppResult<Film>;

    fn find_film_by_id(&self, id: FilmId) -> AppResult<Option<Film>>;

    /// All films ordered by id
    fn find_all_films(&self) -> AppResult<Vec<Film>>;

    /// Fails with `Duplicate` when the like already exists
    fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()>;

    /// Returns whether a like was removed
    fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool>;

    /// Most liked first, ties by ascending id, at most `count` films
    fn find_popular_films(&self, count: usize) -> AppResult<Vec<Film>>;
}

const FILM_COLUMNS: &str = "f.film_id, f.name, f.description, f.release_date, f.duration,
                            r.rating_id, r.rating_name";

pub struct SqliteFilmRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFilmRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map a film row; genres and likes are attached afterwards
    fn row_to_film(row: &Row) -> Result<Film, rusqlite::Error> {
        let release_date: String = row.get(3)?;

        Ok(Film {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            release_date: date_from_sql(3, &release_date)?,
            duration: row.get(4)?,
            mpa: Mpa {
                id: row.get(5)?,
                name: row.get(6)?,
            },
            genres: Vec::new(),
            likes: BTreeSet::new(),
        })
    }

    fn load_film(conn: &Connection, id: FilmId) -> AppResult<Option<Film>> {
        let sql = format!(
            "SELECT {} FROM films AS f
             JOIN rating AS r ON r.rating_id = f.rating_id
             WHERE f.film_id = ?1",
            FILM_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let film = match stmt.query_row(params![id], Self::row_to_film) {
            Ok(film) => film,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(AppError::Database(e)),
        };

        let mut films = vec![film];
        Self::attach_relations(conn, &mut films, false)?;
        Ok(films.pop())
    }

    /// Fill in genres and likes for the given films.
    /// Unless `every_film` is set the relation queries only read rows of `films`.
    fn attach_relations(conn: &Connection, films: &mut [Film], every_film: bool) -> AppResult<()> {
        if films.is_empty() {
            return Ok(());
        }

        let ids: Vec<FilmId> = if every_film {
            Vec::new()
        } else {
            films.iter().map(|film| film.id).collect()
        };

        let mut genres: BTreeMap<FilmId, Vec<Genre>> = BTreeMap::new();
        let sql = format!(
            "SELECT fg.film_id, g.genre_id, g.genre_name
             FROM film_genre AS fg
             JOIN genre AS g ON g.genre_id = fg.genre_id
             {}
             ORDER BY fg.film_id, g.genre_id",
            Self::id_filter("fg.film_id", ids.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            Ok((
                row.get::<_, FilmId>(0)?,
                Genre {
                    id: row.get(1)?,
                    name: row.get(2)?,
                },
            ))
        })?;
        for row in rows {
            let (film_id, genre) = row?;
            genres.entry(film_id).or_default().push(genre);
        }

        let mut likes: BTreeMap<FilmId, BTreeSet<UserId>> = BTreeMap::new();
        let sql = format!(
            "SELECT film_id, user_id FROM likes {}",
            Self::id_filter("film_id", ids.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            Ok((row.get::<_, FilmId>(0)?, row.get::<_, UserId>(1)?))
        })?;
        for row in rows {
            let (film_id, user_id) = row?;
            likes.entry(film_id).or_default().insert(user_id);
        }

        for film in films.iter_mut() {
            film.genres = genres.remove(&film.id).unwrap_or_default();
            film.likes = likes.remove(&film.id).unwrap_or_default();
        }
        Ok(())
    }

    /// `WHERE column IN (?1, ..)` for `count` ids, nothing when `count` is zero
    fn id_filter(column: &str, count: usize) -> String {
        if count == 0 {
            return String::new();
        }
        let placeholders: Vec<String> = (1..=count).map(|n| format!("?{}", n)).collect();
        format!("WHERE {} IN ({})", column, placeholders.join(", "))
    }

    fn insert_genre_links(conn: &Connection, film_id: FilmId, genres: &[Genre]) -> AppResult<()> {
        let mut stmt =
            conn.prepare("INSERT OR IGNORE INTO film_genre (film_id, genre_id) VALUES (?1, ?2)")?;
        for genre in genres {
            stmt.execute(params![film_id, genre.id])
                .map_err(Self::reference_error)?;
        }
        Ok(())
    }

    fn reference_error(err: rusqlite::Error) -> AppError {
        if is_foreign_key_violation(&err) {
            AppError::validation("unknown rating or genre")
        } else {
            AppError::Database(err)
        }
    }
}

impl FilmRepository for SqliteFilmRepository {
    fn create_film(&self, film: &NewFilm) -> AppResult<Film> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO films (name, description, release_date, duration, rating_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                film.name,
                film.description,
                date_to_sql(film.release_date),
                film.duration,
                film.mpa.id,
            ],
        )
        .map_err(Self::reference_error)?;
        let id = tx.last_insert_rowid();

        Self::insert_genre_links(&tx, id, &film.genres)?;

        let created = Self::load_film(&tx, id)?
            .ok_or_else(|| AppError::Other(format!("film {} vanished during insert", id)))?;
        tx.commit()?;

        log::debug!("film {} inserted", id);
        Ok(created)
    }

    fn update_film(&self, id: FilmId, patch: &FilmPatch) -> AppResult<Film> {
        let mut conn = self.pool.get()?;
        // Take the write lock before reading so no other writer lands between read and write
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stored = Self::load_film(&tx, id)?
            .ok_or_else(|| AppError::not_found(format!("film {} not found", id)))?;
        let film = merge_film(&stored, patch.clone());

        tx.execute(
            "UPDATE films
             SET name = ?1, description = ?2, release_date = ?3, duration = ?4, rating_id = ?5
             WHERE film_id = ?6",
            params![
                film.name,
                film.description,
                date_to_sql(film.release_date),
                film.duration,
                film.mpa.id,
                film.id,
            ],
        )
        .map_err(Self::reference_error)?;

        if patch.genres.is_some() {
            tx.execute("DELETE FROM film_genre WHERE film_id = ?1", params![film.id])?;
            Self::insert_genre_links(&tx, film.id, &film.genres)?;
        }

        let updated = Self::load_film(&tx, film.id)?
            .ok_or_else(|| AppError::not_found(format!("film {} not found", film.id)))?;
        tx.commit()?;

        Ok(updated)
    }

    fn find_film_by_id(&self, id: FilmId) -> AppResult<Option<Film>> {
        let conn = self.pool.get()?;
        Self::load_film(&conn, id)
    }

    fn find_all_films(&self) -> AppResult<Vec<Film>> {
        let conn = self.pool.get()?;

        let sql = format!(
            "SELECT {} FROM films AS f
             JOIN rating AS r ON r.rating_id = f.rating_id
             ORDER BY f.film_id",
            FILM_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut films: Vec<Film> = stmt
            .query_map([], Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;

        Self::attach_relations(&conn, &mut films, true)?;
        Ok(films)
    }

    fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        let conn = self.pool.get()?;

        match conn.execute(
            "INSERT INTO likes (film_id, user_id) VALUES (?1, ?2)",
            params![film_id, user_id],
        ) {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AppError::duplicate("like already exists")),
            Err(e) if is_foreign_key_violation(&e) => Err(AppError::not_found(format!(
                "film {} or user {} not found",
                film_id, user_id
            ))),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM likes WHERE film_id = ?1 AND user_id = ?2",
            params![film_id, user_id],
        )?;

        Ok(rows_affected > 0)
    }

    fn find_popular_films(&self, count: usize) -> AppResult<Vec<Film>> {
        let conn = self.pool.get()?;

        let sql = format!(
            "SELECT {} FROM films AS f
             JOIN rating AS r ON r.rating_id = f.rating_id
             LEFT JOIN likes AS l ON l.film_id = f.film_id
             GROUP BY f.film_id
             ORDER BY COUNT(l.user_id) DESC, f.film_id ASC
             LIMIT ?1",
            FILM_COLUMNS
        );
        let limit = i64::try_from(count).unwrap_or(i64::MAX);
        let mut stmt = conn.prepare(&sql)?;
        let mut films: Vec<Film> = stmt
            .query_map(params![limit], Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;

        Self::attach_relations(&conn, &mut films, false)?;
        Ok(films)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool, initialize_database};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn repository() -> (TempDir, SqliteFilmRepository, Arc<ConnectionPool>) {
        let dir = tempfile::tempdir().unwrap();
        let pool = Arc::new(create_connection_pool(&dir.path().join("films.db"), 2).unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        (dir, SqliteFilmRepository::new(pool.clone()), pool)
    }

    fn new_film(name: &str, genres: Vec<Genre>) -> NewFilm {
        NewFilm {
            name: name.to_string(),
            description: "description".to_string(),
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
            duration: 136,
            mpa: Mpa::new(4, "R"),
            genres,
        }
    }

    fn insert_user(pool: &ConnectionPool, id: UserId) {
        pool.get()
            .unwrap()
            .execute(
                "INSERT INTO users (user_id, email, login, name, birthday)
                 VALUES (?1, ?2, ?3, ?3, '1990-01-01')",
                params![id, format!("u{}@example.com", id), format!("u{}", id)],
            )
            .unwrap();
    }

    #[test]
    fn test_create_and_find_film() {
        let (_dir, repo, _pool) = repository();

        let created = repo
            .create_film(&new_film(
                "The Matrix",
                vec![Genre::new(6, "Action"), Genre::new(4, "Thriller")],
            ))
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.mpa, Mpa::new(4, "R"));
        assert_eq!(created.genre_ids(), vec![4, 6]);

        let found = repo.find_film_by_id(created.id).unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_film_by_id(99).unwrap().is_none());
    }

    #[test]
    fn test_create_with_unknown_genre_rolls_back() {
        let (_dir, repo, _pool) = repository();

        let result = repo.create_film(&new_film("Broken", vec![Genre::new(99, "Missing")]));
        assert!(result.is_err());
        assert!(repo.find_all_films().unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_genres() {
        let (_dir, repo, _pool) = repository();
        let film = repo
            .create_film(&new_film("Heat", vec![Genre::new(2, "Drama")]))
            .unwrap();

        let patch = FilmPatch {
            duration: Some(170),
            genres: Some(vec![Genre::new(1, "Comedy")]),
            ..FilmPatch::default()
        };
        let updated = repo.update_film(film.id, &patch).unwrap();
        assert_eq!(updated.genre_ids(), vec![1]);
        assert_eq!(updated.duration, 170);
        assert_eq!(updated.name, "Heat");
    }

    #[test]
    fn test_update_without_genres_keeps_links() {
        let (_dir, repo, _pool) = repository();
        let film = repo
            .create_film(&new_film("Heat", vec![Genre::new(2, "Drama")]))
            .unwrap();

        let patch = FilmPatch {
            name: Some("Heat (1995)".to_string()),
            ..FilmPatch::default()
        };
        let updated = repo.update_film(film.id, &patch).unwrap();
        assert_eq!(updated.name, "Heat (1995)");
        assert_eq!(updated.genre_ids(), vec![2]);
    }

    #[test]
    fn test_update_missing_film_is_not_found() {
        let (_dir, repo, _pool) = repository();
        assert!(matches!(
            repo.update_film(42, &FilmPatch::default()).unwrap_err().domain(),
            Some(crate::domain::DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_like_is_rejected() {
        let (_dir, repo, pool) = repository();
        insert_user(&pool, 1);
        let film = repo.create_film(&new_film("Alien", Vec::new())).unwrap();

        repo.add_like(film.id, 1).unwrap();
        assert!(matches!(
            repo.add_like(film.id, 1).unwrap_err().domain(),
            Some(crate::domain::DomainError::Duplicate(_))
        ));

        assert!(repo.remove_like(film.id, 1).unwrap());
        assert!(!repo.remove_like(film.id, 1).unwrap());
    }

    #[test]
    fn test_popular_films_order() {
        let (_dir, repo, pool) = repository();
        insert_user(&pool, 1);
        insert_user(&pool, 2);
        let x = repo.create_film(&new_film("X", Vec::new())).unwrap();
        let y = repo.create_film(&new_film("Y", Vec::new())).unwrap();
        let z = repo.create_film(&new_film("Z", Vec::new())).unwrap();

        repo.add_like(y.id, 1).unwrap();
        repo.add_like(y.id, 2).unwrap();
        repo.add_like(z.id, 1).unwrap();

        let popular: Vec<FilmId> = repo
            .find_popular_films(2)
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(popular, vec![y.id, z.id]);

        let all: Vec<FilmId> = repo
            .find_popular_films(10)
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(all, vec![y.id, z.id, x.id]);
    }

    #[test]
    fn test_popular_films_carry_their_own_relations() {
        let (_dir, repo, pool) = repository();
        insert_user(&pool, 1);
        let quiet = repo
            .create_film(&new_film("Quiet", vec![Genre::new(1, "Comedy")]))
            .unwrap();
        let loud = repo
            .create_film(&new_film("Loud", vec![Genre::new(6, "Action")]))
            .unwrap();
        repo.add_like(loud.id, 1).unwrap();

        let popular = repo.find_popular_films(1).unwrap();
        assert_eq!(popular.len(), 1);
        assert_eq!(popular[0].id, loud.id);
        assert_eq!(popular[0].genre_ids(), vec![6]);
        assert_eq!(popular[0].like_count(), 1);
        assert_ne!(popular[0].id, quiet.id);
    }

    #[test]
    fn test_concurrent_likes_for_one_pair_succeed_once() {
        let (_dir, repo, pool) = repository();
        insert_user(&pool, 1);
        let film = repo.create_film(&new_film("Alien", Vec::new())).unwrap();
        let repo = Arc::new(repo);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                std::thread::spawn(move || repo.add_like(film.id, 1))
            })
            .collect();
        let results: Vec<AppResult<()>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().filter_map(|r| r.as_ref().err()).all(|e| matches!(
            e.domain(),
            Some(crate::domain::DomainError::Duplicate(_))
        )));
        assert_eq!(repo.find_film_by_id(film.id).unwrap().unwrap().like_count(), 1);
    }

    #[test]
    fn test_concurrent_partial_updates_keep_both_fields() {
        let (_dir, repo, _pool) = repository();
        let film = repo.create_film(&new_film("Heat", Vec::new())).unwrap();
        let repo = Arc::new(repo);

        let renamer = {
            let repo = repo.clone();
            std::thread::spawn(move || {
                for i in 0..40 {
                    let patch = FilmPatch {
                        name: Some(format!("N{}", i)),
                        ..FilmPatch::default()
                    };
                    repo.update_film(film.id, &patch).unwrap();
                }
            })
        };
        let stretcher = {
            let repo = repo.clone();
            std::thread::spawn(move || {
                for i in 1..=40 {
                    let patch = FilmPatch {
                        duration: Some(i),
                        ..FilmPatch::default()
                    };
                    repo.update_film(film.id, &patch).unwrap();
                }
            })
        };
        renamer.join().unwrap();
        stretcher.join().unwrap();

        let stored = repo.find_film_by_id(film.id).unwrap().unwrap();
        assert_eq!(stored.name, "N39");
        assert_eq!(stored.duration, 40);
    }
}
