// src/repositories/genre_repository.rs
//
// Genre reference table (read-only)

use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::Genre;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait GenreRepository: Send + Sync {
    /// All genres ordered by id
    fn find_all_genres(&self) -> AppResult<Vec<Genre>>;
    fn find_genre_by_id(&self, id: i32) -> AppResult<Option<Genre>>;
}

pub struct SqliteGenreRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteGenreRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_genre(row: &Row) -> Result<Genre, rusqlite::Error> {
        Ok(Genre {
            id: row.get("genre_id")?,
            name: row.get("genre_name")?,
        })
    }
}

impl GenreRepository for SqliteGenreRepository {
    fn find_all_genres(&self) -> AppResult<Vec<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT genre_id, genre_name FROM genre ORDER BY genre_id")?;
        let genres: Vec<Genre> = stmt
            .query_map([], Self::row_to_genre)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    fn find_genre_by_id(&self, id: i32) -> AppResult<Option<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT genre_id, genre_name FROM genre WHERE genre_id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_genre) {
            Ok(genre) => Ok(Some(genre)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}
