// src/repositories/mpa_repository.rs
//
// MPA rating reference table (read-only)

use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::Mpa;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait MpaRepository: Send + Sync {
    /// All ratings ordered by id
    fn find_all_mpa(&self) -> AppResult<Vec<Mpa>>;
    fn find_mpa_by_id(&self, id: i32) -> AppResult<Option<Mpa>>;
}

pub struct SqliteMpaRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMpaRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_mpa(row: &Row) -> Result<Mpa, rusqlite::Error> {
        Ok(Mpa {
            id: row.get("rating_id")?,
            name: row.get("rating_name")?,
        })
    }
}

impl MpaRepository for SqliteMpaRepository {
    fn find_all_mpa(&self) -> AppResult<Vec<Mpa>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT rating_id, rating_name FROM rating ORDER BY rating_id")?;
        let ratings: Vec<Mpa> = stmt
            .query_map([], Self::row_to_mpa)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ratings)
    }

    fn find_mpa_by_id(&self, id: i32) -> AppResult<Option<Mpa>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT rating_id, rating_name FROM rating WHERE rating_id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_mpa) {
            Ok(mpa) => Ok(Some(mpa)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}
