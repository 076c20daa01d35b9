// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are data mappers
// - NO business validation (that lives in domain + services)
// - Uniqueness is enforced here, atomically, at write time
// - NO cross-repository calls
// - Explicit SQL only
//
// Every trait has two implementations: SQLite (durable) and in-memory
// (over an injected MemoryStore). Both return the same results for the
// same sequence of operations.

pub mod film_repository;
pub mod genre_repository;
pub mod memory;
pub mod mpa_repository;
pub mod user_repository;

#[cfg(test)]
mod storage_equivalence_tests;

pub use film_repository::{FilmRepository, SqliteFilmRepository};
pub use genre_repository::{GenreRepository, SqliteGenreRepository};
pub use memory::{
    InMemoryFilmRepository, InMemoryGenreRepository, InMemoryMpaRepository,
    InMemoryUserRepository, MemoryStore,
};
pub use mpa_repository::{MpaRepository, SqliteMpaRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[cfg(test)]
pub use film_repository::MockFilmRepository;
#[cfg(test)]
pub use genre_repository::MockGenreRepository;
#[cfg(test)]
pub use mpa_repository::MockMpaRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

use chrono::NaiveDate;
use rusqlite::types::Type;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Dates are stored as ISO-8601 text
pub(crate) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored date; `idx` is the column index for error reporting
pub(crate) fn date_from_sql(idx: usize, value: &str) -> Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// UNIQUE or PRIMARY KEY violation
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}

/// FOREIGN KEY violation
pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
        }
        _ => false,
    }
}
