// src/domain/ranking.rs
//
// Popularity ranking.
//
// Films are ordered by like count, most liked first. Equal counts keep
// ascending film id order so every backend returns the same sequence.

use crate::domain::film::Film;
use crate::domain::{DomainError, DomainResult};

/// Number of films returned when the caller does not ask for a count
pub const DEFAULT_POPULAR_COUNT: i64 = 10;

/// Validates a requested result size
pub fn validate_popular_count(count: i64) -> DomainResult<usize> {
    if count <= 0 {
        return Err(DomainError::Validation(format!(
            "count must be positive, got {}",
            count
        )));
    }
    usize::try_from(count)
        .map_err(|_| DomainError::Validation(format!("count {} is out of range", count)))
}

/// Rank films by like count and keep the first `count`
pub fn rank_by_likes(mut films: Vec<Film>, count: usize) -> Vec<Film> {
    films.sort_by(|a, b| {
        b.like_count()
            .cmp(&a.like_count())
            .then_with(|| a.id.cmp(&b.id))
    });
    films.truncate(count);
    films
}
