// src/domain/catalog.rs
//
// Reference data: MPA ratings and genres.
//
// Both tables are seeded when a store is initialized and are read-only
// afterwards. The seed lists below are the single source for the SQLite
// seed step and the in-memory store.

use serde::{Deserialize, Serialize};

/// Motion Picture Association content rating
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Mpa {
    pub id: i32,
    pub name: String,
}

/// Film category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

const RATING_SEED: [(i32, &str); 5] = [(1, "G"), (2, "PG"), (3, "PG-13"), (4, "R"), (5, "NC-17")];

const GENRE_SEED: [(i32, &str); 6] = [
    (1, "Comedy"),
    (2, "Drama"),
    (3, "Cartoon"),
    (4, "Thriller"),
    (5, "Documentary"),
    (6, "Action"),
];

impl Mpa {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Ratings seeded into every fresh store, ordered by id
    pub fn standard_ratings() -> Vec<Mpa> {
        RATING_SEED
            .iter()
            .map(|(id, name)| Mpa::new(*id, *name))
            .collect()
    }
}

impl Genre {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Genres seeded into every fresh store, ordered by id
    pub fn standard_genres() -> Vec<Genre> {
        GENRE_SEED
            .iter()
            .map(|(id, name)| Genre::new(*id, *name))
            .collect()
    }
}

/// Sort by id and drop repeated ids, keeping the first occurrence.
pub fn normalize_genres(mut genres: Vec<Genre>) -> Vec<Genre> {
    genres.sort_by_key(|g| g.id);
    genres.dedup_by_key(|g| g.id);
    genres
}
