// src/repositories/storage_equivalence_tests.rs
//
// Runs the same operation sequence against the SQLite and in-memory
// backends and compares what they return.

use chrono::NaiveDate;
use std::sync::Arc;
use tempfile::TempDir;

use super::*;
use crate::db::{create_connection_pool, initialize_database};
use crate::domain::{
    DomainError, Film, FilmPatch, Genre, Mpa, NewFilm, NewUser, User, UserPatch,
};
use crate::error::AppResult;

struct Backend {
    films: Box<dyn FilmRepository>,
    users: Box<dyn UserRepository>,
    genres: Box<dyn GenreRepository>,
    ratings: Box<dyn MpaRepository>,
}

fn sqlite_backend() -> (TempDir, Backend) {
    let dir = tempfile::tempdir().unwrap();
    let pool = Arc::new(create_connection_pool(&dir.path().join("equivalence.db"), 2).unwrap());
    initialize_database(&pool.get().unwrap()).unwrap();

    let backend = Backend {
        films: Box::new(SqliteFilmRepository::new(pool.clone())),
        users: Box::new(SqliteUserRepository::new(pool.clone())),
        genres: Box::new(SqliteGenreRepository::new(pool.clone())),
        ratings: Box::new(SqliteMpaRepository::new(pool)),
    };
    (dir, backend)
}

fn memory_backend() -> Backend {
    let store = Arc::new(MemoryStore::new());
    Backend {
        films: Box::new(InMemoryFilmRepository::new(store.clone())),
        users: Box::new(InMemoryUserRepository::new(store.clone())),
        genres: Box::new(InMemoryGenreRepository::new(store.clone())),
        ratings: Box::new(InMemoryMpaRepository::new(store)),
    }
}

fn film(name: &str, genre_ids: &[i32]) -> NewFilm {
    NewFilm {
        name: name.to_string(),
        description: format!("{} description", name),
        release_date: NaiveDate::from_ymd_opt(2001, 9, 14).unwrap(),
        duration: 95,
        mpa: Mpa::new(2, "PG"),
        genres: genre_ids.iter().map(|id| Genre::new(*id, "")).collect(),
    }
}

fn user(login: &str) -> NewUser {
    NewUser {
        email: format!("{}@mail.test", login),
        login: login.to_string(),
        name: login.to_uppercase(),
        birthday: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
    }
}

/// Everything observable after a fixed scenario
#[derive(Debug, PartialEq)]
struct Outcome {
    films: Vec<Film>,
    users: Vec<User>,
    popular: Vec<i64>,
    friends_of_first: Vec<i64>,
    edges_of_first: Vec<(i64, bool)>,
    duplicate_like: Option<DomainError>,
    duplicate_email: Option<DomainError>,
    unknown_genre: Option<DomainError>,
    genres: Vec<Genre>,
    ratings: Vec<Mpa>,
}

fn error_kind<T>(result: AppResult<T>) -> Option<DomainError> {
    result.err().and_then(|e| e.domain().cloned())
}

fn run_scenario(backend: &Backend) -> Outcome {
    let x = backend.films.create_film(&film("X", &[1])).unwrap();
    let y = backend.films.create_film(&film("Y", &[2, 4])).unwrap();
    let z = backend.films.create_film(&film("Z", &[])).unwrap();

    let a = backend.users.create_user(&user("a")).unwrap();
    let b = backend.users.create_user(&user("b")).unwrap();
    let c = backend.users.create_user(&user("c")).unwrap();

    backend.films.add_like(y.id, a.id).unwrap();
    backend.films.add_like(y.id, b.id).unwrap();
    backend.films.add_like(z.id, a.id).unwrap();
    backend.films.add_like(x.id, c.id).unwrap();
    backend.films.remove_like(x.id, c.id).unwrap();
    let duplicate_like = error_kind(backend.films.add_like(y.id, a.id));

    let renamed = FilmPatch {
        name: Some("Z2".to_string()),
        genres: Some(vec![Genre::new(5, "")]),
        ..FilmPatch::default()
    };
    backend.films.update_film(z.id, &renamed).unwrap();
    let relabeled = FilmPatch {
        mpa: Some(Mpa::new(2, "")),
        ..FilmPatch::default()
    };
    backend.films.update_film(y.id, &relabeled).unwrap();

    let nicknamed = UserPatch {
        name: Some("bee".to_string()),
        ..UserPatch::default()
    };
    backend.users.update_user(b.id, &nicknamed).unwrap();

    backend.users.add_friend(a.id, c.id).unwrap();
    backend.users.add_friend(a.id, b.id).unwrap();
    backend.users.accept_friend(a.id, b.id).unwrap();
    backend.users.add_friend(c.id, a.id).unwrap();
    backend.users.delete_friend(c.id, a.id).unwrap();

    let mut taken = user("d");
    taken.email = "A@MAIL.TEST".to_string();
    let duplicate_email = error_kind(backend.users.create_user(&taken));
    let unknown_genre = error_kind(backend.films.create_film(&film("W", &[77])));

    Outcome {
        films: backend.films.find_all_films().unwrap(),
        users: backend.users.find_all_users().unwrap(),
        popular: backend
            .films
            .find_popular_films(2)
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect(),
        friends_of_first: backend
            .users
            .find_all_friends(a.id)
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect(),
        edges_of_first: backend
            .users
            .find_friend_edges(a.id)
            .unwrap()
            .iter()
            .map(|e| (e.friend_id, e.confirmed))
            .collect(),
        duplicate_like,
        duplicate_email,
        unknown_genre,
        genres: backend.genres.find_all_genres().unwrap(),
        ratings: backend.ratings.find_all_mpa().unwrap(),
    }
}

#[test]
fn test_backends_agree_on_scenario() {
    let (_dir, sqlite) = sqlite_backend();
    let memory = memory_backend();

    let from_sqlite = run_scenario(&sqlite);
    let from_memory = run_scenario(&memory);

    assert_eq!(from_sqlite, from_memory);

    assert_eq!(from_memory.popular, vec![2, 3]);
    assert_eq!(from_memory.friends_of_first, vec![2, 3]);
    assert_eq!(from_memory.edges_of_first, vec![(2, true), (3, false)]);
    assert!(matches!(from_memory.duplicate_like, Some(DomainError::Duplicate(_))));
    assert!(matches!(from_memory.duplicate_email, Some(DomainError::Duplicate(_))));
    assert!(matches!(from_memory.unknown_genre, Some(DomainError::Validation(_))));
    assert_eq!(from_memory.films[2].name, "Z2");
    assert_eq!(from_memory.films[2].genres, vec![Genre::new(5, "Documentary")]);
}

#[test]
fn test_backends_agree_after_user_deletion() {
    let (_dir, sqlite) = sqlite_backend();
    let memory = memory_backend();

    for backend in [&sqlite, &memory] {
        run_scenario(backend);
        assert!(backend.users.delete_user(1).unwrap());
    }

    assert_eq!(
        sqlite.films.find_all_films().unwrap(),
        memory.films.find_all_films().unwrap()
    );
    assert_eq!(
        sqlite.films.find_popular_films(10).unwrap(),
        memory.films.find_popular_films(10).unwrap()
    );
    assert!(memory.users.find_all_friends(1).unwrap().is_empty());
    assert!(sqlite.users.find_all_friends(1).unwrap().is_empty());
}
