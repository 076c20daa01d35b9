// src/app/bootstrap.rs
//
// Composition root
//
// Builds repositories for the selected backend, then services, then the
// shared application state. Nothing else in the crate picks a backend.

use std::sync::Arc;

use crate::application::AppState;
use crate::config::{StorageBackend, StorageConfig};
use crate::db::{
    create_connection_pool, get_connection, initialize_database, verify_database_integrity,
    ConnectionPool,
};
use crate::error::AppResult;
use crate::repositories::{
    FilmRepository, GenreRepository, InMemoryFilmRepository, InMemoryGenreRepository,
    InMemoryMpaRepository, InMemoryUserRepository, MemoryStore, MpaRepository,
    SqliteFilmRepository, SqliteGenreRepository, SqliteMpaRepository, SqliteUserRepository,
    UserRepository,
};
use crate::services::{CatalogService, FilmService, UserService};

/// One implementation of every storage port
pub struct Repositories {
    pub films: Arc<dyn FilmRepository>,
    pub users: Arc<dyn UserRepository>,
    pub genres: Arc<dyn GenreRepository>,
    pub ratings: Arc<dyn MpaRepository>,
}

impl Repositories {
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            films: Arc::new(InMemoryFilmRepository::new(store.clone())),
            users: Arc::new(InMemoryUserRepository::new(store.clone())),
            genres: Arc::new(InMemoryGenreRepository::new(store.clone())),
            ratings: Arc::new(InMemoryMpaRepository::new(store)),
        }
    }

    pub fn sqlite(pool: Arc<ConnectionPool>) -> Self {
        Self {
            films: Arc::new(SqliteFilmRepository::new(pool.clone())),
            users: Arc::new(SqliteUserRepository::new(pool.clone())),
            genres: Arc::new(SqliteGenreRepository::new(pool.clone())),
            ratings: Arc::new(SqliteMpaRepository::new(pool)),
        }
    }
}

/// Open the configured store and wire the services on top of it.
///
/// For SQLite the schema is initialized (idempotent) and the file passes
/// an integrity check before any repository is handed out.
pub fn build_app_state(config: &StorageConfig) -> AppResult<AppState> {
    match config.backend {
        StorageBackend::Memory => {
            log::info!("using in-memory storage");
            let repositories = Repositories::in_memory(Arc::new(MemoryStore::new()));
            Ok(assemble(repositories, config.backend, None))
        }
        StorageBackend::Sqlite => {
            log::info!("using SQLite storage at {}", config.database_path.display());
            let pool = Arc::new(create_connection_pool(
                &config.database_path,
                config.pool_size,
            )?);
            {
                let conn = get_connection(&pool)?;
                initialize_database(&conn)?;
                verify_database_integrity(&conn)?;
            }

            let repositories = Repositories::sqlite(pool.clone());
            Ok(assemble(repositories, config.backend, Some(pool)))
        }
    }
}

/// Wire services over already-built repositories
pub fn assemble(
    repositories: Repositories,
    backend: StorageBackend,
    pool: Option<Arc<ConnectionPool>>,
) -> AppState {
    let film_service = Arc::new(FilmService::new(
        repositories.films,
        repositories.users.clone(),
        repositories.ratings.clone(),
        repositories.genres.clone(),
    ));
    let user_service = Arc::new(UserService::new(repositories.users));
    let catalog_service = Arc::new(CatalogService::new(
        repositories.genres,
        repositories.ratings,
    ));

    AppState {
        film_service,
        user_service,
        catalog_service,
        storage: backend.name(),
        pool,
    }
}
