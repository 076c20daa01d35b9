// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::services::{CatalogService, FilmService, UserService};

/// Shared state handed to every handler.
/// All fields are Arc-wrapped so cloning per request is cheap.
/// Services are built in `app::build_app_state` and passed here.
#[derive(Clone)]
pub struct AppState {
    pub film_service: Arc<FilmService>,
    pub user_service: Arc<UserService>,
    pub catalog_service: Arc<CatalogService>,

    /// Name of the active storage backend, reported by `/health`
    pub storage: &'static str,

    /// Present only for the SQLite backend
    pub pool: Option<Arc<ConnectionPool>>,
}
