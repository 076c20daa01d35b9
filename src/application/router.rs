// src/application/router.rs

use axum::routing::{get, put};
use axum::Router;

use super::handlers::{catalog_handlers, film_handlers, health_handlers, user_handlers};
use super::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handlers::health))
        // Films
        .route(
            "/films",
            get(film_handlers::list_films)
                .post(film_handlers::create_film)
                .put(film_handlers::update_film),
        )
        .route("/films/popular", get(film_handlers::popular_films))
        .route("/films/{id}", get(film_handlers::get_film))
        .route(
            "/films/{id}/like/{user_id}",
            put(film_handlers::add_like).delete(film_handlers::remove_like),
        )
        // Users
        .route(
            "/users",
            get(user_handlers::list_users)
                .post(user_handlers::create_user)
                .put(user_handlers::update_user),
        )
        .route(
            "/users/{id}",
            get(user_handlers::get_user).delete(user_handlers::delete_user),
        )
        .route("/users/{id}/friends", get(user_handlers::list_friends))
        .route(
            "/users/{id}/friends/{friend_id}",
            put(user_handlers::add_friend).delete(user_handlers::delete_friend),
        )
        .route(
            "/users/{id}/friends/{friend_id}/confirm",
            put(user_handlers::accept_friend),
        )
        .route(
            "/users/{id}/friends/common/{other_id}",
            get(user_handlers::common_friends),
        )
        .route("/users/{id}/friendships", get(user_handlers::list_friend_edges))
        // Reference data
        .route("/genres", get(catalog_handlers::list_genres))
        .route("/genres/{id}", get(catalog_handlers::get_genre))
        .route("/mpa", get(catalog_handlers::list_mpa))
        .route("/mpa/{id}", get(catalog_handlers::get_mpa))
        .with_state(state)
}
