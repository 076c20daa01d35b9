// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services validate input, resolve references and translate storage
// absence into NotFound. They hold repositories behind trait objects and
// never touch SQL directly.

pub mod catalog_service;
pub mod film_service;
pub mod user_service;


pub use catalog_service::CatalogService;
pub use film_service::FilmService;
pub use user_service::UserService;
