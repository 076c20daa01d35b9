// src/lib.rs
// filmhub - Film catalog service with users, friendships and likes
//
// Architecture:
// - Domain-centric: validation, merge and ranking rules live in the domain
// - Storage ports: one trait per entity, SQLite and in-memory implementations
// - Services orchestrate domain rules over the storage ports
// - Application layer: HTTP boundary (axum)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod app;
pub mod application;
pub mod config;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    DomainError, DomainResult, Film, FilmDraft, FilmId, FriendEdge, Genre, Mpa, User, UserDraft,
    UserId,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{CatalogService, FilmService, UserService};
