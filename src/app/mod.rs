// src/app/mod.rs
//
// Application wiring

pub mod bootstrap;

pub use bootstrap::{assemble, build_app_state, Repositories};
