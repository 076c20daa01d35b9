// src/config.rs
//
// Command line and environment configuration

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::db::{default_database_path, DEFAULT_POOL_SIZE};
use crate::error::AppResult;

/// Where films, users and relations are kept
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Process memory, lost on exit
    Memory,
    /// SQLite database file
    Sqlite,
}

impl StorageBackend {
    pub fn name(self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Sqlite => "sqlite",
        }
    }
}

/// Film catalog REST service.
#[derive(Parser, Debug, Clone)]
#[command(name = "filmhub", about = "Film catalog REST service")]
pub struct AppConfig {
    /// Listen address
    #[arg(long, env = "FILMHUB_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Storage backend
    #[arg(long, env = "FILMHUB_STORAGE", value_enum, default_value_t = StorageBackend::Sqlite)]
    pub storage: StorageBackend,

    /// SQLite database file (defaults to the user data directory)
    #[arg(long, env = "FILMHUB_DATABASE")]
    pub database: Option<PathBuf>,

    /// Maximum pooled SQLite connections
    #[arg(long, env = "FILMHUB_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: u32,
}

/// Storage selection handed to the composition root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_path: PathBuf,
    pub pool_size: u32,
}

impl AppConfig {
    pub fn storage_config(&self) -> AppResult<StorageConfig> {
        let database_path = match &self.database {
            Some(path) => path.clone(),
            None => default_database_path()?,
        };

        Ok(StorageConfig {
            backend: self.storage,
            database_path,
            pool_size: self.pool_size,
        })
    }
}
