// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema initialization and reference data
// - Database utilities

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_test_connection, default_database_path, get_connection,
    ConnectionPool, PooledConn, DEFAULT_POOL_SIZE,
};

pub use migrations::{
    get_database_stats, initialize_database, verify_database_integrity, DatabaseStats,
};
