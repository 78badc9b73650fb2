// src/db/mod.rs
//
// Database access: pooling, schema, blocking bridge

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_test_pool, get_connection, with_connection, ConnectionPool,
    PooledConn,
};
pub use migrations::{initialize_database, verify_database_integrity};
