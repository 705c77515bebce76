//! # Race Log Database Crate
//!
//! This crate is the only owner of persisted race records. It wraps a single
//! local SQLite file holding the `races` table.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The web layer only sees `Race`,
//!   `NewRace` and `DbError`.
//! - **No pooling:** Every repository call opens a fresh connection, runs one
//!   statement and closes the connection again. Concurrent writers are
//!   serialized by SQLite's own locking.
//!
//! ## Public API
//!
//! - `connect_options`: Builds the connection settings for a store file.
//! - `init_schema`: The storage initializer. Creates the `races` table if absent.
//! - `open_store`: `connect_options` + `init_schema`, returning a ready `DbRepository`.
//! - `DbRepository`: `insert_race` and `list_races`.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect_options, init_schema, open_connection, open_store};
pub use error::DbError;
pub use repository::DbRepository;
