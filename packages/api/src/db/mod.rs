//! # Database module: SQLite connection pool and migrations
//!
//! Every query in the crate runs against a [`SqlitePool`] that the binary opens once at
//! startup with [`connect`] and hands to route handlers through axum state. Opening the
//! pool also applies the embedded migrations from `packages/api/migrations`, so a fresh
//! database file is usable immediately.
//!
//! Foreign keys are enforced on every connection; a joke can only be inserted for a user
//! that exists.
//!
//! [`connect_in_memory`] opens a private single-connection database. The connection never
//! idles out, because closing it would drop the whole database.

mod pool;

pub use pool::{connect, connect_in_memory};
pub use sqlx::SqlitePool;
