//! Infrastructure errors shared by every module of the crate.

use thiserror::Error;

/// Failures that are not part of a route's normal outcomes.
#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("User with username {0} already exists")]
    UsernameTaken(String),

    #[error("failed to hash password: {0}")]
    PasswordHash(String),

    #[error("invalid session key: {0}")]
    SessionKey(String),

    #[error("failed to encode session: {0}")]
    SessionEncode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
