//! Username/password accounts and the user lookup behind every page.

use axum::http::HeaderMap;
use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;

use super::password::{hash_password, verify_password};
use super::session::{AuthRedirect, SessionCodec};
use crate::error::{Error, Result};
use crate::models::{User, UserInfo};

/// Username and password as submitted by a form.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Create an account. Returns `None` when either field is empty.
///
/// An existing username fails with [`Error::UsernameTaken`], including when another
/// registration for it lands between a [`username_taken`] check and this insert.
pub async fn register(pool: &SqlitePool, credentials: &Credentials) -> Result<Option<UserInfo>> {
    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Ok(None);
    }

    let username = credentials.username.to_lowercase();
    let password_hash = hash_password(&credentials.password)?;
    let user = match User::insert(pool, &username, &password_hash).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(Error::UsernameTaken(username));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %user.id, username = %user.username, "registered new user");
    Ok(Some(user.to_info()))
}

/// Check a username/password pair. Unknown users and wrong passwords both return `None`.
pub async fn login(pool: &SqlitePool, credentials: &Credentials) -> Result<Option<UserInfo>> {
    let username = credentials.username.to_lowercase();

    let Some(user) = User::find_by_username(pool, &username).await? else {
        return Ok(None);
    };

    if !verify_password(&credentials.password, &user.password_hash) {
        return Ok(None);
    }

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Some(user.to_info()))
}

/// Whether registering `username` would collide with an existing account.
pub async fn username_taken(pool: &SqlitePool, username: &str) -> Result<bool> {
    Ok(User::find_by_username(pool, &username.to_lowercase())
        .await?
        .is_some())
}

/// Failures of [`get_user`].
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Redirect(#[from] AuthRedirect),

    #[error(transparent)]
    Store(#[from] Error),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Store(err.into())
    }
}

/// Resolve the session to a user.
///
/// No session means `Ok(None)`. A session whose user no longer exists is logged out
/// instead of being treated as anonymous.
pub async fn get_user(
    pool: &SqlitePool,
    sessions: &SessionCodec,
    headers: &HeaderMap,
) -> Result<Option<UserInfo>, AuthError> {
    let Some(user_id) = sessions.get_user_id(headers) else {
        return Ok(None);
    };

    match User::find_by_id(pool, &user_id).await? {
        Some(user) => Ok(Some(user.to_info())),
        None => {
            tracing::warn!(%user_id, "session refers to a missing user, logging out");
            Err(sessions.logout().into())
        }
    }
}
