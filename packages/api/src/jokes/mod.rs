//! # Joke workflows
//!
//! The operations behind the `/jokes` routes, independent of HTTP plumbing:
//!
//! | Function | Auth | Outcome |
//! |----------|------|---------|
//! | [`list_jokes`] | none | every joke's `{id, name}` |
//! | [`random_joke`] | none | one joke, if any exist |
//! | [`joke_detail`] | optional | the joke plus `is_owner`, or [`JokeError::NotFound`] |
//! | [`create_joke`] | required | the stored joke, or [`JokeError::Invalid`] with the echo payload |
//! | [`delete_joke`] | required | `()`, [`JokeError::NotFound`] or [`JokeError::Forbidden`] |
//!
//! Callers resolve the session first; these functions take the already-verified user id.
//! Ownership is decided by [`authorize`] alone.

mod form;
mod ownership;

use axum::http::StatusCode;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::error::Error;
use crate::models::{Joke, JokeListItem};

pub use form::{JokeFieldErrors, JokeFields, NewJokeActionData, NewJokeForm, FORM_NOT_SUBMITTED};
pub use ownership::{authorize, Authorization};

/// Everything a joke route can answer besides success.
#[derive(Debug, Error)]
pub enum JokeError {
    #[error("{}", .0.form_error.as_deref().unwrap_or("There are problems with the submitted joke"))]
    Invalid(NewJokeActionData),

    #[error("The intent {0} is not supported")]
    UnsupportedIntent(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Store(#[from] Error),
}

impl From<sqlx::Error> for JokeError {
    fn from(err: sqlx::Error) -> Self {
        JokeError::Store(err.into())
    }
}

impl JokeError {
    pub fn status(&self) -> StatusCode {
        match self {
            JokeError::Invalid(_) | JokeError::UnsupportedIntent(_) => StatusCode::BAD_REQUEST,
            JokeError::NotFound(_) => StatusCode::NOT_FOUND,
            JokeError::Forbidden(_) => StatusCode::FORBIDDEN,
            JokeError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// What a `POST /jokes/:id` asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Delete,
}

impl Intent {
    pub fn parse(intent: Option<&str>) -> Result<Self, JokeError> {
        match intent {
            Some("delete") => Ok(Intent::Delete),
            other => Err(JokeError::UnsupportedIntent(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

/// A joke together with whether the viewer posted it.
#[derive(Debug, Clone, PartialEq)]
pub struct JokeDetail {
    pub joke: Joke,
    /// Only decides whether a delete control is shown.
    pub is_owner: bool,
}

pub async fn list_jokes(pool: &SqlitePool) -> Result<Vec<JokeListItem>, JokeError> {
    Ok(Joke::list(pool).await?)
}

pub async fn random_joke(pool: &SqlitePool) -> Result<Option<Joke>, JokeError> {
    Ok(Joke::random(pool).await?)
}

/// Look up one joke for display. Anyone may read; `viewer` only feeds `is_owner`.
pub async fn joke_detail(
    pool: &SqlitePool,
    joke_id: &str,
    viewer: Option<&str>,
) -> Result<JokeDetail, JokeError> {
    let joke = Joke::find(pool, joke_id)
        .await?
        .ok_or_else(|| JokeError::NotFound(format!("Huh? What the heck is \"{joke_id}\"?")))?;

    let is_owner = viewer.is_some_and(|user_id| authorize(&joke, user_id).is_allowed());
    Ok(JokeDetail { joke, is_owner })
}

/// Validate the form and store the joke under `user_id`.
pub async fn create_joke(
    pool: &SqlitePool,
    user_id: &str,
    form: NewJokeForm,
) -> Result<Joke, JokeError> {
    let fields = form.validate().map_err(JokeError::Invalid)?;
    let joke = Joke::insert(pool, user_id, &fields.name, &fields.content).await?;

    tracing::info!(joke_id = %joke.id, jokester_id = %user_id, "joke created");
    Ok(joke)
}

/// Delete a joke after checking it exists and belongs to `user_id`.
pub async fn delete_joke(pool: &SqlitePool, user_id: &str, joke_id: &str) -> Result<(), JokeError> {
    let joke = Joke::find(pool, joke_id)
        .await?
        .ok_or_else(|| JokeError::NotFound("Can't delete what does not exist".into()))?;

    if !authorize(&joke, user_id).is_allowed() {
        tracing::warn!(%joke_id, %user_id, "refused to delete someone else's joke");
        return Err(JokeError::Forbidden(
            "Pssh, nice try. That's not your joke".into(),
        ));
    }

    // A concurrent delete may have won since the lookup.
    if !Joke::delete(pool, joke_id).await? {
        return Err(JokeError::NotFound("Can't delete what does not exist".into()));
    }
    tracing::info!(%joke_id, %user_id, "joke deleted");
    Ok(())
}
