//! The error boundary: turns route failures into pages with a status-specific message.

use api::auth::{AuthError, AuthRedirect};
use api::jokes::JokeError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::views;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthRedirect),

    #[error(transparent)]
    Joke(JokeError),

    #[error(transparent)]
    Store(#[from] api::Error),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Redirect(redirect) => AppError::Auth(redirect),
            AuthError::Store(err) => AppError::Store(err),
        }
    }
}

impl From<JokeError> for AppError {
    fn from(err: JokeError) -> Self {
        match err {
            JokeError::Store(err) => AppError::Store(err),
            other => AppError::Joke(other),
        }
    }
}

fn fallback_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Something is wrong with that request.",
        StatusCode::FORBIDDEN => "That is not yours to touch.",
        StatusCode::NOT_FOUND => "There's nothing here.",
        _ => "Something unexpected went wrong. Sorry about that.",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth(redirect) => redirect.into_response(),
            AppError::Joke(err) => {
                let status = err.status();
                let message = match err.to_string() {
                    message if message.is_empty() => fallback_message(status).to_string(),
                    message => message,
                };
                (status, views::error_page(status, message)).into_response()
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "request failed");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (status, views::error_page(status, fallback_message(status).to_string()))
                    .into_response()
            }
        }
    }
}
