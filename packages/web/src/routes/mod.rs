//! HTTP surface. Handlers extract, call into `api`, and render; no decisions live here.

mod auth;
mod jokes;

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/jokes") }))
        .route("/login", get(auth::login_page).post(auth::login_action))
        .route("/logout", get(auth::logout_page).post(auth::logout_action))
        .route("/jokes", get(jokes::index))
        .route("/jokes/new", get(jokes::new_page).post(jokes::create))
        .route("/jokes/{joke_id}", get(jokes::detail).post(jokes::action))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

/// 400 carrying a rejected form's payload, as JSON or as the re-rendered page.
fn bad_request<T: Serialize>(
    headers: &HeaderMap,
    payload: &T,
    page: impl FnOnce() -> Html<String>,
) -> Response {
    if wants_json(headers) {
        (StatusCode::BAD_REQUEST, Json(payload)).into_response()
    } else {
        (StatusCode::BAD_REQUEST, page()).into_response()
    }
}
