use api::auth;
use api::jokes::{self, Intent, JokeError, NewJokeForm};
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderName, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use super::bad_request;
use crate::error::AppError;
use crate::state::AppState;
use crate::views;

/// One-shot message attached to the redirect after a delete.
pub const FLASH_MESSAGE: HeaderName = HeaderName::from_static("x-flash-message");

#[derive(Debug, Default, Deserialize)]
pub struct JokeActionForm {
    intent: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let user = auth::get_user(&state.pool, &state.sessions, &headers).await?;
    let list = jokes::list_jokes(&state.pool).await?;
    let random = jokes::random_joke(&state.pool).await?;

    Ok(views::jokes_index_page(user, list, random))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(joke_id): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let viewer = state.sessions.get_user_id(&headers);
    let detail = jokes::joke_detail(&state.pool, &joke_id, viewer.as_deref()).await?;

    let user = auth::get_user(&state.pool, &state.sessions, &headers).await?;
    let list = jokes::list_jokes(&state.pool).await?;

    Ok(views::joke_page(user, list, detail.joke, detail.is_owner))
}

pub async fn new_page(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    state.sessions.require_user_id(&headers, uri.path())?;
    let user = auth::get_user(&state.pool, &state.sessions, &headers).await?;
    let list = jokes::list_jokes(&state.pool).await?;

    Ok(views::new_joke_page(user, list, None))
}

pub async fn create(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    form: Result<Form<NewJokeForm>, FormRejection>,
) -> Result<Response, AppError> {
    let user_id = state.sessions.require_user_id(&headers, uri.path())?;
    let form = form.map(|Form(form)| form).unwrap_or_default();

    match jokes::create_joke(&state.pool, &user_id, form).await {
        Ok(joke) => Ok(Redirect::to(&format!("/jokes/{}", joke.id)).into_response()),
        Err(JokeError::Invalid(data)) => {
            let user = auth::get_user(&state.pool, &state.sessions, &headers).await?;
            let list = jokes::list_jokes(&state.pool).await?;
            Ok(bad_request(&headers, &data, || {
                views::new_joke_page(user, list, Some(data.clone()))
            }))
        }
        Err(err) => Err(err.into()),
    }
}

/// `POST /jokes/{id}`. The intent is checked before the session so an unknown intent is
/// always a 400.
pub async fn action(
    State(state): State<AppState>,
    Path(joke_id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
    form: Result<Form<JokeActionForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = form.map(|Form(form)| form).unwrap_or_default();

    match Intent::parse(form.intent.as_deref())? {
        Intent::Delete => {
            let user_id = state.sessions.require_user_id(&headers, uri.path())?;
            jokes::delete_joke(&state.pool, &user_id, &joke_id).await?;
            Ok(([(FLASH_MESSAGE, "Joke deleted")], Redirect::to("/jokes")).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use api::{Joke, JokeListItem};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};

    use super::*;
    use crate::routes::test_support::*;

    async fn seed(state: &AppState, user_id: &str) -> Joke {
        Joke::insert(
            &state.pool,
            user_id,
            "Road worker",
            "I never wanted to believe that my Dad was stealing from his job as a road worker.",
        )
        .await
        .unwrap()
    }

    async fn all(state: &AppState) -> Vec<JokeListItem> {
        Joke::list(&state.pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_index_lists_jokes_for_anonymous_visitors() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        seed(&state, &kody).await;

        let response = send(&router, get("/jokes", None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("Road worker"));
        assert!(body.contains("/login"));
    }

    #[tokio::test]
    async fn test_index_greets_signed_in_user() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        let cookie = session_cookie(&state, &kody);

        let response = send(&router, get("/jokes", Some(&cookie))).await;
        let body = body_string(response).await;
        assert!(body.contains("kody"));
    }

    #[tokio::test]
    async fn test_new_page_requires_login() {
        let (router, _) = app().await;
        let response = send(&router, get("/jokes/new", None)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login?redirectTo=%2Fjokes%2Fnew");
    }

    #[tokio::test]
    async fn test_create_requires_login_and_stores_nothing() {
        let (router, state) = app().await;
        let response = send(
            &router,
            post_form("/jokes/new", "name=Frisbee&content=It+just+kept+getting+bigger", None),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login?redirectTo=%2Fjokes%2Fnew");
        assert!(all(&state).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_redirects_to_new_joke() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        let cookie = session_cookie(&state, &kody);

        let response = send(
            &router,
            post_form(
                "/jokes/new",
                "name=Frisbee&content=I+was+wondering+why+the+frisbee+was+getting+bigger",
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let jokes = all(&state).await;
        assert_eq!(jokes.len(), 1);
        assert_eq!(location(&response), format!("/jokes/{}", jokes[0].id));

        let stored = Joke::find(&state.pool, &jokes[0].id).await.unwrap().unwrap();
        assert_eq!(stored.jokester_id, kody);
    }

    #[tokio::test]
    async fn test_invalid_joke_returns_field_errors_as_json() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        let cookie = session_cookie(&state, &kody);

        let mut request = post_form("/jokes/new", "name=ab&content=short", Some(&cookie));
        request
            .headers_mut()
            .insert(header::ACCEPT, "application/json".parse().unwrap());
        let response = send(&router, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["fieldErrors"]["name"], "That joke's name is too short");
        assert_eq!(body["fieldErrors"]["content"], "That joke is too short");
        assert_eq!(body["fields"]["name"], "ab");
        assert_eq!(body["formError"], serde_json::Value::Null);
        assert!(all(&state).await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_joke_rerenders_form() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        let cookie = session_cookie(&state, &kody);

        let response = send(&router, post_form("/jokes/new", "name=ab&content=short", Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response).await;
        assert!(body.contains("That joke is too short"));
    }

    #[tokio::test]
    async fn test_missing_fields_is_form_error() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        let cookie = session_cookie(&state, &kody);

        let mut request = post_form("/jokes/new", "name=Frisbee", Some(&cookie));
        request
            .headers_mut()
            .insert(header::ACCEPT, "application/json".parse().unwrap());
        let response = send(&router, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["formError"], "Form not submitted correctly.");
    }

    #[tokio::test]
    async fn test_detail_shows_delete_only_to_owner() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        let joke = seed(&state, &kody).await;
        let uri = format!("/jokes/{}", joke.id);

        let owner = send(&router, get(&uri, Some(&session_cookie(&state, &kody)))).await;
        assert_eq!(owner.status(), StatusCode::OK);
        assert!(body_string(owner).await.contains("name=\"intent\""));

        let anonymous = send(&router, get(&uri, None)).await;
        assert_eq!(anonymous.status(), StatusCode::OK);
        let body = body_string(anonymous).await;
        assert!(body.contains("Road worker"));
        assert!(!body.contains("name=\"intent\""));
    }

    #[tokio::test]
    async fn test_detail_of_missing_joke_is_not_found() {
        let (router, _) = app().await;
        let response = send(&router, get("/jokes/does-not-exist", None)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.contains("does-not-exist"));
    }

    #[tokio::test]
    async fn test_owner_can_delete() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        let joke = seed(&state, &kody).await;
        let cookie = session_cookie(&state, &kody);

        let response = send(
            &router,
            post_form(&format!("/jokes/{}", joke.id), "intent=delete", Some(&cookie)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/jokes");
        assert_eq!(response.headers().get(&FLASH_MESSAGE).unwrap(), "Joke deleted");
        assert!(all(&state).await.is_empty());
    }

    #[tokio::test]
    async fn test_non_owner_cannot_delete() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        let mallory = user(&state, "mallory").await;
        let joke = seed(&state, &kody).await;

        let response = send(
            &router,
            post_form(
                &format!("/jokes/{}", joke.id),
                "intent=delete",
                Some(&session_cookie(&state, &mallory)),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(all(&state).await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_joke_is_not_found() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;

        let response = send(
            &router,
            post_form("/jokes/gone", "intent=delete", Some(&session_cookie(&state, &kody))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_without_session_redirects_to_login() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        let joke = seed(&state, &kody).await;

        let response = send(&router, post_form(&format!("/jokes/{}", joke.id), "intent=delete", None)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/login?redirectTo="));
        assert_eq!(all(&state).await.len(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_intent_is_bad_request() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        let joke = seed(&state, &kody).await;

        let response = send(
            &router,
            post_form(
                &format!("/jokes/{}", joke.id),
                "intent=archive",
                Some(&session_cookie(&state, &kody)),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.contains("archive"));
        assert_eq!(all(&state).await.len(), 1);
    }

    #[tokio::test]
    async fn test_tampered_cookie_is_anonymous() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;
        let cookie = session_cookie(&state, &kody);
        let tampered = format!("{}x", cookie);

        let request = Request::builder()
            .uri("/jokes/new")
            .header(header::COOKIE, tampered)
            .body(Body::empty())
            .unwrap();
        let response = send(&router, request).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}
