use api::auth::{
    self, safe_redirect, Credentials, LoginActionData, LoginForm, LoginType, ValidLogin,
};
use api::form::ActionData;
use axum::extract::rejection::FormRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use super::bad_request;
use crate::error::AppError;
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "redirectTo")]
    redirect_to: Option<String>,
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    views::login_page(safe_redirect(query.redirect_to.as_deref()), None)
}

fn reject(headers: &HeaderMap, redirect_to: String, data: LoginActionData) -> Response {
    bad_request(headers, &data, || {
        views::login_page(redirect_to, Some(data.clone()))
    })
}

/// Log in or register, depending on `loginType`, then start a session.
pub async fn login_action(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let fallback = safe_redirect(form.redirect_to.as_deref());

    let ValidLogin {
        login_type,
        fields,
        redirect_to,
    } = match form.validate() {
        Ok(valid) => valid,
        Err(data) => return Ok(reject(&headers, fallback, data)),
    };
    let credentials = Credentials::new(fields.username.as_str(), fields.password.as_str());

    let user = match login_type {
        LoginType::Login => match auth::login(&state.pool, &credentials).await? {
            Some(user) => user,
            None => {
                let data = ActionData::form_error_with_fields(
                    fields,
                    "Username/Password combination is incorrect",
                );
                return Ok(reject(&headers, redirect_to, data));
            }
        },
        LoginType::Register => {
            if auth::username_taken(&state.pool, &credentials.username).await? {
                let message = format!("User with username {} already exists", fields.username);
                let data = ActionData::form_error_with_fields(fields, message);
                return Ok(reject(&headers, redirect_to, data));
            }
            match auth::register(&state.pool, &credentials).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    let data = ActionData::form_error_with_fields(
                        fields,
                        "Something went wrong trying to create a new user.",
                    );
                    return Ok(reject(&headers, redirect_to, data));
                }
                Err(err @ api::Error::UsernameTaken(_)) => {
                    let data = ActionData::form_error_with_fields(fields, err.to_string());
                    return Ok(reject(&headers, redirect_to, data));
                }
                Err(err) => return Err(err.into()),
            }
        }
        LoginType::Other(_) => {
            let data = ActionData::form_error_with_fields(fields, "Login type invalid");
            return Ok(reject(&headers, redirect_to, data));
        }
    };

    Ok(state.sessions.create_user_session(&user.id, &redirect_to)?)
}

pub async fn logout_action(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(user_id) = state.sessions.get_user_id(&headers) {
        tracing::info!(%user_id, "user logged out");
    }
    state.sessions.logout().into_response()
}

pub async fn logout_page() -> Redirect {
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};

    use super::*;
    use crate::routes::test_support::*;

    fn set_cookie(response: &Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned()
    }

    fn json(mut request: axum::http::Request<axum::body::Body>) -> axum::http::Request<axum::body::Body> {
        request
            .headers_mut()
            .insert(header::ACCEPT, "application/json".parse().unwrap());
        request
    }

    #[tokio::test]
    async fn test_login_page_renders_redirect_target() {
        let (router, _) = app().await;
        let response = send(&router, get("/login?redirectTo=%2Fjokes%2Fnew", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("/jokes/new"));
    }

    #[tokio::test]
    async fn test_register_starts_session_and_redirects() {
        let (router, state) = app().await;
        let response = send(
            &router,
            post_form(
                "/login",
                "loginType=register&username=Kody&password=twixrox&redirectTo=%2Fjokes%2Fnew",
                None,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/jokes/new");

        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("RJ_session="));
        assert!(cookie.contains("HttpOnly"));

        let follow = send(&router, get("/jokes/new", Some(cookie.split(';').next().unwrap()))).await;
        assert_eq!(follow.status(), StatusCode::OK);
        assert!(auth::username_taken(&state.pool, "kody").await.unwrap());
    }

    #[tokio::test]
    async fn test_login_with_correct_password() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;

        let response = send(
            &router,
            post_form(
                "/login",
                "loginType=login&username=kody&password=twixrox&redirectTo=%2Fjokes",
                None,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/jokes");

        let cookie = set_cookie(&response);
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, cookie.split(';').next().unwrap().parse().unwrap());
        assert_eq!(state.sessions.get_user_id(&headers), Some(kody));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_rejected() {
        let (router, state) = app().await;
        user(&state, "kody").await;

        let response = send(
            &router,
            json(post_form(
                "/login",
                "loginType=login&username=kody&password=wrongpass&redirectTo=%2Fjokes",
                None,
            )),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["formError"], "Username/Password combination is incorrect");
        assert_eq!(body["fields"]["username"], "kody");
        assert!(body["fields"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_register_existing_username_is_rejected() {
        let (router, state) = app().await;
        user(&state, "kody").await;

        let response = send(
            &router,
            json(post_form(
                "/login",
                "loginType=register&username=kody&password=another1&redirectTo=%2Fjokes",
                None,
            )),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["formError"], "User with username kody already exists");
    }

    #[tokio::test]
    async fn test_short_fields_are_field_errors() {
        let (router, _) = app().await;
        let response = send(
            &router,
            json(post_form(
                "/login",
                "loginType=login&username=ko&password=twix&redirectTo=%2Fjokes",
                None,
            )),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(
            body["fieldErrors"]["username"],
            "Usernames must be at least 3 characters long"
        );
        assert_eq!(
            body["fieldErrors"]["password"],
            "Passwords must be at least 6 characters long"
        );
    }

    #[tokio::test]
    async fn test_unknown_login_type_is_rejected() {
        let (router, _) = app().await;
        let response = send(
            &router,
            json(post_form(
                "/login",
                "loginType=sso&username=kody&password=twixrox&redirectTo=%2Fjokes",
                None,
            )),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["formError"], "Login type invalid");
    }

    #[tokio::test]
    async fn test_offsite_redirect_is_replaced() {
        let (router, state) = app().await;
        user(&state, "kody").await;

        let response = send(
            &router,
            post_form(
                "/login",
                "loginType=login&username=kody&password=twixrox&redirectTo=https%3A%2F%2Fevil.example",
                None,
            ),
        )
        .await;

        assert_eq!(location(&response), "/jokes");
    }

    #[tokio::test]
    async fn test_backslash_redirect_is_replaced() {
        let (router, _) = app().await;
        let response = send(
            &router,
            post_form(
                "/login",
                "loginType=register&username=kody&password=twixrox&redirectTo=%2F%5Cevil.example",
                None,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/jokes");
    }

    #[tokio::test]
    async fn test_newline_in_redirect_still_starts_session() {
        let (router, _) = app().await;
        let response = send(
            &router,
            post_form(
                "/login",
                "loginType=register&username=kody&password=twixrox&redirectTo=%2Fjokes%0A",
                None,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/jokes");
        assert!(set_cookie(&response).starts_with("RJ_session="));
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (router, state) = app().await;
        let kody = user(&state, "kody").await;

        let response = send(&router, post_form("/logout", "", Some(&session_cookie(&state, &kody)))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("RJ_session=;") || cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_get_logout_goes_home() {
        let (router, _) = app().await;
        let response = send(&router, get("/logout", None)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }
}
