//! # Cookie session codec
//!
//! Sessions live entirely in the browser. [`SessionCodec`] turns a `{"userId": "..."}`
//! payload into a signed `RJ_session` cookie and reads it back from request headers.
//! There is no server-side session table: a session is valid when its signature checks
//! out and `userId` is a non-empty string. Expiry is left to the cookie's 30 day
//! `Max-Age`.
//!
//! The HMAC key is derived once from the configured secret with Argon2 and a fixed
//! application salt. Changing the secret invalidates every outstanding session.

use argon2::Argon2;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Duration;
use tower_sessions::cookie::{Cookie, CookieJar, Key, SameSite};

use crate::error::{Error, Result};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "RJ_session";

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "userId";

/// Sessions expire this long after they were created, regardless of activity.
pub const SESSION_MAX_AGE: Duration = Duration::days(30);

const KEY_DERIVATION_SALT: &[u8] = b"remix-jokes/session-signing-key";

/// Session payload as it is written into the cookie.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Signs and verifies session cookies.
#[derive(Clone)]
pub struct SessionCodec {
    key: Key,
    secure: bool,
}

impl std::fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCodec")
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionCodec {
    /// Build a codec from the process secret. `secure` sets the cookie `Secure` flag.
    pub fn new(secret: &str, secure: bool) -> Result<Self> {
        let mut material = [0u8; 64];
        Argon2::default()
            .hash_password_into(secret.as_bytes(), KEY_DERIVATION_SALT, &mut material)
            .map_err(|e| Error::SessionKey(e.to_string()))?;
        let key = Key::try_from(&material[..]).map_err(|e| Error::SessionKey(e.to_string()))?;

        Ok(Self { key, secure })
    }

    /// Serialize and sign a session for `user_id` into a `Set-Cookie` value.
    pub fn commit(&self, user_id: &str) -> Result<HeaderValue> {
        let payload = serde_json::to_string(&SessionData {
            user_id: Some(user_id.to_owned()),
        })
        .map_err(|e| Error::SessionEncode(e.to_string()))?;

        let cookie = self
            .base_cookie(payload)
            .max_age(SESSION_MAX_AGE)
            .build();

        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key).add(cookie);
        let signed = jar
            .get(SESSION_COOKIE_NAME)
            .ok_or_else(|| Error::SessionEncode("signed cookie missing from jar".into()))?;

        HeaderValue::from_str(&signed.encoded().to_string())
            .map_err(|e| Error::SessionEncode(e.to_string()))
    }

    /// A `Set-Cookie` value that makes the browser drop the session.
    pub fn destroy(&self) -> HeaderValue {
        let mut cookie = self.base_cookie(String::new()).build();
        cookie.make_removal();
        HeaderValue::from_str(&cookie.encoded().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("RJ_session=; Path=/; Max-Age=0"))
    }

    /// Decode the user id from the request's session cookie.
    ///
    /// Returns `None` when the cookie is missing, its signature does not verify, the
    /// payload is not JSON, or `userId` is not a non-empty string.
    pub fn get_user_id(&self, headers: &HeaderMap) -> Option<String> {
        let mut jar = CookieJar::new();
        for value in headers.get_all(header::COOKIE) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            for cookie in Cookie::split_parse_encoded(value.to_owned()).flatten() {
                jar.add_original(cookie);
            }
        }

        let cookie = jar.signed(&self.key).get(SESSION_COOKIE_NAME)?;
        let payload: serde_json::Value = serde_json::from_str(cookie.value()).ok()?;
        match payload.get(SESSION_USER_ID_KEY) {
            Some(serde_json::Value::String(user_id)) if !user_id.is_empty() => {
                Some(user_id.clone())
            }
            _ => None,
        }
    }

    /// Like [`get_user_id`](Self::get_user_id), but a missing session becomes a redirect
    /// to the login page that comes back to `redirect_to` afterwards.
    pub fn require_user_id(
        &self,
        headers: &HeaderMap,
        redirect_to: &str,
    ) -> Result<String, AuthRedirect> {
        self.get_user_id(headers)
            .ok_or_else(|| AuthRedirect::LoginRequired {
                redirect_to: redirect_to.to_owned(),
            })
    }

    /// Start a session for `user_id` and redirect to `redirect_to`.
    pub fn create_user_session(&self, user_id: &str, redirect_to: &str) -> Result<Response> {
        let cookie = self.commit(user_id)?;
        Ok(([(header::SET_COOKIE, cookie)], Redirect::to(redirect_to)).into_response())
    }

    /// Clear the session and send the browser to `/login`.
    pub fn logout(&self) -> AuthRedirect {
        AuthRedirect::LoggedOut {
            clear_cookie: self.destroy(),
        }
    }

    fn base_cookie(&self, value: String) -> tower_sessions::cookie::CookieBuilder<'static> {
        Cookie::build((SESSION_COOKIE_NAME, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
    }
}

/// Requests the session guards turn away.
#[derive(Debug, Error)]
pub enum AuthRedirect {
    #[error("login required to visit {redirect_to}")]
    LoginRequired { redirect_to: String },

    #[error("session cleared")]
    LoggedOut { clear_cookie: HeaderValue },
}

/// `/login?redirectTo=<path>`
pub fn login_location(redirect_to: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("redirectTo", redirect_to)
        .finish();
    format!("/login?{query}")
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        match self {
            AuthRedirect::LoginRequired { redirect_to } => {
                Redirect::to(&login_location(&redirect_to)).into_response()
            }
            AuthRedirect::LoggedOut { clear_cookie } => {
                ([(header::SET_COOKIE, clear_cookie)], Redirect::to("/login")).into_response()
            }
        }
    }
}
