//! Authentication: password hashing, the signed cookie session, and account operations.

mod account;
mod form;
mod password;
mod session;

pub use account::{get_user, login, register, username_taken, AuthError, Credentials};
pub use form::{
    safe_redirect, LoginActionData, LoginFieldErrors, LoginFields, LoginForm, LoginType,
    ValidLogin, DEFAULT_REDIRECT,
};
pub use password::{hash_password, verify_password};
pub use session::{
    login_location, AuthRedirect, SessionCodec, SessionData, SESSION_COOKIE_NAME,
    SESSION_MAX_AGE, SESSION_USER_ID_KEY,
};
