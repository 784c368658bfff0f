//! # API crate: accounts, sessions and jokes
//!
//! Everything with a contract lives here. The `web` binary is a thin axum layer that
//! extracts requests, calls into this crate, and renders the results.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2 password hashing, the signed `RJ_session` cookie codec, register/login, and the session guards (`get_user_id`, `require_user_id`, `get_user`, `logout`) |
//! | [`db`] | SQLite pool construction and embedded migrations |
//! | [`form`] | The `{fieldErrors, fields, formError}` payload returned for rejected forms |
//! | [`jokes`] | List, detail, create and delete workflows, ownership checks, and the route error taxonomy |
//! | [`models`] | `users` and `jokes` rows plus their public projections |
//! | [`settings`] | Startup configuration; a missing `SESSION_SECRET` is fatal |

pub mod auth;
pub mod db;
mod error;
pub mod form;
pub mod jokes;
pub mod models;
pub mod settings;

pub use error::{Error, Result};
pub use models::{Joke, JokeListItem, UserInfo};
pub use settings::Settings;
