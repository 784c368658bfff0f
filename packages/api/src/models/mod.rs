//! Data models for the application.

mod joke;
mod user;

pub use joke::{Joke, JokeListItem};
pub use user::{User, UserInfo};
