//! The single ownership rule every mutation goes through.

use crate::models::Joke;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allow,
    Deny,
}

impl Authorization {
    pub fn is_allowed(self) -> bool {
        self == Authorization::Allow
    }
}

/// Only the jokester who posted a joke may change it.
pub fn authorize(joke: &Joke, user_id: &str) -> Authorization {
    if joke.jokester_id == user_id {
        Authorization::Allow
    } else {
        Authorization::Deny
    }
}
