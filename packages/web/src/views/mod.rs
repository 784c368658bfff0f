//! Server-rendered pages.
//!
//! Components are plain Dioxus components rendered once per request with `dioxus-ssr`;
//! there is no client bundle. Each `*_page` function assembles a complete document.

mod error;
mod jokes;
mod layout;
mod login;

use api::auth::LoginActionData;
use api::jokes::NewJokeActionData;
use api::{Joke, JokeListItem, UserInfo};
use axum::http::StatusCode;
use axum::response::Html;
use dioxus::prelude::*;

pub use error::ErrorPage;
pub use jokes::{JokeDisplay, NewJoke, RandomJoke};
pub use layout::{Document, JokesLayout};
pub use login::LoginPage;

const TITLE: &str = "Remix: So great, it's funny!";

pub fn render(page: Element) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html lang=\"en\">{}</html>",
        dioxus_ssr::render_element(page)
    ))
}

pub fn jokes_index_page(
    user: Option<UserInfo>,
    jokes: Vec<JokeListItem>,
    random: Option<Joke>,
) -> Html<String> {
    render(rsx! {
        Document {
            title: TITLE.to_string(),
            JokesLayout {
                user,
                jokes,
                RandomJoke { joke: random }
            }
        }
    })
}

pub fn joke_page(
    user: Option<UserInfo>,
    jokes: Vec<JokeListItem>,
    joke: Joke,
    is_owner: bool,
) -> Html<String> {
    let title = format!("\"{}\" joke", joke.name);
    render(rsx! {
        Document {
            title,
            JokesLayout {
                user,
                jokes,
                JokeDisplay { joke, is_owner }
            }
        }
    })
}

pub fn new_joke_page(
    user: Option<UserInfo>,
    jokes: Vec<JokeListItem>,
    data: Option<NewJokeActionData>,
) -> Html<String> {
    render(rsx! {
        Document {
            title: TITLE.to_string(),
            JokesLayout {
                user,
                jokes,
                NewJoke { data }
            }
        }
    })
}

pub fn login_page(redirect_to: String, data: Option<LoginActionData>) -> Html<String> {
    render(rsx! {
        Document {
            title: "Login".to_string(),
            LoginPage { redirect_to, data }
        }
    })
}

pub fn error_page(status: StatusCode, message: String) -> Html<String> {
    render(rsx! {
        Document {
            title: format!("{} | Jokes", status.as_u16()),
            ErrorPage { status: status.as_u16(), message }
        }
    })
}
