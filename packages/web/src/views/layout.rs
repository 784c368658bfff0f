//! Document shell and the jokes layout with its sidebar list.

use api::{JokeListItem, UserInfo};
use dioxus::prelude::*;

/// Head and body of every page. [`render`](super::render) wraps them in `<html>`.
#[component]
pub fn Document(title: String, children: Element) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width,initial-scale=1" }
            title { "{title}" }
            style {
                r#"
                body {{
                    margin: 0;
                    font-family: -apple-system, BlinkMacSystemFont, Helvetica, Arial, sans-serif;
                    color: #37352f;
                    background: #ffffff;
                }}
                nav {{ padding: 0.75rem 1.5rem; border-bottom: 1px solid #e9e9e7; }}
                .jokes-header {{ display: flex; justify-content: space-between; align-items: center; padding: 1rem 1.5rem; }}
                .jokes-main {{ display: flex; gap: 2rem; padding: 1rem 1.5rem; }}
                .jokes-list {{ min-width: 16rem; }}
                .button {{ padding: 0.375rem 1rem; border: none; border-radius: 4px; background: #2383e2; color: white; cursor: pointer; text-decoration: none; }}
                .form-validation-error {{ margin: 0.25rem 0; color: #e03e3e; font-size: 0.8125rem; }}
                .error-container {{ padding: 1rem; border-radius: 4px; background: #fdebec; color: #e03e3e; }}
                "#
            }
        }
        body {
            nav {
                a { href: "/jokes", "Jokes" }
            }
            {children}
        }
    }
}

/// Header with the current user, the list of jokes, and the page content beside it.
#[component]
pub fn JokesLayout(
    #[props(!optional)] user: Option<UserInfo>,
    jokes: Vec<JokeListItem>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "jokes-layout",

            header {
                class: "jokes-header",
                h1 {
                    a { href: "/", "J🤪KES" }
                }
                if let Some(user) = user {
                    div {
                        class: "user-info",
                        span { "Hi {user.username}" }
                        form {
                            action: "/logout",
                            method: "post",
                            button { r#type: "submit", class: "button", "Logout" }
                        }
                    }
                } else {
                    a { href: "/login", "Login" }
                }
            }

            main {
                class: "jokes-main",
                div {
                    class: "jokes-list",
                    a { href: "/jokes", "Get a random joke" }
                    p { "Here are a few more jokes to check out:" }
                    ul {
                        for joke in jokes {
                            li {
                                key: "{joke.id}",
                                a { href: "/jokes/{joke.id}", "{joke.name}" }
                            }
                        }
                    }
                    a { href: "/jokes/new", class: "button", "Add your own" }
                }
                div {
                    class: "jokes-outlet",
                    {children}
                }
            }
        }
    }
}
