//! Joke content: the random pick, the detail display, and the create form.

use api::jokes::{JokeFieldErrors, JokeFields, NewJokeActionData};
use api::Joke;
use dioxus::prelude::*;

#[component]
pub fn RandomJoke(#[props(!optional)] joke: Option<Joke>) -> Element {
    rsx! {
        if let Some(joke) = joke {
            div {
                p { "Here's a random joke:" }
                p { "{joke.content}" }
                a { href: "/jokes/{joke.id}", "{joke.name} Permalink" }
            }
        } else {
            div {
                class: "error-container",
                "There are no jokes to display."
            }
        }
    }
}

/// A single joke. Owners also get a delete button posting `intent=delete`.
#[component]
pub fn JokeDisplay(joke: Joke, is_owner: bool) -> Element {
    rsx! {
        div {
            p { "Here's your hilarious joke:" }
            blockquote { "{joke.content}" }
            a { href: "/jokes/{joke.id}", "{joke.name} Permalink" }
            if is_owner {
                form {
                    method: "post",
                    action: "/jokes/{joke.id}",
                    button {
                        class: "button",
                        r#type: "submit",
                        name: "intent",
                        value: "delete",
                        "Delete"
                    }
                }
            }
        }
    }
}

/// The create form, redisplayed with inline errors and the user's input after a rejection.
#[component]
pub fn NewJoke(#[props(!optional)] data: Option<NewJokeActionData>) -> Element {
    let fields: JokeFields = data
        .as_ref()
        .and_then(|d| d.fields.clone())
        .unwrap_or_default();
    let errors: JokeFieldErrors = data
        .as_ref()
        .and_then(|d| d.field_errors.clone())
        .unwrap_or_default();
    let form_error = data.and_then(|d| d.form_error);

    rsx! {
        div {
            p { "Add your own hilarious joke" }
            form {
                method: "post",
                action: "/jokes/new",

                div {
                    label {
                        "Name: "
                        input {
                            r#type: "text",
                            name: "name",
                            value: "{fields.name}",
                            aria_invalid: errors.name.is_some(),
                        }
                    }
                    if let Some(err) = &errors.name {
                        p { class: "form-validation-error", id: "name-error", role: "alert", "{err}" }
                    }
                }

                div {
                    label {
                        "Content: "
                        textarea {
                            name: "content",
                            aria_invalid: errors.content.is_some(),
                            "{fields.content}"
                        }
                    }
                    if let Some(err) = &errors.content {
                        p { class: "form-validation-error", id: "content-error", role: "alert", "{err}" }
                    }
                }

                div {
                    if let Some(err) = form_error {
                        p { class: "form-validation-error", role: "alert", "{err}" }
                    }
                    button { r#type: "submit", class: "button", "Add" }
                }
            }
        }
    }
}
