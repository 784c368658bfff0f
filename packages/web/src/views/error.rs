//! Error boundary content.

use dioxus::prelude::*;

#[component]
pub fn ErrorPage(status: u16, message: String) -> Element {
    rsx! {
        div {
            class: "error-container",
            h1 { "{status}" }
            p { "{message}" }
            a { href: "/jokes", "Back to the jokes" }
        }
    }
}
