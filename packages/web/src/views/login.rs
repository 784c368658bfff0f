//! Combined login and registration page.

use api::auth::{LoginActionData, LoginFieldErrors, LoginFields};
use dioxus::prelude::*;

#[component]
pub fn LoginPage(redirect_to: String, #[props(!optional)] data: Option<LoginActionData>) -> Element {
    let fields: LoginFields = data
        .as_ref()
        .and_then(|d| d.fields.clone())
        .unwrap_or_default();
    let errors: LoginFieldErrors = data
        .as_ref()
        .and_then(|d| d.field_errors.clone())
        .unwrap_or_default();
    let form_error = data.and_then(|d| d.form_error);
    let is_register = fields.login_type == "register";

    rsx! {
        div {
            class: "login-container",
            h1 { "Login" }
            form {
                method: "post",
                action: "/login",

                input { r#type: "hidden", name: "redirectTo", value: "{redirect_to}" }

                fieldset {
                    legend { "Login or Register?" }
                    label {
                        input { r#type: "radio", name: "loginType", value: "login", checked: !is_register }
                        " Login"
                    }
                    label {
                        input { r#type: "radio", name: "loginType", value: "register", checked: is_register }
                        " Register"
                    }
                }

                div {
                    label { r#for: "username-input", "Username" }
                    input {
                        r#type: "text",
                        id: "username-input",
                        name: "username",
                        value: "{fields.username}",
                        aria_invalid: errors.username.is_some(),
                    }
                    if let Some(err) = &errors.username {
                        p { class: "form-validation-error", id: "username-error", role: "alert", "{err}" }
                    }
                }

                div {
                    label { r#for: "password-input", "Password" }
                    input {
                        r#type: "password",
                        id: "password-input",
                        name: "password",
                        aria_invalid: errors.password.is_some(),
                    }
                    if let Some(err) = &errors.password {
                        p { class: "form-validation-error", id: "password-error", role: "alert", "{err}" }
                    }
                }

                if let Some(err) = form_error {
                    p { class: "form-validation-error", role: "alert", "{err}" }
                }

                button { r#type: "submit", class: "button", "Submit" }
            }

            ul {
                li { a { href: "/", "Home" } }
                li { a { href: "/jokes", "Jokes" } }
            }
        }
    }
}
