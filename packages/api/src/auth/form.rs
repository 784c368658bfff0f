//! The combined login/registration form.

use serde::{Deserialize, Serialize};

use crate::form::ActionData;

pub const DEFAULT_REDIRECT: &str = "/jokes";

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

/// Raw form body posted to `/login`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub login_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub redirect_to: Option<String>,
}

/// Values echoed back into the form after a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginFields {
    pub login_type: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginFieldErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub type LoginActionData = ActionData<LoginFields, LoginFieldErrors>;

/// Which button the user meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginType {
    Login,
    Register,
    Other(String),
}

impl From<&str> for LoginType {
    fn from(value: &str) -> Self {
        match value {
            "login" => LoginType::Login,
            "register" => LoginType::Register,
            other => LoginType::Other(other.to_string()),
        }
    }
}

/// A login form that passed validation.
#[derive(Debug, Clone)]
pub struct ValidLogin {
    pub login_type: LoginType,
    pub fields: LoginFields,
    pub redirect_to: String,
}

/// Only same-site paths are allowed as post-login destinations.
///
/// Browsers read `\` as `/`, so `/\host` is as off-site as `//host`. Anything outside
/// visible ASCII cannot go into a `Location` header at all.
pub fn safe_redirect(to: Option<&str>) -> String {
    match to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && path.bytes().all(|b| b.is_ascii_graphic()) =>
        {
            path.to_string()
        }
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

impl LoginForm {
    pub fn validate(self) -> Result<ValidLogin, LoginActionData> {
        let (Some(login_type), Some(username), Some(password), Some(redirect_to)) =
            (self.login_type, self.username, self.password, self.redirect_to)
        else {
            return Err(ActionData::form_error(
                crate::jokes::FORM_NOT_SUBMITTED,
            ));
        };

        let errors = LoginFieldErrors {
            username: (username.chars().count() < MIN_USERNAME_LEN)
                .then(|| "Usernames must be at least 3 characters long".to_string()),
            password: (password.chars().count() < MIN_PASSWORD_LEN)
                .then(|| "Passwords must be at least 6 characters long".to_string()),
        };
        let fields = LoginFields {
            login_type,
            username,
            password,
        };

        if errors.username.is_some() || errors.password.is_some() {
            return Err(ActionData::field_errors(fields, errors));
        }

        Ok(ValidLogin {
            login_type: LoginType::from(fields.login_type.as_str()),
            redirect_to: safe_redirect(Some(&redirect_to)),
            fields,
        })
    }
}
