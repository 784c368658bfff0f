//! Validation of the new-joke form.

use serde::{Deserialize, Serialize};

use crate::form::ActionData;

pub const FORM_NOT_SUBMITTED: &str = "Form not submitted correctly.";

const MIN_NAME_LEN: usize = 3;
const MIN_CONTENT_LEN: usize = 10;

/// Raw form body. Missing fields stay `None` so they can be told apart from empty ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewJokeForm {
    pub name: Option<String>,
    pub content: Option<String>,
}

/// Submitted values, echoed back when validation fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeFields {
    pub name: String,
    pub content: String,
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JokeFieldErrors {
    pub name: Option<String>,
    pub content: Option<String>,
}

impl JokeFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none()
    }
}

pub type NewJokeActionData = ActionData<JokeFields, JokeFieldErrors>;

fn validate_name(name: &str) -> Option<String> {
    (name.chars().count() < MIN_NAME_LEN).then(|| "That joke's name is too short".to_string())
}

fn validate_content(content: &str) -> Option<String> {
    (content.chars().count() < MIN_CONTENT_LEN).then(|| "That joke is too short".to_string())
}

impl NewJokeForm {
    /// Check every field and collect all failures before giving up.
    pub fn validate(self) -> Result<JokeFields, NewJokeActionData> {
        let (Some(name), Some(content)) = (self.name, self.content) else {
            return Err(ActionData::form_error(FORM_NOT_SUBMITTED));
        };

        let errors = JokeFieldErrors {
            name: validate_name(&name),
            content: validate_content(&content),
        };
        let fields = JokeFields { name, content };

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(ActionData::field_errors(fields, errors))
        }
    }
}
