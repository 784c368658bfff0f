//! The payload a rejected form submission sends back.

use serde::Serialize;

/// `{fieldErrors, fields, formError}`: everything a page needs to redisplay a rejected form
/// with inline errors and the user's input intact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData<F, E> {
    pub field_errors: Option<E>,
    pub fields: Option<F>,
    pub form_error: Option<String>,
}

impl<F, E> ActionData<F, E> {
    /// A whole-form failure with nothing to echo back.
    pub fn form_error(message: impl Into<String>) -> Self {
        Self {
            field_errors: None,
            fields: None,
            form_error: Some(message.into()),
        }
    }

    /// A whole-form failure that keeps the submitted values.
    pub fn form_error_with_fields(fields: F, message: impl Into<String>) -> Self {
        Self {
            field_errors: None,
            fields: Some(fields),
            form_error: Some(message.into()),
        }
    }

    /// One or more fields failed validation.
    pub fn field_errors(fields: F, errors: E) -> Self {
        Self {
            field_errors: Some(errors),
            fields: Some(fields),
            form_error: None,
        }
    }
}
