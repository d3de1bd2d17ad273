use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

pub const NAME_MAX_LEN: u64 = 80;
pub const EMAIL_MAX_LEN: u64 = 254;

const REQUIRED_MESSAGE: &str = "This field is required.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub active: bool,
}

impl Comment {
    pub fn paragraphs(&self) -> Vec<&str> {
        super::paragraphs(&self.body)
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Visitor-submitted comment fields. Absent fields decode as empty strings
/// so they surface as validation errors instead of a rejected request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(length(min = 1, max = NAME_MAX_LEN, message = "Ensure this value has at most 80 characters."))]
    pub name: String,

    #[serde(default)]
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = EMAIL_MAX_LEN, message = "Ensure this value has at most 254 characters.")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub body: String,
}

/// Field name → messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    fn push(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_default().push(message);
    }
}

impl CommentForm {
    /// Surrounding whitespace is not part of any field.
    pub fn cleaned(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            body: self.body.trim().to_string(),
        }
    }

    fn field_value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "email" => &self.email,
            "body" => &self.body,
            _ => "",
        }
    }

    /// Runs the field rules. Empty fields report a single "required" message.
    pub fn check(&self) -> Result<(), FormErrors> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let mut form_errors = FormErrors::default();
        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            if self.field_value(&field).is_empty() {
                form_errors.push(&field, REQUIRED_MESSAGE.to_string());
                continue;
            }
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}.", field));
                form_errors.push(&field, message);
            }
        }

        Err(form_errors)
    }

    pub fn into_new_comment(self, post_id: i64) -> NewComment {
        NewComment {
            post_id,
            name: self.name,
            email: self.email,
            body: self.body,
        }
    }
}
