use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// Payload sent to the contact e-mail function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

/// Inline error shown beneath a contact form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: ContactField,
    pub message: &'static str,
}

/// Same acceptance as the site's form schema. Its look-aheads (no leading dot, no `..`) are
/// checked in [`is_valid_email`] since `regex` has no look-around.
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+-]@(?:[A-Z0-9][A-Z0-9-]*\.)+[A-Z]{2,}$")
            .expect("email pattern compiles")
    })
}

pub fn is_valid_email(candidate: &str) -> bool {
    !candidate.starts_with('.')
        && !candidate.contains("..")
        && email_pattern().is_match(candidate)
}

/// Raw contact form input as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactInput {
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    /// Trims every field and checks it against the form's limits. Every failing field is
    /// reported, in form order.
    pub fn validate(&self) -> Result<ContactMessage, Vec<FieldError>> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();
        let mut errors = Vec::new();

        if name.is_empty() {
            errors.push(FieldError {
                field: ContactField::Name,
                message: "กรุณากรอกชื่อ",
            });
        } else if name.chars().count() > NAME_MAX_CHARS {
            errors.push(FieldError {
                field: ContactField::Name,
                message: "ชื่อต้องไม่เกิน 100 ตัวอักษร",
            });
        }

        if !is_valid_email(email) {
            errors.push(FieldError {
                field: ContactField::Email,
                message: "กรุณากรอกอีเมลที่ถูกต้อง",
            });
        } else if email.chars().count() > EMAIL_MAX_CHARS {
            errors.push(FieldError {
                field: ContactField::Email,
                message: "อีเมลต้องไม่เกิน 255 ตัวอักษร",
            });
        }

        if message.is_empty() {
            errors.push(FieldError {
                field: ContactField::Message,
                message: "กรุณากรอกข้อความ",
            });
        } else if message.chars().count() > MESSAGE_MAX_CHARS {
            errors.push(FieldError {
                field: ContactField::Message,
                message: "ข้อความต้องไม่เกิน 1000 ตัวอักษร",
            });
        }

        if errors.is_empty() {
            Ok(ContactMessage {
                name: name.to_string(),
                email: email.to_string(),
                message: message.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}
