//! Contact form submission and its field rules.
//!
//! Validation collects every failing field instead of stopping at the first,
//! so the form can show all problems at once. Each field contributes at most
//! one [`FieldError`].

use core::fmt;

use serde::Deserialize;

use super::email::{Email, EmailError};

/// Maximum name length in characters.
pub const NAME_MAX_LENGTH: usize = 100;

/// Minimum useful message length in characters.
pub const MESSAGE_MIN_LENGTH: usize = 10;

/// Maximum message length in characters.
pub const MESSAGE_MAX_LENGTH: usize = 1000;

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    /// Form field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

impl FieldError {
    fn new(field: ContactField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Contact form data as submitted.
///
/// Missing form fields deserialize as empty strings so they surface as
/// "required" violations rather than extractor rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// Validate every field and return all violations.
    ///
    /// An empty result means the submission is acceptable.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        [self.check_name(), self.check_email(), self.check_message()]
            .into_iter()
            .flatten()
            .collect()
    }

    fn check_name(&self) -> Option<FieldError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Some(FieldError::new(ContactField::Name, "Name is required"));
        }
        if name.chars().count() > NAME_MAX_LENGTH {
            return Some(FieldError::new(
                ContactField::Name,
                format!("Name must be at most {NAME_MAX_LENGTH} characters"),
            ));
        }
        None
    }

    fn check_email(&self) -> Option<FieldError> {
        let message = match Email::parse(self.email.trim()) {
            Ok(_) => return None,
            Err(EmailError::Empty) => "Email is required".to_owned(),
            Err(EmailError::TooLong { max }) => {
                format!("Email must be at most {max} characters")
            }
            Err(EmailError::Invalid) => "Please enter a valid email address".to_owned(),
        };
        Some(FieldError::new(ContactField::Email, message))
    }

    fn check_message(&self) -> Option<FieldError> {
        let message = self.message.trim();
        if message.is_empty() {
            return Some(FieldError::new(ContactField::Message, "Message is required"));
        }
        let length = message.chars().count();
        if length < MESSAGE_MIN_LENGTH {
            return Some(FieldError::new(
                ContactField::Message,
                format!("Message must be at least {MESSAGE_MIN_LENGTH} characters"),
            ));
        }
        if length > MESSAGE_MAX_LENGTH {
            return Some(FieldError::new(
                ContactField::Message,
                format!("Message must be at most {MESSAGE_MAX_LENGTH} characters"),
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_MESSAGE: &str = "This is a valid message that meets the minimum length requirement";

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        }
    }

    fn failing_fields(form: &ContactSubmission) -> Vec<ContactField> {
        form.validate().into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_submission_has_no_errors() {
        let form = submission("John Doe", "john@example.com", VALID_MESSAGE);
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_single_field_failures() {
        let long_email = format!("{}@example.com", "a".repeat(250));
        let long_name = "a".repeat(101);
        let long_message = "a".repeat(1001);

        let cases = [
            (submission("", "john@example.com", VALID_MESSAGE), ContactField::Name),
            (submission("   ", "john@example.com", VALID_MESSAGE), ContactField::Name),
            (submission(&long_name, "john@example.com", VALID_MESSAGE), ContactField::Name),
            (submission("John Doe", "", VALID_MESSAGE), ContactField::Email),
            (submission("John Doe", "not-an-email", VALID_MESSAGE), ContactField::Email),
            (submission("John Doe", &long_email, VALID_MESSAGE), ContactField::Email),
            (
                submission("John Doe", "test..test@example.com", VALID_MESSAGE),
                ContactField::Email,
            ),
            (submission("John Doe", "john@example.com", ""), ContactField::Message),
            (submission("John Doe", "john@example.com", "short"), ContactField::Message),
            (submission("John Doe", "john@example.com", &long_message), ContactField::Message),
        ];

        for (form, field) in cases {
            assert_eq!(failing_fields(&form), vec![field], "form: {form:?}");
        }
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let form = submission("", "invalid-email", "short");
        assert_eq!(
            failing_fields(&form),
            vec![ContactField::Name, ContactField::Email, ContactField::Message]
        );
    }

    #[test]
    fn test_boundary_lengths_are_accepted() {
        let form = submission(&"a".repeat(100), "john@example.com", &"m".repeat(10));
        assert!(form.validate().is_empty());

        let form = submission("John Doe", "john@example.com", &"m".repeat(1000));
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        // 100 two-byte characters is still within the name limit
        let form = submission(&"é".repeat(100), "john@example.com", VALID_MESSAGE);
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_whitespace_padding_does_not_count_towards_message() {
        let form = submission("John Doe", "john@example.com", "   short    ");
        assert_eq!(failing_fields(&form), vec![ContactField::Message]);
    }

    #[test]
    fn test_email_is_trimmed_before_checking() {
        let form = submission("John Doe", "  john@example.com ", VALID_MESSAGE);
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_error_display_names_field() {
        let errors = submission("", "john@example.com", VALID_MESSAGE).validate();
        assert_eq!(errors.len(), 1);
        assert!(errors.iter().all(|e| e.to_string().starts_with("name: ")));
    }
}
