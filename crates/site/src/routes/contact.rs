//! Contact form route handlers.

use askama::Template;
use axum::{
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use devrewoh_core::{ContactField, ContactSubmission, FieldError};
use serde::Deserialize;
use tracing::instrument;

use super::{LimitedForm, render};
use crate::error::Result;
use crate::filters;

/// Contact page template.
#[derive(Template, Default)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub sent: bool,
    pub name: String,
    pub email: String,
    pub message: String,
    pub name_error: Option<String>,
    pub email_error: Option<String>,
    pub message_error: Option<String>,
}

impl ContactTemplate {
    /// Re-render a rejected submission with its values and errors.
    fn with_errors(submission: ContactSubmission, errors: &[FieldError]) -> Self {
        let error_for = |field: ContactField| {
            errors
                .iter()
                .find(|e| e.field == field)
                .map(|e| e.message.clone())
        };

        Self {
            sent: false,
            name_error: error_for(ContactField::Name),
            email_error: error_for(ContactField::Email),
            message_error: error_for(ContactField::Message),
            name: submission.name,
            email: submission.email,
            message: submission.message,
        }
    }
}

/// Query parameters for the contact page.
#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    sent: Option<String>,
}

/// Display the contact form.
#[instrument(skip(query))]
pub async fn show(Query(query): Query<ContactQuery>) -> Result<Html<String>> {
    let template = ContactTemplate {
        sent: query.sent.as_deref() == Some("true"),
        ..ContactTemplate::default()
    };
    render(&template, "contact")
}

/// Handle a contact form submission.
///
/// Invalid submissions get a 400 with the form re-rendered; valid ones
/// redirect to the confirmation banner.
#[instrument(skip_all)]
pub async fn submit(LimitedForm(submission): LimitedForm<ContactSubmission>) -> Result<Response> {
    let errors = submission.validate();

    if !errors.is_empty() {
        tracing::debug!(error_count = errors.len(), "Contact submission rejected");
        let page = render(&ContactTemplate::with_errors(submission, &errors), "contact")?;
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    tracing::info!(
        name = %submission.name.trim(),
        email = %submission.email.trim(),
        message_length = submission.message.trim().chars().count(),
        "Contact form submitted"
    );

    Ok(Redirect::to("/contact?sent=true").into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_form_echoes_values_and_errors() {
        let submission = ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@".to_string(),
            message: "short".to_string(),
        };
        let errors = submission.validate();
        let html = ContactTemplate::with_errors(submission, &errors)
            .render()
            .unwrap();

        assert!(html.contains("value=\"Ada\""));
        assert!(html.contains("Please enter a valid email address"));
        assert!(html.contains("short"));
        assert!(!html.contains("Thanks for reaching out"));
    }

    #[test]
    fn test_user_input_is_escaped() {
        let submission = ContactSubmission {
            name: "<script>alert(1)</script>".to_string(),
            email: String::new(),
            message: String::new(),
        };
        let errors = submission.validate();
        let html = ContactTemplate::with_errors(submission, &errors)
            .render()
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&#60;script&#62;") || html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_sent_banner() {
        let html = ContactTemplate {
            sent: true,
            ..ContactTemplate::default()
        }
        .render()
        .unwrap();
        assert!(html.contains("Thanks for reaching out"));
    }
}
