use portfolio_models::contact::{
    ContactMessageContent, ContactSubmission, ProjectReference, SenderEmail,
};
use serde::Deserialize;
use serde_json::value::RawValue;
use thiserror::Error;

/// Request body of the contact form.
///
/// Every field is optional here so that shape problems surface as a rejected
/// submission instead of an extractor error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactSubmission {
    /// Email address of the visitor
    pub email: Option<String>,
    /// Content of the message
    pub message: Option<String>,
    /// Reference to one of the showcased projects, either a string or a number.
    /// Kept unparsed so that a malformed value cannot fail the whole body.
    pub selected_project: Option<Box<RawValue>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidSubmission {
    #[error("missing or invalid email")]
    Email,
    #[error("missing or invalid message")]
    Message,
}

impl TryFrom<ApiContactSubmission> for ContactSubmission {
    type Error = InvalidSubmission;

    fn try_from(value: ApiContactSubmission) -> Result<Self, Self::Error> {
        let sender = value
            .email
            .and_then(|email| SenderEmail::try_new(email).ok())
            .ok_or(InvalidSubmission::Email)?;

        let message = value
            .message
            .and_then(|message| ContactMessageContent::try_new(message).ok())
            .ok_or(InvalidSubmission::Message)?;

        let project = value
            .selected_project
            .and_then(|raw| project_reference(raw.get()));

        Ok(Self {
            sender,
            message,
            project,
        })
    }
}

/// Anything that is not a usable string or number counts as "no project".
fn project_reference(raw: &str) -> Option<ProjectReference> {
    match serde_json::from_str(raw) {
        Ok(serde_json::Value::String(project)) => ProjectReference::try_new(project).ok(),
        Ok(serde_json::Value::Number(project)) => {
            ProjectReference::try_new(project.to_string()).ok()
        }
        Ok(_) => None,
        // numbers outside the f64 range keep their json text
        Err(_) if raw.starts_with(|c: char| c == '-' || c.is_ascii_digit()) => {
            ProjectReference::try_new(raw).ok()
        }
        Err(_) => None,
    }
}
