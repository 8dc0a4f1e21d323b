use std::sync::Arc;

use portfolio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use portfolio_email_contracts::{Email, EmailService};
use portfolio_models::{contact::ContactSubmission, email_address::EmailAddressWithName};
use tracing::debug;

pub const CONTACT_EMAIL_SUBJECT: &str = "New Contact Form Submission";

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// The operator's inbox.
    pub recipient: Arc<EmailAddressWithName>,
    pub no_project_placeholder: Arc<str>,
}

impl<EmailS> ContactFeatureServiceImpl<EmailS> {
    pub fn new(email: EmailS, config: ContactFeatureConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let email = compose_email(&self.config, &submission);

        debug!(project = ?submission.project, "relaying contact submission");

        if !self.email.send(email).await? {
            return Err(ContactSendMessageError::Send);
        }

        Ok(())
    }
}

/// Build the email for a contact submission.
///
/// The visitor's address only ever ends up in the body and the `Reply-To`
/// header, the sender identity is fixed by the email service.
pub fn compose_email(config: &ContactFeatureConfig, submission: &ContactSubmission) -> Email {
    let project = submission
        .project
        .as_deref()
        .map(String::as_str)
        .unwrap_or(&*config.no_project_placeholder);

    Email {
        recipient: (*config.recipient).clone(),
        subject: CONTACT_EMAIL_SUBJECT.into(),
        body: format!(
            "{}\n\n{}\n\n{}",
            submission.sender.as_str(),
            submission.message.as_str(),
            project
        ),
        reply_to: submission.sender.to_address().map(Into::into),
    }
}
