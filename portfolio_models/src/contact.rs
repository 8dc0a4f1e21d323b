use nutype::nutype;

use crate::email_address::EmailAddress;

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub sender: SenderEmail,
    pub message: ContactMessageContent,
    pub project: Option<ProjectReference>,
}

/// The e-mail address the visitor claims to be reachable at.
///
/// This is free-form text and is only checked for presence, it does not have
/// to be a syntactically valid address.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct SenderEmail(String);

impl SenderEmail {
    /// Returns the sender as a mailbox if it happens to be a valid address.
    pub fn to_address(&self) -> Option<EmailAddress> {
        self.as_str().parse().ok()
    }

    pub fn as_str(&self) -> &str {
        self
    }
}

/// The free-text message, relayed exactly as written.
#[nutype(
    validate(predicate = |s| !s.trim().is_empty(), len_char_max = 8192),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

/// Identifies the showcased project an inquiry is about.
///
/// Never resolved against the project catalog. Overlong references are cut
/// down to 256 characters instead of being dropped.
#[nutype(
    sanitize(
        trim,
        with = |s: String| s.chars().take(256).collect::<String>().trim_end().to_owned()
    ),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ProjectReference(String);
