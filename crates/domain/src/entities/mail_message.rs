//! Mail events delivered by the host application

use serde::{Deserialize, Serialize};

use crate::value_objects::strip_noncharacters;

/// A mailbox as it appears in a message header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailAddress {
    label: Option<String>,
    email: String,
}

impl MailAddress {
    /// Create an address from a bare email
    pub fn new(email: impl AsRef<str>) -> Self {
        Self {
            label: None,
            email: Self::clean(email.as_ref()),
        }
    }

    /// Create an address from a display label and an email
    ///
    /// A label equal to the email is treated as absent.
    pub fn from_raw(label: impl AsRef<str>, email: impl AsRef<str>) -> Self {
        let email = Self::clean(email.as_ref());
        let label = label.as_ref().trim();
        let label = (!label.is_empty() && label != email).then(|| label.to_string());
        Self { label, email }
    }

    fn clean(raw: &str) -> String {
        strip_noncharacters(raw).trim().to_string()
    }

    /// Display label, falling back to the email
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.email)
    }

    /// Bare email address (may be empty for malformed headers)
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether the header carried a usable email
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

/// An inbound message after the host parsed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReceived {
    /// `From` header mailboxes, in header order
    pub from: Vec<MailAddress>,
    /// Subject line
    pub subject: String,
}

impl MessageReceived {
    /// Create a received message
    pub fn new(from: Vec<MailAddress>, subject: impl Into<String>) -> Self {
        Self {
            from,
            subject: subject.into(),
        }
    }

    /// The first sender with a usable email
    pub fn sender(&self) -> Option<&MailAddress> {
        self.from.iter().find(|address| address.has_email())
    }

    /// Notes recorded in the contact history
    pub fn history_notes(&self) -> String {
        format!("Subject: {}", self.subject)
    }
}

/// An outbound message as handed to the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSent {
    /// `To` header mailboxes, in header order
    pub to: Vec<MailAddress>,
    /// Subject line
    pub subject: String,
    /// Message body
    pub body: String,
}

impl MessageSent {
    /// Create a sent message
    pub fn new(to: Vec<MailAddress>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to,
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Notes recorded in the contact history
    pub fn history_notes(&self) -> String {
        format!("Subject: {} Body: {}", self.subject, self.body)
    }
}
