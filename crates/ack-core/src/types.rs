//! MailChannels wire types and the handler's response shape
//!
//! The relay accepts a structured message object: recipient groupings under
//! `personalizations`, a `from` identity, optional `reply_to`, custom
//! headers, and one or more `content` bodies. Authentication is implicit -
//! the platform's trusted-sender allowlist and domain DNS do the work, so no
//! API key travels with the payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An address with an optional display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    pub fn named(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

/// Recipient grouping: a `to` list, a `bcc` list, or both
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Personalization {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<EmailAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<EmailAddress>,
}

impl Personalization {
    pub fn to(addresses: Vec<EmailAddress>) -> Self {
        Self {
            to: addresses,
            bcc: vec![],
        }
    }

    pub fn bcc(addresses: Vec<EmailAddress>) -> Self {
        Self {
            to: vec![],
            bcc: addresses,
        }
    }
}

/// A message body part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

impl Content {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            content_type: "text/plain".to_string(),
            value: value.into(),
        }
    }

    pub fn html(value: impl Into<String>) -> Self {
        Self {
            content_type: "text/html".to_string(),
            value: value.into(),
        }
    }
}

/// A complete outbound message for the transactional-send endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailMessage {
    pub personalizations: Vec<Personalization>,
    pub from: EmailAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    pub content: Vec<Content>,
}

impl MailMessage {
    /// Validate the message before submission.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.from.email.is_empty() {
            return Err(ValidationError::MissingField("from"));
        }
        if !is_valid_email(&self.from.email) {
            return Err(ValidationError::InvalidEmail(self.from.email.clone()));
        }

        if self.recipients().next().is_none() {
            return Err(ValidationError::MissingField("personalizations"));
        }
        for address in self.recipients() {
            if !is_valid_email(&address.email) {
                return Err(ValidationError::InvalidEmail(address.email.clone()));
            }
        }

        if self.subject.is_empty() {
            return Err(ValidationError::MissingField("subject"));
        }
        if self.content.is_empty() {
            return Err(ValidationError::MissingContent);
        }

        Ok(())
    }

    /// Every address the relay will deliver to, `to` and `bcc` alike.
    pub fn recipients(&self) -> impl Iterator<Item = &EmailAddress> {
        self.personalizations
            .iter()
            .flat_map(|p| p.to.iter().chain(p.bcc.iter()))
    }
}

/// Validation error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Message must have at least one content body")]
    MissingContent,
}

/// Check if an email address is syntactically valid
fn is_valid_email(email: &str) -> bool {
    email_address::EmailAddress::is_valid(email)
}

/// JSON body returned to the form's client-side script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckOutcome {
    pub ok: bool,

    /// The resolved booking reference, echoed on success and failure alike.
    #[serde(rename = "ref")]
    pub reference: String,

    /// Whether the customer acknowledgement went out. Omitted on failure.
    #[serde(rename = "ackSent", skip_serializing_if = "Option::is_none")]
    pub ack_sent: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckOutcome {
    pub fn sent(reference: &str, ack_sent: bool) -> Self {
        Self {
            ok: true,
            reference: reference.to_string(),
            ack_sent: Some(ack_sent),
            error: None,
        }
    }

    pub fn failed(reference: &str, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            reference: reference.to_string(),
            ack_sent: None,
            error: Some(error.into()),
        }
    }
}
