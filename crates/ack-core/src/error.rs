//! Error taxonomy for the acknowledgement handler

use crate::types::ValidationError;

/// Failures the handler can surface to the caller.
///
/// Staff-notification failures never appear here: the dispatch layer absorbs
/// them, so only the primary (customer) path can fail the request.
#[derive(Debug, thiserror::Error)]
pub enum AckError {
    /// The submission carried no customer email and policy requires one.
    /// No dispatch is attempted.
    #[error("Missing customer email")]
    MissingEmail,

    #[error("Invalid message: {0}")]
    Validation(#[from] ValidationError),

    /// The relay rejected or failed the primary message.
    #[error("MailChannels error: {detail}")]
    Relay { status: u16, detail: String },

    #[error("Payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

impl AckError {
    /// HTTP status for the failure class: client error for bad input,
    /// 502 for relay failures, 500 for everything unexpected.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingEmail | Self::Validation(_) => 400,
            Self::Relay { .. } => 502,
            Self::Payload(_) | Self::Internal(_) => 500,
        }
    }
}
