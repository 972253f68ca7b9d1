//! MailChannels transactional-send client
//!
//! One HTTP POST per message. No API key travels with the payload: the
//! platform's trusted-sender allowlist and the domain's DNS records
//! authenticate the send. No retry, no queuing - a failed dispatch is
//! terminal for this invocation.

use ack_core::{AckError, MailMessage};
use worker::{console_log, Fetch, Headers, Method, Request, RequestInit};

/// MailChannels transactional-send endpoint
const MAILCHANNELS_API_URL: &str = "https://api.mailchannels.net/tx/v1/send";

/// Submit a message to the relay.
pub async fn send(message: &MailMessage) -> Result<(), AckError> {
    message.validate()?;

    let payload = serde_json::to_string(message)?;

    let headers = Headers::new();
    headers.set("Content-Type", "application/json").map_err(internal)?;

    let mut init = RequestInit::new();
    init.with_method(Method::Post)
        .with_headers(headers)
        .with_body(Some(payload.into()));

    let request = Request::new_with_init(MAILCHANNELS_API_URL, &init).map_err(internal)?;

    console_log!(
        "Dispatching via MailChannels: subject={:?} recipients={}",
        message.subject,
        message.recipients().count()
    );

    match Fetch::Request(request).send().await {
        Ok(mut response) => {
            let status = response.status_code();
            if (200..300).contains(&status) {
                Ok(())
            } else {
                let error_text = response.text().await.unwrap_or_default();
                console_log!("MailChannels error ({}): {}", status, error_text);
                Err(AckError::Relay {
                    status,
                    detail: relay_detail(status, &error_text),
                })
            }
        }
        Err(e) => {
            console_log!("MailChannels request failed: {}", e);
            Err(AckError::Relay {
                status: 0,
                detail: "Failed to connect to email service.".to_string(),
            })
        }
    }
}

/// User-facing detail for a relay rejection, echoing the relay's error text
/// where it is meaningful.
fn relay_detail(status: u16, error_text: &str) -> String {
    match status {
        401 | 403 => "Email service rejected the sender.".to_string(),
        413 => "Email payload too large.".to_string(),
        429 => "Email rate limit exceeded. Please try again later.".to_string(),
        _ if error_text.is_empty() => format!("HTTP {}", status),
        _ => format!("HTTP {}: {}", status, error_text),
    }
}

fn internal(e: worker::Error) -> AckError {
    AckError::Internal(e.to_string())
}
