//! POST /api/ack - the quote-acknowledgement handler
//!
//! One linear pass per invocation: read the body, normalize, resolve the
//! booking reference, dispatch the customer acknowledgement (awaited, its
//! outcome decides the response) and the staff notification (detached by
//! default, failures swallowed).

use ack_core::{
    acknowledgement, staff_notification, AckConfig, AckError, AckOutcome, BookingRef,
    EmailAddress, QuoteFields,
};
use worker::{console_log, Context, Env, Request, Response, Result};

use crate::{cors_response, mailchannels};

pub async fn handle(mut req: Request, env: Env, ctx: Context) -> Result<Response> {
    let config = load_config(&env);

    let user_agent = req
        .headers()
        .get("User-Agent")
        .ok()
        .flatten()
        .unwrap_or_default();

    // fetch and sendBeacon both land here; a malformed or empty body
    // degrades to an empty field set rather than failing the request
    let raw = req.text().await.unwrap_or_default();
    let body: serde_json::Value = serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null);

    let fields = QuoteFields::from_json(&body);
    let reference = BookingRef::resolve(&fields.supplied_ref, &config.ref_prefix);

    // Input error: nothing is dispatched, not even the staff notification
    if !fields.has_email() && config.policy.require_customer_email {
        return error_response(&reference, &AckError::MissingEmail);
    }

    // Primary path: the customer acknowledgement decides the response
    let ack_result: std::result::Result<bool, AckError> = if fields.has_email() {
        let message = acknowledgement(&config, &fields, &reference);
        match mailchannels::send(&message).await {
            Ok(()) => Ok(true),
            Err(err) => Err(err),
        }
    } else {
        Ok(false)
    };

    // Staff notification goes out regardless of the acknowledgement's fate.
    // Detached by default; a failure is logged and never reaches the caller.
    let staff = staff_notification(&config, &fields, &reference, &user_agent);
    if config.policy.await_staff_notification {
        if let Err(err) = mailchannels::send(&staff).await {
            console_log!("Staff notification failed (ignored): {}", err);
        }
    } else {
        ctx.wait_until(async move {
            if let Err(err) = mailchannels::send(&staff).await {
                console_log!("Staff notification failed (ignored): {}", err);
            }
        });
    }

    match ack_result {
        Ok(ack_sent) => {
            console_log!("Quote request acknowledged: ref={}", reference);
            cors_response(Response::from_json(&AckOutcome::sent(
                reference.as_str(),
                ack_sent,
            )))
        }
        Err(err) => error_response(&reference, &err),
    }
}

fn error_response(reference: &BookingRef, err: &AckError) -> Result<Response> {
    console_log!("Ack request failed: ref={} error={}", reference, err);
    let resp = Response::from_json(&AckOutcome::failed(reference.as_str(), err.to_string()))?
        .with_status(err.status_code());
    cors_response(Ok(resp))
}

/// Overlay environment variables onto the built-in configuration.
fn load_config(env: &Env) -> AckConfig {
    let mut config = AckConfig::default();

    if let Ok(v) = env.var("ACK_FROM") {
        config.sender = EmailAddress::named(v.to_string(), config.business_name.clone());
    }
    if let Ok(v) = env.var("BOOKINGS_INBOX") {
        config.bookings_inbox.email = v.to_string();
    }
    if let Ok(v) = env.var("INTERNAL_FALLBACK") {
        config.internal_fallback.email = v.to_string();
    }
    if let Ok(v) = env.var("OWNER_COPY") {
        config.owner_copy = Some(EmailAddress::new(v.to_string()));
    }
    if let Ok(v) = env.var("REF_PREFIX") {
        config.ref_prefix = v.to_string();
    }
    if let Ok(v) = env.var("REQUIRE_CUSTOMER_EMAIL") {
        config.policy.require_customer_email = parse_bool(&v.to_string());
    }
    if let Ok(v) = env.var("AWAIT_STAFF_NOTIFICATION") {
        config.policy.await_staff_notification = parse_bool(&v.to_string());
    }
    if let Ok(v) = env.var("INCLUDE_HTML") {
        config.policy.include_html = parse_bool(&v.to_string());
    }

    config
}

fn parse_bool(value: &str) -> bool {
    value == "true" || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
        assert!(!parse_bool("yes"));
    }
}
