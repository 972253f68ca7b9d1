//! Acknowledgement and staff-notification construction
//!
//! Two messages per submission: the customer-facing acknowledgement (only
//! when the form carried an email address) and the internal staff
//! notification (always). Both reference the same booking code so staff can
//! correlate them in the inbox.

use crate::quote::{or_dash, BookingRef, QuoteFields};
use crate::types::{Content, EmailAddress, MailMessage, Personalization};
use crate::AckConfig;

/// Escape a raw string for interpolation into HTML bodies.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the customer acknowledgement.
///
/// Addressed to the customer with the internal mailbox on a BCC grouping,
/// reply-to pointed at the bookings inbox (never the sending address, which
/// exists only for deliverability alignment), and auto-reply headers so
/// mailbox providers recognize the message as an automatic acknowledgement.
pub fn acknowledgement(
    config: &AckConfig,
    fields: &QuoteFields,
    reference: &BookingRef,
) -> MailMessage {
    let subject = format!(
        "Thanks {} — we’ve received your quote request (Ref {})",
        fields.name, reference
    );

    let text = format!(
        "Hello {name},\n\
         \n\
         Thanks for getting in touch with {business} — your quote request has been received.\n\
         \n\
         Request details (Ref {reference})\n\
         • Pickup:   {pickup}\n\
         • Drop-off: {dropoff}\n\
         • Date:     {date}   Time: {time}\n\
         • Passengers: {pax}  Luggage: {bags}\n\
         • Vehicle:  {vehicle}\n\
         • Notes:    {notes}\n\
         \n\
         What happens next\n\
         • We’ll review your request and reply with a fixed written quote shortly.\n\
         • For anything urgent, you can WhatsApp or call us on {phone}.\n\
         \n\
         Kind regards,\n\
         {business}\n\
         {bookings} • {phone}\n",
        name = fields.name,
        business = config.business_name,
        reference = reference,
        pickup = or_dash(&fields.pickup),
        dropoff = or_dash(&fields.dropoff),
        date = or_dash(&fields.date),
        time = or_dash(&fields.time),
        pax = or_dash(&fields.pax),
        bags = or_dash(&fields.bags),
        vehicle = or_dash(&fields.vehicle),
        notes = or_dash(&fields.notes),
        phone = config.business_phone,
        bookings = config.bookings_inbox.email,
    );

    let mut content = vec![Content::plain(text)];
    if config.policy.include_html {
        content.push(Content::html(acknowledgement_html(config, fields, reference)));
    }

    let mut message = MailMessage {
        personalizations: vec![
            Personalization::to(vec![EmailAddress::named(
                fields.email.as_str(),
                fields.name.as_str(),
            )]),
            // Copy every acknowledgement to the internal mailbox
            Personalization::bcc(vec![config.internal_fallback.clone()]),
        ],
        from: config.sender.clone(),
        reply_to: Some(config.bookings_inbox.clone()),
        subject,
        headers: Default::default(),
        content,
    };

    // Auto-reply markers and the correlation header
    message
        .headers
        .insert("Auto-Submitted".to_string(), "auto-replied".to_string());
    message
        .headers
        .insert("Precedence".to_string(), "auto_reply".to_string());
    message
        .headers
        .insert("X-Ack-Ref".to_string(), reference.to_string());
    message.headers.insert(
        "List-Unsubscribe".to_string(),
        format!(
            "<mailto:{}?subject=unsubscribe>",
            config.bookings_inbox.email
        ),
    );

    message
}

/// HTML alternative for the acknowledgement. Every field interpolation is
/// escaped; the plain-text part remains the canonical body.
fn acknowledgement_html(
    config: &AckConfig,
    fields: &QuoteFields,
    reference: &BookingRef,
) -> String {
    let row = |label: &str, value: &str| {
        format!(
            "<tr>\
             <td style=\"padding: 6px 12px 6px 0; color: #6b7280; font-size: 14px;\">{}</td>\
             <td style=\"padding: 6px 0; color: #111827; font-size: 14px;\">{}</td>\
             </tr>",
            label,
            escape_html(or_dash(value))
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h1 style="color: #333; font-size: 24px;">Your quote request has been received</h1>

  <p style="color: #666; font-size: 16px; line-height: 1.5;">Hello {name},</p>

  <p style="color: #666; font-size: 16px; line-height: 1.5;">
    Thanks for getting in touch with {business}. Here is what we received
    (Ref <strong>{reference}</strong>):
  </p>

  <table style="border-collapse: collapse; margin: 20px 0;">
    {rows}
  </table>

  <p style="color: #666; font-size: 16px; line-height: 1.5;">
    We&#39;ll review your request and reply with a fixed written quote shortly.
    For anything urgent, you can WhatsApp or call us on {phone}.
  </p>

  <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">

  <p style="color: #999; font-size: 12px;">
    {business}<br>
    {bookings} • {phone}
  </p>
</body>
</html>"#,
        name = escape_html(&fields.name),
        business = escape_html(&config.business_name),
        reference = escape_html(reference.as_str()),
        rows = [
            row("Pickup", &fields.pickup),
            row("Drop-off", &fields.dropoff),
            row("Date", &fields.date),
            row("Time", &fields.time),
            row("Passengers", &fields.pax),
            row("Luggage", &fields.bags),
            row("Vehicle", &fields.vehicle),
            row("Notes", &fields.notes),
        ]
        .join("\n    "),
        phone = escape_html(&config.business_phone),
        bookings = escape_html(&config.bookings_inbox.email),
    )
}

/// Build the internal staff notification.
///
/// Sent regardless of whether the customer left an email address. Carries
/// the full raw submission - including the phone number and the client's
/// user-agent, which the customer-facing message omits - and sets reply-to
/// to the customer so staff can answer straight from their mail client.
pub fn staff_notification(
    config: &AckConfig,
    fields: &QuoteFields,
    reference: &BookingRef,
    user_agent: &str,
) -> MailMessage {
    let subject = format!(
        "New quote request {}: {} -> {}",
        reference,
        or_dash(&fields.pickup),
        or_dash(&fields.dropoff)
    );

    let text = format!(
        "New quote request (Ref {reference})\n\
         \n\
         Name:       {name}\n\
         Email:      {email}\n\
         Phone:      {phone}\n\
         Pickup:     {pickup}\n\
         Drop-off:   {dropoff}\n\
         Date:       {date}\n\
         Time:       {time}\n\
         Passengers: {pax}\n\
         Luggage:    {bags}\n\
         Vehicle:    {vehicle}\n\
         Notes:      {notes}\n\
         \n\
         User-Agent: {user_agent}\n",
        reference = reference,
        name = fields.name,
        email = or_dash(&fields.email),
        phone = or_dash(&fields.phone),
        pickup = or_dash(&fields.pickup),
        dropoff = or_dash(&fields.dropoff),
        date = or_dash(&fields.date),
        time = or_dash(&fields.time),
        pax = or_dash(&fields.pax),
        bags = or_dash(&fields.bags),
        vehicle = or_dash(&fields.vehicle),
        notes = or_dash(&fields.notes),
        user_agent = or_dash(user_agent),
    );

    let mut to = vec![config.bookings_inbox.clone()];
    if let Some(owner) = &config.owner_copy {
        to.push(owner.clone());
    }

    // Reply-to the customer when we have an address, so a plain reply from
    // the inbox reaches them; otherwise fall back to the bookings inbox.
    let reply_to = if fields.has_email() {
        EmailAddress::named(fields.email.as_str(), fields.name.as_str())
    } else {
        config.bookings_inbox.clone()
    };

    let mut message = MailMessage {
        personalizations: vec![Personalization::to(to)],
        from: config.sender.clone(),
        reply_to: Some(reply_to),
        subject,
        headers: Default::default(),
        content: vec![Content::plain(text)],
    };
    message
        .headers
        .insert("X-Ack-Ref".to_string(), reference.to_string());

    message
}
