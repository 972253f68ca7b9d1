//! Quote-acknowledgement core - input normalization and email composition
//!
//! This crate holds the platform-independent half of the quote-request
//! acknowledgement service: it turns an untrusted form submission into a
//! fixed, normalized record, resolves a booking reference, and composes the
//! two outbound messages for the MailChannels transactional-send API:
//!
//! 1. **Customer acknowledgement** - addressed to the customer, BCC'd to the
//!    internal inbox so staff see every acknowledgement that goes out.
//! 2. **Staff notification** - addressed to the bookings inbox, carrying the
//!    full raw submission (including contact details and the client's
//!    user-agent) for triage.
//!
//! The HTTP surface and the actual relay calls live in the `ack-worker` app;
//! everything here is pure and unit-testable on the host.

pub mod compose;
pub mod error;
pub mod quote;
pub mod types;

pub use compose::{acknowledgement, escape_html, staff_notification};
pub use error::AckError;
pub use quote::{BookingRef, QuoteFields};
pub use types::{
    AckOutcome, Content, EmailAddress, MailMessage, Personalization, ValidationError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Routing and identity configuration for the acknowledgement handler
#[derive(Debug, Clone)]
pub struct AckConfig {
    /// Fixed domain-aligned sender. Never used as reply-to.
    pub sender: EmailAddress,

    /// The business's booking inbox: reply-to on acknowledgements, primary
    /// recipient of staff notifications.
    pub bookings_inbox: EmailAddress,

    /// Internal mailbox BCC'd on every acknowledgement.
    pub internal_fallback: EmailAddress,

    /// Optional owner address copied on staff notifications.
    pub owner_copy: Option<EmailAddress>,

    /// Booking-reference prefix (e.g. "OET" -> "OET-20240501-0900-1234").
    pub ref_prefix: String,

    /// Display name used in email copy.
    pub business_name: String,

    /// Phone number quoted in the acknowledgement body.
    pub business_phone: String,

    /// How the two messages are dispatched.
    pub policy: DispatchPolicy,
}

/// Dispatch policy knobs the handler drafts disagreed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Reject submissions without a customer email (400) instead of silently
    /// skipping the acknowledgement.
    pub require_customer_email: bool,

    /// Await the staff notification instead of detaching it. Its failure
    /// never affects the response either way.
    pub await_staff_notification: bool,

    /// Attach an HTML alternative to the acknowledgement's plain-text body.
    pub include_html: bool,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            require_customer_email: true,
            await_staff_notification: false,
            include_html: true,
        }
    }
}

impl Default for AckConfig {
    fn default() -> Self {
        Self {
            sender: EmailAddress::named(
                "ack@oxfordexecutivetravel.co.uk",
                "Oxford Executive Travel",
            ),
            bookings_inbox: EmailAddress::named(
                "bookings@oxfordexecutivetravel.co.uk",
                "Bookings — Oxford Executive Travel",
            ),
            internal_fallback: EmailAddress::named(
                "oxfordexecutivetravel1283@gmail.com",
                "OET Internal",
            ),
            owner_copy: None,
            ref_prefix: "OET".to_string(),
            business_name: "Oxford Executive Travel".to_string(),
            business_phone: "+44 7344 145197".to_string(),
            policy: DispatchPolicy::default(),
        }
    }
}
