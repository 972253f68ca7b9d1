//! Quote-request normalization and booking references
//!
//! Form submissions arrive as arbitrary JSON (fetch and sendBeacon both
//! post here). Every recognized field is coerced to a trimmed string once,
//! up front, so the composers never repeat fallback logic.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Display name substituted when the form omits one.
pub const DEFAULT_NAME: &str = "Customer";

/// A quote submission after normalization.
///
/// Empty string means "not provided"; the `"-"` display placeholder is
/// applied at render time only, never stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub pickup: String,
    pub dropoff: String,
    pub date: String,
    pub time: String,
    pub pax: String,
    pub bags: String,
    pub vehicle: String,
    pub notes: String,
    /// Client-supplied reference, empty when absent. Resolved through
    /// [`BookingRef::resolve`].
    pub supplied_ref: String,
}

impl QuoteFields {
    /// Normalize an untrusted JSON body.
    ///
    /// Non-object bodies (including `null` from a malformed payload) produce
    /// an all-empty record rather than an error.
    pub fn from_json(body: &Value) -> Self {
        let mut fields = Self {
            name: coerce(body, "name"),
            email: coerce(body, "email"),
            phone: coerce(body, "phone"),
            pickup: coerce(body, "pickup"),
            dropoff: coerce(body, "dropoff"),
            date: coerce(body, "date"),
            time: coerce(body, "time"),
            pax: coerce(body, "pax"),
            bags: coerce(body, "bags"),
            vehicle: coerce(body, "vehicle"),
            notes: coerce(body, "notes"),
            supplied_ref: coerce(body, "ref"),
        };
        if fields.name.is_empty() {
            fields.name = DEFAULT_NAME.to_string();
        }
        fields
    }

    /// Whether the submission carried a customer email address.
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

/// Read `key` from the body and coerce it to a trimmed string.
///
/// Numbers and booleans take their canonical display form (a `pax` of `4`
/// becomes `"4"`); null, arrays, objects and absent keys become empty.
fn coerce(body: &Value, key: &str) -> String {
    match body.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Render-time placeholder for empty fields.
pub fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Booking reference: the correlation key between the response, the customer
/// acknowledgement and the staff notification.
///
/// Generated form is `PREFIX-YYYYMMDD-HHMM-NNNN` with a random 4-digit
/// suffix; a non-empty client-supplied value always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRef(String);

impl BookingRef {
    /// Override semantics: keep the client's value when non-empty, else
    /// generate a fresh one.
    pub fn resolve(supplied: &str, prefix: &str) -> Self {
        if supplied.is_empty() {
            Self::generate(prefix)
        } else {
            Self(supplied.to_string())
        }
    }

    /// Generate a reference from the current UTC time.
    pub fn generate(prefix: &str) -> Self {
        Self::generate_at(prefix, Utc::now(), random_suffix())
    }

    /// Deterministic form of [`BookingRef::generate`]. The suffix is folded
    /// into `1000..=9999`.
    pub fn generate_at(prefix: &str, at: DateTime<Utc>, suffix: u16) -> Self {
        let suffix = 1000 + suffix % 9000;
        Self(format!("{}-{}-{}", prefix, at.format("%Y%m%d-%H%M"), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn random_suffix() -> u16 {
    let bytes = uuid::Uuid::new_v4().into_bytes();
    u16::from_be_bytes([bytes[0], bytes[1]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_normalizes_and_trims_fields() {
        let body = json!({
            "name": "  Jo  ",
            "email": " a@b.com ",
            "pickup": "Oxford",
            "pax": 4,
            "notes": null,
        });

        let fields = QuoteFields::from_json(&body);
        assert_eq!(fields.name, "Jo");
        assert_eq!(fields.email, "a@b.com");
        assert_eq!(fields.pickup, "Oxford");
        assert_eq!(fields.pax, "4");
        assert_eq!(fields.notes, "");
        assert_eq!(fields.dropoff, "");
    }

    #[test]
    fn test_name_defaults_to_placeholder() {
        let fields = QuoteFields::from_json(&json!({ "email": "a@b.com" }));
        assert_eq!(fields.name, DEFAULT_NAME);

        let fields = QuoteFields::from_json(&json!({ "name": "   " }));
        assert_eq!(fields.name, DEFAULT_NAME);
    }

    #[test]
    fn test_non_object_body_degrades_to_empty() {
        for body in [Value::Null, json!("not-json"), json!([1, 2, 3]), json!(42)] {
            let fields = QuoteFields::from_json(&body);
            assert_eq!(fields.email, "");
            assert_eq!(fields.supplied_ref, "");
            assert_eq!(fields.name, DEFAULT_NAME);
            assert!(!fields.has_email());
        }
    }

    #[test]
    fn test_non_scalar_field_values_become_empty() {
        let body = json!({ "pickup": ["Oxford"], "vehicle": { "class": "S" }, "bags": true });
        let fields = QuoteFields::from_json(&body);
        assert_eq!(fields.pickup, "");
        assert_eq!(fields.vehicle, "");
        assert_eq!(fields.bags, "true");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("Heathrow"), "Heathrow");
    }

    #[test]
    fn test_generated_ref_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let reference = BookingRef::generate_at("OET", at, 234);
        assert_eq!(reference.as_str(), "OET-20240501-0900-1234");
    }

    #[test]
    fn test_ref_suffix_stays_four_digits() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(
            BookingRef::generate_at("OET", at, 0).as_str(),
            "OET-20241231-2359-1000"
        );
        assert_eq!(
            BookingRef::generate_at("OET", at, 8999).as_str(),
            "OET-20241231-2359-9999"
        );
        // Suffix wraps rather than growing a fifth digit
        assert_eq!(
            BookingRef::generate_at("OET", at, 9000).as_str(),
            "OET-20241231-2359-1000"
        );
    }

    #[test]
    fn test_supplied_ref_wins() {
        let reference = BookingRef::resolve("CUSTOM-1", "OET");
        assert_eq!(reference.as_str(), "CUSTOM-1");
    }

    #[test]
    fn test_empty_ref_generates() {
        let reference = BookingRef::resolve("", "OET");
        let parts: Vec<&str> = reference.as_str().split('-').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "OET");
        assert_eq!(parts[1].len(), 8);
        assert_eq!(parts[2].len(), 4);
        assert_eq!(parts[3].len(), 4);
        assert!(parts[1..].iter().all(|p| p.chars().all(|c| c.is_ascii_digit())));
    }

    proptest! {
        /// Surrounding whitespace never changes the normalized record.
        #[test]
        fn prop_padded_input_normalizes_identically(s in "[a-zA-Z0-9 .,]{0,32}") {
            let plain = QuoteFields::from_json(&json!({ "pickup": s.trim() }));
            let padded = QuoteFields::from_json(&json!({ "pickup": format!("  {}  ", s) }));
            prop_assert_eq!(plain, padded);
        }

        /// Normalization is idempotent: feeding a normalized record back in
        /// reproduces it exactly.
        #[test]
        fn prop_normalization_is_idempotent(name in "[a-zA-Z ]{0,16}", notes in "[a-zA-Z0-9 ]{0,32}") {
            let once = QuoteFields::from_json(&json!({ "name": name, "notes": notes }));
            let twice = QuoteFields::from_json(&json!({ "name": once.name, "notes": once.notes }));
            prop_assert_eq!(once, twice);
        }
    }
}
