use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Largest price or shipping amount accepted from a client. Keeps every
/// amount well inside the digits an f64 JSON number carries exactly to the cent.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// One rejected field in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Every violation found in a request, collected in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Money fields: zero up to [`MAX_AMOUNT`].
    pub fn require_amount(&mut self, field: &str, value: Decimal) {
        if value < Decimal::ZERO {
            self.add(field, "must be greater than or equal to 0");
        } else if value > MAX_AMOUNT {
            self.add(field, format!("must not exceed {MAX_AMOUNT}"));
        }
    }

    pub fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "must not be empty");
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.violations.iter().map(|v| v.field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Structural address check: `local@domain.tld`, no whitespace, no empty
/// labels in the domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

pub fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("jane.doe@example.com"));
        assert!(is_valid_email("a+tag@mail.example.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "plain", "@example.com", "a@", "a@b", "a@@b.com", "a b@c.com", "a@-x.com", "a@x..com"] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn collects_every_violation() {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "  ");
        errors.require_text("category", "");
        errors.require_text("description", "ok");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.violations().len(), 2);
        assert_eq!(err.to_string(), "invalid fields: title, category");
    }

    #[test]
    fn amounts_are_bounded_on_both_sides() {
        let mut errors = ValidationErrors::new();
        errors.require_amount("price", Decimal::ZERO);
        errors.require_amount("price", MAX_AMOUNT);
        assert!(errors.is_empty());

        errors.require_amount("price", Decimal::new(-1, 2));
        errors.require_amount("shipping", MAX_AMOUNT + Decimal::new(1, 2));
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.violations()[0].message, "must be greater than or equal to 0");
        assert_eq!(err.violations()[1].field, "shipping");
        assert_eq!(err.violations()[1].message, "must not exceed 1000000000");
    }

    #[test]
    fn image_urls_need_a_scheme_and_host() {
        assert!(is_http_url("https://images.example.com/tee.jpg"));
        assert!(!is_http_url("ftp://example.com/x"));
        assert!(!is_http_url("https://"));
    }
}
