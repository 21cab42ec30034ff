//! Input validation helpers
//!
//! Centralized text length constants and validation functions shared by the
//! admin product forms and the contact form.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::CategorySet;

// ── Text length limits ──────────────────────────────────────────────

/// Product titles
pub const MAX_TITLE_LEN: usize = 100;

/// Product descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Contact names
pub const MAX_NAME_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Contact subjects
pub const MAX_SUBJECT_LEN: usize = 200;

/// Contact message bodies
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Upper bound for product prices
pub const MAX_PRICE: u32 = 999_999;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &str,
    max_len: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(ValidationError::new(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that a string is within the length limit (empty is allowed).
pub fn validate_text(value: &str, field: &str, max_len: usize) -> Result<(), ValidationError> {
    if value.len() > max_len {
        return Err(ValidationError::new(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that a required string has at least `min_len` characters.
pub fn validate_min_text(
    value: &str,
    field: &str,
    min_len: usize,
    max_len: usize,
) -> Result<(), ValidationError> {
    let chars = value.trim().chars().count();
    if chars < min_len {
        return Err(ValidationError::new(format!(
            "{field} must have at least {min_len} characters"
        )));
    }
    validate_text(value, field, max_len)
}

/// Validate an email address shape.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::new(format!(
            "email is too long ({} chars, max {MAX_EMAIL_LEN})",
            value.len()
        )));
    }
    let plausible = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });
    if !plausible {
        return Err(ValidationError::new("email address is not valid"));
    }
    Ok(())
}

/// Validate a product price: positive and below the upper bound.
pub fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::new("price must be positive"));
    }
    if price > Decimal::from(MAX_PRICE) {
        return Err(ValidationError::new(format!(
            "price is too high (max {MAX_PRICE})"
        )));
    }
    Ok(())
}

/// Validate that a category name belongs to the configured set.
pub fn validate_category(name: &str, categories: &CategorySet) -> Result<(), ValidationError> {
    if !categories.contains(name) {
        return Err(ValidationError::new(format!(
            "category '{name}' is not one of the configured set"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Termo", "title", MAX_TITLE_LEN).is_ok());
        assert!(validate_required_text("", "title", MAX_TITLE_LEN).is_err());
        assert!(validate_required_text("   ", "title", MAX_TITLE_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(101), "title", MAX_TITLE_LEN).is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("ventas@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user@.example.com").is_err());
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate_price(Decimal::from(1)).is_ok());
        assert!(validate_price(Decimal::ZERO).is_err());
        assert!(validate_price(Decimal::from(-5)).is_err());
        assert!(validate_price(Decimal::from(1_000_000)).is_err());
    }

    #[test]
    fn test_category_membership() {
        let categories = CategorySet::new(["Mates", "Termos"]);
        assert!(validate_category("Mates", &categories).is_ok());
        assert!(validate_category("Bombillas", &categories).is_err());
    }
}
