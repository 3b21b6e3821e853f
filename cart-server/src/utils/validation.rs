//! Input validation helpers
//!
//! Request DTOs carry `Option` fields so a missing field surfaces as a
//! `RequiredField` error instead of a deserialization rejection.

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Cart identifiers and barcodes
pub const MAX_ID_LEN: usize = 128;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Phone numbers, payment method labels, gateway ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Gateway signatures (hex SHA-256 is 64 chars)
pub const MAX_SIGNATURE_LEN: usize = 256;

/// Largest accepted payment amount
pub const MAX_PAYMENT_AMOUNT: f64 = 10_000_000.0;

// ── Helpers ─────────────────────────────────────────────────────────

/// Trimmed value if present and non-blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validate that a value is within the length limit.
pub fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Collect the names of blank fields; empty when all are present
pub fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| non_blank(*value).is_none())
        .map(|(name, _)| *name)
        .collect()
}

/// Validate a payment amount: finite, positive, bounded.
pub fn validate_amount(amount: f64) -> Result<(), AppError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::with_message(
            ErrorCode::PaymentInvalidAmount,
            format!("amount must be a positive number, got {amount}"),
        ));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(AppError::with_message(
            ErrorCode::PaymentInvalidAmount,
            format!("amount exceeds maximum allowed ({MAX_PAYMENT_AMOUNT})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  C1 ")), Some("C1"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_missing_fields() {
        let missing = missing_fields(&[("cartId", Some("C1")), ("barcode", Some(" "))]);
        assert_eq!(missing, vec!["barcode"]);
        assert!(missing_fields(&[("cartId", Some("C1"))]).is_empty());
    }

    #[test]
    fn test_validate_len() {
        assert!(validate_len("abc", "cartId", MAX_ID_LEN).is_ok());
        let err = validate_len(&"x".repeat(MAX_ID_LEN + 1), "cartId", MAX_ID_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(100.0).is_ok());
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, MAX_PAYMENT_AMOUNT + 1.0] {
            let err = validate_amount(bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::PaymentInvalidAmount);
        }
    }
}
