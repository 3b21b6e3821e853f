//! Unified error codes for the smart cart backend
//!
//! Error codes are shared by cart-server and the web frontend (via API).
//! They are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Cart errors
//! - 5xxx: Payment errors
//! - 6xxx: Product / inventory errors
//! - 7xxx: Ledger / bill errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the frontend can switch
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Cart ====================
    /// Cart has not been paid yet (verify before pay)
    CartNotPaid = 4001,
    /// Cart has no items
    CartEmpty = 4002,

    // ==================== 5xxx: Payment ====================
    /// Payment failed
    PaymentFailed = 5001,
    /// Gateway signature did not match
    PaymentSignatureInvalid = 5002,
    /// Payment gateway credentials are not configured
    PaymentGatewayNotConfigured = 5003,
    /// Payment gateway returned an error or could not be reached
    PaymentGatewayError = 5004,
    /// Payment amount is invalid
    PaymentInvalidAmount = 5005,

    // ==================== 6xxx: Product ====================
    /// Product (barcode) not found in inventory
    ProductNotFound = 6001,
    /// Inventory file could not be read
    InventoryLoadFailed = 6002,

    // ==================== 7xxx: Ledger ====================
    /// Ledger write failed
    LedgerWriteFailed = 7001,
    /// Ledger read failed
    LedgerReadFailed = 7002,
    /// Bill reset failed
    BillResetFailed = 7003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Network error
    NetworkError = 9004,
    /// Timeout error
    TimeoutError = 9005,
    /// Mail delivery failed
    MailDeliveryFailed = 9201,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Cart
            ErrorCode::CartNotPaid => "Payment not completed",
            ErrorCode::CartEmpty => "Cart is empty",

            // Payment
            ErrorCode::PaymentFailed => "Payment failed",
            ErrorCode::PaymentSignatureInvalid => "Invalid payment signature",
            ErrorCode::PaymentGatewayNotConfigured => "Payment gateway not configured",
            ErrorCode::PaymentGatewayError => "Payment gateway error",
            ErrorCode::PaymentInvalidAmount => "Invalid payment amount",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::InventoryLoadFailed => "Failed to load inventory",

            // Ledger
            ErrorCode::LedgerWriteFailed => "Failed to record transaction",
            ErrorCode::LedgerReadFailed => "Failed to fetch transactions",
            ErrorCode::BillResetFailed => "Failed to reset bill",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::MailDeliveryFailed => "Failed to send email",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Cart
            4001 => Ok(ErrorCode::CartNotPaid),
            4002 => Ok(ErrorCode::CartEmpty),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentSignatureInvalid),
            5003 => Ok(ErrorCode::PaymentGatewayNotConfigured),
            5004 => Ok(ErrorCode::PaymentGatewayError),
            5005 => Ok(ErrorCode::PaymentInvalidAmount),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::InventoryLoadFailed),

            // Ledger
            7001 => Ok(ErrorCode::LedgerWriteFailed),
            7002 => Ok(ErrorCode::LedgerReadFailed),
            7003 => Ok(ErrorCode::BillResetFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::NetworkError),
            9005 => Ok(ErrorCode::TimeoutError),
            9201 => Ok(ErrorCode::MailDeliveryFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
