//! Unified error codes
//!
//! Error codes are shared by the server and its clients, organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Cart errors
//! - 4xxx: Order errors
//! - 5xxx: Reservation errors
//! - 6xxx: Product / stock errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
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
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,
    /// Resource belongs to another user
    NotOwner = 2006,

    // ==================== 3xxx: Cart ====================
    /// No cart lines selected for checkout
    CartEmpty = 3001,
    /// Cart line not found
    CartLineNotFound = 3002,
    /// Quantity outside the accepted range
    InvalidQuantity = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order cannot be cancelled in its current state
    OrderNotCancelable = 4002,
    /// Requested status transition is not allowed
    OrderInvalidTransition = 4003,
    /// Pickup number retries exhausted
    SequenceExhausted = 4004,

    // ==================== 5xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 5001,
    /// Reservation date outside the accepted window
    InvalidReservationWindow = 5002,
    /// Reservation is no longer pending
    ReservationNotPending = 5003,
    /// Reservation has not been paid
    ReservationNotPayable = 5004,
    /// Product does not accept reservations
    ReservationNotEnabled = 5005,

    // ==================== 6xxx: Product / Stock ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Not enough stock for the requested quantity
    InsufficientStock = 6003,
    /// Product is not listed for sale
    ProductUnavailable = 6004,
    /// Product is in stock and must be bought through checkout
    ProductInStock = 6005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
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
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::NotOwner => "Resource belongs to another user",

            // Cart
            ErrorCode::CartEmpty => "No cart items selected",
            ErrorCode::CartLineNotFound => "Cart item not found",
            ErrorCode::InvalidQuantity => "Invalid quantity",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderNotCancelable => "Order cannot be cancelled in its current state",
            ErrorCode::OrderInvalidTransition => "Order status transition is not allowed",
            ErrorCode::SequenceExhausted => "Could not allocate a pickup number, please retry",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::InvalidReservationWindow => {
                "Reservation date must be between tomorrow and three days from today"
            }
            ErrorCode::ReservationNotPending => "Reservation is not pending",
            ErrorCode::ReservationNotPayable => "Reservation has not been paid",
            ErrorCode::ReservationNotEnabled => "Product does not accept reservations",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has an invalid price",
            ErrorCode::InsufficientStock => "Insufficient stock",
            ErrorCode::ProductUnavailable => "Product is not available",
            ErrorCode::ProductInStock => "Product is in stock, please order it directly",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
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
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),
            2006 => Ok(ErrorCode::NotOwner),

            // Cart
            3001 => Ok(ErrorCode::CartEmpty),
            3002 => Ok(ErrorCode::CartLineNotFound),
            3003 => Ok(ErrorCode::InvalidQuantity),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderNotCancelable),
            4003 => Ok(ErrorCode::OrderInvalidTransition),
            4004 => Ok(ErrorCode::SequenceExhausted),

            // Reservation
            5001 => Ok(ErrorCode::ReservationNotFound),
            5002 => Ok(ErrorCode::InvalidReservationWindow),
            5003 => Ok(ErrorCode::ReservationNotPending),
            5004 => Ok(ErrorCode::ReservationNotPayable),
            5005 => Ok(ErrorCode::ReservationNotEnabled),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::InsufficientStock),
            6004 => Ok(ErrorCode::ProductUnavailable),
            6005 => Ok(ErrorCode::ProductInStock),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
