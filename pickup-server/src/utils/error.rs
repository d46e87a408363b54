//! Unified error handling
//!
//! Re-exports the shared error system and adds response helpers for
//! handlers. Error codes are grouped by range:
//!
//! | Range | Category |
//! |-------|----------|
//! | 0xxx | General |
//! | 1xxx | Auth |
//! | 2xxx | Permission |
//! | 3xxx | Cart |
//! | 4xxx | Order |
//! | 5xxx | Reservation |
//! | 6xxx | Product / stock |
//! | 9xxx | System |
//!
//! ```ignore
//! Err(AppError::new(ErrorCode::OrderNotFound))
//! Ok(ok(order_detail))
//! ```

use axum::Json;
use serde::Serialize;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}
