//! `AppError` and the response envelope

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned by every core operation and handler.
///
/// `details` names the offending entity (`product_id`, `order_id`,
/// `reservation_id`, ...) so clients can point at it without parsing the
/// message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach one detail entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }

    // ---- lookups ----

    pub fn product_not_found(product_id: i64) -> Self {
        Self::new(ErrorCode::ProductNotFound).with_detail("product_id", product_id)
    }

    pub fn order_not_found(order_id: i64) -> Self {
        Self::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id)
    }

    pub fn reservation_not_found(reservation_id: i64) -> Self {
        Self::new(ErrorCode::ReservationNotFound).with_detail("reservation_id", reservation_id)
    }

    /// `key` is the id field of the resource, e.g. `"order_id"`
    pub fn not_owner(key: &str, id: i64) -> Self {
        Self::new(ErrorCode::NotOwner).with_detail(key, id)
    }

    pub fn product_unavailable(product_id: i64) -> Self {
        Self::new(ErrorCode::ProductUnavailable).with_detail("product_id", product_id)
    }

    // ---- generic ----

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    // ---- auth ----

    /// No bearer token
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }
}

/// Response envelope shared by success and error bodies
///
/// ```json
/// { "code": 0, "message": "OK", "data": { ... } }
/// { "code": 6003, "message": "Insufficient stock for Latte", "details": { "product_id": 7 } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 0 on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::success_with_message("OK", data)
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: Some(ErrorCode::Success.code()),
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error");
        }
        (self.http_status(), axum::Json(ApiResponse::error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message() {
        let err = AppError::new(ErrorCode::InsufficientStock);
        assert_eq!(err.message, "Insufficient stock");
        assert!(err.details.is_none());
        assert_eq!(err.to_string(), "Insufficient stock");
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::product_not_found(42).with_detail("product_name", "Matcha latte");
        assert!(err.is(ErrorCode::ProductNotFound));

        let details = err.details.unwrap();
        assert_eq!(details["product_id"], 42);
        assert_eq!(details["product_name"], "Matcha latte");
    }

    #[test]
    fn test_lookup_constructors_name_the_entity() {
        let err = AppError::not_owner("reservation_id", 9);
        assert_eq!(err.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(err.details.unwrap()["reservation_id"], 9);

        let err = AppError::order_not_found(7);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.details.unwrap()["order_id"], 7);
    }

    #[test]
    fn test_error_envelope() {
        let err = AppError::not_owner("order_id", 123);
        let response = ApiResponse::<()>::error(&err);

        assert_eq!(response.code, Some(2006));
        assert_eq!(response.message, "Resource belongs to another user");
        assert!(response.data.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["details"]["order_id"], 123);
    }

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_value(ApiResponse::success("001")).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["message"], "OK");
        assert_eq!(json["data"], "001");
        assert!(json.get("details").is_none());
    }
}
