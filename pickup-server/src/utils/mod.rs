//! Utility module
//!
//! - [`AppError`] / [`ApiResponse`] (from `shared::error`)
//! - logging, business-timezone and input validation helpers

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use error::{ok, ok_with_message};
