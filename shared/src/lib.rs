//! Shared types for the pickup ordering backend
//!
//! Domain models, the error taxonomy and the API response envelope used by
//! the server and its clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
